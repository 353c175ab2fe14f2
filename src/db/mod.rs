use sqlx::sqlite::SqlitePool;

use crate::error::ApiError;
use crate::models::*;

mod schema;

pub use schema::ensure_schema;

/// Open the connection pool. Connects eagerly so a bad URL fails at startup.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePool::connect(database_url).await
}

// Player queries
pub async fn list_players(pool: &SqlitePool) -> Result<Vec<Player>, ApiError> {
    let rows = sqlx::query_as::<_, PlayerRow>(
        r#"SELECT id, name, team, position, games_played, runs_scored, hits, home_runs
           FROM players"#
    )
    .fetch_all(pool)
    .await?;

    // One bad row fails the whole listing
    let players = rows
        .into_iter()
        .map(Player::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(players)
}

pub async fn find_player(pool: &SqlitePool, player_id: i64) -> Result<Option<Player>, ApiError> {
    let row = sqlx::query_as::<_, PlayerRow>(
        r#"SELECT id, name, team, position, games_played, runs_scored, hits, home_runs
           FROM players
           WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Player::try_from).transpose()?)
}

// At-bat queries
pub async fn list_at_bats(pool: &SqlitePool, player_id: i64) -> Result<Vec<AtBat>, ApiError> {
    let rows = sqlx::query_as::<_, AtBatRow>(
        r#"SELECT id, player_id, result, pitch_count, date
           FROM at_bats
           WHERE player_id = ?
           ORDER BY date, id"#
    )
    .bind(player_id)
    .fetch_all(pool)
    .await?;

    let at_bats = rows
        .into_iter()
        .map(AtBat::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(at_bats)
}
