use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{AtBat, Player};

// GET /players - List all players
pub async fn get_players(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = db::list_players(&pool).await?;

    tracing::debug!(count = players.len(), "Listed players");

    Ok(Json(players))
}

// GET /players/{id}/at-bats - List a player's at-bats, oldest first
pub async fn get_player_at_bats(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<i64>,
) -> Result<Json<Vec<AtBat>>, ApiError> {
    db::find_player(&pool, player_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let at_bats = db::list_at_bats(&pool, player_id).await?;

    Ok(Json(at_bats))
}
