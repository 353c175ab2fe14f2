//! Table definitions for a fresh database.
//!
//! Production databases are provisioned outside of this service; this only runs when
//! `BOOTSTRAP_SCHEMA` is set, and in tests.

use sqlx::sqlite::SqlitePool;

const CREATE_PLAYERS: &str = r#"
CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    team TEXT NOT NULL,
    position TEXT NOT NULL,
    games_played INTEGER NOT NULL DEFAULT 0 CHECK (games_played >= 0),
    runs_scored INTEGER NOT NULL DEFAULT 0 CHECK (runs_scored >= 0),
    hits INTEGER NOT NULL DEFAULT 0 CHECK (hits >= 0),
    home_runs INTEGER NOT NULL DEFAULT 0 CHECK (home_runs >= 0)
)"#;

const CREATE_AT_BATS: &str = r#"
CREATE TABLE IF NOT EXISTS at_bats (
    id INTEGER PRIMARY KEY,
    player_id INTEGER NOT NULL REFERENCES players (id),
    result TEXT NOT NULL CHECK (result IN (
        'single', 'double', 'triple', 'home_run',
        'strikeout_swinging', 'strikeout_looking', 'walk',
        'ground_out', 'fly_out', 'line_out', 'fielder_choice',
        'sacrifice_fly', 'sacrifice_bunt', 'hit_by_pitch'
    )),
    pitch_count INTEGER NOT NULL CHECK (pitch_count >= 0),
    date TEXT NOT NULL
)"#;

const CREATE_AT_BATS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_at_bats_player_id ON at_bats (player_id)";

/// Create the `players` and `at_bats` tables if they don't exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_PLAYERS, CREATE_AT_BATS, CREATE_AT_BATS_INDEX] {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database schema is up to date.");
    Ok(())
}
