use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of a single plate appearance.
///
/// This is a closed set: anything stored outside of it is treated as corrupt data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatResult {
    Single,
    Double,
    Triple,
    HomeRun,
    StrikeoutSwinging,
    StrikeoutLooking,
    Walk,
    GroundOut,
    FlyOut,
    LineOut,
    FielderChoice,
    SacrificeFly,
    SacrificeBunt,
    HitByPitch,
}

impl AtBatResult {
    pub const ALL: [AtBatResult; 14] = [
        AtBatResult::Single,
        AtBatResult::Double,
        AtBatResult::Triple,
        AtBatResult::HomeRun,
        AtBatResult::StrikeoutSwinging,
        AtBatResult::StrikeoutLooking,
        AtBatResult::Walk,
        AtBatResult::GroundOut,
        AtBatResult::FlyOut,
        AtBatResult::LineOut,
        AtBatResult::FielderChoice,
        AtBatResult::SacrificeFly,
        AtBatResult::SacrificeBunt,
        AtBatResult::HitByPitch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AtBatResult::Single => "single",
            AtBatResult::Double => "double",
            AtBatResult::Triple => "triple",
            AtBatResult::HomeRun => "home_run",
            AtBatResult::StrikeoutSwinging => "strikeout_swinging",
            AtBatResult::StrikeoutLooking => "strikeout_looking",
            AtBatResult::Walk => "walk",
            AtBatResult::GroundOut => "ground_out",
            AtBatResult::FlyOut => "fly_out",
            AtBatResult::LineOut => "line_out",
            AtBatResult::FielderChoice => "fielder_choice",
            AtBatResult::SacrificeFly => "sacrifice_fly",
            AtBatResult::SacrificeBunt => "sacrifice_bunt",
            AtBatResult::HitByPitch => "hit_by_pitch",
        }
    }
}

impl fmt::Display for AtBatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown at-bat result `{0}`")]
pub struct UnknownAtBatResult(pub String);

impl FromStr for AtBatResult {
    type Err = UnknownAtBatResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AtBatResult::ALL
            .into_iter()
            .find(|result| result.as_str() == s)
            .ok_or_else(|| UnknownAtBatResult(s.to_string()))
    }
}

/// A single plate appearance, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtBat {
    pub id: i64,
    pub player_id: i64,
    pub result: AtBatResult,
    pub pitch_count: i64,
    pub date: String,
}

/// Player record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team: String,
    pub position: String,
    pub games_played: i64,
    pub runs_scored: i64,
    pub hits: i64,
    pub home_runs: i64,
    /// Left empty by the listing endpoint; see `GET /players/{id}/at-bats`.
    pub at_bats: Vec<AtBat>,
}

/// Why a database row could not be turned into an API record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowMappingError {
    #[error("{table} row without an id")]
    MissingId { table: &'static str },

    #[error("{table} row {id}: column `{column}` is NULL")]
    NullColumn {
        table: &'static str,
        id: i64,
        column: &'static str,
    },

    #[error("{table} row {id}: column `{column}` is negative ({value})")]
    NegativeCount {
        table: &'static str,
        id: i64,
        column: &'static str,
        value: i64,
    },

    #[error("at_bats row {id}: {source}")]
    UnknownResult {
        id: i64,
        #[source]
        source: UnknownAtBatResult,
    },
}

/// Which row is being mapped, for error reporting.
struct RowContext {
    table: &'static str,
    id: i64,
}

impl RowContext {
    fn new(table: &'static str, id: Option<i64>) -> Result<Self, RowMappingError> {
        let id = id.ok_or(RowMappingError::MissingId { table })?;
        Ok(RowContext { table, id })
    }

    fn required<T>(&self, column: &'static str, value: Option<T>) -> Result<T, RowMappingError> {
        value.ok_or(RowMappingError::NullColumn {
            table: self.table,
            id: self.id,
            column,
        })
    }

    fn count(&self, column: &'static str, value: Option<i64>) -> Result<i64, RowMappingError> {
        let value = self.required(column, value)?;
        if value < 0 {
            return Err(RowMappingError::NegativeCount {
                table: self.table,
                id: self.id,
                column,
                value,
            });
        }
        Ok(value)
    }
}

/// Row from the `players` table.
///
/// Every column is optional here: SQLite hands back NULL for any of them, and the
/// conversion into [`Player`] is what rejects it.
#[derive(Debug, sqlx::FromRow)]
pub struct PlayerRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub games_played: Option<i64>,
    pub runs_scored: Option<i64>,
    pub hits: Option<i64>,
    pub home_runs: Option<i64>,
}

impl TryFrom<PlayerRow> for Player {
    type Error = RowMappingError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        let ctx = RowContext::new("players", row.id)?;

        Ok(Player {
            id: ctx.id,
            name: ctx.required("name", row.name)?,
            team: ctx.required("team", row.team)?,
            position: ctx.required("position", row.position)?,
            games_played: ctx.count("games_played", row.games_played)?,
            runs_scored: ctx.count("runs_scored", row.runs_scored)?,
            hits: ctx.count("hits", row.hits)?,
            home_runs: ctx.count("home_runs", row.home_runs)?,
            at_bats: Vec::new(),
        })
    }
}

/// Row from the `at_bats` table. `result` stays raw text until it is validated.
#[derive(Debug, sqlx::FromRow)]
pub struct AtBatRow {
    pub id: Option<i64>,
    pub player_id: Option<i64>,
    pub result: Option<String>,
    pub pitch_count: Option<i64>,
    pub date: Option<String>,
}

impl TryFrom<AtBatRow> for AtBat {
    type Error = RowMappingError;

    fn try_from(row: AtBatRow) -> Result<Self, Self::Error> {
        let ctx = RowContext::new("at_bats", row.id)?;

        let result = ctx
            .required("result", row.result)?
            .parse::<AtBatResult>()
            .map_err(|source| RowMappingError::UnknownResult { id: ctx.id, source })?;

        Ok(AtBat {
            id: ctx.id,
            player_id: ctx.required("player_id", row.player_id)?,
            result,
            pitch_count: ctx.count("pitch_count", row.pitch_count)?,
            date: ctx.required("date", row.date)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_row() -> PlayerRow {
        PlayerRow {
            id: Some(7),
            name: Some("Mookie Betts".to_string()),
            team: Some("LAD".to_string()),
            position: Some("RF".to_string()),
            games_played: Some(152),
            runs_scored: Some(110),
            hits: Some(179),
            home_runs: Some(19),
        }
    }

    fn at_bat_row() -> AtBatRow {
        AtBatRow {
            id: Some(3),
            player_id: Some(7),
            result: Some("double".to_string()),
            pitch_count: Some(4),
            date: Some("2024-04-01".to_string()),
        }
    }

    #[test]
    fn every_result_parses_from_its_own_name() {
        for result in AtBatResult::ALL {
            assert_eq!(result.as_str().parse::<AtBatResult>(), Ok(result));
        }
    }

    #[test]
    fn result_names_match_serde_representation() {
        for result in AtBatResult::ALL {
            let json = serde_json::to_value(result).unwrap();
            assert_eq!(json, serde_json::Value::String(result.to_string()));
        }
    }

    #[test]
    fn unknown_results_are_rejected() {
        for raw in ["bunt_single", "HOME_RUN", "", "home run"] {
            assert_eq!(
                raw.parse::<AtBatResult>(),
                Err(UnknownAtBatResult(raw.to_string()))
            );
        }
        assert!(serde_json::from_str::<AtBatResult>("\"balk\"").is_err());
    }

    #[test]
    fn player_row_maps_every_column() {
        let player = Player::try_from(player_row()).unwrap();

        assert_eq!(player.id, 7);
        assert_eq!(player.name, "Mookie Betts");
        assert_eq!(player.team, "LAD");
        assert_eq!(player.position, "RF");
        assert_eq!(player.games_played, 152);
        assert_eq!(player.runs_scored, 110);
        assert_eq!(player.hits, 179);
        assert_eq!(player.home_runs, 19);
        assert!(player.at_bats.is_empty());
    }

    #[test]
    fn negative_counters_fail_mapping() {
        let row = PlayerRow { home_runs: Some(-1), ..player_row() };

        assert_eq!(
            Player::try_from(row),
            Err(RowMappingError::NegativeCount {
                table: "players",
                id: 7,
                column: "home_runs",
                value: -1,
            })
        );
    }

    #[test]
    fn at_bat_row_with_unknown_result_fails_mapping() {
        let row = AtBatRow {
            result: Some("balk".to_string()),
            ..at_bat_row()
        };

        let err = AtBat::try_from(row).unwrap_err();
        assert!(matches!(err, RowMappingError::UnknownResult { id: 3, .. }));
    }

    #[test]
    fn null_player_columns_fail_mapping() {
        let row = PlayerRow { hits: None, ..player_row() };
        assert_eq!(
            Player::try_from(row),
            Err(RowMappingError::NullColumn {
                table: "players",
                id: 7,
                column: "hits",
            })
        );

        let row = PlayerRow { name: None, ..player_row() };
        assert_eq!(
            Player::try_from(row),
            Err(RowMappingError::NullColumn {
                table: "players",
                id: 7,
                column: "name",
            })
        );

        let row = PlayerRow { id: None, ..player_row() };
        assert_eq!(
            Player::try_from(row),
            Err(RowMappingError::MissingId { table: "players" })
        );
    }

    #[test]
    fn null_at_bat_columns_fail_mapping() {
        assert!(AtBat::try_from(at_bat_row()).is_ok());

        let row = AtBatRow { pitch_count: None, ..at_bat_row() };
        assert_eq!(
            AtBat::try_from(row),
            Err(RowMappingError::NullColumn {
                table: "at_bats",
                id: 3,
                column: "pitch_count",
            })
        );

        let row = AtBatRow { result: None, ..at_bat_row() };
        assert!(matches!(
            AtBat::try_from(row),
            Err(RowMappingError::NullColumn { column: "result", .. })
        ));
    }

    #[test]
    fn player_serializes_with_column_names() {
        let player = Player::try_from(player_row()).unwrap();
        let json = serde_json::to_value(&player).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Mookie Betts",
                "team": "LAD",
                "position": "RF",
                "games_played": 152,
                "runs_scored": 110,
                "hits": 179,
                "home_runs": 19,
                "at_bats": [],
            })
        );
    }
}
