//! JSON snapshot of a stored match.
//!
//! This is the format exported by the scoring app. It is deliberately
//! forgiving: nearly every field has a default so that partial exports
//! still render.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Color, GameKind, League, Player, Position, Rules, Sanction, StoredGameView, Substitution,
    TeamType, Timeout,
};
use crate::error::{Error, Result};

static EMPTY_SET: SetSnapshot = SetSnapshot::EMPTY;

/// A complete stored match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGame {
    /// Match identifier.
    pub id: String,
    /// Kind of volleyball.
    pub kind: GameKind,
    /// League, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<League>,
    /// Scheduled date, epoch milliseconds.
    #[serde(default)]
    pub scheduled_at: i64,
    /// Match start, epoch milliseconds.
    #[serde(default)]
    pub start_time: i64,
    /// Match end, epoch milliseconds.
    #[serde(default)]
    pub end_time: i64,
    /// Ruleset flags.
    #[serde(default)]
    pub rules: Rules,
    /// Home team.
    pub home_team: TeamSnapshot,
    /// Guest team.
    pub guest_team: TeamSnapshot,
    /// Sets in play order.
    #[serde(default)]
    pub sets: Vec<SetSnapshot>,
}

/// Team-level data of a stored match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    /// Display name.
    pub name: String,
    /// Shirt color.
    #[serde(default = "default_team_color")]
    pub color: Color,
    /// Libero shirt color.
    #[serde(default = "default_team_color")]
    pub libero_color: Color,
    /// Captain's shirt number.
    #[serde(default = "no_player")]
    pub captain: i32,
    /// Sets won.
    #[serde(default)]
    pub sets: u32,
    /// Roster.
    #[serde(default)]
    pub players: Vec<Player>,
    /// Shirt numbers of the liberos.
    #[serde(default)]
    pub liberos: Vec<i32>,
}

/// One set of a stored match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSnapshot {
    /// Home points.
    #[serde(default)]
    pub home_points: u32,
    /// Guest points.
    #[serde(default)]
    pub guest_points: u32,
    /// Start, epoch milliseconds.
    #[serde(default)]
    pub start_time: i64,
    /// End, epoch milliseconds.
    #[serde(default)]
    pub end_time: i64,
    /// Playing time, milliseconds.
    #[serde(default)]
    pub duration: i64,
    /// Team that served first.
    #[serde(default = "default_first_serving_team")]
    pub first_serving_team: TeamType,
    /// Which team scored each point.
    #[serde(default)]
    pub ladder: Vec<TeamType>,
    /// Home team events.
    #[serde(default)]
    pub home: SetTeamSnapshot,
    /// Guest team events.
    #[serde(default)]
    pub guest: SetTeamSnapshot,
}

/// Per-team events of one set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTeamSnapshot {
    /// Starting lineup indexed by position minus one, or `None` when the
    /// lineup was never confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_lineup: Option<Vec<i32>>,
    /// Substitutions.
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    /// Timeouts.
    #[serde(default)]
    pub timeouts: Vec<Timeout>,
    /// Sanctions.
    #[serde(default)]
    pub sanctions: Vec<Sanction>,
}

fn default_team_color() -> Color {
    Color::WHITE
}

fn no_player() -> i32 {
    -1
}

fn default_first_serving_team() -> TeamType {
    TeamType::Home
}

impl SetSnapshot {
    const EMPTY: Self = Self {
        home_points: 0,
        guest_points: 0,
        start_time: 0,
        end_time: 0,
        duration: 0,
        first_serving_team: TeamType::Home,
        ladder: Vec::new(),
        home: SetTeamSnapshot {
            starting_lineup: None,
            substitutions: Vec::new(),
            timeouts: Vec::new(),
            sanctions: Vec::new(),
        },
        guest: SetTeamSnapshot {
            starting_lineup: None,
            substitutions: Vec::new(),
            timeouts: Vec::new(),
            sanctions: Vec::new(),
        },
    };

    fn team(&self, team: TeamType) -> &SetTeamSnapshot {
        match team {
            TeamType::Home => &self.home,
            TeamType::Guest => &self.guest,
        }
    }
}

impl StoredGame {
    /// Parse a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or misses required fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading game snapshot from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|source| Error::SnapshotLoad {
            path: path.to_path_buf(),
            source,
        })
    }

    fn team(&self, team: TeamType) -> &TeamSnapshot {
        match team {
            TeamType::Home => &self.home_team,
            TeamType::Guest => &self.guest_team,
        }
    }

    fn set(&self, set_index: usize) -> &SetSnapshot {
        self.sets.get(set_index).unwrap_or(&EMPTY_SET)
    }
}

impl StoredGameView for StoredGame {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> GameKind {
        self.kind
    }

    fn league(&self) -> Option<&League> {
        self.league.as_ref()
    }

    fn scheduled_at(&self) -> i64 {
        self.scheduled_at
    }

    fn start_time(&self) -> i64 {
        self.start_time
    }

    fn end_time(&self) -> i64 {
        self.end_time
    }

    fn rules(&self) -> Rules {
        self.rules
    }

    fn team_name(&self, team: TeamType) -> &str {
        &self.team(team).name
    }

    fn team_color(&self, team: TeamType) -> Color {
        self.team(team).color
    }

    fn libero_color(&self, team: TeamType) -> Color {
        self.team(team).libero_color
    }

    fn players(&self, team: TeamType) -> &[Player] {
        &self.team(team).players
    }

    fn is_libero(&self, team: TeamType, num: i32) -> bool {
        self.team(team).liberos.contains(&num)
    }

    fn captain(&self, team: TeamType) -> i32 {
        self.team(team).captain
    }

    fn sets(&self, team: TeamType) -> u32 {
        self.team(team).sets
    }

    fn number_of_sets(&self) -> usize {
        self.sets.len()
    }

    fn points(&self, team: TeamType, set_index: usize) -> u32 {
        let set = self.set(set_index);
        match team {
            TeamType::Home => set.home_points,
            TeamType::Guest => set.guest_points,
        }
    }

    fn set_start_time(&self, set_index: usize) -> i64 {
        self.set(set_index).start_time
    }

    fn set_end_time(&self, set_index: usize) -> i64 {
        self.set(set_index).end_time
    }

    fn set_duration(&self, set_index: usize) -> i64 {
        self.set(set_index).duration
    }

    fn is_starting_lineup_confirmed(&self, team: TeamType, set_index: usize) -> bool {
        self.set(set_index).team(team).starting_lineup.is_some()
    }

    fn player_at_position_in_starting_lineup(
        &self,
        team: TeamType,
        position: Position,
        set_index: usize,
    ) -> i32 {
        self.set(set_index)
            .team(team)
            .starting_lineup
            .as_ref()
            .and_then(|lineup| lineup.get(position.number() - 1).copied())
            .unwrap_or(-1)
    }

    fn substitutions(&self, team: TeamType, set_index: usize) -> &[Substitution] {
        &self.set(set_index).team(team).substitutions
    }

    fn called_timeouts(&self, team: TeamType, set_index: usize) -> &[Timeout] {
        &self.set(set_index).team(team).timeouts
    }

    fn sanctions(&self, team: TeamType, set_index: usize) -> &[Sanction] {
        &self.set(set_index).team(team).sanctions
    }

    fn first_serving_team(&self, set_index: usize) -> TeamType {
        self.set(set_index).first_serving_team
    }

    fn points_ladder(&self, set_index: usize) -> &[TeamType] {
        &self.set(set_index).ladder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"{
        "id": "g-1",
        "kind": "BEACH",
        "homeTeam": { "name": "Sand Sharks" },
        "guestTeam": { "name": "Dune Runners", "color": "#ff0000" }
    }"##;

    const FULL: &str = r##"{
        "id": "g-2",
        "kind": "INDOOR",
        "league": { "name": "Regional", "division": "A" },
        "scheduledAt": 1700000000000,
        "startTime": 1700000000000,
        "endTime": 1700003600000,
        "rules": { "sanctions": true, "teamTimeouts": false },
        "homeTeam": {
            "name": "Home", "color": "#112233", "liberoColor": "#ffffff",
            "captain": 7, "sets": 1,
            "players": [{ "num": 7, "name": "Ana" }, { "num": 12, "name": "Bea" }],
            "liberos": [12]
        },
        "guestTeam": { "name": "Guest", "sets": 0 },
        "sets": [{
            "homePoints": 25, "guestPoints": 20,
            "startTime": 1700000000000, "endTime": 1700001500000, "duration": 1500000,
            "firstServingTeam": "GUEST",
            "ladder": ["HOME", "GUEST", "HOME"],
            "home": {
                "startingLineup": [1, 2, 3, 4, 5, 7],
                "substitutions": [{ "playerIn": 9, "playerOut": 3, "homePoints": 10, "guestPoints": 8 }],
                "timeouts": [{ "homePoints": 5, "guestPoints": 9 }],
                "sanctions": [{ "card": "YELLOW", "num": 7, "set": 0, "homePoints": 2, "guestPoints": 1 }]
            }
        }]
    }"##;

    #[test]
    fn test_minimal_snapshot_defaults() {
        let game = StoredGame::from_json(MINIMAL).unwrap();
        assert_eq!(game.kind(), GameKind::Beach);
        assert!(game.league().is_none());
        assert_eq!(game.number_of_sets(), 0);
        assert_eq!(game.team_color(TeamType::Home), Color::WHITE);
        assert_eq!(game.team_color(TeamType::Guest), Color::from_rgb(255, 0, 0));
        assert_eq!(game.captain(TeamType::Home), -1);
        assert_eq!(game.rules(), Rules::default());
    }

    #[test]
    fn test_full_snapshot_accessors() {
        let game = StoredGame::from_json(FULL).unwrap();
        assert_eq!(game.league().map(|l| l.division.as_str()), Some("A"));
        assert_eq!(game.points(TeamType::Home, 0), 25);
        assert_eq!(game.points(TeamType::Guest, 0), 20);
        assert_eq!(game.set_duration(0), 1_500_000);
        assert_eq!(game.first_serving_team(0), TeamType::Guest);
        assert_eq!(game.points_ladder(0).len(), 3);
        assert!(game.is_libero(TeamType::Home, 12));
        assert!(!game.is_libero(TeamType::Home, 7));
        assert!(!game.rules().team_timeouts);
        assert_eq!(game.substitutions(TeamType::Home, 0).len(), 1);
        assert_eq!(game.called_timeouts(TeamType::Home, 0).len(), 1);
        assert_eq!(game.sanctions(TeamType::Home, 0).len(), 1);
    }

    #[test]
    fn test_starting_lineup_positions() {
        let game = StoredGame::from_json(FULL).unwrap();
        assert!(game.is_starting_lineup_confirmed(TeamType::Home, 0));
        assert!(!game.is_starting_lineup_confirmed(TeamType::Guest, 0));
        assert_eq!(
            game.player_at_position_in_starting_lineup(TeamType::Home, Position::Six, 0),
            7
        );
        assert_eq!(
            game.player_at_position_in_starting_lineup(TeamType::Guest, Position::One, 0),
            -1
        );
    }

    #[test]
    fn test_out_of_range_set_is_neutral() {
        let game = StoredGame::from_json(FULL).unwrap();
        assert_eq!(game.points(TeamType::Home, 9), 0);
        assert!(game.substitutions(TeamType::Guest, 9).is_empty());
        assert!(game.points_ladder(9).is_empty());
        assert!(!game.is_starting_lineup_confirmed(TeamType::Home, 9));
    }

    #[test]
    fn test_from_json_rejects_missing_teams() {
        let result = StoredGame::from_json(r#"{"id":"x","kind":"SNOW"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = StoredGame::load("/nonexistent/game.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
