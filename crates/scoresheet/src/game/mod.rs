//! Read-only match model consumed by the score sheet renderer.
//!
//! The renderer never talks to the live scoring engine. It sees a finished
//! (or paused) match through [`StoredGameView`], whose accessors are all
//! total: an unknown set index yields zero points or an empty list rather
//! than an error.

mod color;
mod snapshot;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use color::{Color, Shade};
pub use snapshot::{SetSnapshot, SetTeamSnapshot, StoredGame, TeamSnapshot};

/// Player number used for sanctions given to the coach.
pub const COACH: i32 = 100;

/// Player number used for sanctions given to the whole team (bench).
pub const TEAM: i32 = 200;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamType {
    /// The home team.
    Home,
    /// The guest team.
    Guest,
}

impl TeamType {
    /// Lowercase name used in CSS classes (`home` / `guest`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flavour of volleyball being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Six-a-side indoor volleyball.
    #[serde(rename = "INDOOR")]
    Indoor,
    /// Two-a-side beach volleyball.
    #[serde(rename = "BEACH")]
    Beach,
    /// Four-a-side indoor volleyball.
    #[serde(rename = "INDOOR_4X4")]
    Indoor4x4,
    /// Three-a-side snow volleyball.
    #[serde(rename = "SNOW")]
    Snow,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indoor => write!(f, "indoor"),
            Self::Beach => write!(f, "beach"),
            Self::Indoor4x4 => write!(f, "indoor 4x4"),
            Self::Snow => write!(f, "snow"),
        }
    }
}

/// A court position in the serving rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Position I (right back, server).
    One,
    /// Position II (right front).
    Two,
    /// Position III (middle front).
    Three,
    /// Position IV (left front).
    Four,
    /// Position V (left back).
    Five,
    /// Position VI (middle back).
    Six,
}

impl Position {
    /// 1-based position number.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }
}

/// Kind of card shown for a sanction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SanctionCard {
    /// Warning.
    Yellow,
    /// Penalty, the opponent scores.
    Red,
    /// Expulsion for the rest of the set.
    RedExpulsion,
    /// Disqualification for the rest of the match.
    RedDisqualification,
    /// Delay warning.
    DelayWarning,
    /// Delay penalty, the opponent scores.
    DelayPenalty,
}

impl SanctionCard {
    /// Whether this card belongs to the delay family.
    #[must_use]
    pub fn is_delay(self) -> bool {
        matches!(self, Self::DelayWarning | Self::DelayPenalty)
    }
}

/// A sanction given during a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sanction {
    /// The card shown.
    pub card: SanctionCard,
    /// Player number, or [`COACH`] / [`TEAM`].
    pub num: i32,
    /// 0-based set index.
    pub set: usize,
    /// Home score when the sanction was given.
    pub home_points: u32,
    /// Guest score when the sanction was given.
    pub guest_points: u32,
    /// Delay sanction given for an improper request.
    #[serde(default, alias = "ir")]
    pub improper_request: bool,
}

impl Sanction {
    /// Whether the sanction targets the coach.
    #[must_use]
    pub fn is_coach(&self) -> bool {
        self.num == COACH
    }

    /// Whether the sanction targets the team bench.
    #[must_use]
    pub fn is_team(&self) -> bool {
        self.num == TEAM
    }

    /// Whether the sanction targets an individual player.
    #[must_use]
    pub fn is_player(&self) -> bool {
        !self.is_coach() && !self.is_team()
    }
}

/// A player substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    /// Player entering the court.
    pub player_in: i32,
    /// Player leaving the court.
    pub player_out: i32,
    /// Home score at the time.
    pub home_points: u32,
    /// Guest score at the time.
    pub guest_points: u32,
}

/// A team timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeout {
    /// Home score at the time.
    pub home_points: u32,
    /// Guest score at the time.
    pub guest_points: u32,
}

/// A rostered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Shirt number.
    pub num: i32,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// League the match was played in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    /// League name.
    pub name: String,
    /// Division within the league.
    #[serde(default)]
    pub division: String,
}

/// The subset of the ruleset that affects the score sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rules {
    /// Sanctions are tracked.
    pub sanctions: bool,
    /// Team timeouts are enabled.
    pub team_timeouts: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            sanctions: true,
            team_timeouts: true,
        }
    }
}

/// Read-only view over a stored match.
///
/// All accessors are total. Set indices outside `0..number_of_sets()`
/// return neutral values.
pub trait StoredGameView {
    /// Unique match identifier, used as the licence/signature store key.
    fn id(&self) -> &str;

    /// Kind of volleyball.
    fn kind(&self) -> GameKind;

    /// League metadata, if the match belongs to one.
    fn league(&self) -> Option<&League>;

    /// Scheduled date, epoch milliseconds.
    fn scheduled_at(&self) -> i64;

    /// Match start, epoch milliseconds.
    fn start_time(&self) -> i64;

    /// Match end, epoch milliseconds.
    fn end_time(&self) -> i64;

    /// Rules relevant to rendering.
    fn rules(&self) -> Rules;

    /// Team display name.
    fn team_name(&self, team: TeamType) -> &str;

    /// Team shirt color.
    fn team_color(&self, team: TeamType) -> Color;

    /// Libero shirt color.
    fn libero_color(&self, team: TeamType) -> Color;

    /// Rostered players.
    fn players(&self, team: TeamType) -> &[Player];

    /// Whether `num` is one of the team's liberos.
    fn is_libero(&self, team: TeamType, num: i32) -> bool;

    /// Captain's shirt number.
    fn captain(&self, team: TeamType) -> i32;

    /// Sets won.
    fn sets(&self, team: TeamType) -> u32;

    /// Number of sets played (including one in progress).
    fn number_of_sets(&self) -> usize;

    /// Points scored in a set.
    fn points(&self, team: TeamType, set_index: usize) -> u32;

    /// Set start, epoch milliseconds.
    fn set_start_time(&self, set_index: usize) -> i64;

    /// Set end, epoch milliseconds.
    fn set_end_time(&self, set_index: usize) -> i64;

    /// Set duration, milliseconds.
    fn set_duration(&self, set_index: usize) -> i64;

    /// Whether the starting lineup was confirmed for the set.
    fn is_starting_lineup_confirmed(&self, team: TeamType, set_index: usize) -> bool;

    /// Player in `position` of the starting lineup, or `-1` if unknown.
    fn player_at_position_in_starting_lineup(
        &self,
        team: TeamType,
        position: Position,
        set_index: usize,
    ) -> i32;

    /// Substitutions made in a set, in order.
    fn substitutions(&self, team: TeamType, set_index: usize) -> &[Substitution];

    /// Timeouts called in a set, in order.
    fn called_timeouts(&self, team: TeamType, set_index: usize) -> &[Timeout];

    /// Sanctions given in a set, in order.
    fn sanctions(&self, team: TeamType, set_index: usize) -> &[Sanction];

    /// Team that served first in a set.
    fn first_serving_team(&self, set_index: usize) -> TeamType;

    /// Which team scored each point of a set, in order.
    fn points_ladder(&self, set_index: usize) -> &[TeamType];
}
