//! Per-kind layout choices and the printer pagination heuristic.

use crate::game::{GameKind, Position, StoredGameView, TeamType};

/// Rosters longer than this push the first set onto its own page.
const MAX_ROSTER_ON_FIRST_PAGE: usize = 14;

/// More substitutions than this in a set need a fresh page.
const MAX_SUBSTITUTIONS_PER_PAGE: usize = 6;

/// Longer ladders than this need a fresh page.
const MAX_POINTS_PER_PAGE: u64 = 64;

/// Shape of the starting lineup diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineupShape {
    /// Six positions in two rows: IV III II / V VI I.
    Rotation,
    /// Front row IV III II, then position I alone in the back row.
    FrontRowAndServer,
    /// Three positions in one row: I II III.
    Line,
}

impl LineupShape {
    /// Positions shown in the first (title) row, left to right.
    #[must_use]
    pub fn front_row(self) -> &'static [Position] {
        match self {
            Self::Rotation | Self::FrontRowAndServer => {
                &[Position::Four, Position::Three, Position::Two]
            }
            Self::Line => &[Position::One, Position::Two, Position::Three],
        }
    }

    /// Positions shown in the back row, `None` marking an empty slot.
    #[must_use]
    pub fn back_row(self) -> &'static [Option<Position>] {
        match self {
            Self::Rotation => &[
                Some(Position::Five),
                Some(Position::Six),
                Some(Position::One),
            ],
            Self::FrontRowAndServer => &[None, Some(Position::One), None],
            Self::Line => &[],
        }
    }
}

/// When a set card is pushed onto a new printer page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationRule {
    /// Every odd set, plus whenever the card is likely to overflow.
    Dense,
    /// Every odd set, only when there are more than two sets.
    Sparse,
}

/// Everything that differs between the four kinds of score sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Lineup diagram, `None` for beach where there are no substitutions
    /// either.
    pub lineup: Option<LineupShape>,
    /// Pagination heuristic for set cards.
    pub pagination: PaginationRule,
    /// Whether coaches sign the sheet.
    pub coach_signatures: bool,
    /// Whether the licence and technical staff card is printed.
    pub licence_card: bool,
}

impl From<GameKind> for SheetLayout {
    fn from(kind: GameKind) -> Self {
        match kind {
            GameKind::Indoor => Self {
                lineup: Some(LineupShape::Rotation),
                pagination: PaginationRule::Dense,
                coach_signatures: true,
                licence_card: true,
            },
            GameKind::Indoor4x4 => Self {
                lineup: Some(LineupShape::FrontRowAndServer),
                pagination: PaginationRule::Dense,
                coach_signatures: true,
                licence_card: true,
            },
            GameKind::Snow => Self {
                lineup: Some(LineupShape::Line),
                pagination: PaginationRule::Sparse,
                coach_signatures: false,
                licence_card: false,
            },
            GameKind::Beach => Self {
                lineup: None,
                pagination: PaginationRule::Sparse,
                coach_signatures: false,
                licence_card: false,
            },
        }
    }
}

/// Inputs of the page break decision for one set card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetPagination {
    /// 0-based set index.
    pub set_index: usize,
    /// Sets in the match.
    pub number_of_sets: usize,
    /// Largest roster of the two teams.
    pub largest_roster: usize,
    /// Largest substitution count of the two teams in this set.
    pub most_substitutions: usize,
    /// Home plus guest points in this set.
    pub combined_points: u64,
}

impl SetPagination {
    /// Collect the inputs for `set_index` from a match.
    #[must_use]
    pub fn from_game<G: StoredGameView + ?Sized>(game: &G, set_index: usize) -> Self {
        let per_team = |f: &dyn Fn(TeamType) -> usize| {
            f(TeamType::Home).max(f(TeamType::Guest))
        };
        Self {
            set_index,
            number_of_sets: game.number_of_sets(),
            largest_roster: per_team(&|team| game.players(team).len()),
            most_substitutions: per_team(&|team| game.substitutions(team, set_index).len()),
            combined_points: u64::from(game.points(TeamType::Home, set_index))
                + u64::from(game.points(TeamType::Guest, set_index)),
        }
    }

    /// Whether the set card must start on a new printed page.
    #[must_use]
    pub fn starts_new_page(&self, rule: PaginationRule) -> bool {
        let odd = self.set_index % 2 == 1;
        match rule {
            PaginationRule::Dense => {
                odd || (self.set_index == 0 && self.largest_roster > MAX_ROSTER_ON_FIRST_PAGE)
                    || self.most_substitutions > MAX_SUBSTITUTIONS_PER_PAGE
                    || self.combined_points > MAX_POINTS_PER_PAGE
            }
            PaginationRule::Sparse => self.number_of_sets > 2 && odd,
        }
    }
}
