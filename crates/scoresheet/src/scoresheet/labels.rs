//! Localizable strings printed on the score sheet.
//!
//! Templates use `{}` as the single placeholder.

use serde::{Deserialize, Serialize};

/// All user-visible text of the score sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Roster card title.
    pub players: String,
    /// Lineup block title.
    pub starting_lineup: String,
    /// Substitutions block title.
    pub substitutions: String,
    /// Timeouts block title.
    pub timeouts: String,
    /// Sanctions block title.
    pub sanctions: String,
    /// Point ladder block title.
    pub ladder: String,
    /// Remarks card title.
    pub remarks: String,
    /// Signatures card title.
    pub signatures: String,
    /// Referee signature title, followed by the referee number.
    pub referee: String,
    /// Scorer signature title.
    pub scorer: String,
    /// Captain signature title.
    pub captain: String,
    /// Coach signature title.
    pub coach: String,
    /// Badge text for the coach.
    pub coach_abbreviation: String,
    /// Set index cell, e.g. `Set {}`.
    pub set_number: String,
    /// Duration cell, e.g. `{} min`.
    pub duration: String,
    /// Position titles, I to VI.
    pub positions: [String; 6],
    /// Licence card title.
    pub licences: String,
    /// First referee licence.
    pub licence_referee_1: String,
    /// Second referee licence.
    pub licence_referee_2: String,
    /// Scorer licence.
    pub licence_scorer: String,
    /// Technical staff block title.
    pub technical_staff: String,
    /// Assistant coach licence.
    pub assistant_coach: String,
    /// Staff licence.
    pub staff: String,
    /// Home team qualifier.
    pub home: String,
    /// Guest team qualifier.
    pub guest: String,
    /// Delay warning badge.
    pub delay_warning: String,
    /// Delay penalty badge.
    pub delay_penalty: String,
    /// Improper request badge.
    pub improper_request: String,
    /// Footer line.
    pub footer: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            players: "Players".to_string(),
            starting_lineup: "Starting lineup".to_string(),
            substitutions: "Substitutions".to_string(),
            timeouts: "Timeouts".to_string(),
            sanctions: "Sanctions".to_string(),
            ladder: "Ladder".to_string(),
            remarks: "Remarks".to_string(),
            signatures: "Signatures".to_string(),
            referee: "Referee".to_string(),
            scorer: "Scorer".to_string(),
            captain: "Captain".to_string(),
            coach: "Coach".to_string(),
            coach_abbreviation: "C".to_string(),
            set_number: "Set {}".to_string(),
            duration: "{} min".to_string(),
            positions: ["I", "II", "III", "IV", "V", "VI"].map(String::from),
            licences: "Licences".to_string(),
            licence_referee_1: "1st referee licence".to_string(),
            licence_referee_2: "2nd referee licence".to_string(),
            licence_scorer: "Scorer licence".to_string(),
            technical_staff: "Technical staff".to_string(),
            assistant_coach: "Assistant coach".to_string(),
            staff: "Staff".to_string(),
            home: "Home".to_string(),
            guest: "Guest".to_string(),
            delay_warning: "Delay Warning".to_string(),
            delay_penalty: "Delay Penalty".to_string(),
            improper_request: "IR".to_string(),
            footer: "Powered by Volleyball Referee".to_string(),
        }
    }
}

impl Labels {
    /// Fill the `{}` placeholder of `template`.
    #[must_use]
    pub fn fill(template: &str, value: impl ToString) -> String {
        template.replacen("{}", &value.to_string(), 1)
    }

    /// `Set 3` style title for a 0-based set index.
    #[must_use]
    pub fn set_title(&self, set_index: usize) -> String {
        Self::fill(&self.set_number, set_index + 1)
    }

    /// `42 min` style duration text.
    #[must_use]
    pub fn minutes(&self, minutes: i64) -> String {
        Self::fill(&self.duration, minutes)
    }

    /// Title of a 1-based court position.
    #[must_use]
    pub fn position(&self, number: usize) -> &str {
        number
            .checked_sub(1)
            .and_then(|i| self.positions.get(i))
            .map_or("", String::as_str)
    }

    /// Name of the first label that is blank, if any.
    #[must_use]
    pub fn first_blank(&self) -> Option<&'static str> {
        let fields: [(&'static str, &str); 11] = [
            ("players", &self.players),
            ("starting_lineup", &self.starting_lineup),
            ("substitutions", &self.substitutions),
            ("timeouts", &self.timeouts),
            ("sanctions", &self.sanctions),
            ("ladder", &self.ladder),
            ("remarks", &self.remarks),
            ("signatures", &self.signatures),
            ("coach_abbreviation", &self.coach_abbreviation),
            ("set_number", &self.set_number),
            ("duration", &self.duration),
        ];
        fields
            .into_iter()
            .chain(
                self.positions
                    .iter()
                    .map(|p| ("positions", p.as_str())),
            )
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }
}
