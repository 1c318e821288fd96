//! Caller-supplied inputs that are not part of the match snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::game::TeamType;

/// Placeholder printed for a blank licence.
pub const LICENCE_PLACEHOLDER: &str = "—";

/// Who signs the score sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignatureRole {
    /// First referee.
    Referee1,
    /// Second referee.
    Referee2,
    /// Scorer.
    Scorer,
    /// Home team captain.
    HomeCaptain,
    /// Guest team captain.
    GuestCaptain,
    /// Home team coach.
    HomeCoach,
    /// Guest team coach.
    GuestCoach,
}

impl SignatureRole {
    /// All roles, in sheet order.
    pub const ALL: [Self; 7] = [
        Self::Referee1,
        Self::Referee2,
        Self::Scorer,
        Self::HomeCaptain,
        Self::GuestCaptain,
        Self::HomeCoach,
        Self::GuestCoach,
    ];

    /// Store key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Referee1 => "referee1",
            Self::Referee2 => "referee2",
            Self::Scorer => "scorer",
            Self::HomeCaptain => "homeCaptain",
            Self::GuestCaptain => "guestCaptain",
            Self::HomeCoach => "homeCoach",
            Self::GuestCoach => "guestCoach",
        }
    }

    /// Captain role of a team.
    #[must_use]
    pub fn captain(team: TeamType) -> Self {
        match team {
            TeamType::Home => Self::HomeCaptain,
            TeamType::Guest => Self::GuestCaptain,
        }
    }

    /// Coach role of a team.
    #[must_use]
    pub fn coach(team: TeamType) -> Self {
        match team {
            TeamType::Home => Self::HomeCoach,
            TeamType::Guest => Self::GuestCoach,
        }
    }
}

impl fmt::Display for SignatureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SignatureRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.key() == s)
            .ok_or_else(|| Error::unknown_role(s))
    }
}

/// Whose licence number is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LicenceRole {
    /// First referee.
    #[serde(rename = "ref1")]
    Referee1,
    /// Second referee.
    #[serde(rename = "ref2")]
    Referee2,
    /// Scorer.
    #[serde(rename = "scorer")]
    Scorer,
    /// Home assistant coach.
    #[serde(rename = "homeCoach")]
    HomeAssistantCoach,
    /// Guest assistant coach.
    #[serde(rename = "guestCoach")]
    GuestAssistantCoach,
    /// Home staff.
    #[serde(rename = "homeStaff")]
    HomeStaff,
    /// Guest staff.
    #[serde(rename = "guestStaff")]
    GuestStaff,
}

impl LicenceRole {
    /// All roles, in sheet order.
    pub const ALL: [Self; 7] = [
        Self::Referee1,
        Self::Referee2,
        Self::Scorer,
        Self::HomeAssistantCoach,
        Self::GuestAssistantCoach,
        Self::HomeStaff,
        Self::GuestStaff,
    ];

    /// Store key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Referee1 => "ref1",
            Self::Referee2 => "ref2",
            Self::Scorer => "scorer",
            Self::HomeAssistantCoach => "homeCoach",
            Self::GuestAssistantCoach => "guestCoach",
            Self::HomeStaff => "homeStaff",
            Self::GuestStaff => "guestStaff",
        }
    }
}

impl fmt::Display for LicenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LicenceRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.key() == s)
            .ok_or_else(|| Error::unknown_role(s))
    }
}

/// A signatory's name and optional handwritten signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Printed name.
    pub name: String,
    /// Base64-encoded PNG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Signature {
    /// Build a signature; empty images are treated as absent.
    #[must_use]
    pub fn new(name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            name: name.into(),
            image: image.filter(|i| !i.is_empty()),
        }
    }
}

/// Signatures keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signatures(BTreeMap<SignatureRole, Signature>);

impl Signatures {
    /// Signature for `role`, if any.
    #[must_use]
    pub fn get(&self, role: SignatureRole) -> Option<&Signature> {
        self.0.get(&role)
    }

    /// Printed name for `role`, empty when unsigned.
    #[must_use]
    pub fn name(&self, role: SignatureRole) -> &str {
        self.get(role).map_or("", |s| s.name.as_str())
    }

    /// Signature image for `role`, if any.
    #[must_use]
    pub fn image(&self, role: SignatureRole) -> Option<&str> {
        self.get(role).and_then(|s| s.image.as_deref())
    }

    /// Set or replace the signature for `role`.
    pub fn insert(&mut self, role: SignatureRole, signature: Signature) {
        self.0.insert(role, signature);
    }

    /// Iterate over recorded signatures.
    pub fn iter(&self) -> impl Iterator<Item = (SignatureRole, &Signature)> {
        self.0.iter().map(|(role, sig)| (*role, sig))
    }

    /// Number of recorded signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is signed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Licence identifiers keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Licences(BTreeMap<LicenceRole, String>);

impl Licences {
    /// Raw licence for `role`, empty when unknown.
    #[must_use]
    pub fn get(&self, role: LicenceRole) -> &str {
        self.0.get(&role).map_or("", String::as_str)
    }

    /// Licence as printed: blank values become [`LICENCE_PLACEHOLDER`].
    #[must_use]
    pub fn display(&self, role: LicenceRole) -> &str {
        let value = self.get(role);
        if value.trim().is_empty() {
            LICENCE_PLACEHOLDER
        } else {
            value
        }
    }

    /// Set or replace the licence for `role`.
    pub fn insert(&mut self, role: LicenceRole, value: impl Into<String>) {
        self.0.insert(role, value.into());
    }

    /// Iterate over recorded licences.
    pub fn iter(&self) -> impl Iterator<Item = (LicenceRole, &str)> {
        self.0.iter().map(|(role, value)| (*role, value.as_str()))
    }
}

/// Everything the sheet needs besides the match itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSheetOptions {
    /// Base64-encoded JPEG shown in the header.
    pub logo: Option<String>,
    /// Free-text remarks; lines are split on `\n`.
    pub remarks: String,
    /// Signatures.
    pub signatures: Signatures,
    /// Licences.
    pub licences: Licences,
}

impl ScoreSheetOptions {
    /// Attach a logo; `None` or empty removes it.
    #[must_use]
    pub fn with_logo(mut self, logo: Option<String>) -> Self {
        self.logo = logo.filter(|l| !l.is_empty());
        self
    }

    /// Replace the remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Set one signature.
    #[must_use]
    pub fn with_signature(
        mut self,
        role: SignatureRole,
        name: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        self.signatures.insert(role, Signature::new(name, image));
        self
    }

    /// Set one licence.
    #[must_use]
    pub fn with_licence(mut self, role: LicenceRole, value: impl Into<String>) -> Self {
        self.licences.insert(role, value);
        self
    }

    /// Replace all signatures.
    #[must_use]
    pub fn with_signatures(mut self, signatures: Signatures) -> Self {
        self.signatures = signatures;
        self
    }

    /// Replace all licences.
    #[must_use]
    pub fn with_licences(mut self, licences: Licences) -> Self {
        self.licences = licences;
        self
    }
}
