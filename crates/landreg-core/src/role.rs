//! # Caller Roles
//!
//! The registry trusts the role the authentication layer asserts; nothing in
//! this workspace authenticates or infers it. [`CallerClaims`] is the
//! capability object that carries the asserted role into the core.
//!
//! Role parsing is total: any string the registry does not recognise maps to
//! [`Role::Unrecognized`], whose [`Visibility`] is `None`.

use serde::{Deserialize, Serialize};

/// Roles a caller may assert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Registry administrator.
    Admin,
    /// Verifying land officer.
    Officer,
    /// Authenticated citizen.
    Citizen,
    /// Authenticated user; same visibility as `Citizen`.
    User,
    /// Anonymous visitor.
    Public,
    /// Anything else. Sees nothing.
    Unrecognized,
}

/// How much of a registration a role may observe, ordered from least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    None,
    Public,
    Citizen,
    Full,
}

impl Role {
    /// Parse a role claim. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "officer" => Self::Officer,
            "citizen" => Self::Citizen,
            "user" => Self::User,
            "public" => Self::Public,
            _ => Self::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Officer => "officer",
            Self::Citizen => "citizen",
            Self::User => "user",
            Self::Public => "public",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Admin | Self::Officer => Visibility::Full,
            Self::Citizen | Self::User => Visibility::Citizen,
            Self::Public => Visibility::Public,
            Self::Unrecognized => Visibility::None,
        }
    }

    /// Officer or admin. Gates storage of the private tier.
    pub fn is_privileged(&self) -> bool {
        self.visibility() == Visibility::Full
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// Claims asserted by the authentication layer for one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerClaims {
    /// The caller's asserted role.
    pub role: Role,
    /// Opaque subject identifier (session user, wallet), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// The role string exactly as the caller asserted it, when it came in
    /// as text. Receipts echo this back rather than the parsed role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asserted_role: Option<String>,
}

impl CallerClaims {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            subject: None,
            asserted_role: None,
        }
    }

    /// Claims from a raw role assertion. Unknown strings still yield
    /// [`Role::Unrecognized`] for access decisions, but the text is kept.
    pub fn from_assertion(raw: &str) -> Self {
        Self {
            role: Role::parse(raw),
            subject: None,
            asserted_role: Some(raw.trim().to_string()),
        }
    }

    /// The role as the caller stated it, falling back to the parsed role.
    pub fn role_label(&self) -> &str {
        self.asserted_role.as_deref().unwrap_or(self.role.as_str())
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn has_visibility(&self, minimum: Visibility) -> bool {
        self.role.visibility() >= minimum
    }
}
