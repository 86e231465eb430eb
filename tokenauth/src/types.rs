use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

//--------------------------------------------------------------------------------------------------
// Subject
//--------------------------------------------------------------------------------------------------

/// Identifier of the principal a token was issued to. Never empty.
#[derive(Serialize, Clone, PartialEq, Eq, Hash, Debug)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Returns `None` for an empty name
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Subject(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Deserialization goes through the same emptiness check as construction, so a decoded token
// can never carry an empty subject
impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Subject::new(s).ok_or_else(|| serde::de::Error::custom("subject must not be empty"))
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------------------------------------------------------------------
// Role ID
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Debug)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    pub fn new(role: impl Into<String>) -> Self {
        RoleId(role.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg_attr(not(feature = "axum-extract"), allow(dead_code))]
    pub(crate) fn in_role_set(&self, role_set: &[&'static str]) -> bool {
        role_set.iter().any(|role| *role == self.0)
    }
}

impl<T: crate::Role> From<T> for RoleId {
    fn from(_: T) -> Self {
        RoleId(T::role_id().to_string())
    }
}

//--------------------------------------------------------------------------------------------------
// Token kind
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

//--------------------------------------------------------------------------------------------------
// Signed token
//--------------------------------------------------------------------------------------------------

/// Opaque `header.payload.signature` string as handed to and presented by callers.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SignedToken {
    fn from(s: String) -> Self {
        SignedToken(s)
    }
}

impl From<&str> for SignedToken {
    fn from(s: &str) -> Self {
        SignedToken(s.to_string())
    }
}

// Tokens are bearer credentials, keep them out of logs
impl Debug for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SignedToken(<{} bytes>)", self.0.len())
    }
}

//--------------------------------------------------------------------------------------------------
// Token pair
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: SignedToken,
    pub refresh_token: SignedToken,
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
