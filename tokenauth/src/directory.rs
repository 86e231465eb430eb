use crate::{RoleId, Subject};
use async_trait::async_trait;
use std::ops::Deref;
use std::sync::Arc;

//--------------------------------------------------------------------------------------------------
// Principal record
//--------------------------------------------------------------------------------------------------

/// A live principal as known to the user directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrincipalRecord {
    subject: Subject,
    credential_hash: String,
    roles: Vec<RoleId>,
}

impl PrincipalRecord {
    pub fn new(subject: Subject, credential_hash: impl Into<String>, roles: Vec<RoleId>) -> Self {
        PrincipalRecord {
            subject,
            credential_hash: credential_hash.into(),
            roles,
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Opaque password hash, only meaningful to whoever verifies credentials
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }
}

//--------------------------------------------------------------------------------------------------
// Trait for the collaborator that resolves principals
//--------------------------------------------------------------------------------------------------

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn resolve(&self, subject: &Subject) -> Option<PrincipalRecord>;
}

#[async_trait]
impl<T: UserDirectory> UserDirectory for Arc<T> {
    async fn resolve(&self, subject: &Subject) -> Option<PrincipalRecord> {
        self.deref().resolve(subject).await
    }
}

//--------------------------------------------------------------------------------------------------
