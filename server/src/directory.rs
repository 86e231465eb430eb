use crate::cfg::SeedUser;
use crate::roles::AdminRole;
use crate::types::{Password, PasswordHash};
use std::collections::HashMap;
use tokenauth::{async_trait, PrincipalRecord, RoleId, Subject, UserDirectory};
use tokio::sync::RwLock;
use tracing::info;

//--------------------------------------------------------------------------------------------------
// In-memory user directory
//--------------------------------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserDirectory {
    principals: RwLock<HashMap<Subject, PrincipalRecord>>,
}

impl InMemoryUserDirectory {
    /// Returns false, leaving the existing record alone, if the subject is taken
    pub async fn insert(&self, principal: PrincipalRecord) -> bool {
        let mut principals = self.principals.write().await;

        if principals.contains_key(principal.subject()) {
            return false;
        }

        principals.insert(principal.subject().clone(), principal);
        true
    }

    pub async fn len(&self) -> usize {
        self.principals.read().await.len()
    }

    /// Sorted by subject
    pub async fn subjects(&self) -> Vec<Subject> {
        let mut subjects: Vec<Subject> = self
            .principals
            .read()
            .await
            .keys()
            .cloned()
            .collect();
        subjects.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        subjects
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve(&self, subject: &Subject) -> Option<PrincipalRecord> {
        self.principals.read().await.get(subject).cloned()
    }
}

//--------------------------------------------------------------------------------------------------
// Seeding
//--------------------------------------------------------------------------------------------------

const SEED_ADMIN_USERNAME: &str = "admin";

pub async fn seed_directory(
    directory: &InMemoryUserDirectory,
    users: Vec<SeedUser>,
) -> anyhow::Result<()> {
    for user in users {
        let subject = user.username.subject().clone();
        let record = PrincipalRecord::new(subject.clone(), user.password_hash.as_str(), user.roles);

        if directory.insert(record).await {
            info!("Seeded user {}", subject);
        } else {
            anyhow::bail!("User {} is configured more than once", subject);
        }
    }

    if directory.len().await > 0 {
        info!(
            "Directory has {} users, no admin seeding required",
            directory.len().await
        );
        return Ok(());
    }

    info!("Directory empty - seeding");

    let password_uuid = uuid::Uuid::new_v4();
    let password = Password::from_uuid(password_uuid);
    let password_hash = PasswordHash::from_password(&password)
        .map_err(|err| anyhow::anyhow!("Failed to hash seed password: {}", err))?;

    let subject = Subject::new(SEED_ADMIN_USERNAME)
        .ok_or_else(|| anyhow::anyhow!("Seed admin username is empty"))?;
    let record = PrincipalRecord::new(
        subject.clone(),
        password_hash.as_str(),
        vec![RoleId::from(AdminRole)],
    );
    directory.insert(record).await;

    info!(
        "NOTE CAREFULLY: Admin user created with username {:?} and password {:?}.",
        SEED_ADMIN_USERNAME, password_uuid
    );

    info!("Seeding complete");

    Ok(())
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
