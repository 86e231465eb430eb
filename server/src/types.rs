use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{password_hash, Argon2, PasswordHasher, PasswordVerifier};
use serde::{Deserialize, Serialize};
use tokenauth::Subject;

//--------------------------------------------------------------------------------------------------
// New types
//--------------------------------------------------------------------------------------------------

// Usernames are the token subject, so they share its non-empty rule
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(Subject);

impl Username {
    pub fn subject(&self) -> &Subject {
        &self.0
    }
}

impl From<Subject> for Username {
    fn from(subject: Subject) -> Self {
        Username(subject)
    }
}

#[derive(Deserialize)]
pub struct Password(String);

impl Password {
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Password(uuid.to_string())
    }
}

const DECOY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$rMTDp2PCqEnt2ci6IAkejQ$w7trIe6QnhfcciYOv9Md2ivb2bqNdV2lUjVqlVvYpEA";

#[derive(Debug, Deserialize, Clone)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn validate(&self, password: &Password) -> password_hash::Result<bool> {
        let hash = password_hash::PasswordHash::new(&self.0)?;

        match Argon2::default().verify_password(password.0.as_bytes(), &hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn from_password(password: &Password) -> password_hash::Result<Self> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default().hash_password(password.0.as_bytes(), &salt)?;

        Ok(PasswordHash(hash.to_string()))
    }

    /// Matches no password, but costs a full argon2 verification when checked
    pub fn decoy() -> Self {
        PasswordHash(DECOY_PASSWORD_HASH.to_string())
    }

    // Stored hashes come back out of the directory as opaque credential strings
    pub fn from_stored(hash: &str) -> Self {
        PasswordHash(hash.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
