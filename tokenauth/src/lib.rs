//! Stateless issuing and validation of signed access and refresh tokens.
//!
//! A [`TokenService`] mints tokens for a [`Subject`] and answers whether a presented token is
//! usable. [`RefreshFlow`] exchanges a refresh token for a new access token after re-resolving
//! the principal through a [`UserDirectory`].

pub mod codec;
pub mod directory;
pub mod error;
#[cfg(feature = "axum-extract")]
pub mod extract;
pub mod internal;
pub mod keys;
pub mod refresh;
mod role;
pub mod service;
mod types;

pub use async_trait::async_trait;
pub use codec::TokenCodec;
pub use directory::{PrincipalRecord, UserDirectory};
pub use error::{KeyMaterialError, TokenError};
pub use internal::claims::ClaimSet;
pub use internal::unixtime::{Clock, ManualClock, SystemClock, UnixMillis};
pub use keys::KeyMaterial;
pub use refresh::RefreshFlow;
pub use role::Role;
pub use service::TokenService;
pub use types::*;

//--------------------------------------------------------------------------------------------------
