use crate::directory::InMemoryUserDirectory;
use std::sync::Arc;
use tokenauth::extract::AuthProvider;
use tokenauth::TokenService;

//--------------------------------------------------------------------------------------------------
// State given to the handlers
//--------------------------------------------------------------------------------------------------

pub type StateRef = Arc<State>;

pub struct State {
    tokens: TokenService,
    directory: InMemoryUserDirectory,
}

impl State {
    pub fn new(tokens: TokenService, directory: InMemoryUserDirectory) -> Self {
        Self { tokens, directory }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn directory(&self) -> &InMemoryUserDirectory {
        &self.directory
    }
}

impl AuthProvider for State {
    type Directory = InMemoryUserDirectory;

    fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    fn user_directory(&self) -> &InMemoryUserDirectory {
        &self.directory
    }
}

//--------------------------------------------------------------------------------------------------
