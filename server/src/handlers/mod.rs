pub mod login;
pub mod me;
pub mod refresh;
pub mod register;
pub mod users;
