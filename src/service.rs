pub mod auth;
pub mod password;
pub mod rental;
pub mod token;
