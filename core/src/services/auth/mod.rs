//! Authentication service module
//!
//! Orchestrates the account service, token codec and refresh token service
//! into the signup, login, refresh and "who am I" flows.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
