//! Account service module
//!
//! Signup with duplicate detection, identity lookup and password login.
//! Password hashing and event publication are collaborators behind traits.

mod publisher;
mod service;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use publisher::LoggingEventPublisher;
pub use service::{AccountService, SignupRequest};
pub use traits::{AccountEventPublisher, PasswordHasher};
