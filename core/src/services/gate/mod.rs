//! Authorization gate module
//!
//! Resolves a bearer access token into a [`Principal`](crate::domain::Principal)
//! for protected operations.

mod authorization;


pub use authorization::{AuthorizationGate, Authenticator};
