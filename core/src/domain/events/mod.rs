//! Domain events emitted by the account lifecycle.

pub mod account_created;

pub use account_created::{AccountCreatedEvent, ProfileFields};
