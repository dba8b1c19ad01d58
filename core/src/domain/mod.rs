//! Domain layer containing entities, value objects and domain events.

pub mod entities;
pub mod events;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{
    normalize_role, Account, Claims, IssuedRefreshToken, Principal, RefreshToken, TokenPair,
};
pub use events::{AccountCreatedEvent, ProfileFields};
pub use value_objects::AuthResponse;
