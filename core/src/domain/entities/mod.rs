//! Domain entities representing core business objects.

pub mod account;
pub mod principal;
pub mod token;


// Re-export commonly used types
pub use account::Account;
pub use principal::{normalize_role, Principal};
pub use token::{Claims, IssuedRefreshToken, RefreshToken, TokenPair};
