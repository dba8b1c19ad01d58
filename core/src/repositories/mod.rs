pub mod refresh_token;
pub mod user;

pub use refresh_token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
