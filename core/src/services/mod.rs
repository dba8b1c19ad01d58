//! Business services containing domain logic and use cases.

pub mod account;
pub mod auth;
pub mod gate;
pub mod refresh;
pub mod token;

// Re-export commonly used types
pub use account::{
    AccountEventPublisher, AccountService, LoggingEventPublisher, PasswordHasher, SignupRequest,
};
pub use auth::AuthService;
pub use gate::{AuthorizationGate, Authenticator};
pub use refresh::{hash_token, RefreshTokenConfig, RefreshTokenService, RotatedTokens};
pub use token::{TokenCodec, TokenCodecConfig};
