//! Authentication route handlers
//!
//! - Signup and login
//! - Refresh token rotation
//! - Ping, the authenticated identity probe

pub mod login;
pub mod ping;
pub mod refresh;
pub mod signup;

use std::sync::Arc;

use auth_core::repositories::{RefreshTokenRepository, UserRepository};
use auth_core::services::account::{AccountEventPublisher, PasswordHasher};
use auth_core::services::auth::AuthService;

pub use login::login;
pub use ping::ping;
pub use refresh::refresh_token;
pub use signup::signup;

/// Application state that holds shared services
pub struct AppState<U, R, H, P>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
    P: AccountEventPublisher + 'static,
{
    pub auth_service: Arc<AuthService<U, R, H, P>>,
}

impl<U, R, H, P> AppState<U, R, H, P>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
    P: AccountEventPublisher + 'static,
{
    pub fn new(auth_service: Arc<AuthService<U, R, H, P>>) -> Self {
        Self { auth_service }
    }
}
