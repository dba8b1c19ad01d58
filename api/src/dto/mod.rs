//! Data transfer objects of the HTTP surface

pub mod auth;
pub mod error;

pub use auth::{AuthResponseDto, LoginRequestDto, RefreshTokenRequestDto, SignupRequestDto};
pub use error::{ErrorResponse, ErrorResponseExt};
