//! Request and response bodies of the `/auth/v1` endpoints

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use auth_core::domain::events::ProfileFields;
use auth_core::domain::value_objects::AuthResponse;
use auth_core::services::account::SignupRequest;
use auth_shared::validation::{validate_password, validate_username};

/// Body of `POST /auth/v1/signup`
///
/// ```json
/// {
///     "username": "alice",
///     "password": "secret123",
///     "first_name": "Alice",
///     "email": "alice@example.com"
/// }
/// ```
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequestDto {
    #[validate(custom(function = "check_username"))]
    pub username: String,

    #[validate(custom(function = "check_password"))]
    pub password: String,

    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,

    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
}

impl From<SignupRequestDto> for SignupRequest {
    fn from(dto: SignupRequestDto) -> Self {
        SignupRequest::new(dto.username, dto.password).with_profile(ProfileFields {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone_number: dto.phone_number,
        })
    }
}

impl fmt::Debug for SignupRequestDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequestDto")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

/// Body of `POST /auth/v1/login`, held to the signup rules
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(custom(function = "check_username"))]
    pub username: String,

    #[validate(custom(function = "check_password"))]
    pub password: String,
}

impl fmt::Debug for LoginRequestDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequestDto")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/v1/refreshToken`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1))]
    pub token: String,
}

/// Token pair returned by signup, login and refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: Uuid,
}

impl From<AuthResponse> for AuthResponseDto {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user_id: response.user_id,
        }
    }
}

fn check_username(username: &str) -> Result<(), ValidationError> {
    validate_username(username).map_err(|violation| ValidationError::new(violation.code()))
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    validate_password(password).map_err(|violation| ValidationError::new(violation.code()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, password: &str) -> SignupRequestDto {
        SignupRequestDto {
            username: username.to_string(),
            password: password.to_string(),
            first_name: None,
            last_name: None,
            email: None,
            phone_number: None,
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup("alice", "secret123").validate().is_ok());

        let errors = signup("al", "secret123").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let errors = signup("alice", "123").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        assert!(signup("ali ce", "secret123").validate().is_err());
    }

    #[test]
    fn test_signup_rejects_bad_email() {
        let mut dto = signup("alice", "secret123");
        dto.email = Some("not-an-email".to_string());
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_signup_accepts_camel_case_profile() {
        let dto: SignupRequestDto = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "password": "secret123",
            "firstName": "Alice",
            "phone_number": "+61400000000"
        }))
        .unwrap();

        let request: SignupRequest = dto.into();
        assert_eq!(request.profile.first_name.as_deref(), Some("Alice"));
        assert_eq!(request.profile.phone_number.as_deref(), Some("+61400000000"));
    }

    #[test]
    fn test_login_uses_signup_rules() {
        let login = |username: &str, password: &str| LoginRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        };

        assert!(login("alice", "secret123").validate().is_ok());
        assert!(login("al", "secret123").validate().is_err());
        assert!(login("alice", "123").validate().is_err());
        assert!(login("ali ce", "secret123").validate().is_err());
    }

    #[test]
    fn test_debug_output_hides_passwords() {
        let dto = signup("alice", "secret123");
        let debug = format!("{:?}", dto);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret123"));

        let dto = LoginRequestDto {
            username: "alice".to_string(),
            password: "secret123".to_string(),
        };
        assert!(!format!("{:?}", dto).contains("secret123"));
    }

    #[test]
    fn test_auth_response_is_camel_case() {
        let dto = AuthResponseDto {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            user_id: Uuid::nil(),
        };
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["accessToken"], "access");
        assert_eq!(json["refreshToken"], "refresh");
        assert_eq!(json["userId"], Uuid::nil().to_string());
    }
}
