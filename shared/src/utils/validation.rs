//! Credential validation rules shared by the API layer and the core services

/// Minimum username length in characters
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum username length in characters
pub const USERNAME_MAX_LENGTH: usize = 64;

/// Minimum password length in characters
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum password length in bytes (bcrypt ignores anything past 72 bytes)
pub const PASSWORD_MAX_BYTES: usize = 72;

/// A broken credential rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialViolation {
    Empty,
    TooShort,
    TooLong,
    ContainsWhitespace,
}

impl CredentialViolation {
    /// Stable machine-readable code for the violation
    pub fn code(&self) -> &'static str {
        match self {
            CredentialViolation::Empty => "required",
            CredentialViolation::TooShort => "too_short",
            CredentialViolation::TooLong => "too_long",
            CredentialViolation::ContainsWhitespace => "whitespace",
        }
    }
}

impl std::fmt::Display for CredentialViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Validate a username.
///
/// Usernames are case-sensitive natural keys, so no normalization happens here;
/// the value is only checked.
pub fn validate_username(username: &str) -> Result<(), CredentialViolation> {
    if username.is_empty() {
        return Err(CredentialViolation::Empty);
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CredentialViolation::ContainsWhitespace);
    }
    let len = username.chars().count();
    if len < USERNAME_MIN_LENGTH {
        return Err(CredentialViolation::TooShort);
    }
    if len > USERNAME_MAX_LENGTH {
        return Err(CredentialViolation::TooLong);
    }
    Ok(())
}

/// Validate a raw password before hashing
pub fn validate_password(password: &str) -> Result<(), CredentialViolation> {
    if password.is_empty() {
        return Err(CredentialViolation::Empty);
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(CredentialViolation::TooShort);
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return Err(CredentialViolation::TooLong);
    }
    Ok(())
}
