use std::fmt;
use std::str::FromStr;

use auth::Identity;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::user::errors::BirthDateError;
use crate::user::errors::EmailError;
use crate::user::errors::GenderError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;

/// Day-first date layout used for birth dates on the wire.
pub const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

/// User aggregate entity.
///
/// Represents a registered account; only the password hash is ever stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User data ready to persist; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// User unique identifier type (database sequence value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Identity> for UserId {
    fn from(identity: Identity) -> Self {
        Self(identity.as_i64())
    }
}

impl From<UserId> for Identity {
    fn from(id: UserId) -> Self {
        Identity(id.0)
    }
}

/// Non-empty first or last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Create a validated name.
    ///
    /// # Arguments
    /// * `field` - Field name reported on failure
    /// * `name` - Raw name
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    pub fn new(field: &'static str, name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            Err(NameError::Empty(field))
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = GenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(GenderError::Unknown(other.to_string())),
        }
    }
}

/// Parse a `DD.MM.YYYY` birth date.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, BirthDateError> {
    NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT)
        .map_err(|_| BirthDateError::InvalidFormat(raw.to_string()))
}

/// Plaintext password that passed the registration policy.
///
/// Never persisted; the service hashes it before storage.
pub struct NewPassword(String);

impl NewPassword {
    const MIN_LENGTH: usize = 6;

    /// Validate a password and its confirmation.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    /// * `MissingDigit` - No ASCII digit present
    /// * `ConfirmationMismatch` - Confirmation differs from password
    pub fn new(password: String, confirmation: &str) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(<redacted>)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub email: EmailAddress,
    pub password: NewPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_trims_and_rejects_empty() {
        let name = PersonName::new("first_name", "  Alice ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Alice");

        assert_eq!(
            PersonName::new("last_name", "   ".to_string()),
            Err(NameError::Empty("last_name"))
        );
    }

    #[test]
    fn test_email_address_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new(String::new()).is_err());
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert!("Male".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_parse_birth_date() {
        let date = parse_birth_date("24.12.1990").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 12, 24).unwrap());
        assert_eq!(date.format(BIRTH_DATE_FORMAT).to_string(), "24.12.1990");

        assert!(parse_birth_date("1990-12-24").is_err());
        assert!(parse_birth_date("31.02.1990").is_err());
    }

    #[test]
    fn test_new_password_policy() {
        assert!(NewPassword::new("secret1".to_string(), "secret1").is_ok());

        assert!(matches!(
            NewPassword::new("abc1".to_string(), "abc1"),
            Err(PasswordPolicyError::TooShort { min: 6, actual: 4 })
        ));
        assert!(matches!(
            NewPassword::new("password".to_string(), "password"),
            Err(PasswordPolicyError::MissingDigit)
        ));
        assert!(matches!(
            NewPassword::new("secret1".to_string(), "secret2"),
            Err(PasswordPolicyError::ConfirmationMismatch)
        ));
    }

    #[test]
    fn test_new_password_debug_is_redacted() {
        let password = NewPassword::new("secret1".to_string(), "secret1").unwrap();
        assert!(!format!("{:?}", password).contains("secret1"));
    }

    #[test]
    fn test_user_id_identity_conversion() {
        let id = UserId::from(Identity(42));
        assert_eq!(id, UserId(42));
        assert_eq!(Identity::from(id), Identity(42));
    }
}
