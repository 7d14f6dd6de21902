use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::parse_birth_date;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Gender;
use crate::domain::user::models::NewPassword;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::BirthDateError;
use crate::user::errors::EmailError;
use crate::user::errors::GenderError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;

pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;
    state
        .user_service
        .register_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration (raw JSON)
///
/// Missing fields deserialize as empty strings and fail validation with 400.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RegisterUserRequest {
    first_name: String,
    last_name: String,
    birth_date: String,
    gender: String,
    email: String,
    password: String,
    password_confirm: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid birth date: {0}")]
    BirthDate(#[from] BirthDateError),

    #[error("Invalid gender: {0}")]
    Gender(#[from] GenderError),
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterUserRequestError> {
        let first_name = PersonName::new("first_name", self.first_name)?;
        let last_name = PersonName::new("last_name", self.last_name)?;
        let email = EmailAddress::new(self.email)?;
        let password = NewPassword::new(self.password, &self.password_confirm)?;
        let birth_date = parse_birth_date(&self.birth_date)?;
        let gender: Gender = self.gender.parse()?;

        Ok(RegisterUserCommand {
            first_name,
            last_name,
            birth_date,
            gender,
            email,
            password,
        })
    }
}

impl From<ParseRegisterUserRequestError> for ApiError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
