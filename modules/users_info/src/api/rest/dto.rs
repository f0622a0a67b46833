use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::error::UsersInfoError;
use crate::contract::model::User;

/// REST DTO for user representation (camelCase, RFC 3339 timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserReq {
    pub name: String,
    pub email: String,
}

/// REST DTO for replacing a user's name and email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserReq {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// `?id=` query parameter shared by GET and DELETE.
/// Kept as a string so a non-numeric id is reported as a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// `Ok(None)` when the parameter is absent or empty.
    pub fn parse(&self) -> Result<Option<i64>, UsersInfoError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| UsersInfoError::validation(format!("invalid id: {:?}", raw))),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Both fields are required and must not be blank.
pub fn require_name_and_email(name: &str, email: &str) -> Result<(), UsersInfoError> {
    if name.trim().is_empty() {
        return Err(UsersInfoError::validation("name must not be blank"));
    }
    if email.trim().is_empty() {
        return Err(UsersInfoError::validation("email must not be blank"));
    }
    Ok(())
}
