use chrono::{DateTime, Utc};

/// A persisted user as read back from the store.
/// Transport-agnostic; REST DTOs live in `api::rest::dto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wholesale replacement of name and email for an existing row.
/// `created_at` is never written on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub updated_at: DateTime<Utc>,
}
