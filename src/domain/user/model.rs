use chrono::{DateTime, NaiveDate, Utc};

/// Account record as stored in the credential store.
///
/// `password_hash` and `security_stamp` never leave the backend; the
/// HTTP layer maps this into profile DTOs that omit both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Random value regenerated whenever credentials change. Kept for
    /// parity with the SPA's session-invalidation contract.
    pub security_stamp: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<i32>,
    pub color_theme: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
