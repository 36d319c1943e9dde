use chrono::{DateTime, Utc};

/// A named role. Referenced, not owned, by users through a
/// many-to-many assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
