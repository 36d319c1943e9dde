/// Query specification for listing users.
///
/// A plain value type standing in for the original data layer's
/// specification objects. Empty means "everything".
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Substring match against username or email.
    pub search: Option<String>,
    /// Sort key: "username", "email" or unset (creation time, newest first).
    pub sort_by: Option<String>,
}
