//! Role management DTOs

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for role creation: `?roleName=...`
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleParams {
    #[serde(default)]
    pub role_name: String,
}
