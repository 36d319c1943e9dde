use chrono::NaiveDate;

/// Fields for inserting a new user. The password arrives already
/// hashed; hashing is the identity service's job, not the store's.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub security_stamp: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<i32>,
    pub color_theme: Option<i32>,
}
