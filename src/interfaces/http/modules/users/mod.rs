//! Profile retrieval, deletion and listing endpoints

pub mod dto;
pub mod handlers;

pub use dto::{UserProfile, UserProfileWithRoles};
pub use handlers::{delete_user, get_user_profile, list_all};
