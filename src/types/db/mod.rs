// Database entities (sea-orm)
pub mod permission;
pub mod refresh_token;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_permission;
pub mod user_role;
