use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::role::Role;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Username must be between 1 and 100 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User record as listed to other users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_superadmin: bool,
}

impl SessionUser {
    pub fn new(id: Uuid, username: String, email: String, role: Role) -> Self {
        Self {
            id,
            username,
            email,
            role,
            is_admin: role.is_admin(),
            is_superadmin: role.is_superadmin(),
        }
    }
}

/// Result of a successful signup or login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatus {
    pub is_admin: bool,
    pub is_superadmin: bool,
}

impl From<Role> for AdminStatus {
    fn from(role: Role) -> Self {
        Self {
            is_admin: role.is_admin(),
            is_superadmin: role.is_superadmin(),
        }
    }
}

/// Role information derived from the caller's token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub id: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_superadmin: bool,
}
