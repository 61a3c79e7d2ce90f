use crm_core_api::domain::{Role, UserSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserModel {
    pub id: Uuid,
    pub username: String,
    /// Unique across users
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl Identifiable for UserModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl UserModel {
    pub fn to_summary(&self) -> UserSummary {
        let username = if self.username.trim().is_empty() {
            "Unknown".to_string()
        } else {
            self.username.clone()
        };
        UserSummary {
            id: self.id,
            username,
            role: self.role,
        }
    }
}
