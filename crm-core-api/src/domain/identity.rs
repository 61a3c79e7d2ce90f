use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::role::Role;
use crate::error::{ApiError, ApiResult};

/// Claims decoded from a bearer credential by the external token verifier.
///
/// The role is kept exactly as it was issued; it is only interpreted after
/// conversion into an [`Actor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// The authenticated principal a policy decision is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn normalized_role(&self) -> Role {
        Role::normalize(Some(&self.role))
    }

    /// Typed view of the identity. Fails with `InvalidId` when the token
    /// carries an id that is not a well-formed identifier.
    pub fn actor(&self) -> ApiResult<Actor> {
        let id = Uuid::parse_str(self.id.trim()).map_err(|_| {
            ApiError::InvalidUserId(
                "The user ID provided in your session is invalid. Please log out and log back in."
                    .to_string(),
            )
        })?;
        Ok(Actor {
            id,
            role: self.normalized_role(),
        })
    }
}
