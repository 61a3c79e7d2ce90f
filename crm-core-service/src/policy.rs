//! Role based authorization for entry and user operations.
//!
//! Decisions are made from a capability table keyed by [`Role`]. Ownership of
//! the targeted record is the only other input.

use crm_core_api::domain::{Actor, Role};
use crm_core_api::error::{ApiError, ApiResult};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Capabilities a role can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read entries created by any user.
    ViewAllEntries,
    /// List every account.
    ViewAllUsers,
    /// Export entries created by any user.
    ExportAllEntries,
    /// Update or delete entries created by any user.
    ManageAnyEntry,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::ViewAllEntries,
        Capability::ViewAllUsers,
        Capability::ExportAllEntries,
        Capability::ManageAnyEntry,
    ];
}

/// Operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ReadAll,
    ListAllUsers,
    ExportAll,
    Update,
    Delete,
}

impl Action {
    fn required_capability(&self) -> Capability {
        match self {
            Action::ReadAll => Capability::ViewAllEntries,
            Action::ListAllUsers => Capability::ViewAllUsers,
            Action::ExportAll => Capability::ExportAllEntries,
            Action::Update | Action::Delete => Capability::ManageAnyEntry,
        }
    }

    fn denial_message(&self) -> &'static str {
        match self {
            Action::Update => "You do not have permission to update this entry. Please contact your administrator if you believe this is an error.",
            Action::Delete => "You do not have permission to delete this entry. Please contact your administrator if you think this is a mistake.",
            Action::ReadAll | Action::ListAllUsers | Action::ExportAll => {
                "You do not have permission to perform this action."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// `Deny` becomes `Forbidden`
    pub fn into_result(self) -> ApiResult<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(ApiError::Forbidden(reason)),
        }
    }
}

/// Which records a listing or export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Own(Uuid),
}

/// Capability table consulted for every decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePolicy {
    grants: HashMap<Role, HashSet<Capability>>,
}

impl Default for RolePolicy {
    /// Admin and Superadmin hold every capability, Others hold none.
    fn default() -> Self {
        let mut policy = Self::empty();
        for role in [Role::Admin, Role::Superadmin] {
            for capability in Capability::ALL {
                policy.grant(role, capability);
            }
        }
        policy
    }
}

impl RolePolicy {
    /// A table in which no role holds any capability.
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    pub fn grant(&mut self, role: Role, capability: Capability) -> &mut Self {
        self.grants.entry(role).or_default().insert(capability);
        self
    }

    pub fn holds(&self, role: Role, capability: Capability) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|capabilities| capabilities.contains(&capability))
    }

    /// Decide whether `actor` may perform `action`.
    ///
    /// `resource_owner` is the creator of the targeted record for `Update` and
    /// `Delete`; owners may always act on their own records.
    pub fn can_act(&self, actor: &Actor, action: Action, resource_owner: Option<Uuid>) -> Decision {
        if self.holds(actor.role, action.required_capability()) {
            return Decision::Allow;
        }
        let owns_resource = matches!(action, Action::Update | Action::Delete)
            && resource_owner == Some(actor.id);
        if owns_resource {
            Decision::Allow
        } else {
            Decision::Deny(action.denial_message().to_string())
        }
    }

    /// Records a listing or export performed by `actor` covers.
    pub fn scope(&self, actor: &Actor, action: Action) -> Scope {
        if self.can_act(actor, action, None).is_allowed() {
            Scope::All
        } else {
            Scope::Own(actor.id)
        }
    }
}
