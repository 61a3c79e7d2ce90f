use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Canonical user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Superadmin,
    Admin,
    Others,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "Superadmin",
            Role::Admin => "Admin",
            Role::Others => "Others",
        }
    }

    /// Maps a free-text role onto a canonical role.
    ///
    /// Comparison happens on the canonical casing produced by
    /// [`normalize_role_name`]; absent or unknown input is `Others`.
    pub fn normalize(raw: Option<&str>) -> Role {
        match normalize_role_name(raw).as_str() {
            "Superadmin" => Role::Superadmin,
            "Admin" => Role::Admin,
            _ => Role::Others,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self, Role::Superadmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Superadmin" => Ok(Role::Superadmin),
            "Admin" => Ok(Role::Admin),
            "Others" => Ok(Role::Others),
            _ => Err(()),
        }
    }
}

/// First letter upper case, the rest lower case. Absent or blank input yields "Others".
pub fn normalize_role_name(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => Role::Others.as_str().to_string(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_casing() {
        assert_eq!(Role::normalize(Some("admin")), Role::Admin);
        assert_eq!(Role::normalize(Some("ADMIN")), Role::Admin);
        assert_eq!(Role::normalize(Some("superAdmin")), Role::Superadmin);
        assert_eq!(Role::normalize(Some(" superadmin ")), Role::Superadmin);
        assert_eq!(Role::normalize(Some("others")), Role::Others);
    }

    #[test]
    fn test_normalize_unknown_and_absent() {
        assert_eq!(Role::normalize(None), Role::Others);
        assert_eq!(Role::normalize(Some("")), Role::Others);
        assert_eq!(Role::normalize(Some("manager")), Role::Others);
        assert_eq!(Role::normalize(Some("super admin")), Role::Others);
        assert_eq!(normalize_role_name(None), "Others");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Admin", "aDmIn", "Superadmin", "Others", "manager", ""] {
            let once = normalize_role_name(Some(raw));
            let twice = normalize_role_name(Some(&once));
            assert_eq!(once, twice);
            assert_eq!(Role::normalize(Some(&once)), Role::normalize(Some(raw)));
        }
        assert_eq!(normalize_role_name(Some("Admin")), "Admin");
    }

    #[test]
    fn test_admin_flags() {
        assert!(Role::Admin.is_admin());
        assert!(Role::Superadmin.is_admin());
        assert!(!Role::Others.is_admin());
        assert!(Role::Superadmin.is_superadmin());
        assert!(!Role::Admin.is_superadmin());
    }
}
