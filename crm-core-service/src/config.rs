use anyhow::Context;

use crate::policy::RolePolicy;

pub const DEFAULT_BULK_BATCH_SIZE: usize = 500;

/// Settings shared by the services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Rows per bulk upload batch
    pub bulk_batch_size: usize,
    pub role_policy: RolePolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bulk_batch_size: DEFAULT_BULK_BATCH_SIZE,
            role_policy: RolePolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Reads `CRM_BULK_BATCH_SIZE`; every other setting keeps its default.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("CRM_BULK_BATCH_SIZE") {
            let size: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("CRM_BULK_BATCH_SIZE is not a number: {raw}"))?;
            anyhow::ensure!(size > 0, "CRM_BULK_BATCH_SIZE must be greater than zero");
            config.bulk_batch_size = size;
        }
        Ok(config)
    }
}
