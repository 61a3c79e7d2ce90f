use async_trait::async_trait;
use chrono::Utc;
use crm_core_api::domain::{
    Actor, BulkUploadReport, CreateEntryRequest, Entry, EntryOwner, ExportFile, Identity,
    UpdateEntryRequest, EXPORT_SHEET_NAME,
};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_api::service::{EntryService, SpreadsheetWriter};
use crm_core_db::models::entry::EntryModel;
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::{EntryRepository, UserRepository};
use sqlx::Database;
use std::sync::Arc;
use uuid::Uuid;

use crate::bulk::{row_to_entry, INVALID_UPLOAD_FORMAT};
use crate::config::ServiceConfig;
use crate::export::project;
use crate::lifecycle::{apply_update, new_entry, CREATE_INVALID_INPUT, UPDATE_INVALID_INPUT};
use crate::policy::{Action, Scope};
use crate::store_error::map_store_error;

const UNKNOWN_USER: &str = "Unknown";

pub const INVALID_ENTRY_ID_ON_UPDATE: &str = "The entry ID provided is not valid. Please check and try again.";
pub const INVALID_ENTRY_ID_ON_DELETE: &str =
    "The entry ID you provided is not valid. Please check and try again.";
pub const ENTRY_NOT_FOUND_ON_UPDATE: &str =
    "We could not find the entry you are trying to update. It might have been deleted.";
pub const ENTRY_NOT_FOUND_ON_DELETE: &str =
    "We could not find the entry you are trying to delete. It might have already been removed.";

pub struct EntryServiceImpl<DB: Database> {
    entries: Arc<dyn EntryRepository<DB>>,
    users: Arc<dyn UserRepository<DB>>,
    spreadsheet: Arc<dyn SpreadsheetWriter>,
    config: ServiceConfig,
}

impl<DB: Database> EntryServiceImpl<DB> {
    pub fn new(
        entries: Arc<dyn EntryRepository<DB>>,
        users: Arc<dyn UserRepository<DB>>,
        spreadsheet: Arc<dyn SpreadsheetWriter>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            entries,
            users,
            spreadsheet,
            config,
        }
    }

    fn parse_entry_id(id: &str, message: &str) -> ApiResult<Uuid> {
        Uuid::parse_str(id.trim()).map_err(|_| ApiError::InvalidId(message.to_string()))
    }

    /// Entries visible under `scope`, in creation order
    async fn entries_in_scope(&self, scope: Scope) -> ApiResult<Vec<EntryModel>> {
        let result = match scope {
            Scope::All => self.entries.find_all().await,
            Scope::Own(owner_id) => self.entries.find_by_owner(owner_id).await,
        };
        result.map_err(|e| map_store_error(e, UPDATE_INVALID_INPUT))
    }

    /// Loads the entry an update or delete targets, then checks the actor may act on it
    async fn load_for(
        &self,
        actor: &Actor,
        id: Uuid,
        action: Action,
        not_found: &str,
    ) -> ApiResult<EntryModel> {
        let current = self
            .entries
            .load(id)
            .await
            .map_err(|e| map_store_error(e, UPDATE_INVALID_INPUT))?
            .ok_or_else(|| ApiError::NotFound(not_found.to_string()))?;

        let decision = self.config.role_policy.can_act(actor, action, Some(current.created_by));
        if !decision.is_allowed() {
            tracing::warn!(actor_id = %actor.id, entry_id = %id, ?action, "entry access denied");
        }
        decision.into_result()?;
        Ok(current)
    }

    fn owner_view(user: Option<&UserModel>) -> EntryOwner {
        match user {
            Some(user) if !user.username.trim().is_empty() => EntryOwner {
                id: Some(user.id),
                username: user.username.clone(),
            },
            Some(user) => EntryOwner {
                id: Some(user.id),
                username: UNKNOWN_USER.to_string(),
            },
            None => EntryOwner {
                id: None,
                username: UNKNOWN_USER.to_string(),
            },
        }
    }

    /// Caller-facing views with each creator resolved from the user store
    async fn with_owners(&self, models: Vec<EntryModel>) -> ApiResult<Vec<Entry>> {
        let owner_ids: Vec<Uuid> = models.iter().map(|m| m.created_by).collect();
        let owners = self
            .users
            .load_batch(&owner_ids)
            .await
            .map_err(|e| map_store_error(e, UPDATE_INVALID_INPUT))?;
        Ok(models
            .iter()
            .zip(owners.iter())
            .map(|(model, owner)| model.to_entry(Self::owner_view(owner.as_ref())))
            .collect())
    }

    async fn with_owner(&self, model: EntryModel) -> ApiResult<Entry> {
        let mut views = self.with_owners(vec![model]).await?;
        views
            .pop()
            .ok_or_else(|| ApiError::InternalError("owner lookup returned no rows".to_string()))
    }
}

#[async_trait]
impl<DB: Database> EntryService for EntryServiceImpl<DB> {
    async fn create_entry(&self, identity: &Identity, request: CreateEntryRequest) -> ApiResult<Entry> {
        let actor = identity.actor()?;
        let model = new_entry(&request, actor.id, Utc::now())?;

        let saved = self
            .entries
            .create(model)
            .await
            .map_err(|e| map_store_error(e, CREATE_INVALID_INPUT))?;
        tracing::info!(entry_id = %saved.id, actor_id = %actor.id, "entry created");

        Ok(saved.to_entry(EntryOwner {
            id: Some(actor.id),
            username: identity.username.clone(),
        }))
    }

    async fn list_entries(&self, identity: &Identity) -> ApiResult<Vec<Entry>> {
        let actor = identity.actor()?;
        let scope = self.config.role_policy.scope(&actor, Action::ReadAll);
        let models = self.entries_in_scope(scope).await?;
        tracing::debug!(actor_id = %actor.id, role = %actor.role, count = models.len(), "entries listed");
        self.with_owners(models).await
    }

    async fn update_entry(
        &self,
        identity: &Identity,
        id: &str,
        request: UpdateEntryRequest,
    ) -> ApiResult<Entry> {
        let entry_id = Self::parse_entry_id(id, INVALID_ENTRY_ID_ON_UPDATE)?;
        let actor = identity.actor()?;
        let current = self
            .load_for(&actor, entry_id, Action::Update, ENTRY_NOT_FOUND_ON_UPDATE)
            .await?;

        let outcome = apply_update(&current, &request, Utc::now())?;
        let stored = self
            .entries
            .update_with_history(outcome.entry, outcome.appended)
            .await
            .map_err(|e| map_store_error(e, UPDATE_INVALID_INPUT))?
            .ok_or_else(|| ApiError::NotFound(ENTRY_NOT_FOUND_ON_UPDATE.to_string()))?;
        tracing::info!(entry_id = %entry_id, actor_id = %actor.id, status = %stored.status, "entry updated");

        self.with_owner(stored).await
    }

    async fn delete_entry(&self, identity: &Identity, id: &str) -> ApiResult<()> {
        let entry_id = Self::parse_entry_id(id, INVALID_ENTRY_ID_ON_DELETE)?;
        let actor = identity.actor()?;
        self.load_for(&actor, entry_id, Action::Delete, ENTRY_NOT_FOUND_ON_DELETE)
            .await?;

        let deleted = self
            .entries
            .delete(entry_id)
            .await
            .map_err(|e| map_store_error(e, UPDATE_INVALID_INPUT))?;
        if !deleted {
            return Err(ApiError::NotFound(ENTRY_NOT_FOUND_ON_DELETE.to_string()));
        }
        tracing::info!(entry_id = %entry_id, actor_id = %actor.id, "entry deleted");
        Ok(())
    }

    async fn bulk_upload(&self, identity: &Identity, rows: serde_json::Value) -> ApiResult<BulkUploadReport> {
        let actor = identity.actor()?;
        let rows = rows
            .as_array()
            .filter(|rows| !rows.is_empty())
            .ok_or_else(|| ApiError::validation(INVALID_UPLOAD_FORMAT))?;

        let batch_size = self.config.bulk_batch_size.max(1);
        let mut report = BulkUploadReport {
            inserted: 0,
            failed_batches: Vec::new(),
            errors: Vec::new(),
        };

        for (batch_index, batch) in rows.chunks(batch_size).enumerate() {
            let batch_number = batch_index + 1;
            let now = Utc::now();
            let mut rejected = 0usize;
            let mut models = Vec::with_capacity(batch.len());
            for (offset, row) in batch.iter().enumerate() {
                match row_to_entry(row, actor.id, now) {
                    Ok(model) => models.push(model),
                    Err(reason) => {
                        tracing::warn!(batch = batch_number, row = offset, %reason, "bulk row could not be converted");
                        rejected += 1;
                    }
                }
            }

            match self.entries.insert_unordered(models).await {
                Ok(outcome) => {
                    report.inserted += outcome.inserted.len();
                    for failure in &outcome.failures {
                        tracing::warn!(batch = batch_number, reason = %failure.reason, "bulk row rejected by store");
                    }
                    rejected += outcome.failures.len();
                }
                Err(e) => {
                    tracing::error!(batch = batch_number, error = %e, "bulk batch could not be written");
                    rejected += batch.len();
                }
            }

            if rejected > 0 {
                report.failed_batches.push(batch_number);
                report.errors.push(BulkUploadReport::batch_error_message(batch_number));
            }
        }

        tracing::info!(
            actor_id = %actor.id,
            rows = rows.len(),
            inserted = report.inserted,
            failed_batches = report.failed_batches.len(),
            "bulk upload finished"
        );
        Ok(report)
    }

    async fn export_entries(&self, identity: &Identity) -> ApiResult<ExportFile> {
        let actor = identity.actor()?;
        let scope = self.config.role_policy.scope(&actor, Action::ExportAll);
        let models = self.entries_in_scope(scope).await?;
        let rows: Vec<_> = models.iter().map(project).collect();

        let bytes = self
            .spreadsheet
            .write_workbook(EXPORT_SHEET_NAME, &rows)
            .map_err(|e| {
                tracing::error!(error = %e, "workbook could not be written");
                ApiError::InternalError(e.to_string())
            })?;
        tracing::info!(actor_id = %actor.id, rows = rows.len(), "entries exported");
        Ok(ExportFile::xlsx(bytes))
    }
}
