//! In-memory store and fake collaborators for service tests.

use async_trait::async_trait;
use crm_core_api::domain::{ExportRow, Identity, Role};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_api::service::{PasswordHasher, SpreadsheetWriter, TokenIssuer, TokenVerifier};
use crm_core_db::models::entry::{EntryModel, HistoryEntryModel};
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::{
    Create, Delete, FindAll, FindByEmail, FindByOwner, InsertUnordered, Load, LoadBatch, RowFailure,
    UnorderedInsertOutcome, UpdateWithHistory,
};
use parking_lot::RwLock;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;
use validator::Validate;

type StoreResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Entry store kept in insertion order. Writes run the same schema check as the database.
#[derive(Default)]
pub struct InMemoryEntryRepository {
    rows: RwLock<Vec<EntryModel>>,
    unavailable: AtomicBool,
}

impl InMemoryEntryRepository {
    /// Makes every following call fail as if the store were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<EntryModel> {
        self.rows.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<EntryModel> {
        self.rows.read().iter().find(|e| e.id == id).cloned()
    }

    /// Inserts without validation, for seeding test data
    pub fn seed(&self, entry: EntryModel) {
        self.rows.write().push(entry);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err("connection refused".into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Load<Postgres, EntryModel> for InMemoryEntryRepository {
    async fn load(&self, id: Uuid) -> StoreResult<Option<EntryModel>> {
        self.check_available()?;
        Ok(self.get(id))
    }
}

#[async_trait]
impl FindAll<Postgres, EntryModel> for InMemoryEntryRepository {
    async fn find_all(&self) -> StoreResult<Vec<EntryModel>> {
        self.check_available()?;
        Ok(self.snapshot())
    }
}

#[async_trait]
impl FindByOwner<Postgres, EntryModel> for InMemoryEntryRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<EntryModel>> {
        self.check_available()?;
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|e| e.created_by == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Create<Postgres, EntryModel> for InMemoryEntryRepository {
    async fn create(&self, item: EntryModel) -> StoreResult<EntryModel> {
        self.check_available()?;
        item.validate()?;
        let mut rows = self.rows.write();
        if rows.iter().any(|e| e.id == item.id) {
            return Err(format!("duplicate id {}", item.id).into());
        }
        rows.push(item.clone());
        Ok(item)
    }
}

#[async_trait]
impl InsertUnordered<Postgres, EntryModel> for InMemoryEntryRepository {
    async fn insert_unordered(&self, items: Vec<EntryModel>) -> StoreResult<UnorderedInsertOutcome<EntryModel>> {
        self.check_available()?;
        let mut outcome = UnorderedInsertOutcome::default();
        let mut rows = self.rows.write();
        for (index, item) in items.into_iter().enumerate() {
            match item.validate() {
                Ok(()) if !rows.iter().any(|e| e.id == item.id) => {
                    rows.push(item.clone());
                    outcome.inserted.push(item);
                }
                Ok(()) => outcome.failures.push(RowFailure {
                    index,
                    reason: "duplicate id".to_string(),
                }),
                Err(errors) => outcome.failures.push(RowFailure {
                    index,
                    reason: errors.to_string(),
                }),
            }
        }
        Ok(outcome)
    }
}

#[async_trait]
impl UpdateWithHistory<Postgres> for InMemoryEntryRepository {
    async fn update_with_history(
        &self,
        item: EntryModel,
        _appended: Option<HistoryEntryModel>,
    ) -> StoreResult<Option<EntryModel>> {
        self.check_available()?;
        item.validate()?;
        let mut rows = self.rows.write();
        match rows.iter_mut().find(|e| e.id == item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Delete<Postgres> for InMemoryEntryRepository {
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.check_available()?;
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|e| e.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<Vec<UserModel>>,
}

impl InMemoryUserRepository {
    pub fn seed(&self, user: UserModel) {
        self.rows.write().push(user);
    }

    pub fn snapshot(&self) -> Vec<UserModel> {
        self.rows.read().clone()
    }
}

#[async_trait]
impl Load<Postgres, UserModel> for InMemoryUserRepository {
    async fn load(&self, id: Uuid) -> StoreResult<Option<UserModel>> {
        Ok(self.rows.read().iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl LoadBatch<Postgres, UserModel> for InMemoryUserRepository {
    async fn load_batch(&self, ids: &[Uuid]) -> StoreResult<Vec<Option<UserModel>>> {
        let rows = self.rows.read();
        Ok(ids
            .iter()
            .map(|id| rows.iter().find(|u| u.id == *id).cloned())
            .collect())
    }
}

#[async_trait]
impl FindAll<Postgres, UserModel> for InMemoryUserRepository {
    async fn find_all(&self) -> StoreResult<Vec<UserModel>> {
        Ok(self.snapshot())
    }
}

#[async_trait]
impl FindByEmail<Postgres> for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserModel>> {
        Ok(self.rows.read().iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl Create<Postgres, UserModel> for InMemoryUserRepository {
    async fn create(&self, item: UserModel) -> StoreResult<UserModel> {
        let mut rows = self.rows.write();
        if rows.iter().any(|u| u.email == item.email) {
            return Err("duplicate key value violates unique constraint \"app_user_email_key\"".into());
        }
        rows.push(item.clone());
        Ok(item)
    }
}

pub fn test_user(username: &str, role: Role) -> UserModel {
    UserModel {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: FakeHasher::hashed("secret"),
        role,
    }
}

/// Issues opaque tokens and remembers the identity behind each
#[derive(Default)]
pub struct FakeTokens {
    issued: RwLock<HashMap<String, Identity>>,
}

impl FakeTokens {
    pub fn register_identity(&self, identity: Identity) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.issued.write().insert(token.clone(), identity);
        token
    }

    pub fn register(&self, id: Uuid, username: &str, role: Role) -> String {
        self.register_identity(Identity {
            id: id.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: role.to_string(),
        })
    }
}

impl TokenIssuer for FakeTokens {
    fn issue(&self, identity: &Identity) -> anyhow::Result<String> {
        Ok(self.register_identity(identity.clone()))
    }
}

impl TokenVerifier for FakeTokens {
    fn verify(&self, token: &str) -> ApiResult<Identity> {
        self.issued
            .read()
            .get(token)
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated("unknown token".to_string()))
    }
}

pub struct FakeHasher;

impl FakeHasher {
    pub fn hashed(password: &str) -> String {
        format!("hashed:{password}")
    }
}

impl PasswordHasher for FakeHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        Ok(Self::hashed(password))
    }

    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool> {
        Ok(Self::hashed(password) == hash)
    }
}

/// Records every workbook it is asked to write
#[derive(Default)]
pub struct FakeSpreadsheet {
    pub written: RwLock<Vec<(String, Vec<ExportRow>)>>,
    pub fail: AtomicBool,
}

impl SpreadsheetWriter for FakeSpreadsheet {
    fn write_workbook(&self, sheet_name: &str, rows: &[ExportRow]) -> anyhow::Result<Vec<u8>> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("workbook writer failed");
        }
        self.written.write().push((sheet_name.to_string(), rows.to_vec()));
        Ok(b"PK\x03\x04".to_vec())
    }
}
