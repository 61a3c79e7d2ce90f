use async_trait::async_trait;

use crate::domain::{
    AdminStatus, AuthSession, BulkUploadReport, CreateEntryRequest, Entry, ExportFile, ExportRow,
    Identity, LoginRequest, RoleInfo, SignupRequest, UpdateEntryRequest, UserSummary,
};
use crate::error::ApiResult;

/// Entry operations, each performed on behalf of an authenticated identity
#[async_trait]
pub trait EntryService: Send + Sync {
    async fn create_entry(&self, identity: &Identity, request: CreateEntryRequest) -> ApiResult<Entry>;

    /// All entries for admins, the caller's own entries otherwise
    async fn list_entries(&self, identity: &Identity) -> ApiResult<Vec<Entry>>;

    async fn update_entry(
        &self,
        identity: &Identity,
        id: &str,
        request: UpdateEntryRequest,
    ) -> ApiResult<Entry>;

    async fn delete_entry(&self, identity: &Identity, id: &str) -> ApiResult<()>;

    /// Best-effort ingest of externally shaped rows. `rows` must be a non-empty JSON array.
    async fn bulk_upload(&self, identity: &Identity, rows: serde_json::Value) -> ApiResult<BulkUploadReport>;

    async fn export_entries(&self, identity: &Identity) -> ApiResult<ExportFile>;
}

/// Account operations
#[async_trait]
pub trait UserService: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> ApiResult<AuthSession>;

    async fn login(&self, request: LoginRequest) -> ApiResult<AuthSession>;

    async fn list_users(&self, identity: &Identity) -> ApiResult<Vec<UserSummary>>;

    async fn admin_status(&self, identity: &Identity) -> ApiResult<AdminStatus>;

    fn role_info(&self, identity: &Identity) -> RoleInfo;
}

/// Decodes bearer credentials. Implemented outside this workspace.
pub trait TokenVerifier: Send + Sync {
    /// Fails with `Unauthenticated` for unknown, malformed or expired tokens
    fn verify(&self, token: &str) -> ApiResult<Identity>;
}

/// Issues bearer credentials. Implemented outside this workspace.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, identity: &Identity) -> anyhow::Result<String>;
}

/// Password hashing primitive. Implemented outside this workspace.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool>;
}

/// Spreadsheet serializer. Implemented outside this workspace.
pub trait SpreadsheetWriter: Send + Sync {
    /// Writes `rows` as a single sheet and returns the workbook bytes
    fn write_workbook(&self, sheet_name: &str, rows: &[ExportRow]) -> anyhow::Result<Vec<u8>>;
}
