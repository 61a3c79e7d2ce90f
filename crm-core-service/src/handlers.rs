//! Request handling surface.
//!
//! Each method takes the raw `Authorization` header value where the operation
//! requires a caller, runs the operation and produces exactly one [`Reply`].

use crm_core_api::domain::{
    AdminStatus, AuthSession, CreateEntryRequest, Entry, ExportFile, LoginRequest, RoleInfo,
    SignupRequest, UpdateEntryRequest, UserSummary,
};
use crm_core_api::error::ApiError;
use crm_core_api::response::Reply;
use crm_core_api::service::{EntryService, TokenVerifier, UserService};
use std::sync::Arc;

use crate::auth::authenticate;

const CREATE_FAILED: &str = "Oops! Something went wrong on our side. Please try again later.";
const LIST_FAILED: &str = "We couldn't retrieve your entries at the moment. Please try again later.";
const USERS_FAILED: &str = "We couldn't retrieve the user list right now. Please try again later.";
const EXPORT_FAILED: &str = "Error exporting entries";
const DELETE_FAILED: &str =
    "We ran into an issue while trying to delete the entry. Please try again later or contact support.";
const UPDATE_FAILED: &str = "We encountered an error while updating your entry. Please try again later or contact support if the problem persists.";
const BULK_FAILED: &str = "We couldn't upload your data due to a problem. Please check the file and try again. If the issue continues, contact support.";
const ADMIN_CHECK_FAILED: &str = "Something went wrong on our side while fetching your details. Please try again later. If the problem continues, contact support.";
const SIGNUP_FAILED: &str = "An error occurred during signup.";
const LOGIN_FAILED: &str = "Server error during login";
const ROLE_FAILED: &str = "Unable to determine your role. Please log in again.";

const NO_USERS_FOUND_CODE: &str = "NO_USERS_FOUND";

fn failure<T>(operation: &str, error: ApiError, fallback: &str) -> Reply<T> {
    if error.is_client_facing() {
        tracing::debug!(operation, error = %error, "request rejected");
    } else {
        tracing::error!(operation, error = %error, "request failed");
    }
    Reply::from_error(&error, fallback)
}

pub struct Controller {
    entries: Arc<dyn EntryService>,
    users: Arc<dyn UserService>,
    verifier: Arc<dyn TokenVerifier>,
}

impl Controller {
    pub fn new(
        entries: Arc<dyn EntryService>,
        users: Arc<dyn UserService>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            entries,
            users,
            verifier,
        }
    }

    pub async fn create_entry(&self, authorization: Option<&str>, request: CreateEntryRequest) -> Reply<Entry> {
        let identity = match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => identity,
            Err(e) => return failure("create_entry", e, CREATE_FAILED),
        };
        match self.entries.create_entry(&identity, request).await {
            Ok(entry) => Reply::created(entry, "Entry created successfully."),
            Err(e) => failure("create_entry", e, CREATE_FAILED),
        }
    }

    pub async fn list_entries(&self, authorization: Option<&str>) -> Reply<Vec<Entry>> {
        let identity = match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => identity,
            Err(e) => return failure("list_entries", e, LIST_FAILED),
        };
        match self.entries.list_entries(&identity).await {
            Ok(entries) => Reply::ok(entries),
            Err(e) => failure("list_entries", e, LIST_FAILED),
        }
    }

    /// The workbook on success, a failure reply otherwise
    pub async fn export_entries(&self, authorization: Option<&str>) -> Result<ExportFile, Reply<()>> {
        let identity = authenticate(self.verifier.as_ref(), authorization)
            .map_err(|e| failure("export_entries", e, EXPORT_FAILED))?;
        self.entries
            .export_entries(&identity)
            .await
            .map_err(|e| failure("export_entries", e, EXPORT_FAILED))
    }

    pub async fn update_entry(
        &self,
        authorization: Option<&str>,
        id: &str,
        request: UpdateEntryRequest,
    ) -> Reply<Entry> {
        let identity = match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => identity,
            Err(e) => return failure("update_entry", e, UPDATE_FAILED),
        };
        match self.entries.update_entry(&identity, id, request).await {
            Ok(entry) => Reply::ok_with_message(entry, "Entry updated successfully."),
            Err(e) => failure("update_entry", e, UPDATE_FAILED),
        }
    }

    pub async fn delete_entry(&self, authorization: Option<&str>, id: &str) -> Reply<()> {
        let identity = match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => identity,
            Err(e) => return failure("delete_entry", e, DELETE_FAILED),
        };
        match self.entries.delete_entry(&identity, id).await {
            Ok(()) => Reply::message_only(200, "Entry has been deleted successfully."),
            Err(e) => failure("delete_entry", e, DELETE_FAILED),
        }
    }

    pub async fn bulk_upload(&self, authorization: Option<&str>, rows: serde_json::Value) -> Reply<()> {
        let identity = match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => identity,
            Err(e) => return failure("bulk_upload", e, BULK_FAILED),
        };
        match self.entries.bulk_upload(&identity, rows).await {
            Ok(report) => Reply::message_only(report.status_code(), report.message()).with_errors(report.errors),
            Err(e) => failure("bulk_upload", e, BULK_FAILED),
        }
    }

    pub async fn list_users(&self, authorization: Option<&str>) -> Reply<Vec<UserSummary>> {
        let identity = match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => identity,
            Err(e) => return failure("list_users", e, USERS_FAILED),
        };
        match self.users.list_users(&identity).await {
            Ok(users) => Reply::ok(users),
            Err(e @ ApiError::NotFound(_)) => {
                failure("list_users", e, USERS_FAILED).with_error_code(NO_USERS_FOUND_CODE)
            }
            Err(e) => failure("list_users", e, USERS_FAILED),
        }
    }

    pub async fn admin_check(&self, authorization: Option<&str>) -> Reply<AdminStatus> {
        let identity = match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => identity,
            Err(e) => return failure("admin_check", e, ADMIN_CHECK_FAILED),
        };
        match self.users.admin_status(&identity).await {
            Ok(status) => Reply::ok(status),
            Err(e) => failure("admin_check", e, ADMIN_CHECK_FAILED),
        }
    }

    pub fn user_role(&self, authorization: Option<&str>) -> Reply<RoleInfo> {
        match authenticate(self.verifier.as_ref(), authorization) {
            Ok(identity) => Reply::ok(self.users.role_info(&identity)),
            Err(e) => failure("user_role", e, ROLE_FAILED),
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Reply<AuthSession> {
        match self.users.signup(request).await {
            Ok(session) => Reply::created(session, "User created successfully"),
            Err(e) => failure("signup", e, SIGNUP_FAILED),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Reply<AuthSession> {
        match self.users.login(request).await {
            Ok(session) => Reply::ok_with_message(session, "Login successful"),
            Err(e) => failure("login", e, LOGIN_FAILED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{INVALID_TOKEN, NO_TOKEN};
    use crate::config::ServiceConfig;
    use crate::entry_service::EntryServiceImpl;
    use crate::test_support::{
        test_user, FakeHasher, FakeSpreadsheet, FakeTokens, InMemoryEntryRepository,
        InMemoryUserRepository,
    };
    use crate::user_service::UserServiceImpl;
    use crm_core_api::domain::Role;
    use serde_json::json;
    use sqlx::Postgres;
    use uuid::Uuid;

    struct Fixture {
        entries: Arc<InMemoryEntryRepository>,
        users: Arc<InMemoryUserRepository>,
        tokens: Arc<FakeTokens>,
        controller: Controller,
    }

    fn fixture() -> Fixture {
        let entries = Arc::new(InMemoryEntryRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let tokens = Arc::new(FakeTokens::default());
        let entry_service = EntryServiceImpl::<Postgres>::new(
            entries.clone(),
            users.clone(),
            Arc::new(FakeSpreadsheet::default()),
            ServiceConfig::default(),
        );
        let user_service = UserServiceImpl::<Postgres>::new(
            users.clone(),
            Arc::new(FakeHasher),
            tokens.clone(),
            ServiceConfig::default(),
        );
        let controller = Controller::new(Arc::new(entry_service), Arc::new(user_service), tokens.clone());
        Fixture {
            entries,
            users,
            tokens,
            controller,
        }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    fn acme_request() -> CreateEntryRequest {
        serde_json::from_value(json!({
            "customerName": "Acme Corp",
            "mobileNumber": "9876543210",
            "AlterNumber": "9876543211",
            "email": "a@x.com",
            "address": "12 Main Street",
            "product": "Ed-Tech",
            "organization": "Acme",
            "category": "Private"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_update_through_controller() {
        let fx = fixture();
        let owner = test_user("owner", Role::Others);
        fx.users.seed(owner.clone());
        let header = bearer(&fx.tokens.register(owner.id, "owner", Role::Others));

        let reply = fx.controller.create_entry(Some(&header), acme_request()).await;
        assert_eq!(reply.status, 201);
        assert_eq!(reply.body.message.as_deref(), Some("Entry created successfully."));
        let body = serde_json::to_value(&reply.body).unwrap();
        assert_eq!(body["data"]["status"], "Not Found");
        assert_eq!(body["data"]["history"], json!([]));
        assert_eq!(body["data"]["closetype"], "");

        let id = reply.body.data.unwrap().id.to_string();
        let patch: UpdateEntryRequest = serde_json::from_value(json!({
            "status": "Closed",
            "closetype": "Closed Won",
            "closeamount": 500,
            "remarks": "deal done"
        }))
        .unwrap();
        let reply = fx.controller.update_entry(Some(&header), &id, patch).await;
        assert_eq!(reply.status, 200);
        let body = serde_json::to_value(&reply.body).unwrap();
        assert_eq!(body["data"]["closetype"], "Closed Won");
        assert_eq!(body["data"]["history"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["history"][0]["status"], "Closed");
        assert_eq!(body["data"]["history"][0]["remarks"], "deal done");
    }

    #[tokio::test]
    async fn test_missing_and_invalid_tokens() {
        let fx = fixture();
        let reply = fx.controller.list_entries(None).await;
        assert_eq!(reply.status, 401);
        assert_eq!(reply.body.message.as_deref(), Some(NO_TOKEN));

        let reply = fx.controller.list_entries(Some("Bearer forged")).await;
        assert_eq!(reply.status, 401);
        assert_eq!(reply.body.message.as_deref(), Some(INVALID_TOKEN));
        assert!(!reply.body.success);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_forbidden() {
        let fx = fixture();
        let owner = test_user("owner", Role::Others);
        let owner_header = bearer(&fx.tokens.register(owner.id, "owner", Role::Others));
        let stranger_header = bearer(&fx.tokens.register(Uuid::new_v4(), "stranger", Role::Others));

        let created = fx.controller.create_entry(Some(&owner_header), acme_request()).await;
        let id = created.body.data.unwrap().id;

        let reply = fx.controller.delete_entry(Some(&stranger_header), &id.to_string()).await;
        assert_eq!(reply.status, 403);
        assert!(fx.entries.get(id).is_some());

        let reply = fx.controller.delete_entry(Some(&owner_header), &id.to_string()).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body.message.as_deref(), Some("Entry has been deleted successfully."));
        assert!(fx.entries.get(id).is_none());
    }

    #[tokio::test]
    async fn test_invalid_ids_carry_error_codes() {
        let fx = fixture();
        let header = bearer(&fx.tokens.register(Uuid::new_v4(), "owner", Role::Admin));
        let reply = fx
            .controller
            .update_entry(Some(&header), "bogus", UpdateEntryRequest::default())
            .await;
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.error_code.as_deref(), Some("INVALID_ID"));

        let header = bearer(&fx.tokens.register_identity(crm_core_api::domain::Identity {
            id: "bogus".into(),
            username: "x".into(),
            email: "x@example.com".into(),
            role: "Admin".into(),
        }));
        let reply = fx.controller.list_entries(Some(&header)).await;
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.error_code.as_deref(), Some("INVALID_USER_ID"));
    }

    #[tokio::test]
    async fn test_store_outage_hides_detail() {
        let fx = fixture();
        let header = bearer(&fx.tokens.register(Uuid::new_v4(), "owner", Role::Others));
        fx.entries.set_unavailable(true);

        let reply = fx.controller.list_entries(Some(&header)).await;
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body.message.as_deref(), Some(LIST_FAILED));
        assert_eq!(reply.body.error_code.as_deref(), Some("SERVER_ERROR"));

        let reply = fx.controller.create_entry(Some(&header), acme_request()).await;
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body.message.as_deref(), Some(CREATE_FAILED));
    }

    #[tokio::test]
    async fn test_bulk_upload_reply() {
        let fx = fixture();
        let header = bearer(&fx.tokens.register(Uuid::new_v4(), "owner", Role::Others));
        let good = json!({
            "Customer Name": "One",
            "Contact Number": "9876543210",
            "Alternate Number": "9876543211",
            "Product": "AV",
            "Address": "42 Market Road",
            "Category": "Government"
        });
        let mut bad = good.clone();
        bad["Address"] = json!("x");

        let reply = fx.controller.bulk_upload(Some(&header), json!([good.clone(), bad])).await;
        assert_eq!(reply.status, 207);
        assert_eq!(reply.body.errors.len(), 1);
        assert!(reply.body.errors[0].contains("batch 1"));
        assert_eq!(fx.entries.snapshot().len(), 1);

        let reply = fx.controller.bulk_upload(Some(&header), json!([good])).await;
        assert_eq!(reply.status, 201);
        assert_eq!(
            reply.body.message.as_deref(),
            Some("All 1 entries were uploaded successfully!")
        );

        let reply = fx.controller.bulk_upload(Some(&header), json!({})).await;
        assert_eq!(reply.status, 400);
    }

    #[tokio::test]
    async fn test_export_reply() {
        let fx = fixture();
        let header = bearer(&fx.tokens.register(Uuid::new_v4(), "owner", Role::Others));
        let file = fx.controller.export_entries(Some(&header)).await.unwrap();
        assert_eq!(file.file_name, "entries.xlsx");

        let reply = fx.controller.export_entries(None).await.unwrap_err();
        assert_eq!(reply.status, 401);
    }

    #[tokio::test]
    async fn test_account_flow() {
        let fx = fixture();
        let signup: SignupRequest = serde_json::from_value(json!({
            "username": "jane",
            "email": "jane@example.com",
            "password": "secret",
            "role": "admin"
        }))
        .unwrap();
        let reply = fx.controller.signup(signup.clone()).await;
        assert_eq!(reply.status, 201);
        let session = reply.body.data.unwrap();

        let reply = fx.controller.signup(signup).await;
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.message.as_deref(), Some("Email already exists"));

        let reply = fx
            .controller
            .login(LoginRequest {
                email: Some("jane@example.com".into()),
                password: Some("nope".into()),
            })
            .await;
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.message.as_deref(), Some("Invalid credentials"));

        let header = bearer(&session.token);
        let reply = fx.controller.admin_check(Some(&header)).await;
        let body = serde_json::to_value(&reply.body).unwrap();
        assert_eq!(body["data"], json!({"isAdmin": true, "isSuperadmin": false}));

        let reply = fx.controller.user_role(Some(&header));
        let info = reply.body.data.unwrap();
        assert_eq!(info.role, Role::Admin);
        assert_eq!(info.id, session.user.id.to_string());

        let reply = fx.controller.list_users(Some(&header)).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_users_not_found_code() {
        let fx = fixture();
        let header = bearer(&fx.tokens.register(Uuid::new_v4(), "ghost", Role::Others));
        let reply = fx.controller.list_users(Some(&header)).await;
        assert_eq!(reply.status, 404);
        assert_eq!(reply.body.error_code.as_deref(), Some("NO_USERS_FOUND"));
        assert_eq!(reply.body.message.as_deref(), Some("No users found."));
    }
}
