use async_trait::async_trait;
use crm_core_api::domain::{
    AdminStatus, AuthSession, Identity, LoginRequest, Role, RoleInfo, SessionUser, SignupRequest,
    UserSummary,
};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_api::service::{PasswordHasher, TokenIssuer, UserService};
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::UserRepository;
use crm_core_db::utils::validation_messages;
use sqlx::Database;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::ServiceConfig;
use crate::policy::{Action, Scope};
use crate::store_error::map_store_error;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const INVALID_SIGNUP_INPUT: &str = "Some inputs are incorrect. Please check and try again.";
pub const EMAIL_EXISTS: &str = "Email already exists";
pub const USER_NOT_FOUND: &str = "User not found";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const NO_USERS_FOUND: &str = "No users found.";
pub const CALLER_NOT_FOUND: &str = "We couldn't find your user information. Please try logging in again or contact support if the issue persists.";

pub struct UserServiceImpl<DB: Database> {
    users: Arc<dyn UserRepository<DB>>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    config: ServiceConfig,
}

impl<DB: Database> UserServiceImpl<DB> {
    pub fn new(
        users: Arc<dyn UserRepository<DB>>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            config,
        }
    }

    fn session_for(&self, user: &UserModel) -> ApiResult<AuthSession> {
        let identity = Identity {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
        };
        let token = self.tokens.issue(&identity).map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "token could not be issued");
            ApiError::InternalError(e.to_string())
        })?;
        Ok(AuthSession {
            token,
            user: SessionUser::new(user.id, user.username.clone(), user.email.clone(), user.role),
        })
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<UserModel>> {
        self.users
            .find_by_email(email)
            .await
            .map_err(|e| map_store_error(e, INVALID_SIGNUP_INPUT))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl<DB: Database> UserService for UserServiceImpl<DB> {
    async fn signup(&self, request: SignupRequest) -> ApiResult<AuthSession> {
        let (Some(username), Some(email), Some(password), Some(role)) = (
            non_blank(&request.username),
            non_blank(&request.email),
            non_blank(&request.password),
            non_blank(&request.role),
        ) else {
            return Err(ApiError::validation(ALL_FIELDS_REQUIRED));
        };

        request.validate().map_err(|errors| ApiError::ValidationError {
            message: INVALID_SIGNUP_INPUT.to_string(),
            errors: validation_messages(&errors),
        })?;

        let email = email.to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(ApiError::validation(EMAIL_EXISTS));
        }

        let password_hash = self.hasher.hash(password).map_err(|e| {
            tracing::error!(error = %e, "password could not be hashed");
            ApiError::InternalError(e.to_string())
        })?;

        let user = UserModel {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email,
            password_hash,
            role: Role::normalize(Some(role)),
        };
        let created = self
            .users
            .create(user)
            .await
            .map_err(|e| map_store_error(e, INVALID_SIGNUP_INPUT))?;
        tracing::info!(user_id = %created.id, role = %created.role, "user signed up");

        self.session_for(&created)
    }

    async fn login(&self, request: LoginRequest) -> ApiResult<AuthSession> {
        let email = non_blank(&request.email)
            .map(str::to_lowercase)
            .ok_or_else(|| ApiError::validation(USER_NOT_FOUND))?;
        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ApiError::validation(USER_NOT_FOUND))?;

        let password = request.password.as_deref().unwrap_or_default();
        let matches = self.hasher.verify(password, &user.password_hash).map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "password could not be verified");
            ApiError::InternalError(e.to_string())
        })?;
        if !matches {
            tracing::warn!(user_id = %user.id, "login rejected");
            return Err(ApiError::validation(INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.id, "user logged in");
        self.session_for(&user)
    }

    async fn list_users(&self, identity: &Identity) -> ApiResult<Vec<UserSummary>> {
        let actor = identity.actor()?;
        let users = match self.config.role_policy.scope(&actor, Action::ListAllUsers) {
            Scope::All => self.users.find_all().await,
            Scope::Own(id) => self.users.load(id).await.map(|user| user.into_iter().collect::<Vec<_>>()),
        }
        .map_err(|e| map_store_error(e, INVALID_SIGNUP_INPUT))?;

        if users.is_empty() {
            return Err(ApiError::NotFound(NO_USERS_FOUND.to_string()));
        }
        Ok(users.iter().map(UserModel::to_summary).collect())
    }

    async fn admin_status(&self, identity: &Identity) -> ApiResult<AdminStatus> {
        let actor = identity.actor()?;
        let user = self
            .users
            .load(actor.id)
            .await
            .map_err(|e| map_store_error(e, INVALID_SIGNUP_INPUT))?
            .ok_or_else(|| ApiError::NotFound(CALLER_NOT_FOUND.to_string()))?;
        Ok(AdminStatus::from(user.role))
    }

    fn role_info(&self, identity: &Identity) -> RoleInfo {
        let role = identity.normalized_role();
        RoleInfo {
            id: identity.id.clone(),
            role,
            is_admin: role.is_admin(),
            is_superadmin: role.is_superadmin(),
        }
    }
}
