//! Authentication Service
//!
//! Registration, login, and profile lookup built on the password hasher and
//! token service. All dependencies are injected at construction.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, UserResponse};
use crate::store::UserStore;

use super::password::PasswordHasher;
use super::token::TokenService;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    min_password_length: usize,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>, config: &AppConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(config),
            tokens,
            min_password_length: config.min_password_length,
        }
    }

    /// Register a new user and log them in.
    ///
    /// Uniqueness pre-checks run in email-then-username order so conflicts
    /// report deterministically; a concurrent registration slipping past them
    /// still surfaces as the same conflict through the store's own
    /// constraint.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, ApiError> {
        if req.password.len() < self.min_password_length {
            return Err(ApiError::Validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        if self.users.user_by_email(&req.email).await?.is_some() {
            return Err(ApiError::Conflict { field: "email" });
        }
        if self.users.user_by_username(&req.username).await?.is_some() {
            return Err(ApiError::Conflict { field: "username" });
        }

        let password_hash = self.hasher.hash(&req.password)?;

        let user = self
            .users
            .insert_user(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "user registered");

        self.respond_with_token(user.into())
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password yield the same error so accounts
    /// cannot be enumerated.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, ApiError> {
        let user = self
            .users
            .user_by_email(&req.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        tracing::debug!(user_id = user.id, "login succeeded");

        self.respond_with_token(user.into())
    }

    /// Look up a user's public view by id
    pub async fn get_profile(&self, user_id: i64) -> Result<UserResponse, ApiError> {
        self.users
            .user_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or(ApiError::NotFound("User"))
    }

    fn respond_with_token(&self, user: UserResponse) -> Result<AuthResponse, ApiError> {
        let access_token = self.tokens.issue(user.id)?;
        Ok(AuthResponse {
            user,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.expiration(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> AuthService {
        let config = AppConfig::for_tests();
        let store = Arc::new(MemoryStore::new());
        let tokens = Arc::new(TokenService::new(&config));
        AuthService::new(store, tokens, &config)
    }

    fn register_req(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_issues_a_token_for_the_new_user() {
        let auth = service();
        let resp = auth
            .register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(resp.user.username, "alice");
        assert_eq!(resp.token_type, "Bearer");
        assert!(!resp.access_token.is_empty());
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_uniqueness() {
        let auth = service();
        let err = auth
            .register(register_req("alice", "a@x.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_regardless_of_username() {
        let auth = service();
        auth.register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let err = auth
            .register(register_req("bob", "a@x.com", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { field: "email" }));
    }

    #[tokio::test]
    async fn email_conflict_takes_precedence_over_username() {
        let auth = service();
        auth.register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        // Both fields collide; the email check runs first.
        let err = auth
            .register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { field: "email" }));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let auth = service();
        auth.register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let err = auth
            .register(register_req("alice", "b@x.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { field: "username" }));
    }

    #[tokio::test]
    async fn login_token_subject_matches_registered_user() {
        let config = AppConfig::for_tests();
        let store = Arc::new(MemoryStore::new());
        let tokens = Arc::new(TokenService::new(&config));
        let auth = AuthService::new(store, tokens.clone(), &config);

        let registered = auth
            .register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap();
        let logged_in = auth.login(login_req("a@x.com", "secret1")).await.unwrap();

        assert_eq!(
            tokens.verify(&logged_in.access_token).unwrap(),
            registered.user.id
        );
    }

    #[tokio::test]
    async fn bad_credentials_are_indistinguishable() {
        let auth = service();
        auth.register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let wrong_password = auth
            .login(login_req("a@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = auth
            .login(login_req("nobody@x.com", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, ApiError::InvalidCredentials));
        assert!(matches!(unknown_email, ApiError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn profile_lookup() {
        let auth = service();
        let resp = auth
            .register(register_req("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let profile = auth.get_profile(resp.user.id).await.unwrap();
        assert_eq!(profile.email, "a@x.com");

        let err = auth.get_profile(9999).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
