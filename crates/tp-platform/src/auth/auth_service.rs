//! Authentication Service
//!
//! Orchestrates login (credential check, token issuance) and registration
//! (uniqueness check, hash, persist, token issuance). Both return the same
//! `AuthSession` shape so callers treat them uniformly as "session
//! established".

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::password_service::PasswordService;
use crate::auth::token_service::TokenService;
use crate::shared::error::{MarketError, Result};
use crate::user::entity::{NewUser, User};
use crate::user::repository::UserStore;

/// An established session: the bearer token plus the principal it names.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
}

pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    passwords: Arc<PasswordService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        passwords: Arc<PasswordService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            user_store,
            passwords,
            tokens,
        }
    }

    /// Authenticate with email and password.
    ///
    /// An unknown email and a wrong password produce the identical
    /// `InvalidCredentials` error so responses never leak whether an
    /// account exists.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let user = self
            .user_store
            .find_by_email(email)
            .await?
            .ok_or(MarketError::InvalidCredentials)?;

        if !self.passwords.verify_password(password, &user.password_hash) {
            debug!(email = %email, "Login rejected: password mismatch");
            return Err(MarketError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthSession { token, user })
    }

    /// Create a new account and establish a session for it.
    ///
    /// The password confirmation check runs before any store access; a
    /// mismatch performs no write. New accounts always get the USER role.
    pub async fn register(&self, cmd: RegisterCommand) -> Result<AuthSession> {
        if cmd.password != cmd.confirm_password {
            return Err(MarketError::PasswordMismatch);
        }

        if self.user_store.exists_by_email(&cmd.email).await? {
            return Err(MarketError::email_taken(cmd.email));
        }

        let password_hash = self.passwords.hash_password(&cmd.password)?;

        // The store re-checks uniqueness atomically with the insert; the
        // exists check above only gives the common case a cheaper error.
        let user = self
            .user_store
            .save(NewUser::registered(cmd.email, cmd.full_name, password_hash))
            .await?;

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, "User registered");

        Ok(AuthSession { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password_service::Argon2Config;
    use crate::auth::token_service::TokenConfig;
    use crate::user::entity::Role;
    use crate::user::repository::InMemoryUserStore;

    fn test_service() -> (AuthService, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        let service = AuthService::new(
            store.clone(),
            Arc::new(PasswordService::new(Argon2Config::testing())),
            Arc::new(TokenService::new(TokenConfig {
                secret_key: "test-secret".to_string(),
                ..TokenConfig::default()
            })),
        );
        (service, store)
    }

    fn register_cmd(email: &str, password: &str) -> RegisterCommand {
        RegisterCommand {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
            full_name: "Test User".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (service, _) = test_service();

        let session = service.register(register_cmd("a@x.com", "pw1")).await.unwrap();
        assert_eq!(session.user.role, Role::User);
        assert!(!session.token.is_empty());

        let login = service.login("a@x.com", "pw1").await.unwrap();
        assert_eq!(login.user.id, session.user.id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = test_service();
        service.register(register_cmd("a@x.com", "pw1")).await.unwrap();

        let unknown = service.login("nobody@x.com", "pw1").await.unwrap_err();
        let wrong_pw = service.login("a@x.com", "wrong").await.unwrap_err();

        assert!(matches!(unknown, MarketError::InvalidCredentials));
        assert!(matches!(wrong_pw, MarketError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong_pw.to_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _) = test_service();
        service.register(register_cmd("a@x.com", "pw1")).await.unwrap();

        let err = service.register(register_cmd("a@x.com", "pw2")).await.unwrap_err();
        assert!(matches!(err, MarketError::EmailTaken { .. }));
    }

    #[tokio::test]
    async fn test_register_password_mismatch_writes_nothing() {
        let (service, store) = test_service();

        let cmd = RegisterCommand {
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
            confirm_password: "pw2".to_string(),
            full_name: "Test User".to_string(),
        };

        let err = service.register(cmd).await.unwrap_err();
        assert!(matches!(err, MarketError::PasswordMismatch));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() {
        let (service, store) = test_service();
        let service = Arc::new(service);

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.register(register_cmd("race@x.com", "pw1")).await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.register(register_cmd("race@x.com", "pw2")).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();

        assert_eq!(successes, 1);
        assert_eq!(store.count().await.unwrap(), 1);
        let loser = results.iter().find(|r| r.is_err()).unwrap();
        assert!(matches!(
            loser.as_ref().unwrap_err(),
            MarketError::EmailTaken { .. }
        ));
    }
}
