use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenError;
use auth::TokenHandler;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::LoginOutcome;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Stateless between requests: the only process-wide state is the signing
/// key inside the token handler, read-only after construction. Concurrent
/// registrations racing on the same username or email are resolved by the
/// store's uniqueness constraints, not by the pre-checks here.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
    /// Hash of a fixed throwaway password, verified against when a login
    /// names an unknown username so that path costs the same as a mismatch.
    dummy_hash: String,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Errors
    /// * `Unknown` - The timing-equalization hash could not be produced
    pub fn new(
        repository: Arc<R>,
        password_hasher: PasswordHasher,
        token_handler: TokenHandler,
    ) -> Result<Self, AccountError> {
        let dummy_hash = password_hasher
            .hash("equalizer_0")
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        Ok(Self {
            repository,
            password_hasher,
            token_handler,
            dummy_hash,
        })
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        // Pre-checks give precise errors on the common path. They are an
        // optimization only: a concurrent writer can still win between here
        // and the insert, and the store constraint settles that race.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateUsername(command.username.to_string()));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            active: true,
            created_at: Utc::now(),
            last_login_at: None,
        };

        let created = self.repository.insert(account).await?;

        tracing::info!(
            account_id = %created.id,
            username = %created.username,
            "Account registered"
        );

        Ok(created)
    }

    async fn login(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<LoginOutcome, AccountError> {
        let Some(mut account) = self.repository.find_by_username(username).await? else {
            // Burn the same verification cost as the mismatch path
            let _ = self.password_hasher.verify(password, &self.dummy_hash);
            return Err(AccountError::InvalidCredentials);
        };

        let password_matches = self
            .password_hasher
            .verify(password, &account.password_hash)
            .map_err(|e| {
                tracing::error!(
                    account_id = %account.id,
                    error = %e,
                    "Stored password hash is unreadable"
                );
                AccountError::CredentialCorrupted(account.id.to_string())
            })?;

        if !password_matches {
            return Err(AccountError::InvalidCredentials);
        }

        if !account.active {
            return Err(AccountError::AccountDisabled);
        }

        let token = self
            .token_handler
            .issue(username.as_str())
            .map_err(|e| AccountError::Unknown(format!("Token issuance failed: {}", e)))?;

        // Best-effort: a failed timestamp update never fails the login
        let now = Utc::now();
        match self.repository.touch_last_login(&account.id, now).await {
            Ok(()) => account.last_login_at = Some(now),
            Err(e) => {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    "Failed to record last login time"
                );
            }
        }

        tracing::info!(account_id = %account.id, username = %username, "Login succeeded");

        Ok(LoginOutcome { token, account })
    }

    fn verify_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_handler.verify(token)
    }

    async fn find_account(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        self.repository.find_by_username(username).await
    }
}
