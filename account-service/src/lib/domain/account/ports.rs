use async_trait::async_trait;
use auth::TokenError;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::LoginOutcome;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// No token is issued by registration.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DuplicateEmail` - Email is already registered
    /// * `StoreUnavailable` - Credential store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    ///   (indistinguishable by design)
    /// * `AccountDisabled` - Credentials correct but account deactivated
    /// * `StoreUnavailable` - Credential store operation failed
    async fn login(&self, username: &Username, password: &str)
        -> Result<LoginOutcome, AccountError>;

    /// Validate a bearer token and return the username it asserts.
    ///
    /// Stateless: decided by signature and clock only.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch or algorithm confusion
    /// * `Expired` - Token lifetime elapsed
    /// * `Malformed` - Token structure unparseable
    fn verify_token(&self, token: &str) -> Result<String, TokenError>;

    /// Retrieve the account behind an authenticated username.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Credential store operation failed
    async fn find_account(&self, username: &Username) -> Result<Option<Account>, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// The store's uniqueness constraints are the authority on duplicates:
/// `insert` must map a constraint violation to the matching duplicate
/// error rather than a generic failure.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Store uniqueness constraint hit on username
    /// * `DuplicateEmail` - Store uniqueness constraint hit on email
    /// * `StoreUnavailable` - Store operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Record a successful login timestamp.
    ///
    /// Callers treat failure as best-effort: logged, never fatal to the
    /// enclosing login.
    async fn touch_last_login(
        &self,
        id: &AccountId,
        at: DateTime<Utc>,
    ) -> Result<(), AccountError>;
}
