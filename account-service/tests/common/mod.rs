use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::AccountError;
use account_service::account::models::Account;
use account_service::account::models::AccountId;
use account_service::account::models::EmailAddress;
use account_service::account::models::Password;
use account_service::account::models::RegisterCommand;
use account_service::account::models::Username;
use account_service::account::ports::AccountRepository;
use account_service::account::service::AccountService;
use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenAlgorithm;
use auth::TokenHandler;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

/// Repository backed by a mutex-guarded map, enforcing the same uniqueness
/// semantics the Postgres constraints provide. Lets the full workflow run
/// without a database.
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts
            .values()
            .any(|a| a.username == account.username)
        {
            return Err(AccountError::DuplicateUsername(
                account.username.to_string(),
            ));
        }
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::DuplicateEmail(account.email.to_string()));
        }

        accounts.insert(account.id.0, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| &a.username == username).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn touch_last_login(
        &self,
        id: &AccountId,
        at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(&id.0) {
            Some(account) => {
                account.last_login_at = Some(at);
                Ok(())
            }
            None => Err(AccountError::Unknown(format!(
                "No account row to touch for {}",
                id
            ))),
        }
    }
}

pub fn test_service() -> AccountService<InMemoryAccountRepository> {
    AccountService::new(
        Arc::new(InMemoryAccountRepository::new()),
        PasswordHasher::default(),
        TokenHandler::new(TEST_SECRET, TokenAlgorithm::HS256, 30),
    )
    .expect("Failed to build service")
}

pub fn command(username: &str, email: &str, password: &str) -> RegisterCommand {
    RegisterCommand::new(
        Username::new(username.to_string()).expect("Invalid test username"),
        EmailAddress::new(email.to_string()).expect("Invalid test email"),
        Password::new(password.to_string()).expect("Invalid test password"),
    )
}

pub fn username(name: &str) -> Username {
    Username::new(name.to_string()).expect("Invalid test username")
}
