use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const SELECT_ACCOUNT: &str = r#"
    SELECT id, username, email, password_hash, active, created_at, last_login_at
    FROM accounts
"#;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; converted back into domain types on the way out so a
/// row that no longer satisfies the value-object rules is caught here.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            active: row.active,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.active)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraints are the authority on duplicates: a
            // concurrent registration that slipped past the service-level
            // pre-checks lands here and must surface as the same error.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("accounts_username_key") {
                        return AccountError::DuplicateUsername(
                            account.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("accounts_email_key") {
                        return AccountError::DuplicateEmail(account.email.as_str().to_string());
                    }
                }
            }
            AccountError::StoreUnavailable(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ACCOUNT))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AccountError::StoreUnavailable(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE username = $1", SELECT_ACCOUNT))
                .bind(username.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AccountError::StoreUnavailable(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_ACCOUNT))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AccountError::StoreUnavailable(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn touch_last_login(
        &self,
        id: &AccountId,
        at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET last_login_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::StoreUnavailable(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::Unknown(format!(
                "No account row to touch for {}",
                id
            )));
        }

        Ok(())
    }
}
