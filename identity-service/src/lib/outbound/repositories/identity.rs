use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::normalize;
use crate::domain::account::models::Address;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::policy::IdentityError;
use crate::domain::account::policy::IdentityPolicy;
use crate::domain::account::policy::IdentityResult;
use crate::domain::account::policy::Uniqueness;
use crate::domain::account::ports::IdentityStore;

const USERNAME_CONSTRAINT: &str = "users_normalized_username_key";
const EMAIL_CONSTRAINT: &str = "users_normalized_email_key";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    display_name: String,
    phone_number: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserWithAddressRow {
    #[sqlx(flatten)]
    user: UserRow,
    first_name: Option<String>,
    last_name: Option<String>,
    street: Option<String>,
    city: Option<String>,
    country: Option<String>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: UserId(r.id),
            username: r.username,
            email: r.email,
            display_name: r.display_name,
            phone_number: r.phone_number,
            password_hash: r.password_hash,
            address: None,
            created_at: r.created_at,
        }
    }
}

impl From<UserWithAddressRow> for User {
    fn from(r: UserWithAddressRow) -> Self {
        let address = match (r.first_name, r.last_name, r.street, r.city, r.country) {
            (Some(first_name), Some(last_name), Some(street), Some(city), Some(country)) => {
                Some(Address {
                    first_name,
                    last_name,
                    street,
                    city,
                    country,
                })
            }
            _ => None,
        };

        User {
            address,
            ..User::from(r.user)
        }
    }
}

fn database_error(e: sqlx::Error) -> AccountError {
    AccountError::DatabaseError(e.to_string())
}

/// Postgres-backed identity store.
///
/// Emails and usernames are matched on their normalized upper-case forms, backed by unique
/// constraints so concurrent registrations cannot both succeed.
pub struct PostgresIdentityStore {
    pool: PgPool,
    policy: IdentityPolicy,
    password_hasher: PasswordHasher,
}

impl PostgresIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_policy(pool, IdentityPolicy::default())
    }

    pub fn with_policy(pool: PgPool, policy: IdentityPolicy) -> Self {
        Self {
            pool,
            policy,
            password_hasher: PasswordHasher::new(),
        }
    }

    async fn uniqueness(&self, user: &User) -> Result<Uniqueness, AccountError> {
        let (user_name_taken, email_taken): (bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM users WHERE normalized_username = $1),
                EXISTS(SELECT 1 FROM users WHERE normalized_email = $2)
            "#,
        )
        .bind(user.normalized_username())
        .bind(user.normalized_email())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(Uniqueness {
            user_name_taken,
            email_taken,
        })
    }
}

/// Translate a unique violation raced past the pre-insert check into a policy error.
fn duplicate_key_error(e: &sqlx::Error, user: &User) -> Option<IdentityError> {
    let db_err = e.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(USERNAME_CONSTRAINT) => Some(IdentityError::duplicate_user_name(&user.username)),
        Some(EMAIL_CONSTRAINT) => Some(IdentityError::duplicate_email(&user.email)),
        _ => None,
    }
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, display_name, phone_number, password_hash, created_at
            FROM users
            WHERE normalized_email = $1
            "#,
        )
        .bind(normalize(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(User::from))
    }

    async fn find_by_email_with_address(
        &self,
        email: &str,
    ) -> Result<Option<User>, AccountError> {
        let row: Option<UserWithAddressRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.username, u.email, u.display_name, u.phone_number, u.password_hash,
                   u.created_at, a.first_name, a.last_name, a.street, a.city, a.country
            FROM users u
            LEFT JOIN addresses a ON a.user_id = u.id
            WHERE u.normalized_email = $1
            "#,
        )
        .bind(normalize(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(User::from))
    }

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AccountError> {
        Ok(self.password_hasher.verify(password, &user.password_hash)?)
    }

    async fn create(&self, mut user: User, password: &str) -> Result<IdentityResult, AccountError> {
        let uniqueness = self.uniqueness(&user).await?;
        let outcome = self.policy.validate_new_user(&user, password, uniqueness);
        if !outcome.succeeded() {
            return Ok(outcome);
        }

        user.password_hash = self.password_hasher.hash(password)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, username, normalized_username, email, normalized_email,
                               display_name, phone_number, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.0)
        .bind(&user.username)
        .bind(user.normalized_username())
        .bind(&user.email)
        .bind(user.normalized_email())
        .bind(&user.display_name)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(IdentityResult::success()),
            Err(e) => match duplicate_key_error(&e, &user) {
                Some(error) => Ok(IdentityResult::failed(vec![error])),
                None => Err(database_error(e)),
            },
        }
    }

    async fn get_roles(&self, user: &User) -> Result<Vec<String>, AccountError> {
        sqlx::query_scalar(
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY ur.assigned_at, r.name
            "#,
        )
        .bind(user.id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn add_to_role(&self, user: &User, role: &str) -> Result<(), AccountError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO roles (id, name, normalized_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (normalized_name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(role)
        .bind(normalize(role))
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, id FROM roles WHERE normalized_name = $2
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user.id.0)
        .bind(normalize(role))
        .execute(&mut *tx)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_foreign_key_violation() => {
                AccountError::UserNotFound(user.email.clone())
            }
            _ => database_error(e),
        })?;

        tx.commit().await.map_err(database_error)
    }

    async fn update(&self, user: &User) -> Result<(), AccountError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, normalized_username = $3, email = $4, normalized_email = $5,
                display_name = $6, phone_number = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(&user.username)
        .bind(user.normalized_username())
        .bind(&user.email)
        .bind(user.normalized_email())
        .bind(&user.display_name)
        .bind(&user.phone_number)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound(user.email.clone()));
        }

        if let Some(address) = &user.address {
            sqlx::query(
                r#"
                INSERT INTO addresses (user_id, first_name, last_name, street, city, country)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (user_id) DO UPDATE
                SET first_name = EXCLUDED.first_name,
                    last_name = EXCLUDED.last_name,
                    street = EXCLUDED.street,
                    city = EXCLUDED.city,
                    country = EXCLUDED.country
                "#,
            )
            .bind(user.id.0)
            .bind(&address.first_name)
            .bind(&address.last_name)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.country)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)
    }
}
