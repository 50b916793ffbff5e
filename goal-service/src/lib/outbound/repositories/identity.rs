use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;

const USERNAME_CONSTRAINT: &str = "identities_username_key";
const EMAIL_CONSTRAINT: &str = "identities_email_key";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = IdentityError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: IdentityId::from_string(row.id.trim())?,
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(identity.id.to_string())
        .bind(identity.username.as_str())
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some(USERNAME_CONSTRAINT) {
                        return IdentityError::UsernameAlreadyExists(
                            identity.username.to_string(),
                        );
                    }
                    if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
                        return IdentityError::EmailAlreadyExists(identity.email.to_string());
                    }
                }
            }
            IdentityError::DatabaseError(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM identities
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?
        .map(Identity::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?
        .map(Identity::try_from)
        .transpose()
    }
}
