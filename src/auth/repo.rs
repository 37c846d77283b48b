use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

/// A user row. The bearer `token` authenticates requests; ownership of
/// appointments is keyed on the stable `id`, so rotating the credential
/// cannot orphan rows.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub g_auth_verify: bool,
    pub token: String,
    pub date_created: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, first_name, last_name, phone_number, email, \
                            password_hash, g_auth_verify, token, date_created";

impl User {
    pub async fn find_by_token(db: &PgPool, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a user with a hashed password and a freshly minted token.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        token: &str,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, token, first_name, last_name, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password_hash)
        .bind(token)
        .bind(first_name)
        .bind(last_name)
        .bind(phone_number)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Overwrite the contact fields in place, inside the caller's
    /// transaction. Appointment writes carry the caller's latest contact
    /// info, so this commits together with them.
    pub async fn update_contact(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, phone_number = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone_number)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
