use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Appointment {
    pub id: String,
    pub vehicle_type: String,
    pub additional_notes: String,
    pub appointment_date: PrimitiveDateTime,
    pub user_id: Uuid,
}

impl Appointment {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, vehicle_type, additional_notes, appointment_date, user_id
            FROM appointments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Fetch by id, scoped to the owner. A row that exists but belongs to
    /// someone else resolves to `None`, same as a row that does not exist.
    pub async fn find_owned<'e, E>(
        executor: E,
        id: &str,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Appointment>>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, vehicle_type, additional_notes, appointment_date, user_id
            FROM appointments
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
        vehicle_type: &str,
        additional_notes: &str,
        appointment_date: PrimitiveDateTime,
        user_id: Uuid,
    ) -> anyhow::Result<Appointment> {
        let row = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (id, vehicle_type, additional_notes, appointment_date, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, vehicle_type, additional_notes, appointment_date, user_id
            "#,
        )
        .bind(id)
        .bind(vehicle_type)
        .bind(additional_notes)
        .bind(appointment_date)
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(row)
    }

    pub async fn update(
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
        user_id: Uuid,
        vehicle_type: &str,
        additional_notes: &str,
        appointment_date: PrimitiveDateTime,
    ) -> anyhow::Result<Appointment> {
        let row = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET vehicle_type = $3, additional_notes = $4, appointment_date = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, vehicle_type, additional_notes, appointment_date, user_id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(vehicle_type)
        .bind(additional_notes)
        .bind(appointment_date)
        .fetch_one(&mut **tx)
        .await?;
        Ok(row)
    }

    /// Hard delete, scoped to the owner. Returns whether a row was removed.
    pub async fn delete_owned(db: &PgPool, id: &str, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM appointments
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
