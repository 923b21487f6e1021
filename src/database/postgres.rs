use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::database::store::SalaryStore;
use crate::error::{Error, Result};
use crate::models::salary_detail::{to_cents, SalaryChanges, SalaryDetail, DEFAULT_COMMISSION};
use crate::models::user::User;

const SELECT_RECORD: &str = r#"
    SELECT u.id AS user_id, u.name, u.email,
           u.created_at AS user_created_at, u.updated_at AS user_updated_at,
           s.id AS detail_id, s.salary_local_currency, s.salary_in_euros,
           s.commission, s.displayed_salary,
           s.created_at AS detail_created_at, s.updated_at AS detail_updated_at
    FROM users u
    JOIN salary_details s ON s.user_id = u.id
"#;

#[derive(Debug, FromRow)]
struct SalaryRecordRow {
    user_id: i64,
    name: String,
    email: String,
    user_created_at: DateTime<Utc>,
    user_updated_at: DateTime<Utc>,
    detail_id: i64,
    salary_local_currency: Decimal,
    salary_in_euros: Option<Decimal>,
    commission: Decimal,
    displayed_salary: Option<Decimal>,
    detail_created_at: DateTime<Utc>,
    detail_updated_at: DateTime<Utc>,
}

impl From<SalaryRecordRow> for User {
    fn from(row: SalaryRecordRow) -> Self {
        Self {
            id: row.user_id,
            name: row.name,
            email: row.email,
            created_at: row.user_created_at,
            updated_at: row.user_updated_at,
            salary_detail: SalaryDetail {
                id: row.detail_id,
                user_id: row.user_id,
                salary_local_currency: row.salary_local_currency,
                salary_in_euros: row.salary_in_euros,
                commission: row.commission,
                displayed_salary: row.displayed_salary,
                created_at: row.detail_created_at,
                updated_at: row.detail_updated_at,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PgSalaryStore {
    pool: PgPool,
}

impl PgSalaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_in(tx: &mut Transaction<'_, Postgres>, user_id: i64) -> Result<User> {
        let sql = format!("{} WHERE u.id = $1", SELECT_RECORD);
        let row = sqlx::query_as::<_, SalaryRecordRow>(&sql)
            .bind(user_id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.into())
    }
}

#[axum::async_trait]
impl SalaryStore for PgSalaryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("{} WHERE u.email = $1", SELECT_RECORD);
        let row = sqlx::query_as::<_, SalaryRecordRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("{} WHERE u.id = $1", SELECT_RECORD);
        let row = sqlx::query_as::<_, SalaryRecordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn create(&self, name: &str, email: &str, salary_local_currency: Decimal) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::DuplicateEmail(email.to_string())
            }
            other => Error::from(other),
        })?;

        let detail = sqlx::query_as::<_, SalaryDetail>(
            r#"
            INSERT INTO salary_details (user_id, salary_local_currency, commission)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, salary_local_currency, salary_in_euros, commission,
                      displayed_salary, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(to_cents(salary_local_currency))
        .bind(DEFAULT_COMMISSION)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(User {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            salary_detail: detail,
        })
    }

    async fn update(&self, id: i64, changes: &SalaryChanges) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let mut detail = sqlx::query_as::<_, SalaryDetail>(
            r#"
            SELECT id, user_id, salary_local_currency, salary_in_euros, commission,
                   displayed_salary, created_at, updated_at
            FROM salary_details
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let now = Utc::now();
        detail.apply(changes, now);

        sqlx::query(
            r#"
            UPDATE salary_details
            SET salary_local_currency = $1, salary_in_euros = $2, commission = $3,
                displayed_salary = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(detail.salary_local_currency)
        .bind(detail.salary_in_euros)
        .bind(detail.commission)
        .bind(detail.displayed_salary)
        .bind(now)
        .bind(detail.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET updated_at = $1 WHERE id = $2")
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let user = Self::fetch_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let sql = format!("{} ORDER BY u.id ASC", SELECT_RECORD);
        let rows = sqlx::query_as::<_, SalaryRecordRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
