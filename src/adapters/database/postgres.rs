use crate::{
    domain::{CalendarDay, CheckIn, Gym, NewCheckIn},
    ports::{
        check_ins::{self, CheckInsPort},
        gyms::{self, GymsPort},
    },
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed database
///
/// The `gyms` and `check_ins` tables are managed outside of this service.
#[derive(Clone, Debug)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct GymRow {
    id: String,
    title: String,
    description: Option<String>,
    phone: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GymRow> for Gym {
    fn from(row: GymRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            phone: row.phone,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[derive(FromRow)]
struct CheckInRow {
    id: String,
    user_id: String,
    gym_id: String,
    created_at: DateTime<Utc>,
    validated_at: Option<DateTime<Utc>>,
}

impl From<CheckInRow> for CheckIn {
    fn from(row: CheckInRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            gym_id: row.gym_id,
            created_at: row.created_at,
            validated_at: row.validated_at,
        }
    }
}

#[async_trait::async_trait]
impl GymsPort for PostgresDatabase {
    #[tracing::instrument(skip(self), err)]
    async fn find_by_id(&self, gym_id: &str) -> Result<Option<Gym>, gyms::Error> {
        // Coordinates are stored as NUMERIC
        let sql = r#"
            SELECT id, title, description, phone,
                latitude::float8 AS latitude, longitude::float8 AS longitude
            FROM gyms
            WHERE id = $1
        "#;

        let row = sqlx::query_as::<_, GymRow>(sql)
            .bind(gym_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }
}

#[async_trait::async_trait]
impl CheckInsPort for PostgresDatabase {
    #[tracing::instrument(skip(self), err)]
    async fn find_by_user_id_on_date(
        &self,
        user_id: &str,
        day: CalendarDay,
    ) -> Result<Option<CheckIn>, check_ins::Error> {
        let sql = r#"
            SELECT id, user_id, gym_id, created_at, validated_at
            FROM check_ins
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            ORDER BY created_at ASC
            LIMIT 1
        "#;

        let row = sqlx::query_as::<_, CheckInRow>(sql)
            .bind(user_id)
            .bind(day.start())
            .bind(day.end())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self), err)]
    async fn find_many_by_user_id(
        &self,
        user_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<CheckIn>, check_ins::Error> {
        let sql = r#"
            SELECT id, user_id, gym_id, created_at, validated_at
            FROM check_ins
            WHERE user_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
        "#;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
        let rows = sqlx::query_as::<_, CheckInRow>(sql)
            .bind(user_id)
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self), err)]
    async fn create(&self, new_check_in: NewCheckIn) -> Result<CheckIn, check_ins::Error> {
        let sql = r#"
            INSERT INTO check_ins (id, user_id, gym_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, gym_id, created_at, validated_at
        "#;

        let row = sqlx::query_as::<_, CheckInRow>(sql)
            .bind(Uuid::new_v4().to_string())
            .bind(new_check_in.user_id)
            .bind(new_check_in.gym_id)
            .bind(new_check_in.created_at.unwrap_or_else(Utc::now))
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }
}

impl From<sqlx::Error> for gyms::Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Adapter(Box::new(err))
    }
}

impl From<sqlx::Error> for check_ins::Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Adapter(Box::new(err))
    }
}
