use sqlx::PgPool;
use uuid::Uuid;
use shared::models::*;
use crate::store::{NewVote, PollStore, StoreError};

/// Postgres-backed [`PollStore`]. The schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_db_error(e: sqlx::Error) -> StoreError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => StoreError::UniqueViolation(db.message().to_string()),
        Some(db) if db.is_foreign_key_violation() => StoreError::ForeignKeyViolation(db.message().to_string()),
        Some(db) => StoreError::Database(db.message().to_string()),
        None => StoreError::Database(e.to_string()),
    }
}

#[rocket::async_trait]
impl PollStore for PgStore {
    async fn create_poll(&self, poll: &NewPoll) -> Result<(PollRecord, Vec<OptionRecord>), StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let record = sqlx::query_as::<_, PollRecord>(
            "INSERT INTO polls (question, description)
             VALUES ($1, $2)
             RETURNING id, question, description, created_at"
        )
        .bind(&poll.question)
        .bind(&poll.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let mut options = Vec::with_capacity(poll.labels.len());
        for (position, label) in poll.labels.iter().enumerate() {
            let option = sqlx::query_as::<_, OptionRecord>(
                "INSERT INTO poll_options (poll_id, label, position)
                 VALUES ($1, $2, $3)
                 RETURNING id, poll_id, label, position"
            )
            .bind(record.id)
            .bind(label)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
            options.push(option);
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok((record, options))
    }

    async fn find_poll(&self, id: Uuid) -> Result<Option<PollRecord>, StoreError> {
        sqlx::query_as::<_, PollRecord>(
            "SELECT id, question, description, created_at FROM polls WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn list_polls(&self) -> Result<Vec<PollRecord>, StoreError> {
        sqlx::query_as::<_, PollRecord>(
            "SELECT id, question, description, created_at FROM polls ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn options_for_poll(&self, poll_id: Uuid) -> Result<Vec<OptionRecord>, StoreError> {
        sqlx::query_as::<_, OptionRecord>(
            "SELECT id, poll_id, label, position FROM poll_options
             WHERE poll_id = $1 ORDER BY position"
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn find_option(&self, id: Uuid) -> Result<Option<OptionRecord>, StoreError> {
        sqlx::query_as::<_, OptionRecord>(
            "SELECT id, poll_id, label, position FROM poll_options WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn votes_for_poll(&self, poll_id: Uuid) -> Result<Vec<VoteRecord>, StoreError> {
        sqlx::query_as::<_, VoteRecord>(
            "SELECT id, poll_id, option_id, voter_fingerprint AS voter_id, created_at
             FROM votes WHERE poll_id = $1"
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn insert_vote(&self, vote: &NewVote) -> Result<VoteRecord, StoreError> {
        sqlx::query_as::<_, VoteRecord>(
            "INSERT INTO votes (poll_id, option_id, voter_fingerprint)
             VALUES ($1, $2, $3)
             RETURNING id, poll_id, option_id, voter_fingerprint AS voter_id, created_at"
        )
        .bind(vote.poll_id)
        .bind(vote.option_id)
        .bind(&vote.voter_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
