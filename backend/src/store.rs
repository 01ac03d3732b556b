use std::sync::Mutex;
use time::OffsetDateTime;
use tracing::error;
use uuid::Uuid;
use shared::models::*;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    UniqueViolation(String),
    #[error("{0}")]
    ForeignKeyViolation(String),
    #[error("{0}")]
    Database(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub poll_id: Uuid,
    pub option_id: Uuid,
    pub voter_id: Option<String>,
}

/// Persistent home of polls, options and votes.
///
/// The store assigns identifiers and timestamps and is the only place the
/// one-vote-per-voter rule is enforced: `insert_vote` must fail with
/// [`StoreError::UniqueViolation`] when `(poll_id, voter_id)` already exists
/// for a present voter id, atomically with respect to concurrent inserts.
#[rocket::async_trait]
pub trait PollStore: Send + Sync {
    /// Writes the poll and all of its options, or nothing.
    async fn create_poll(&self, poll: &NewPoll) -> Result<(PollRecord, Vec<OptionRecord>), StoreError>;

    async fn find_poll(&self, id: Uuid) -> Result<Option<PollRecord>, StoreError>;

    /// Most recent first.
    async fn list_polls(&self) -> Result<Vec<PollRecord>, StoreError>;

    /// Ordered by position.
    async fn options_for_poll(&self, poll_id: Uuid) -> Result<Vec<OptionRecord>, StoreError>;

    async fn find_option(&self, id: Uuid) -> Result<Option<OptionRecord>, StoreError>;

    async fn votes_for_poll(&self, poll_id: Uuid) -> Result<Vec<VoteRecord>, StoreError>;

    async fn insert_vote(&self, vote: &NewVote) -> Result<VoteRecord, StoreError>;
}

#[derive(Debug, Default)]
struct Tables {
    polls: Vec<PollRecord>,
    options: Vec<OptionRecord>,
    votes: Vec<VoteRecord>,
}

/// Process-local store for tests and local development. Nothing survives a
/// restart; it applies the same constraints as the Postgres schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut tables = self.tables.lock().map_err(|e| {
            error!("Failed to acquire memory store lock: {}", e);
            StoreError::Database("memory store lock poisoned".into())
        })?;
        f(&mut tables)
    }
}

#[rocket::async_trait]
impl PollStore for MemoryStore {
    async fn create_poll(&self, poll: &NewPoll) -> Result<(PollRecord, Vec<OptionRecord>), StoreError> {
        self.with_tables(|tables| {
            let record = PollRecord {
                id: Uuid::new_v4(),
                question: poll.question.clone(),
                description: poll.description.clone(),
                created_at: OffsetDateTime::now_utc(),
            };
            let options: Vec<OptionRecord> = poll.labels.iter().enumerate()
                .map(|(i, label)| OptionRecord {
                    id: Uuid::new_v4(),
                    poll_id: record.id,
                    label: label.clone(),
                    position: i as i32,
                })
                .collect();

            tables.polls.push(record.clone());
            tables.options.extend(options.iter().cloned());
            Ok((record, options))
        })
    }

    async fn find_poll(&self, id: Uuid) -> Result<Option<PollRecord>, StoreError> {
        self.with_tables(|tables| Ok(tables.polls.iter().find(|p| p.id == id).cloned()))
    }

    async fn list_polls(&self) -> Result<Vec<PollRecord>, StoreError> {
        self.with_tables(|tables| {
            // Newest insert first, so equal timestamps keep creation order reversed.
            let mut polls: Vec<PollRecord> = tables.polls.iter().rev().cloned().collect();
            polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(polls)
        })
    }

    async fn options_for_poll(&self, poll_id: Uuid) -> Result<Vec<OptionRecord>, StoreError> {
        self.with_tables(|tables| {
            let mut options: Vec<OptionRecord> = tables.options.iter()
                .filter(|o| o.poll_id == poll_id)
                .cloned()
                .collect();
            options.sort_by_key(|o| o.position);
            Ok(options)
        })
    }

    async fn find_option(&self, id: Uuid) -> Result<Option<OptionRecord>, StoreError> {
        self.with_tables(|tables| Ok(tables.options.iter().find(|o| o.id == id).cloned()))
    }

    async fn votes_for_poll(&self, poll_id: Uuid) -> Result<Vec<VoteRecord>, StoreError> {
        self.with_tables(|tables| {
            Ok(tables.votes.iter().filter(|v| v.poll_id == poll_id).cloned().collect())
        })
    }

    async fn insert_vote(&self, vote: &NewVote) -> Result<VoteRecord, StoreError> {
        self.with_tables(|tables| {
            let option_matches = tables.options.iter()
                .any(|o| o.id == vote.option_id && o.poll_id == vote.poll_id);
            if !option_matches {
                return Err(StoreError::ForeignKeyViolation(
                    "insert or update on table \"votes\" violates foreign key constraint \"votes_option_belongs_to_poll\"".into()
                ));
            }

            if let Some(voter) = &vote.voter_id {
                let duplicate = tables.votes.iter()
                    .any(|v| v.poll_id == vote.poll_id && v.voter_id.as_ref() == Some(voter));
                if duplicate {
                    return Err(StoreError::UniqueViolation(
                        "duplicate key value violates unique constraint \"unique_voter\"".into()
                    ));
                }
            }

            let record = VoteRecord {
                id: Uuid::new_v4(),
                poll_id: vote.poll_id,
                option_id: vote.option_id,
                voter_id: vote.voter_id.clone(),
                created_at: OffsetDateTime::now_utc(),
            };
            tables.votes.push(record.clone());
            Ok(record)
        })
    }
}
