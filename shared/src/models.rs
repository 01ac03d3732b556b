use serde::{Serialize, Deserialize};
use time::OffsetDateTime;
use uuid::Uuid;

// Store rows

#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollRecord {
    pub id: Uuid,
    pub question: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionRecord {
    pub id: Uuid,
    pub poll_id: Uuid,
    pub label: String,
    pub position: i32,
}

#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub id: Uuid,
    pub poll_id: Uuid,
    pub option_id: Uuid,
    pub voter_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated poll ready to be written. Labels are trimmed and in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPoll {
    pub question: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
}

// Requests

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default, alias = "userId")]
    pub voter_id: Option<String>,
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionView {
    pub id: Uuid,
    pub label: String,
    pub votes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollView {
    pub id: Uuid,
    pub question: String,
    pub description: String,
    pub options: Vec<PollOptionView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub total_votes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollSummary {
    pub id: Uuid,
    pub question: String,
    pub description: String,
    pub options: Vec<PollOptionView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollResponse {
    pub poll: PollView,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollListResponse {
    pub polls: Vec<PollSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub vote_id: Uuid,
}

impl PollView {
    pub fn new(poll: PollRecord, options: Vec<PollOptionView>, total_votes: usize) -> Self {
        Self {
            id: poll.id,
            question: poll.question,
            description: poll.description.unwrap_or_default(),
            options,
            created_at: poll.created_at,
            total_votes,
        }
    }
}

impl From<PollView> for PollSummary {
    fn from(view: PollView) -> Self {
        Self {
            id: view.id,
            question: view.question,
            description: view.description,
            options: view.options,
            created_at: view.created_at,
        }
    }
}

impl From<VoteRecord> for VoteResponse {
    fn from(vote: VoteRecord) -> Self {
        Self { success: true, vote_id: vote.id }
    }
}
