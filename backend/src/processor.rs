use std::fmt::Display;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;
use shared::models::*;
use shared::{normalize_voter_id, validate_poll_request, Tally};
use crate::error::ApiError;
use crate::store::{NewVote, PollStore, StoreError};
use crate::utils::parse_id;

fn storage_failure(operation: &'static str, id: impl Display, e: StoreError) -> ApiError {
    error!(operation, id = %id, error = %e, "Store operation failed");
    ApiError::Storage(e.to_string())
}

pub struct VoteProcessor;

impl VoteProcessor {
    /// Records one vote. Checks run in order: option id present, option
    /// belongs to the poll, voter has not voted on this poll yet.
    ///
    /// No locking and no retry here; concurrent duplicates are settled by the
    /// store's uniqueness constraint.
    #[instrument(skip(store, request))]
    pub async fn cast_vote(
        store: &dyn PollStore,
        poll_id: &str,
        request: &CastVoteRequest,
    ) -> Result<VoteRecord, ApiError> {
        let option_id = request.option_id.as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("Option ID is required".into()))?;

        let (Some(poll_uuid), Some(option_uuid)) = (parse_id(poll_id), parse_id(option_id)) else {
            debug!(option_id, "Malformed poll or option id");
            return Err(ApiError::OptionMismatch);
        };

        let option = store.find_option(option_uuid).await
            .map_err(|e| storage_failure("find_option", option_uuid, e))?;

        match option {
            Some(opt) if opt.poll_id == poll_uuid => {}
            _ => {
                debug!(%option_uuid, "Option does not belong to poll");
                return Err(ApiError::OptionMismatch);
            }
        }

        let vote = NewVote {
            poll_id: poll_uuid,
            option_id: option_uuid,
            voter_id: normalize_voter_id(request.voter_id.as_deref()),
        };

        match store.insert_vote(&vote).await {
            Ok(record) => {
                info!(vote_id = %record.id, %option_uuid, "Vote recorded");
                Ok(record)
            }
            Err(StoreError::UniqueViolation(_)) => {
                warn!(voter_id = ?vote.voter_id, "Duplicate vote rejected");
                Err(ApiError::DuplicateVote)
            }
            Err(StoreError::ForeignKeyViolation(_)) => Err(ApiError::OptionMismatch),
            Err(e) => Err(storage_failure("insert_vote", poll_uuid, e)),
        }
    }
}

pub struct PollProcessor;

impl PollProcessor {
    #[instrument(skip(store, request))]
    pub async fn create_poll(store: &dyn PollStore, request: &CreatePollRequest) -> Result<PollView, ApiError> {
        let new_poll = validate_poll_request(request)?;

        let (poll, options) = store.create_poll(&new_poll).await
            .map_err(|e| storage_failure("create_poll", &new_poll.question, e))?;

        info!(poll_id = %poll.id, options = options.len(), "Poll created");
        let tally = Tally::new();
        Ok(PollView::new(poll, tally.option_views(&options), tally.total()))
    }

    #[instrument(skip(store))]
    pub async fn get_poll(store: &dyn PollStore, poll_id: &str) -> Result<PollView, ApiError> {
        let id = parse_id(poll_id).ok_or(ApiError::NotFound)?;

        let poll = store.find_poll(id).await
            .map_err(|e| storage_failure("find_poll", id, e))?
            .ok_or(ApiError::NotFound)?;

        Self::tally_poll(store, poll).await
    }

    #[instrument(skip(store))]
    pub async fn list_polls(store: &dyn PollStore) -> Result<Vec<PollSummary>, ApiError> {
        let polls = store.list_polls().await
            .map_err(|e| storage_failure("list_polls", "*", e))?;

        let mut summaries: Vec<PollSummary> = Vec::with_capacity(polls.len());
        for poll in polls {
            summaries.push(Self::tally_poll(store, poll).await?.into());
        }
        Ok(summaries)
    }

    async fn tally_poll(store: &dyn PollStore, poll: PollRecord) -> Result<PollView, ApiError> {
        let id: Uuid = poll.id;

        let options = store.options_for_poll(id).await
            .map_err(|e| storage_failure("options_for_poll", id, e))?;
        let votes = store.votes_for_poll(id).await
            .map_err(|e| storage_failure("votes_for_poll", id, e))?;

        let tally = Tally::from_votes(&votes);
        Ok(PollView::new(poll, tally.option_views(&options), tally.total()))
    }
}
