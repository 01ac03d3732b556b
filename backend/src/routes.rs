use std::sync::Arc;
use rocket::{State, get, post, http::Status, serde::json::{self, Json}};
use tracing::{debug, instrument};
use shared::models::*;
use crate::{
    error::ApiError,
    processor::{PollProcessor, VoteProcessor},
    store::PollStore,
};

pub struct AppState {
    pub store: Arc<dyn PollStore>,
}

impl AppState {
    pub fn new(store: impl PollStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }
}

fn parse_body<T>(body: Result<Json<T>, json::Error<'_>>) -> Result<T, ApiError> {
    body.map(Json::into_inner).map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::invalid_body()
    })
}

#[get("/polls")]
pub async fn list_polls(state: &State<AppState>) -> Result<Json<PollListResponse>, ApiError> {
    let polls = PollProcessor::list_polls(state.store.as_ref()).await?;
    Ok(Json(PollListResponse { polls }))
}

#[instrument(skip(state, request))]
#[post("/polls", data = "<request>")]
pub async fn create_poll(
    state: &State<AppState>,
    request: Result<Json<CreatePollRequest>, json::Error<'_>>,
) -> Result<(Status, Json<PollResponse>), ApiError> {
    let request = parse_body(request)?;
    let poll = PollProcessor::create_poll(state.store.as_ref(), &request).await?;
    Ok((Status::Created, Json(PollResponse { poll })))
}

#[get("/polls/<id>")]
pub async fn get_poll(state: &State<AppState>, id: &str) -> Result<Json<PollResponse>, ApiError> {
    let poll = PollProcessor::get_poll(state.store.as_ref(), id).await?;
    Ok(Json(PollResponse { poll }))
}

#[instrument(skip(state, request))]
#[post("/polls/<id>/vote", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    id: &str,
    request: Result<Json<CastVoteRequest>, json::Error<'_>>,
) -> Result<(Status, Json<VoteResponse>), ApiError> {
    let request = parse_body(request)?;
    let vote = VoteProcessor::cast_vote(state.store.as_ref(), id, &request).await?;
    Ok((Status::Created, Json(vote.into())))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
