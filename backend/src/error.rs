use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorCode, ErrorResponse, ValidationError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Invalid option for this poll")]
    OptionMismatch,
    #[error("You have already voted on this poll")]
    DuplicateVote,
    #[error("Poll not found")]
    NotFound,
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    pub fn invalid_body() -> Self {
        ApiError::InvalidRequest("Invalid JSON body".into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            ApiError::OptionMismatch => ErrorCode::OptionMismatch,
            ApiError::DuplicateVote => ErrorCode::DuplicateVote,
            ApiError::NotFound => ErrorCode::NotFound,
            ApiError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn status(&self) -> Status {
        Status::from_code(self.code().http_status()).unwrap_or(Status::InternalServerError)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidRequest(e.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.to_string()));

        rocket::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
