use crate::models::{CreatePollRequest, NewPoll};

pub const MAX_QUESTION_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_OPTION_LENGTH: usize = 100;
pub const MAX_OPTIONS: usize = 20;
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid payload. Require question and at least two options.")]
    MissingQuestion,
    #[error("Invalid payload. Require question and at least two options.")]
    TooFewOptions,
    #[error("Question exceeds maximum length of {MAX_QUESTION_LENGTH}")]
    QuestionTooLong,
    #[error("Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH}")]
    DescriptionTooLong,
    #[error("Option text exceeds maximum length of {MAX_OPTION_LENGTH}")]
    OptionTooLong,
    #[error("Too many options (maximum {MAX_OPTIONS})")]
    TooManyOptions,
}

/// Normalizes a creation request: trims every field, drops blank option
/// labels and an empty description, then checks the limits.
pub fn validate_poll_request(request: &CreatePollRequest) -> Result<NewPoll, ValidationError> {
    let question = request.question.trim();
    if question.is_empty() { return Err(ValidationError::MissingQuestion); }
    if question.chars().count() > MAX_QUESTION_LENGTH { return Err(ValidationError::QuestionTooLong); }

    let description = request.description.as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LENGTH) {
        return Err(ValidationError::DescriptionTooLong);
    }

    let labels: Vec<String> = request.options.iter()
        .map(|opt| opt.trim())
        .filter(|opt| !opt.is_empty())
        .map(str::to_owned)
        .collect();

    if labels.len() < MIN_OPTIONS { return Err(ValidationError::TooFewOptions); }
    if labels.len() > MAX_OPTIONS { return Err(ValidationError::TooManyOptions); }
    if labels.iter().any(|l| l.chars().count() > MAX_OPTION_LENGTH) { return Err(ValidationError::OptionTooLong); }

    Ok(NewPoll {
        question: question.to_owned(),
        description: description.map(str::to_owned),
        labels,
    })
}

/// A voter id is opaque and kept verbatim; a blank one means anonymous.
pub fn normalize_voter_id(voter_id: Option<&str>) -> Option<String> {
    voter_id.filter(|v| !v.trim().is_empty()).map(str::to_owned)
}
