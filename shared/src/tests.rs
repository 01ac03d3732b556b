#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;
    use crate::models::{CreatePollRequest, OptionRecord, PollRecord, PollView, VoteRecord, CastVoteRequest};
    use crate::tally::Tally;
    use crate::validation::*;

    fn request(question: &str, options: &[&str]) -> CreatePollRequest {
        CreatePollRequest {
            question: question.into(),
            description: None,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn option(poll_id: Uuid, label: &str, position: i32) -> OptionRecord {
        OptionRecord { id: Uuid::new_v4(), poll_id, label: label.into(), position }
    }

    fn vote(poll_id: Uuid, option_id: Uuid) -> VoteRecord {
        VoteRecord {
            id: Uuid::new_v4(),
            poll_id,
            option_id,
            voter_id: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_poll_request_normalization() {
        let mut req = request("  Coffee or tea?  ", &[" Coffee ", "", "   ", "Tea"]);
        req.description = Some("   ".into());

        let poll = validate_poll_request(&req).unwrap();
        assert_eq!(poll.question, "Coffee or tea?");
        assert_eq!(poll.description, None);
        assert_eq!(poll.labels, vec!["Coffee", "Tea"]);

        req.description = Some(" morning drink ".into());
        assert_eq!(validate_poll_request(&req).unwrap().description.as_deref(), Some("morning drink"));
    }

    #[test]
    fn test_poll_request_rejections() {
        assert_eq!(validate_poll_request(&request("   ", &["A", "B"])), Err(ValidationError::MissingQuestion));
        assert_eq!(validate_poll_request(&request("Q", &["A"])), Err(ValidationError::TooFewOptions));
        assert_eq!(validate_poll_request(&request("Q", &["A", "  "])), Err(ValidationError::TooFewOptions));
        assert_eq!(validate_poll_request(&request("Q", &[])), Err(ValidationError::TooFewOptions));

        let long_question = "q".repeat(MAX_QUESTION_LENGTH + 1);
        assert_eq!(validate_poll_request(&request(&long_question, &["A", "B"])), Err(ValidationError::QuestionTooLong));

        let long_option = "o".repeat(MAX_OPTION_LENGTH + 1);
        assert_eq!(validate_poll_request(&request("Q", &["A", &long_option])), Err(ValidationError::OptionTooLong));

        let many: Vec<String> = (0..=MAX_OPTIONS).map(|i| format!("Option {i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        assert_eq!(validate_poll_request(&request("Q", &many)), Err(ValidationError::TooManyOptions));

        let mut req = request("Q", &["A", "B"]);
        req.description = Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert_eq!(validate_poll_request(&req), Err(ValidationError::DescriptionTooLong));
    }

    #[test]
    fn test_limits_count_characters() {
        let accented = "é".repeat(MAX_OPTION_LENGTH);
        assert!(validate_poll_request(&request("Q", &["A", &accented])).is_ok());
    }

    #[test]
    fn test_voter_id_normalization() {
        assert_eq!(normalize_voter_id(None), None);
        assert_eq!(normalize_voter_id(Some("  ")), None);
        assert_eq!(normalize_voter_id(Some(" u1")), Some(" u1".to_string()));
    }

    #[test]
    fn test_tally_counts_per_option() {
        let poll_id = Uuid::new_v4();
        let tea = option(poll_id, "Tea", 1);
        let coffee = option(poll_id, "Coffee", 0);
        let votes = vec![vote(poll_id, coffee.id), vote(poll_id, coffee.id), vote(poll_id, tea.id)];

        let tally = Tally::from_votes(&votes);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.votes_for(coffee.id), 2);

        let views = tally.option_views(&[tea.clone(), coffee.clone()]);
        let labels: Vec<_> = views.iter().map(|v| (v.label.as_str(), v.votes)).collect();
        assert_eq!(labels, vec![("Coffee", 2), ("Tea", 1)]);
    }

    #[test]
    fn test_tally_without_votes() {
        let poll_id = Uuid::new_v4();
        let options = [option(poll_id, "A", 0), option(poll_id, "B", 1)];
        let tally = Tally::new();

        assert_eq!(tally.total(), 0);
        assert!(tally.option_views(&options).iter().all(|v| v.votes == 0));
    }

    #[test]
    fn test_tally_total_includes_unlisted_options() {
        let poll_id = Uuid::new_v4();
        let listed = option(poll_id, "A", 0);
        let tally = Tally::from_votes(&[vote(poll_id, listed.id), vote(poll_id, Uuid::new_v4())]);

        assert_eq!(tally.total(), 2);
        assert_eq!(tally.option_views(&[listed])[0].votes, 1);
    }

    #[test]
    fn test_poll_view_wire_format() {
        let poll = PollRecord {
            id: Uuid::new_v4(),
            question: "Coffee or tea?".into(),
            description: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let view = PollView::new(poll, Vec::new(), 0);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["description"], "");
        assert_eq!(json["totalVotes"], 0);
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_vote_request_accepts_user_id_alias() {
        let req: CastVoteRequest = serde_json::from_str(r#"{"optionId":"x","userId":"u1"}"#).unwrap();
        assert_eq!(req.voter_id.as_deref(), Some("u1"));

        let req: CastVoteRequest = serde_json::from_str("{}").unwrap();
        assert!(req.option_id.is_none() && req.voter_id.is_none());
    }
}
