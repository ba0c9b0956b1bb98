use crate::network::ApiError;

/// Sự kiện từ tầng mạng gửi lên UI.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    Reply(ReplyOutcome),
}

/// Result of one retrieval round-trip, as seen by the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Answered(String),
    /// Server answered with a non-2xx status.
    Rejected { status: u16 },
    /// The request never completed or the body was unusable.
    TransportFailed(String),
}

impl From<Result<String, ApiError>> for ReplyOutcome {
    fn from(result: Result<String, ApiError>) -> Self {
        match result {
            Ok(message) => ReplyOutcome::Answered(message),
            Err(ApiError::Status { status, .. }) => ReplyOutcome::Rejected { status },
            Err(err) => ReplyOutcome::TransportFailed(err.to_string()),
        }
    }
}
