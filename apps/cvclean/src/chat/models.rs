use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
}

/// Reply to a session-initiation call. Field names vary between backend
/// versions, hence the aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStart {
    #[serde(alias = "sessionId")]
    pub session_id: String,
    #[serde(alias = "initial_message")]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    /// Percentage, 0..=100.
    #[serde(default)]
    pub progress: Option<f64>,
}

impl ChatReply {
    /// Reported percentage as a fraction in 0..=1.
    pub fn progress_fraction(&self) -> Option<f64> {
        self.progress.map(|p| (p / 100.0).clamp(0.0, 1.0))
    }

    pub fn is_complete(&self) -> bool {
        self.status == Some(SessionStatus::Completed)
            || self.progress_fraction().is_some_and(|p| p >= 1.0)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageBody<'a> {
    pub message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_start_accepts_both_spellings() {
        let a: SessionStart =
            serde_json::from_str(r#"{"session_id": "s1", "message": "Hola"}"#).unwrap();
        let b: SessionStart =
            serde_json::from_str(r#"{"sessionId": "s1", "initial_message": "Hola"}"#).unwrap();
        assert_eq!(a.session_id, b.session_id);
        assert_eq!(a.message, b.message);
    }

    #[test]
    fn test_reply_without_progress() {
        let reply: ChatReply = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(reply.status.is_none());
        assert!(reply.progress_fraction().is_none());
        assert!(!reply.is_complete());
    }

    #[test]
    fn test_reply_completed_status() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"message": "listo", "status": "completed"}"#).unwrap();
        assert!(reply.is_complete());
    }

    #[test]
    fn test_progress_percentage_normalized() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"message": "x", "progress": 40}"#).unwrap();
        assert_eq!(reply.progress_fraction(), Some(0.4));

        let done: ChatReply =
            serde_json::from_str(r#"{"message": "x", "progress": 100}"#).unwrap();
        assert!(done.is_complete());

        let over: ChatReply =
            serde_json::from_str(r#"{"message": "x", "progress": 120}"#).unwrap();
        assert_eq!(over.progress_fraction(), Some(1.0));
    }

    #[test]
    fn test_one_percent_is_not_complete() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"message": "x", "progress": 1}"#).unwrap();
        assert_eq!(reply.progress_fraction(), Some(0.01));
        assert!(!reply.is_complete());
    }
}
