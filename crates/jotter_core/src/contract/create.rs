//! Create-note contract.

use super::dto::NoteDto;
use super::{FieldIssue, IssueSink, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::model::ids::UserId;
use serde::{Deserialize, Serialize};

/// Wire request for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Validated create input with the caller identity injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNoteInput {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

pub type CreateNoteOutput = NoteDto;

impl CreateNoteInput {
    /// Merges `request` with the authenticated caller and validates it.
    pub fn parse(
        request: CreateNoteRequest,
        auth_user_id: Option<&str>,
    ) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::default();
        let user_id = sink.user_id(auth_user_id);
        sink.text("title", &request.title, 1, TITLE_MAX_CHARS);
        sink.text("content", &request.content, 1, CONTENT_MAX_CHARS);

        match user_id {
            Some(user_id) if sink.is_empty() => Ok(Self {
                user_id,
                title: request.title,
                content: request.content,
            }),
            _ => Err(sink.into_issues()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateNoteInput, CreateNoteRequest};
    use crate::contract::IssueCode;

    fn request(title: &str, content: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn parse_accepts_bounds() {
        let input =
            CreateNoteInput::parse(request(&"t".repeat(100), &"c".repeat(10_000)), Some("u1"))
                .unwrap();
        assert_eq!(input.user_id.as_str(), "u1");
    }

    #[test]
    fn parse_reports_every_issue() {
        let issues =
            CreateNoteInput::parse(request("", &"c".repeat(10_001)), None).unwrap_err();
        let paths: Vec<&str> = issues.iter().map(|issue| issue.path.as_str()).collect();
        assert_eq!(paths, vec!["userId", "title", "content"]);
        assert_eq!(issues[2].code, IssueCode::TooBig);
    }

    #[test]
    fn request_deserializes_from_wire_json() {
        let request: CreateNoteRequest =
            serde_json::from_str(r#"{"title":"A","content":"B"}"#).unwrap();
        assert_eq!(request.title, "A");
    }
}
