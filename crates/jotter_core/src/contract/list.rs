//! List-notes contract.

use super::dto::NoteDto;
use super::{FieldIssue, IssueSink};
use crate::model::ids::UserId;
use serde::{Deserialize, Serialize};

pub const LIST_DEFAULT_LIMIT: i64 = 50;
pub const LIST_MAX_LIMIT: i64 = 100;

/// Wire request for listing the caller's notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotesRequest {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated list input with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNotesInput {
    pub user_id: UserId,
    /// In `1..=100`.
    pub limit: u32,
    pub offset: u64,
}

/// Notes ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotesOutput {
    pub notes: Vec<NoteDto>,
}

impl ListNotesInput {
    pub fn parse(
        request: ListNotesRequest,
        auth_user_id: Option<&str>,
    ) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::default();
        let user_id = sink.user_id(auth_user_id);
        let limit = sink.int_in_range("limit", request.limit, LIST_DEFAULT_LIMIT, 1, LIST_MAX_LIMIT);
        let offset = sink.int_in_range("offset", request.offset, 0, 0, i64::MAX);

        match (user_id, u32::try_from(limit), u64::try_from(offset)) {
            (Some(user_id), Ok(limit), Ok(offset)) if sink.is_empty() => Ok(Self {
                user_id,
                limit,
                offset,
            }),
            _ => Err(sink.into_issues()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListNotesInput, ListNotesRequest};

    #[test]
    fn parse_applies_defaults() {
        let input = ListNotesInput::parse(ListNotesRequest::default(), Some("u1")).unwrap();
        assert_eq!(input.limit, 50);
        assert_eq!(input.offset, 0);
    }

    #[test]
    fn parse_rejects_limit_outside_bounds() {
        for limit in [0, 101, -5] {
            let request = ListNotesRequest {
                limit: Some(limit),
                offset: None,
            };
            let issues = ListNotesInput::parse(request, Some("u1")).unwrap_err();
            assert_eq!(issues[0].path, "limit", "limit {limit}");
        }
    }

    #[test]
    fn parse_rejects_negative_offset() {
        let request = ListNotesRequest {
            limit: Some(1),
            offset: Some(-1),
        };
        let issues = ListNotesInput::parse(request, Some("u1")).unwrap_err();
        assert_eq!(issues[0].path, "offset");
    }

    #[test]
    fn request_fields_are_optional_on_the_wire() {
        let request: ListNotesRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, ListNotesRequest::default());
    }
}
