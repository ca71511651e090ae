use serde::Serialize;

use crate::error::DirectoryError;

/// What a write did to its subject, for the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Listed,
    Updated,
    Deleted,
}

impl WriteAction {
    fn past_tense(self) -> &'static str {
        match self {
            WriteAction::Listed => "listed",
            WriteAction::Updated => "updated",
            WriteAction::Deleted => "deleted",
        }
    }
}

/// Result of a create/update/delete as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    /// `subject` names the record, e.g. `"Venue The Musical Hop"` or `"Show"`.
    pub fn success(subject: &str, action: WriteAction) -> Self {
        Self {
            success: true,
            message: format!("{subject} was successfully {}!", action.past_tense()),
        }
    }

    pub fn failure(subject: &str, action: WriteAction, err: &DirectoryError) -> Self {
        Self {
            success: false,
            message: format!(
                "An error occurred. {subject} could not be {}: {err}",
                action.past_tense()
            ),
        }
    }
}
