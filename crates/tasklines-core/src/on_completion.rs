//! On-completion actions.
//!
//! A task may carry `🏁 <action>` in its text. The line parser finds the
//! flag and its token; this module folds the token into a closed set of
//! actions. Anything it does not recognise, including an empty token, is
//! [`OnCompletionAction::None`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flag that introduces an on-completion action.
pub const ON_COMPLETION_FLAG: &str = "🏁";

/// What happens to a task the first time it is completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnCompletionAction {
    /// Keep the completed task.
    #[default]
    None,
    /// Remove the completed task from the document.
    Delete,
}

impl OnCompletionAction {
    /// Resolve an action token. Matching ignores case and surrounding
    /// whitespace; unknown tokens resolve to `None`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "delete" => OnCompletionAction::Delete,
            _ => OnCompletionAction::None,
        }
    }

    /// Token written after the flag, if the action is rendered at all.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            OnCompletionAction::None => None,
            OnCompletionAction::Delete => Some("delete"),
        }
    }
}

impl fmt::Display for OnCompletionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnCompletionAction::None => f.write_str("none"),
            OnCompletionAction::Delete => f.write_str("delete"),
        }
    }
}
