//! Engine error taxonomy.
//!
//! Every variant represents a recoverable authoring problem. Whether a
//! report becomes build-fatal is decided by the configured termination
//! policy in [`crate::report`], never by the code that raises it.

/// A problem detected while rendering a dialog.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PluginError {
    /// A directive or container declaration that cannot be honored
    /// (missing backing class, panel-less container with members, ...).
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// A value failed an annotation-declared constraint; the offending
    /// attribute is omitted and the rest of the widget still renders.
    #[error("validation failed for '{member}': {message}")]
    Validation { member: String, message: String },

    /// A malformed definition document detail (should not happen for
    /// documents that passed loading).
    #[error("definition error: {0}")]
    Definition(String),

    /// A member declared more than one built-in widget annotation; the
    /// first in enumeration order renders.
    #[error("ambiguous widget on '{member}': declared {kinds:?}")]
    AmbiguousWidget { member: String, kinds: Vec<String> },
}

impl PluginError {
    /// Stable kind name matched against termination-policy patterns.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSetting(_) => "invalid_setting",
            Self::Validation { .. } => "validation",
            Self::Definition(_) => "definition",
            Self::AmbiguousWidget { .. } => "ambiguous_widget",
        }
    }

    pub fn validation(member: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            member: member.into(),
            message: message.into(),
        }
    }
}
