//! Error types for the release menu.

use std::io;
use thiserror::Error;

/// Terminal outcomes of an interactive menu session other than a confirmed selection.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MenuError {
    /// There was nothing selectable, so the session never started.
    #[error("No changes found.")]
    NoChanges,

    /// The user quit the menu. Any selection made so far is discarded.
    #[error("Aborted.")]
    Aborted,

    /// The key input source could not produce a keypress.
    #[error("failed to read keypress: {0}")]
    Input(#[source] io::Error),

    /// Writing a frame to the terminal failed.
    #[error("failed to write menu output: {0}")]
    Output(#[source] io::Error),
}

impl From<io::Error> for MenuError {
    fn from(err: io::Error) -> Self {
        MenuError::Output(err)
    }
}

/// Errors from parsing identifiers and image references out of strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("invalid resource id {input:?}: {reason}")]
    ResourceId { input: String, reason: &'static str },

    #[error("invalid image reference {input:?}: {reason}")]
    ImageRef { input: String, reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_error_messages() {
        assert_eq!(MenuError::NoChanges.to_string(), "No changes found.");
        assert_eq!(MenuError::Aborted.to_string(), "Aborted.");
    }

    #[test]
    fn io_errors_convert_to_output_failures() {
        let err: MenuError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, MenuError::Output(_)));
    }
}
