use thiserror::Error;

use crate::options::DateFormat;

/// Everything that can go wrong while building or configuring a picker.
///
/// Construction returns these directly. Once a picker exists they are only
/// ever logged as warnings by the rejecting setter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error("Invalid theme \"{0}\". Please input \"dark\" or \"light\".")]
    InvalidTheme(String),

    #[error("Invalid format \"{0}\".\n\nAccepted formats:\n{}", DateFormat::accepted_list())]
    InvalidFormat(String),

    #[error("Invalid date \"{0}\".")]
    InvalidDate(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("Root container is either not in the DOM or is not a valid element.")]
    RootNotConnected,

    #[error("Month picker is not initialized.")]
    NotMounted,

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Logs a rejected call the way every setter reports misuse.
pub fn warn_rejected(method: &str, input: &dyn std::fmt::Display, error: &PickerError) {
    tracing::warn!(target: "monthpicker", method, input = %input, "@MonthPicker: @{method}: {error}");
}
