/// A mutation rejected synchronously by the operation that received it.
///
/// Validation failures leave the store untouched; the caller is notified
/// through the operation's own `Result`. Runtime failures (a subscriber
/// panicking during dispatch) never surface here — they are captured into
/// [`ErrorState`] and published on the `component-error` channel instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("unknown column field `{0}`")]
    UnknownField(String),
    #[error("duplicate column field `{0}`")]
    DuplicateField(String),
    #[error("column `{0}` is not resizable")]
    ColumnNotResizable(String),
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Where a recorded error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSource {
    /// Set by the host through `GridApi::show_error`.
    External,
    /// Captured from a subscriber that panicked during event dispatch.
    Dispatch,
}

/// The grid-wide error banner state.
///
/// Recoverable from the engine's perspective: selection, sort, and
/// pagination state are preserved while an error is displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorState {
    pub message: String,
    pub source: ErrorSource,
}

impl ErrorState {
    pub fn external(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: ErrorSource::External,
        }
    }

    pub fn dispatch(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: ErrorSource::Dispatch,
        }
    }
}
