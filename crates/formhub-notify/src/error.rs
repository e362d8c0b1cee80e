/// Errors that can occur inside the notification dispatch core.
///
/// None of these escape the two public dispatcher entrypoints: every
/// failure is absorbed into a `tracing::error!` line and a `false` return.
///
/// # Examples
///
/// ```rust
/// use formhub_notify::error::NotifyError;
///
/// let err = NotifyError::Validation("user_id must not be empty".to_string());
/// assert!(err.to_string().contains("user_id"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A required notification field is missing or empty.
    #[error("Notify: invalid notification: {0}")]
    Validation(String),

    /// The persistence gateway rejected or failed the insert.
    #[error("Notify: persistence failed: {0}")]
    Persistence(#[from] anyhow::Error),

    /// Malformed meeting input, e.g. an unparsable `start_time`.
    #[error("Notify: bad meeting record: {0}")]
    Extraction(String),
}

/// Convenience `Result` alias for dispatch operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
