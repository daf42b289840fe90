use std::error::Error;

/// Errors raised by the pure core logic (input validation only; the core
/// performs no I/O).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Render `err` and every `source()` below it as `outer: inner: root`.
///
/// HTTP client errors print only their outermost layer, which hides the
/// actual fault (refused connection, DNS, TLS). Layers whose text is
/// already part of the message are skipped.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        current = cause.source();
    }
    message
}
