//! Error types for the trawl service.

use trawl_search::SearchError;

/// Top-level error type for the service shell.
#[derive(Debug, thiserror::Error)]
pub enum TrawlError {
    /// Configuration file could not be parsed or holds invalid values.
    #[error("config error: {0}")]
    Config(String),

    /// Search core rejected its configuration or a query.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error (reading config, binding the listener, serving).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_display_transparently() {
        let err = TrawlError::from(SearchError::Config("bad pattern".into()));
        assert_eq!(err.to_string(), "config error: bad pattern");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: TrawlError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
