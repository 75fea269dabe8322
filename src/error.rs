//! Error types for playlist parsing and loading

use thiserror::Error;

/// Fixed diagnostic for documents that are not well-formed XML
pub const XML_ERROR_MESSAGE: &str = "XML error";
/// Fixed diagnostic for documents without a single valid stream
pub const NO_STREAMS_MESSAGE: &str = "No streams found";

/// Failures of a playlist parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The document is not well-formed XML
    #[error("{0}")]
    Xml(String),

    /// The document parsed but no track passed validation
    #[error("{0}")]
    NoStreams(String),
}

impl ParseError {
    pub fn xml() -> Self {
        ParseError::Xml(XML_ERROR_MESSAGE.to_string())
    }

    pub fn no_streams() -> Self {
        ParseError::NoStreams(NO_STREAMS_MESSAGE.to_string())
    }
}

/// Failures while loading a playlist from a file or URL
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request could not be completed
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with a non-200 status
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Content is not a playlist format this crate understands
    #[error("Unsupported playlist format")]
    UnsupportedFormat,

    #[error(transparent)]
    Parse(#[from] ParseError),
}
