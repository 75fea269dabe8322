//! Shared contract for playlist parsers and format detection

use std::path::Path;

use crate::error::{ParseError, PlaylistError};
use crate::models::StreamDescriptor;
use crate::xspf_parser::{is_xspf, XspfParser};

/// Given playlist text, produce the playable streams or fail
pub trait PlaylistParser: Send + Sync {
    fn parse(&self, content: &str) -> Result<Vec<StreamDescriptor>, ParseError>;
}

/// Playlist formats this crate can parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistFormat {
    Xspf,
}

static XSPF_PARSER: XspfParser = XspfParser;

impl PlaylistFormat {
    /// Sniff the format from the document text
    pub fn detect(content: &str) -> Option<Self> {
        if is_xspf(content) {
            Some(PlaylistFormat::Xspf)
        } else {
            None
        }
    }

    /// Guess the format from a file extension, looking through `.gz`
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".xspf") {
            Some(PlaylistFormat::Xspf)
        } else {
            None
        }
    }

    pub fn parser(&self) -> &'static dyn PlaylistParser {
        match self {
            PlaylistFormat::Xspf => &XSPF_PARSER,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaylistFormat::Xspf => "XSPF",
        }
    }
}

/// Detect the format of `content` and parse it with the matching parser
pub fn parse_playlist(content: &str) -> Result<Vec<StreamDescriptor>, PlaylistError> {
    let format = PlaylistFormat::detect(content).ok_or(PlaylistError::UnsupportedFormat)?;
    parse_as(format, content)
}

/// Parse `content` as a known format, skipping detection
pub fn parse_as(format: PlaylistFormat, content: &str) -> Result<Vec<StreamDescriptor>, PlaylistError> {
    log::debug!("Parsing playlist as {}", format.label());
    Ok(format.parser().parse(content)?)
}

#[cfg(test)]
#[path = "playlist_parser_tests.rs"]
mod tests;
