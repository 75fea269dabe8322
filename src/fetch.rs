//! Loading playlists from disk or over HTTP(S)
//! Plain and gzip-compressed (.xspf.gz) content are both accepted

use flate2::read::GzDecoder;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::PlaylistError;
use crate::models::StreamDescriptor;
use crate::playlist_parser::{parse_as, PlaylistFormat};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether `source` should be fetched rather than opened as a file
pub fn is_remote(source: &str) -> bool {
    crate::xspf_parser::is_http_url(source.trim())
}

/// Download and parse a playlist from an HTTP(S) URL
pub fn download_and_parse(url: &str, config: &FetchConfig) -> Result<Vec<StreamDescriptor>, PlaylistError> {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
        .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
        .build()
        .new_agent();

    log::debug!("Fetching playlist {}", url);

    let mut response = agent
        .get(url)
        .header("User-Agent", &config.user_agent)
        .call()
        .map_err(|e| match e {
            ureq::Error::StatusCode(code) => PlaylistError::Http(code),
            other => PlaylistError::Request(other.to_string()),
        })?;

    if response.status() != 200 {
        return Err(PlaylistError::Http(response.status().as_u16()));
    }

    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| PlaylistError::Request(e.to_string()))?;

    parse_bytes(&body)
}

/// Parse a playlist file - auto-detects gzip compression
///
/// The format is sniffed from the content first; the file extension is
/// only consulted when sniffing fails.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<StreamDescriptor>, PlaylistError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);

    // Peek without consuming so the plain path sees the whole file
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    let content = if is_gzip {
        read_text(BufReader::new(GzDecoder::new(reader)))?
    } else {
        read_text(reader)?
    };

    let format = PlaylistFormat::detect(&content)
        .or_else(|| PlaylistFormat::from_path(path))
        .ok_or(PlaylistError::UnsupportedFormat)?;
    parse_as(format, &content)
}

/// Read all text from `reader` and parse it
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<StreamDescriptor>, PlaylistError> {
    let content = read_text(reader)?;
    let format = PlaylistFormat::detect(&content).ok_or(PlaylistError::UnsupportedFormat)?;
    parse_as(format, &content)
}

/// Invalid UTF-8 is replaced rather than rejected
fn read_text<R: BufRead>(mut reader: R) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse an in-memory body that may still be gzip-compressed
fn parse_bytes(bytes: &[u8]) -> Result<Vec<StreamDescriptor>, PlaylistError> {
    if bytes.starts_with(&GZIP_MAGIC) {
        parse_reader(BufReader::new(GzDecoder::new(bytes)))
    } else {
        parse_reader(bytes)
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
