//! XSPF (XML Shareable Playlist Format) parser
//!
//! Parses XSPF playlists (pronounced "spiff") - an XML-based playlist format
//! supported by VLC, Audacious, Clementine, and other media players - into
//! a flat list of playable HTTP(S) streams.
//!
//! Reference: https://xspf.org/spec

use log::{debug, warn};
use std::collections::BTreeMap;

use crate::annotation::extract_metas;
use crate::error::ParseError;
use crate::models::{StreamDescriptor, UNKNOWN_DURATION};
use crate::playlist_parser::PlaylistParser;
use crate::xml_tree::{XmlDocument, XmlElement};

/// Stateless XSPF parser; safe to share between threads
#[derive(Debug, Clone, Copy, Default)]
pub struct XspfParser;

impl PlaylistParser for XspfParser {
    fn parse(&self, content: &str) -> Result<Vec<StreamDescriptor>, ParseError> {
        parse_xspf(content)
    }
}

/// Fields gathered from the children of one `<track>`
#[derive(Debug, Default)]
struct TrackFields {
    title: Option<String>,
    location: Option<String>,
    description: String,
    duration: Option<f64>,
    metas: BTreeMap<String, String>,
}

/// Parse XSPF content into stream descriptors
pub fn parse_xspf(content: &str) -> Result<Vec<StreamDescriptor>, ParseError> {
    let document = XmlDocument::parse(content).map_err(|e| {
        debug!("XSPF rejected: {}", e);
        ParseError::xml()
    })?;

    let mut streams = Vec::new();

    for playlist in document.descendants("playlist") {
        let mut default_title = String::new();
        let mut track_list = None;

        for child in playlist.child_elements() {
            match child.name.as_str() {
                "title" => default_title = child.text_content().trim().to_string(),
                "trackList" => track_list = Some(child),
                _ => {}
            }
        }

        let Some(track_list) = track_list else {
            continue;
        };

        for track in track_list.descendants("track") {
            if let Some(stream) = parse_track(track, &default_title) {
                streams.push(stream);
            }
        }
    }

    if streams.is_empty() {
        return Err(ParseError::no_streams());
    }

    debug!("Parsed XSPF streams: {:?}", streams);
    Ok(streams)
}

/// Build a descriptor from one `<track>`; `None` when it has no usable location
fn parse_track(track: &XmlElement, default_title: &str) -> Option<StreamDescriptor> {
    let mut fields = TrackFields::default();

    // Repeated children overwrite earlier ones
    for child in track.child_elements() {
        match child.name.as_str() {
            "title" => fields.title = Some(child.text_content().trim().to_string()),
            "location" => {
                let location = child.text_content().trim().to_lowercase();
                if is_http_url(&location) {
                    fields.location = Some(location);
                } else {
                    warn!("Ignoring non-HTTP stream location: {}", location);
                }
            }
            "annotation" => fields.metas = extract_metas(child.text_content().trim()),
            "info" => fields.description = child.text_content().trim().to_string(),
            "duration" => fields.duration = Some(parse_duration(&child.text_content())),
            _ => {}
        }
    }

    let Some(stream_url) = fields.location.take() else {
        debug!("Skipping XSPF track without a stream location");
        return None;
    };

    let mut stream = StreamDescriptor::new(stream_url);
    stream.title = fields.title.unwrap_or_else(|| default_title.to_string());
    stream.duration = fields.duration.unwrap_or(UNKNOWN_DURATION);
    stream.description = fields.description;
    apply_metas(&mut stream, fields.metas);
    Some(stream)
}

/// Promote typed annotation values onto the descriptor
fn apply_metas(stream: &mut StreamDescriptor, metas: BTreeMap<String, String>) {
    stream.bitrate = metas
        .get("bitrate")
        .and_then(|b| leading_number(b))
        .filter(|b| (0.0..=u32::MAX as f64).contains(b))
        .map(|b| b as u32);

    stream.mime_type = metas.get("contentType").cloned();

    // Only a track that already has a description takes the annotation's
    if !stream.description.is_empty() {
        if let Some(description) = metas.get("streamDescription").filter(|d| !d.is_empty()) {
            stream.description = description.clone();
        }
    }

    stream.metas = metas;
}

/// Milliseconds text to seconds; anything unusable is `UNKNOWN_DURATION`
fn parse_duration(text: &str) -> f64 {
    match leading_number(text) {
        Some(ms) if ms >= 0.0 => ms / 1000.0,
        _ => UNKNOWN_DURATION,
    }
}

/// Integer prefix of `text` after leading whitespace and an optional sign
///
/// Parsed as `f64` so digit runs wider than `i64` stay numeric.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let digits_start = usize::from(text.starts_with(|c: char| c == '+' || c == '-'));
    let digits_len = text[digits_start..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits_len == 0 {
        return None;
    }
    text[..digits_start + digits_len].parse().ok()
}

/// Case-insensitive `http://` or `https://` prefix check
pub fn is_http_url(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fast byte search - avoids str overhead
#[inline]
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len())
        .position(|window| window == needle)
}

/// Fast contains check for bytes
#[inline]
fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    find_bytes(haystack, needle).is_some()
}

/// Check if content looks like an XSPF playlist without parsing it
#[inline]
pub fn is_xspf(content: &str) -> bool {
    let bytes = content.as_bytes();
    contains_bytes(bytes, b"<playlist") &&
    (contains_bytes(bytes, b"xmlns=\"http://xspf.org/ns/0/\"") ||
     contains_bytes(bytes, b"xmlns='http://xspf.org/ns/0/'") ||
     contains_bytes(bytes, b"<trackList"))
}

#[cfg(test)]
#[path = "xspf_parser_tests.rs"]
mod tests;
