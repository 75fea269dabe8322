//! Data models for parsed playlist streams

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Duration value used when a track does not carry a usable duration
pub const UNKNOWN_DURATION: f64 = -1.0;

/// A playable stream extracted from a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamDescriptor {
    /// Lower-cased, trimmed HTTP(S) URL
    pub stream_url: String,
    /// Track title, or the enclosing playlist title
    pub title: String,
    pub description: String,
    /// Seconds, or `UNKNOWN_DURATION`
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Camel-cased annotation keys mapped to their trimmed values
    #[serde(default)]
    pub metas: BTreeMap<String, String>,
}

impl StreamDescriptor {
    /// Create a descriptor for `stream_url` with every other field unset
    pub fn new(stream_url: impl Into<String>) -> Self {
        Self {
            stream_url: stream_url.into(),
            title: String::new(),
            description: String::new(),
            duration: UNKNOWN_DURATION,
            bitrate: None,
            mime_type: None,
            metas: BTreeMap::new(),
        }
    }

    /// Whether the playlist supplied a duration for this stream
    pub fn has_duration(&self) -> bool {
        self.duration >= 0.0
    }
}
