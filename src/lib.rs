//! XSPF playlist ingestion for media players
//!
//! Turns XSPF documents into a flat list of playable HTTP(S) streams,
//! including Icecast-style metadata carried in track annotations.
//!
//! ```
//! use xspf_streams::parse_xspf;
//!
//! let streams = parse_xspf(r#"<playlist><title>Radio</title><trackList>
//!   <track><location>http://example.com/live</location></track>
//! </trackList></playlist>"#).unwrap();
//! assert_eq!(streams[0].title, "Radio");
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod playlist_parser;
pub mod xml_tree;
pub mod xspf_parser;

pub use error::{ParseError, PlaylistError};
pub use models::StreamDescriptor;
pub use playlist_parser::{parse_playlist, PlaylistFormat, PlaylistParser};
pub use xspf_parser::{parse_xspf, XspfParser};
