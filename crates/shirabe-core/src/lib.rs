//! # Shirabe Core
//!
//! Rule-driven episode metadata resolution. Given a media path, determines
//! whether it is a video or stub file and extracts season/episode numbers,
//! multi-episode spans, air dates, series names and 3D layouts.
//!
//! ## Quick Start
//!
//! ```rust
//! use shirabe_core::{EpisodeResolver, NamingOptions};
//!
//! let resolver = EpisodeResolver::new(NamingOptions::default()).unwrap();
//! let info = resolver.resolve("/tv/Show/Show.Name.S02E05E06.mkv", false).unwrap().unwrap();
//!
//! assert_eq!(info.series_name.as_deref(), Some("Show.Name"));
//! assert_eq!(info.season_number(), Some(2));
//! assert_eq!(info.episode_number(), Some(5));
//! assert_eq!(info.ending_episode_number(), Some(6));
//!
//! // Not a video or stub file
//! assert!(resolver.resolve("notes.txt", false).unwrap().is_none());
//! ```
pub mod error;
pub mod options;
pub mod parser;
pub mod path;
pub mod resolver;
pub mod types;

// Re-export primary API
pub use error::{Result, ShirabeError};
pub use options::{EpisodeExpression, Format3DRule, NamingOptions, ResolveOptions, StubTypeRule};
pub use parser::{
    EpisodePathParser, ExtensionClassifier, FileClass, FlagExtractor, Format3DDetector,
    PathParseResult,
};
pub use resolver::{resolve, EpisodeResolver};
pub use types::{EpisodeInfo, Format3D, Identification};
