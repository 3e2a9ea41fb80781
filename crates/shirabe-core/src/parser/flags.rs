//! # Flag Extraction
//!
//! Splits a file name into the delimited tokens release names use for
//! tags: resolution, source, 3D layout, release group and so on.

use crate::options::NamingOptions;
use crate::path;

/// Splits file names into lowercase flag tokens.
#[derive(Debug, Clone)]
pub struct FlagExtractor {
    delimiters: Vec<char>,
}

impl FlagExtractor {
    /// Create an extractor using the configured delimiters.
    pub fn new(options: &NamingOptions) -> Self {
        Self {
            delimiters: options.video_flag_delimiters.clone(),
        }
    }

    /// Extract the flags of the last path component, in order of appearance.
    ///
    /// # Examples
    /// ```
    /// use shirabe_core::{FlagExtractor, NamingOptions};
    ///
    /// let extractor = FlagExtractor::new(&NamingOptions::default());
    /// let flags = extractor.extract("/movies/Avatar (2009) [3D HSBS].mkv");
    /// assert_eq!(flags, ["avatar", "2009", "3d", "hsbs", "mkv"]);
    /// ```
    pub fn extract(&self, path: &str) -> Vec<String> {
        let name = path::file_name(path);
        let mut flags = Vec::new();
        let mut current_start = 0;

        for (idx, c) in name.char_indices() {
            if self.delimiters.contains(&c) {
                if idx > current_start {
                    flags.push(name[current_start..idx].to_lowercase());
                }
                current_start = idx + c.len_utf8();
            }
        }

        if current_start < name.len() {
            flags.push(name[current_start..].to_lowercase());
        }

        flags
    }
}
