use tracing::trace;

use crate::options::{NamingOptions, StubTypeRule};
use crate::path;

/// Outcome of classifying a file by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileClass {
    /// A recognized video container.
    Video {
        /// Extension without the dot, original case.
        container: String,
    },
    /// A placeholder stub file.
    Stub {
        /// Extension without the dot, original case.
        container: String,
        /// Stub type from the registry, or the stub extension itself.
        stub_type: String,
    },
    /// Neither a video nor a stub.
    Unsupported,
}

/// Decides whether a path names a video file, a stub, or neither.
///
/// Classification is purely lexical and case-insensitive.
#[derive(Debug, Clone)]
pub struct ExtensionClassifier {
    video_extensions: Vec<String>,
    stub_extensions: Vec<String>,
    stub_types: Vec<StubTypeRule>,
}

impl ExtensionClassifier {
    pub fn new(options: &NamingOptions) -> Self {
        Self {
            video_extensions: lowercase_all(&options.video_file_extensions),
            stub_extensions: lowercase_all(&options.stub_file_extensions),
            stub_types: options.stub_types.clone(),
        }
    }

    /// Classify `path` by its extension.
    pub fn classify(&self, path: &str) -> FileClass {
        let Some(extension) = path::extension(path) else {
            return FileClass::Unsupported;
        };
        let lowered = extension.to_lowercase();
        let container = extension.trim_start_matches('.').to_string();

        if self.video_extensions.contains(&lowered) {
            return FileClass::Video { container };
        }

        if self.stub_extensions.contains(&lowered) {
            let stub_type = self.stub_type(path, &lowered);
            trace!(path = %path, stub_type = %stub_type, "stub file");
            return FileClass::Stub {
                container,
                stub_type,
            };
        }

        FileClass::Unsupported
    }

    /// Returns `true` if the extension is a recognized video container.
    pub fn is_video(&self, path: &str) -> bool {
        matches!(self.classify(path), FileClass::Video { .. })
    }

    /// Returns `true` if the extension marks a stub file.
    pub fn is_stub(&self, path: &str) -> bool {
        matches!(self.classify(path), FileClass::Stub { .. })
    }

    /// `Movie.dvd.disc` → `dvd`; without a registered token the stub
    /// extension itself names the type.
    fn stub_type(&self, path: &str, lowered_extension: &str) -> String {
        let stem = path::file_stem(path);
        let token = path::extension(stem).map(|ext| &ext[1..]);

        token
            .and_then(|token| {
                self.stub_types
                    .iter()
                    .find(|rule| rule.token.eq_ignore_ascii_case(token))
            })
            .map(|rule| rule.stub_type.clone())
            .unwrap_or_else(|| lowered_extension.trim_start_matches('.').to_string())
    }
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ExtensionClassifier {
        ExtensionClassifier::new(&NamingOptions::default())
    }

    #[test]
    fn video_extensions_are_case_insensitive() {
        let c = classifier();
        assert_eq!(
            c.classify("/tv/Show/Show.S01E01.MKV"),
            FileClass::Video {
                container: "MKV".into()
            }
        );
        assert!(c.is_video("episode.mp4"));
        assert!(c.is_video("recording.dvr-ms"));
    }

    #[test]
    fn bare_stub_uses_extension_as_type() {
        let c = classifier();
        assert_eq!(
            c.classify("movie.disc"),
            FileClass::Stub {
                container: "disc".into(),
                stub_type: "disc".into()
            }
        );
    }

    #[test]
    fn stub_token_selects_registered_type() {
        let c = classifier();
        for (input, expected) in [
            ("/movies/Movie.dvd.disc", "dvd"),
            ("/movies/Movie.BRRip.disc", "bluray"),
            ("/movies/Movie.bd50.DISC", "bluray"),
            ("/tv/Show S01E01.hdtv.disc", "tv"),
            ("/movies/Movie.unknown.disc", "disc"),
        ] {
            match c.classify(input) {
                FileClass::Stub { stub_type, .. } => {
                    assert_eq!(stub_type, expected, "failed for input: {input}")
                }
                other => panic!("expected stub for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn stub_container_keeps_raw_extension() {
        let c = classifier();
        match c.classify("/movies/Movie.dvd.DISC") {
            FileClass::Stub { container, .. } => assert_eq!(container, "DISC"),
            other => panic!("expected stub, got {other:?}"),
        }
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        let c = classifier();
        assert_eq!(c.classify("random.txt"), FileClass::Unsupported);
        assert_eq!(c.classify("/tv/Show/no_extension"), FileClass::Unsupported);
        assert_eq!(c.classify("/tv/Show/trailing."), FileClass::Unsupported);
        assert!(!c.is_stub("random.txt"));
    }

    #[test]
    fn custom_registry_is_honored() {
        let options = NamingOptions::default()
            .with_video_file_extensions([".MKV"])
            .with_stub_file_extensions([".stub"])
            .with_stub_type(StubTypeRule::new("ld", "laserdisc"));
        let c = ExtensionClassifier::new(&options);
        assert!(c.is_video("a.mkv"));
        assert!(!c.is_video("a.mp4"));
        assert!(!c.is_stub("a.disc"));
        assert_eq!(
            c.classify("Movie.ld.stub"),
            FileClass::Stub {
                container: "stub".into(),
                stub_type: "laserdisc".into()
            }
        );
    }
}
