//! # Episode Resolver
//!
//! Single entry point that classifies a path, extracts its flags, detects
//! 3D layouts and parses episode numbering, merging everything into one
//! [`EpisodeInfo`].

use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, ShirabeError};
use crate::options::{NamingOptions, ResolveOptions};
use crate::parser::{EpisodePathParser, ExtensionClassifier, FileClass, FlagExtractor, Format3DDetector};
use crate::types::EpisodeInfo;

/// Resolves media paths into [`EpisodeInfo`] records.
///
/// Holds only immutable configuration and compiled expressions, so a single
/// resolver can be shared across threads.
#[derive(Debug, Clone)]
pub struct EpisodeResolver {
    options: Arc<NamingOptions>,
    classifier: ExtensionClassifier,
    flags: FlagExtractor,
    format_3d: Format3DDetector,
    path_parser: EpisodePathParser,
}

impl EpisodeResolver {
    /// Create a resolver owning the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if an episode expression fails to compile or is
    /// malformed for its kind.
    pub fn new(options: NamingOptions) -> Result<Self> {
        Self::with_shared(Arc::new(options))
    }

    /// Create a resolver over options shared with other resolvers.
    pub fn with_shared(options: Arc<NamingOptions>) -> Result<Self> {
        let path_parser = EpisodePathParser::new(&options)?;

        Ok(Self {
            classifier: ExtensionClassifier::new(&options),
            flags: FlagExtractor::new(&options),
            format_3d: Format3DDetector::new(&options),
            path_parser,
            options,
        })
    }

    /// Get the naming options.
    pub fn options(&self) -> &Arc<NamingOptions> {
        &self.options
    }

    /// Resolve a path with unconstrained parsing modes.
    pub fn resolve(&self, path: &str, is_directory: bool) -> Result<Option<EpisodeInfo>> {
        self.resolve_with(path, is_directory, &ResolveOptions::default())
    }

    /// Resolve a path under explicit parsing modes.
    ///
    /// Returns `Ok(None)` when a file is neither a recognized video nor a
    /// stub. Directories are never rejected by extension.
    ///
    /// # Examples
    /// ```
    /// use shirabe_core::{EpisodeResolver, NamingOptions, ResolveOptions};
    ///
    /// let resolver = EpisodeResolver::new(NamingOptions::default()).unwrap();
    /// let modes = ResolveOptions::new().with_optimistic(false);
    /// let info = resolver
    ///     .resolve_with("/tv/Show/Show.Name.S02E05.1080p.mkv", false, &modes)
    ///     .unwrap()
    ///     .unwrap();
    ///
    /// assert_eq!(info.container.as_deref(), Some("mkv"));
    /// assert_eq!(info.season_number(), Some(2));
    /// assert_eq!(info.episode_number(), Some(5));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ShirabeError::InvalidArgument` for an empty path.
    pub fn resolve_with(
        &self,
        path: &str,
        is_directory: bool,
        modes: &ResolveOptions,
    ) -> Result<Option<EpisodeInfo>> {
        if path.is_empty() {
            return Err(ShirabeError::InvalidArgument("path is empty".into()));
        }

        let mut info = EpisodeInfo::new(path);

        if !is_directory {
            match self.classifier.classify(path) {
                FileClass::Video { container } => info.container = Some(container),
                FileClass::Stub {
                    container,
                    stub_type,
                } => {
                    info.container = Some(container);
                    info.stub_type = Some(stub_type);
                }
                FileClass::Unsupported => {
                    debug!(path = %path, "not a video or stub file");
                    return Ok(None);
                }
            }
        }

        let flags = self.flags.extract(path);
        info.format_3d = self.format_3d.detect(&flags);

        let parsed = self.path_parser.parse(path, is_directory, modes);
        info.series_name = parsed.series_name;
        info.identification = parsed.identification;

        Ok(Some(info))
    }
}

/// Convenience function to resolve a path with the default options.
pub fn resolve(path: &str, is_directory: bool) -> Result<Option<EpisodeInfo>> {
    EpisodeResolver::new(NamingOptions::default())?.resolve(path, is_directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Format3D, Identification};

    fn resolver() -> EpisodeResolver {
        EpisodeResolver::new(NamingOptions::default()).unwrap()
    }

    #[test]
    fn test_resolver_creation() {
        assert!(EpisodeResolver::new(NamingOptions::default()).is_ok());
    }

    #[test]
    fn test_video_file() {
        let info = resolver()
            .resolve("/tv/Show/Show.Name.S02E05.1080p.mkv", false)
            .unwrap()
            .unwrap();

        assert_eq!(info.path, "/tv/Show/Show.Name.S02E05.1080p.mkv");
        assert_eq!(info.container.as_deref(), Some("mkv"));
        assert_eq!(info.season_number(), Some(2));
        assert_eq!(info.episode_number(), Some(5));
        assert_eq!(info.ending_episode_number(), None);
        assert_eq!(info.series_name.as_deref(), Some("Show.Name"));
        assert!(!info.is_stub());
        assert!(!info.is_3d());
        assert!(!info.is_by_date());
    }

    #[test]
    fn test_multi_episode_file() {
        let info = resolver()
            .resolve("Show.Name.S02E05E06.mkv", false)
            .unwrap()
            .unwrap();
        assert_eq!(info.season_number(), Some(2));
        assert_eq!(info.episode_number(), Some(5));
        assert_eq!(info.ending_episode_number(), Some(6));
    }

    #[test]
    fn test_stub_file() {
        let info = resolver().resolve("movie.disc", false).unwrap().unwrap();
        assert!(info.is_stub());
        assert_eq!(info.stub_type.as_deref(), Some("disc"));
        assert_eq!(info.container.as_deref(), Some("disc"));
        assert_eq!(info.identification, Identification::Unidentified);
    }

    #[test]
    fn test_typed_stub_keeps_numbering() {
        let info = resolver()
            .resolve("/tv/Show/Show S01E01.hdtv.DISC", false)
            .unwrap()
            .unwrap();
        assert_eq!(info.stub_type.as_deref(), Some("tv"));
        assert_eq!(info.container.as_deref(), Some("DISC"));
        assert_eq!(info.episode_number(), Some(1));
    }

    #[test]
    fn test_unsupported_is_absent() {
        assert_eq!(resolver().resolve("random.txt", false).unwrap(), None);
        assert_eq!(resolver().resolve("/tv/Show/README", false).unwrap(), None);
    }

    #[test]
    fn test_empty_path_is_rejected() {
        for is_directory in [false, true] {
            let err = resolver().resolve("", is_directory).unwrap_err();
            assert!(matches!(err, ShirabeError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_directory_has_no_container() {
        let info = resolver()
            .resolve("/tv/Show/Show S01E03", true)
            .unwrap()
            .unwrap();
        assert_eq!(info.container, None);
        assert_eq!(info.season_number(), Some(1));
        assert_eq!(info.episode_number(), Some(3));

        // no extension check for directories
        let info = resolver().resolve("/tv/Show/Extras.txt", true).unwrap();
        assert!(info.is_some());
    }

    #[test]
    fn test_3d_file() {
        let info = resolver()
            .resolve("/tv/Show/Show.S01E01.3D.HSBS.mkv", false)
            .unwrap()
            .unwrap();
        assert!(info.is_3d());
        assert_eq!(info.format_3d, Some(Format3D::HalfSideBySide));
        assert_eq!(info.episode_number(), Some(1));
    }

    #[test]
    fn test_by_date_file() {
        let info = resolver()
            .resolve("/tv/Daily/Daily.Show.2017.05.03.mkv", false)
            .unwrap()
            .unwrap();
        assert!(info.is_by_date());
        assert_eq!(info.year(), Some(2017));
        assert_eq!(info.month(), Some(5));
        assert_eq!(info.day(), Some(3));
        assert_eq!(info.season_number(), None);
        assert_eq!(info.episode_number(), None);
    }

    #[test]
    fn test_modes_are_forwarded() {
        let modes = ResolveOptions::new().with_optimistic(false);
        let info = resolver()
            .resolve_with("/tv/Show/Show 101.mkv", false, &modes)
            .unwrap()
            .unwrap();
        assert_eq!(info.identification, Identification::Unidentified);
        assert_eq!(info.container.as_deref(), Some("mkv"));
    }

    #[test]
    fn test_invalid_expression_fails_construction() {
        let options = NamingOptions::default().with_episode_expressions(vec![
            crate::options::EpisodeExpression::new(r"(?P<seriesname>.+)").named(),
        ]);
        let err = EpisodeResolver::new(options).unwrap_err();
        assert!(matches!(err, ShirabeError::InvalidOptions(_)));
    }

    #[test]
    fn test_deterministic() {
        let r = resolver();
        let path = "[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv";
        assert_eq!(r.resolve(path, false).unwrap(), r.resolve(path, false).unwrap());
    }

    #[test]
    fn test_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EpisodeResolver>();

        let options = Arc::new(NamingOptions::default());
        let r = EpisodeResolver::with_shared(Arc::clone(&options)).unwrap();
        assert!(Arc::ptr_eq(r.options(), &options));

        let paths = [
            "/tv/Show/Show.Name.S02E05.1080p.mkv",
            "Elementary - 02x03 - 02x04 - 02x15 - Ep Name.mp4",
            "/anime/One Piece - 1084.mkv",
        ];
        let expected: Vec<_> = paths.iter().map(|p| r.resolve(p, false).unwrap()).collect();

        let r = &r;
        std::thread::scope(|s| {
            let handles: Vec<_> = paths
                .iter()
                .map(|p| s.spawn(move || r.resolve(p, false).unwrap()))
                .collect();
            for (handle, want) in handles.into_iter().zip(&expected) {
                assert_eq!(&handle.join().unwrap(), want);
            }
        });
    }

    #[test]
    fn test_resolve_convenience_function() {
        let info = resolve("Show.Name.S02E05.1080p.mkv", false).unwrap().unwrap();
        assert_eq!(info.episode_number(), Some(5));
        assert!(resolve("", false).is_err());
    }
}
