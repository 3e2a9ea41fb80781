//! # Naming Options
//!
//! Data-driven configuration for every stage of episode resolution: the
//! recognized extensions, the stub registry, flag delimiters, 3D rules and
//! the ordered episode expression tables.
//!
//! Every field has a built-in default, and any subset of fields can be
//! overridden from JSON:
//!
//! ```rust
//! use shirabe_core::NamingOptions;
//!
//! let options = NamingOptions::from_json_str(r#"{ "stub_file_extensions": [".disc", ".stub"] }"#).unwrap();
//! assert!(options.stub_file_extensions.contains(&".stub".to_string()));
//! assert!(!options.episode_expressions.is_empty());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Format3D;

/// Maps a filename token to a stub type, e.g. `brrip` → `bluray`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubTypeRule {
    /// Token found between the last two dots of the file name.
    pub token: String,
    /// Stub type reported when the token matches.
    pub stub_type: String,
}

impl StubTypeRule {
    pub fn new(token: impl Into<String>, stub_type: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            stub_type: stub_type.into(),
        }
    }
}

/// A 3D detection rule.
///
/// With a `preceding_token`, the rule only matches when that token is
/// immediately followed by `token` in the flag list (`3d.hsbs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format3DRule {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preceding_token: Option<String>,
    pub format: Format3D,
}

impl Format3DRule {
    /// A rule matching the format's canonical token on its own.
    pub fn standalone(format: Format3D) -> Self {
        Self {
            token: format.token().to_string(),
            preceding_token: None,
            format,
        }
    }

    /// A rule matching the format's canonical token right after `preceding`.
    pub fn preceded_by(preceding: impl Into<String>, format: Format3D) -> Self {
        Self {
            token: format.token().to_string(),
            preceding_token: Some(preceding.into()),
            format,
        }
    }
}

/// One entry of an ordered episode expression table.
///
/// Named expressions expose the capture groups `seriesname`,
/// `seasonnumber`, `epnumber` and `endingepnumber`. Unnamed expressions use
/// group 1 for the season and group 2 for the episode. By-date expressions
/// parse the whole match with one of `date_formats` (chrono syntax).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeExpression {
    pub expression: String,
    #[serde(default)]
    pub is_by_date: bool,
    #[serde(default)]
    pub is_optimistic: bool,
    #[serde(default)]
    pub is_named: bool,
    #[serde(default)]
    pub supports_absolute_episode_numbers: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_formats: Vec<String>,
}

impl EpisodeExpression {
    /// Create a plain (unnamed, strict, season-based) expression.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            is_by_date: false,
            is_optimistic: false,
            is_named: false,
            supports_absolute_episode_numbers: false,
            date_formats: Vec::new(),
        }
    }

    /// Create a by-date expression accepting the given date formats.
    pub fn by_date(expression: impl Into<String>, formats: &[&str]) -> Self {
        let mut expr = Self::new(expression);
        expr.is_by_date = true;
        expr.date_formats = formats.iter().map(|f| (*f).to_string()).collect();
        expr
    }

    /// Mark the expression as using named capture groups.
    pub fn named(mut self) -> Self {
        self.is_named = true;
        self
    }

    /// Mark the expression as accepting weak signals.
    pub fn optimistic(mut self) -> Self {
        self.is_optimistic = true;
        self
    }

    /// Mark the expression as able to match absolute episode numbers.
    pub fn absolute(mut self) -> Self {
        self.supports_absolute_episode_numbers = true;
        self
    }
}

/// Configuration consumed by the resolver and all of its collaborators.
///
/// Treat as immutable once handed to an [`EpisodeResolver`](crate::EpisodeResolver);
/// share it between resolvers and threads through an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOptions {
    /// Recognized video extensions, with leading dot, case-insensitive.
    pub video_file_extensions: Vec<String>,
    /// Extensions marking placeholder stub files.
    pub stub_file_extensions: Vec<String>,
    /// Ordered stub type registry; first match wins.
    pub stub_types: Vec<StubTypeRule>,
    /// Characters separating flag tokens in a file name.
    pub video_flag_delimiters: Vec<char>,
    /// Ordered 3D rules; first match wins.
    pub format_3d_rules: Vec<Format3DRule>,
    /// Ordered primary episode expressions; first match wins.
    pub episode_expressions: Vec<EpisodeExpression>,
    /// Expressions used to fill multi-episode spans and series names.
    pub multiple_episode_expressions: Vec<EpisodeExpression>,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            video_file_extensions: default_video_file_extensions(),
            stub_file_extensions: vec![".disc".to_string()],
            stub_types: default_stub_types(),
            video_flag_delimiters: vec!['(', ')', '-', '.', '_', '[', ']', ' '],
            format_3d_rules: default_format_3d_rules(),
            episode_expressions: default_episode_expressions(),
            multiple_episode_expressions: default_multiple_episode_expressions(),
        }
    }
}

impl NamingOptions {
    /// Create options with the built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON. Omitted fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Replace the recognized video extensions.
    pub fn with_video_file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.video_file_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the stub extensions.
    pub fn with_stub_file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stub_file_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Append a stub type rule after the existing ones.
    pub fn with_stub_type(mut self, rule: StubTypeRule) -> Self {
        self.stub_types.push(rule);
        self
    }

    /// Replace the flag delimiters.
    pub fn with_video_flag_delimiters(mut self, delimiters: Vec<char>) -> Self {
        self.video_flag_delimiters = delimiters;
        self
    }

    /// Replace the 3D rule table.
    pub fn with_format_3d_rules(mut self, rules: Vec<Format3DRule>) -> Self {
        self.format_3d_rules = rules;
        self
    }

    /// Replace the primary episode expressions.
    pub fn with_episode_expressions(mut self, expressions: Vec<EpisodeExpression>) -> Self {
        self.episode_expressions = expressions;
        self
    }

    /// Replace the multi-episode expressions.
    pub fn with_multiple_episode_expressions(mut self, expressions: Vec<EpisodeExpression>) -> Self {
        self.multiple_episode_expressions = expressions;
        self
    }
}

/// Per-call parsing modes for [`EpisodeResolver::resolve_with`](crate::EpisodeResolver::resolve_with).
///
/// `None` leaves the corresponding expression attribute unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Restrict to named (`Some(true)`) or positional (`Some(false)`) expressions.
    pub is_named: Option<bool>,
    /// `Some(false)` excludes optimistic expressions that accept bare numbers.
    pub is_optimistic: Option<bool>,
    /// `Some(false)` excludes expressions that accept absolute episode numbers.
    pub supports_absolute_numbers: Option<bool>,
    /// Fill in series names and multi-episode spans after the first match.
    pub fill_extended_info: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            is_named: None,
            is_optimistic: None,
            supports_absolute_numbers: None,
            fill_extended_info: true,
        }
    }
}

impl ResolveOptions {
    /// Create resolve options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the named-expression constraint.
    pub fn with_named(mut self, named: bool) -> Self {
        self.is_named = Some(named);
        self
    }

    /// Allow or forbid optimistic expressions.
    pub fn with_optimistic(mut self, optimistic: bool) -> Self {
        self.is_optimistic = Some(optimistic);
        self
    }

    /// Allow or forbid absolute episode numbers.
    pub fn with_absolute_numbers(mut self, supported: bool) -> Self {
        self.supports_absolute_numbers = Some(supported);
        self
    }

    /// Enable or disable series name and span filling.
    pub fn with_extended_info(mut self, fill: bool) -> Self {
        self.fill_extended_info = fill;
        self
    }
}

fn default_video_file_extensions() -> Vec<String> {
    [
        ".m4v", ".3gp", ".nsv", ".ts", ".ty", ".strm", ".rm", ".rmvb", ".ifo", ".mov", ".qt",
        ".divx", ".xvid", ".bivx", ".vob", ".nrg", ".img", ".iso", ".pva", ".wmv", ".asf",
        ".asx", ".ogm", ".m2v", ".avi", ".bin", ".dvr-ms", ".mpg", ".mpeg", ".mp4", ".mkv",
        ".avc", ".vp3", ".svq3", ".nuv", ".viv", ".dv", ".fli", ".flv", ".001", ".tp", ".webm",
        ".m2ts", ".mts",
    ]
    .iter()
    .map(|ext| (*ext).to_string())
    .collect()
}

fn default_stub_types() -> Vec<StubTypeRule> {
    vec![
        StubTypeRule::new("dvd", "dvd"),
        StubTypeRule::new("hddvd", "hddvd"),
        StubTypeRule::new("bluray", "bluray"),
        StubTypeRule::new("brrip", "bluray"),
        StubTypeRule::new("bd25", "bluray"),
        StubTypeRule::new("bd50", "bluray"),
        StubTypeRule::new("vhs", "vhs"),
        StubTypeRule::new("hdtv", "tv"),
        StubTypeRule::new("pdtv", "tv"),
        StubTypeRule::new("dsr", "tv"),
    ]
}

fn default_format_3d_rules() -> Vec<Format3DRule> {
    vec![
        // "3d.hsbs" style pairs take precedence over lone tokens
        Format3DRule::preceded_by("3d", Format3D::HalfSideBySide),
        Format3DRule::preceded_by("3d", Format3D::SideBySide),
        Format3DRule::preceded_by("3d", Format3D::HalfTopAndBottom),
        Format3DRule::preceded_by("3d", Format3D::TopAndBottom),
        Format3DRule::standalone(Format3D::FullSideBySide),
        Format3DRule::standalone(Format3D::HalfSideBySide),
        Format3DRule::standalone(Format3D::SideBySide),
        Format3DRule::standalone(Format3D::FullTopAndBottom),
        Format3DRule::standalone(Format3D::HalfTopAndBottom),
        Format3DRule::standalone(Format3D::TopAndBottom),
        Format3DRule::standalone(Format3D::SideBySide3D),
        Format3DRule::standalone(Format3D::Mvc),
    ]
}

fn default_episode_expressions() -> Vec<EpisodeExpression> {
    vec![
        // foo.s01.e01, foo.s01_e01, S01E02 foo, S01 - E02
        EpisodeExpression::new(
            r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*?)[Ss](?P<seasonnumber>[0-9]+)[\]\[ ._-]*[Ee](?P<epnumber>[0-9]+)[^\\/]*$",
        )
        .named(),
        // foo.ep01, foo.EP_01
        EpisodeExpression::new(r"[\._ -]()[Ee][Pp]_?([0-9]+)([^\\/]*)$"),
        // foo.2017.05.03, foo_2017_05_03
        EpisodeExpression::by_date(
            r"([0-9]{4})[\.-]([0-9]{2})[\.-]([0-9]{2})",
            &["%Y.%m.%d", "%Y-%m-%d"],
        ),
        // foo.03.05.2017
        EpisodeExpression::by_date(
            r"([0-9]{2})[\.-]([0-9]{2})[\.-]([0-9]{4})",
            &["%d.%m.%Y", "%d-%m-%Y"],
        ),
        // foo.1x09
        EpisodeExpression::new(r"(?:^|[\\/\._ \[\(-])([0-9]+)x([0-9]+)([^\\/]*)$").absolute(),
        // foo 101.mkv
        EpisodeExpression::new(
            r"^(?:.*[\\/])?(?P<seriesname>[\w\s]+?)\s(?P<seasonnumber>[0-9]{1,2})(?P<epnumber>[0-9]{2})(?:[a-i])?[\._ -][^\\/]*$",
        )
        .named()
        .optimistic(),
        // foo.part.2, foo.pt.ii
        EpisodeExpression::new(r"(?i)[\\/\._ -]p(?:ar)?t[_. -]()([ivx]+|[0-9]+)([\._ -][^\\/]*)$")
            .absolute(),
        // [group] foo - 01 [tags]
        EpisodeExpression::new(
            r"^.*?(?:\[[^\]]*\])+.*?(?P<seriesname>[\w\s]+?)[-\s_]+(?P<epnumber>[0-9]+).*$",
        )
        .named(),
        // 2x05, s2x05
        EpisodeExpression::new(
            r"^(?:.*[\\/])?[sS]?(?P<seasonnumber>[0-9]+)[xX](?P<epnumber>[0-9]+)[^\\/]*$",
        )
        .named(),
        // s2e05, s2xe05
        EpisodeExpression::new(
            r"^(?:.*[\\/])?[sS](?P<seasonnumber>[0-9]+)[xX]?[eE](?P<epnumber>[0-9]+)[^\\/]*$",
        )
        .named(),
        // foo 2x05
        EpisodeExpression::new(
            r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*?)[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]+)[^\\/]*$",
        )
        .named(),
        // foo s2.e05
        EpisodeExpression::new(
            r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*)[sS](?P<seasonnumber>[0-9]{1,4})[xX\.]?[eE](?P<epnumber>[0-9]+)[^\\/]*$",
        )
        .named(),
        // Season 1/05 title.mkv
        EpisodeExpression::new(
            r"[Ss]eason[\._ ](?P<seasonnumber>[0-9]+)[\\/](?P<epnumber>[0-9]{1,3})(?:[^0-9\\/][^\\/]*)?$",
        )
        .named()
        .optimistic(),
        // Episode 16, Episode 16-17 - title
        EpisodeExpression::new(
            r"[Ee]pisode (?P<epnumber>[0-9]+)(?:-(?P<endingepnumber>[0-9]+))?[^\\/]*$",
        )
        .named()
        .optimistic(),
        // 01.avi, 01-02.avi
        EpisodeExpression::new(r"^(?:.*[\\/])?(?P<epnumber>[0-9]+)(?:-[0-9]+)?\.\w+$")
            .named()
            .optimistic(),
        // 1-12 episode title.avi
        EpisodeExpression::new(r"(?:^|[\\/])([0-9]{1,2})-([0-9]{1,3})[\._ ][^\\/]*$"),
        // 01 - title.avi, 01-title.avi
        EpisodeExpression::new(
            r"^(?:.*[\\/])?(?P<epnumber>[0-9]{1,3})(?:-[0-9]{2,3})*\s?-\s?[^\\/]*$",
        )
        .named()
        .optimistic(),
        // 01.title.avi
        EpisodeExpression::new(
            r"^(?:.*[\\/])?(?P<epnumber>[0-9]{1,3})(?:-[0-9]{2,3})*\.[^\\/]+$",
        )
        .named()
        .optimistic(),
        // foo - 01.avi, foo 2 - 01 title.avi, foo - 01 - title.avi
        EpisodeExpression::new(
            r"^(?:.*[\\/])?[^\\/]* - (?P<epnumber>[0-9]{1,3})(?:-[0-9]{2,3})*(?:[^0-9\\/][^\\/]*)?$",
        )
        .named()
        .optimistic(),
        // foo - 1084.mkv, foo.1084.vostfr.mkv
        EpisodeExpression::new(
            r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*?)[ ._]-?[ ._]?(?P<epnumber>[0-9]{2,4})(?:v[0-9])?(?:[ ._\[\(][^\\/]*)?\.[0-9A-Za-z]+$",
        )
        .named()
        .optimistic()
        .absolute(),
    ]
}

fn default_multiple_episode_expressions() -> Vec<EpisodeExpression> {
    [
        r"^(?:.*[\\/])?[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:(?:-| - )[0-9]{1,4}[eExX](?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:(?:-| - )[0-9]{1,4}[xX][eE](?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:(?:-| - )?[xXeE](?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:-[xE]?[eE]?(?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*?)[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:(?:-| - )[0-9]{1,4}[xXeE](?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*?)[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:(?:-| - )[0-9]{1,4}[xX][eE](?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*?)[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:(?:-| - )?[xXeE](?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*?)[sS]?(?P<seasonnumber>[0-9]{1,4})[xX](?P<epnumber>[0-9]{1,3})(?:-[xX]?[eE]?(?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*)[sS](?P<seasonnumber>[0-9]{1,4})[xX\.]?[eE](?P<epnumber>[0-9]{1,3})(?:(?:-| - )?[xXeE](?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
        r"^(?:.*[\\/])?(?P<seriesname>[^\\/]*)[sS](?P<seasonnumber>[0-9]{1,4})[xX\.]?[eE](?P<epnumber>[0-9]{1,3})(?:-[xX]?[eE]?(?P<endingepnumber>[0-9]{1,3}))+[^\\/]*$",
    ]
    .iter()
    .map(|expr| EpisodeExpression::new(*expr).named())
    .collect()
}
