//! # Episode Path Parsing
//!
//! Walks the ordered expression tables over a path and turns the first
//! match into an [`Identification`], optionally filling in the series name
//! and multi-episode span from the named and multiple-episode tables.

use tracing::debug;

use crate::error::Result;
use crate::options::{NamingOptions, ResolveOptions};
use crate::parser::expression::{CompiledExpression, ExpressionMatch};
use crate::types::Identification;

/// Directories are parsed as if they were video files of this container.
const DIRECTORY_SUFFIX: &str = ".mp4";

/// Fields derived from a path by [`EpisodePathParser::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParseResult {
    pub identification: Identification,
    pub series_name: Option<String>,
}

/// Season, episode and date extraction driven by [`NamingOptions`] tables.
#[derive(Debug, Clone)]
pub struct EpisodePathParser {
    primary: Vec<CompiledExpression>,
    multiple: Vec<CompiledExpression>,
}

impl EpisodePathParser {
    /// Compile the episode and multiple-episode expression tables.
    ///
    /// # Errors
    ///
    /// Fails on the first expression that does not compile or is
    /// malformed for its kind.
    pub fn new(options: &NamingOptions) -> Result<Self> {
        let primary = options
            .episode_expressions
            .iter()
            .map(CompiledExpression::compile)
            .collect::<Result<Vec<_>>>()?;
        let multiple = options
            .multiple_episode_expressions
            .iter()
            .filter(|expr| expr.is_named)
            .map(CompiledExpression::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { primary, multiple })
    }

    /// Parse `path` under the given modes.
    ///
    /// Never fails: a path no expression understands yields
    /// [`Identification::Unidentified`] and no series name.
    pub fn parse(&self, path: &str, is_directory: bool, modes: &ResolveOptions) -> PathParseResult {
        let owned;
        let path = if is_directory {
            owned = format!("{path}{DIRECTORY_SUFFIX}");
            owned.as_str()
        } else {
            path
        };

        let found = self
            .primary
            .iter()
            .filter(|expr| admits(expr, modes))
            .find_map(|expr| {
                let found = expr.evaluate(path)?;
                debug!(path = %path, expression = %expr.as_str(), "episode expression matched");
                Some(found)
            });

        let Some(mut found) = found else {
            return PathParseResult::default();
        };

        if modes.fill_extended_info {
            self.fill_additional(path, &mut found);
        }

        PathParseResult {
            identification: found.identification(),
            series_name: found.series_name,
        }
    }

    /// Complete the series name and ending episode from further expressions.
    ///
    /// Named primary expressions are only consulted while the series name is
    /// still unknown. Stops once the series is known and the span is settled.
    fn fill_additional(&self, path: &str, found: &mut ExpressionMatch) {
        let primary: &[CompiledExpression] = if found.series_name.is_none() {
            &self.primary
        } else {
            &[]
        };
        let candidates = primary
            .iter()
            .filter(|expr| expr.is_named() && !expr.is_by_date())
            .chain(self.multiple.iter());

        for expr in candidates {
            let Some(extra) = expr.evaluate(path) else {
                continue;
            };

            if found.series_name.is_none() {
                found.series_name = extra.series_name;
            }
            if found.ending_episode.is_none() && found.episode.is_some() {
                found.ending_episode = extra.ending_episode;
            }

            if found.series_name.is_some()
                && (found.episode.is_none() || found.ending_episode.is_some())
            {
                break;
            }
        }
    }
}

/// Whether an expression may run under the requested modes.
fn admits(expr: &CompiledExpression, modes: &ResolveOptions) -> bool {
    if modes.is_named.is_some_and(|named| named != expr.is_named()) {
        return false;
    }
    if modes.is_optimistic == Some(false) && expr.is_optimistic() {
        return false;
    }
    if modes.supports_absolute_numbers == Some(false) && expr.supports_absolute() {
        return false;
    }
    true
}
