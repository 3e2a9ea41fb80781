use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};

use crate::error::{Result, ShirabeError};
use crate::options::EpisodeExpression;
use crate::types::Identification;

/// Characters that, right after an ending episode number, reveal it as the
/// start of a resolution tag (`s09e14-1080p`) rather than a span.
const RESOLUTION_FOLLOWERS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'i', 'I', 'p', 'P'];

/// Fields captured by a single successful expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionMatch {
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub ending_episode: Option<u32>,
    pub date: Option<NaiveDate>,
    pub series_name: Option<String>,
}

impl ExpressionMatch {
    /// Collapse the captured fields into an identification scheme.
    pub fn identification(&self) -> Identification {
        match self.date {
            Some(date) => Identification::ByDate {
                year: date.year(),
                month: date.month(),
                day: date.day(),
            },
            None => Identification::season_episode(self.season, self.episode, self.ending_episode),
        }
    }
}

/// An [`EpisodeExpression`] with its regex compiled and its shape checked.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    regex: Regex,
    is_by_date: bool,
    is_optimistic: bool,
    is_named: bool,
    supports_absolute: bool,
    date_formats: Vec<String>,
}

impl CompiledExpression {
    /// Compile an expression, rejecting shapes that could never succeed.
    ///
    /// # Errors
    ///
    /// Returns `ShirabeError::RegexError` if the pattern does not compile, or
    /// `ShirabeError::InvalidOptions` if a by-date expression has no formats,
    /// a named expression lacks an `epnumber` group, or an unnamed one has
    /// fewer than two capture groups.
    pub fn compile(expression: &EpisodeExpression) -> Result<Self> {
        let regex = Regex::new(&expression.expression)?;

        if expression.is_by_date {
            if expression.date_formats.is_empty() {
                return Err(ShirabeError::InvalidOptions(format!(
                    "by-date expression {:?} has no date formats",
                    expression.expression
                )));
            }
        } else if expression.is_named {
            if !regex.capture_names().flatten().any(|name| name == "epnumber") {
                return Err(ShirabeError::InvalidOptions(format!(
                    "named expression {:?} has no epnumber group",
                    expression.expression
                )));
            }
        } else if regex.captures_len() < 3 {
            return Err(ShirabeError::InvalidOptions(format!(
                "expression {:?} needs season and episode groups",
                expression.expression
            )));
        }

        Ok(Self {
            regex,
            is_by_date: expression.is_by_date,
            is_optimistic: expression.is_optimistic,
            is_named: expression.is_named,
            supports_absolute: expression.supports_absolute_episode_numbers,
            date_formats: expression.date_formats.clone(),
        })
    }

    pub fn is_by_date(&self) -> bool {
        self.is_by_date
    }

    pub fn is_optimistic(&self) -> bool {
        self.is_optimistic
    }

    pub fn is_named(&self) -> bool {
        self.is_named
    }

    pub fn supports_absolute(&self) -> bool {
        self.supports_absolute
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Run the expression against `name`.
    ///
    /// Returns `None` unless the expression identifies an episode: a valid
    /// date for by-date expressions, an episode number otherwise.
    pub fn evaluate(&self, name: &str) -> Option<ExpressionMatch> {
        if self.is_by_date {
            return self.evaluate_date(name);
        }

        let caps = self.regex.captures(name)?;
        let found = if self.is_named {
            Self::named_fields(name, &caps)?
        } else {
            ExpressionMatch {
                season: caps.get(1).and_then(|m| parse_number(m.as_str())),
                episode: Some(caps.get(2).and_then(|m| parse_number(m.as_str()))?),
                ..ExpressionMatch::default()
            }
        };

        // Seasons in this range are resolutions or years, e.g. "(1920x1080)"
        if let Some(season) = found.season {
            if (200..1928).contains(&season) || season > 2500 {
                return None;
            }
        }

        if self.supports_absolute && found.season.is_none() && !plausible_absolute(&found) {
            return None;
        }

        Some(found)
    }

    fn evaluate_date(&self, name: &str) -> Option<ExpressionMatch> {
        let name = name.replace('_', "-");
        let whole = self.regex.find(&name)?.as_str();
        let date = self
            .date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(whole, format).ok())?;

        Some(ExpressionMatch {
            date: Some(date),
            ..ExpressionMatch::default()
        })
    }

    fn named_fields(name: &str, caps: &Captures<'_>) -> Option<ExpressionMatch> {
        let episode = caps
            .name("epnumber")
            .and_then(|m| parse_number(m.as_str()))?;

        let ending_episode = caps
            .name("endingepnumber")
            .filter(|m| !name[m.end()..].starts_with(RESOLUTION_FOLLOWERS))
            .and_then(|m| parse_number(m.as_str()));

        Some(ExpressionMatch {
            season: caps
                .name("seasonnumber")
                .and_then(|m| parse_number(m.as_str())),
            episode: Some(episode),
            ending_episode,
            date: None,
            series_name: caps
                .name("seriesname")
                .and_then(|m| clean_series_name(m.as_str())),
        })
    }
}

/// Trim whitespace and the `_ . -` separators around a captured series name.
pub fn clean_series_name(raw: &str) -> Option<String> {
    let cleaned =
        raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '_' | '.' | '-'));

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// A bare number with no season must not be a year (`Movie.2019.mkv`) or
/// sit right after a season label (`Season 10`).
fn plausible_absolute(found: &ExpressionMatch) -> bool {
    if found.episode.is_some_and(|episode| (1900..2100).contains(&episode)) {
        return false;
    }

    let after_season_label = found.series_name.as_deref().is_some_and(|series| {
        series
            .rsplit(|c: char| c.is_whitespace() || matches!(c, '_' | '.' | '-'))
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("season"))
    });
    !after_season_label
}

/// Parse a decimal or lowercase/uppercase roman numeral episode number.
fn parse_number(text: &str) -> Option<u32> {
    text.parse().ok().or_else(|| parse_roman(text))
}

const ROMAN_ONES: [&str; 10] = ["", "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix"];

/// Roman numerals from 1 to 39, canonical form only (`iv`, not `iiii` or `iiv`).
fn parse_roman(text: &str) -> Option<u32> {
    let lowered = text.to_ascii_lowercase();
    let values = lowered
        .chars()
        .map(|c| match c {
            'i' => Some(1),
            'v' => Some(5),
            'x' => Some(10),
            _ => None,
        })
        .collect::<Option<Vec<u32>>>()?;

    let mut total = 0i64;
    for (idx, value) in values.iter().enumerate() {
        match values.get(idx + 1) {
            Some(next) if next > value => total -= i64::from(*value),
            _ => total += i64::from(*value),
        }
    }

    let total = u32::try_from(total).ok().filter(|total| (1..40).contains(total))?;
    let canonical = format!(
        "{}{}",
        "x".repeat((total / 10) as usize),
        ROMAN_ONES[(total % 10) as usize]
    );
    (canonical == lowered).then_some(total)
}
