use std::fmt;

use serde::{Deserialize, Serialize};

/// How an episode was identified from its path.
///
/// The two identification schemes are mutually exclusive: a date-based
/// episode carries no season/episode numbering and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum Identification {
    /// Season/episode numbering: "S02E05", "2x05", "Episode 5".
    SeasonEpisode {
        /// Season number, absent for absolute or bare episode numbers.
        season: Option<u32>,
        /// Episode number.
        episode: Option<u32>,
        /// Last episode of a multi-episode file; never below `episode`.
        ending_episode: Option<u32>,
    },

    /// Broadcast date: "2017.05.03", "03-05-2017".
    ByDate {
        /// Calendar year.
        year: i32,
        /// Month, `1..=12`.
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// No season, episode or date signal was found.
    #[default]
    Unidentified,
}

impl Identification {
    /// Builds a season/episode identification, dropping an ending episode
    /// that would precede the starting one.
    #[must_use]
    pub fn season_episode(
        season: Option<u32>,
        episode: Option<u32>,
        ending_episode: Option<u32>,
    ) -> Self {
        let ending_episode = match (episode, ending_episode) {
            (Some(start), Some(end)) if end < start => None,
            (None, Some(_)) => None,
            (_, end) => end,
        };
        Self::SeasonEpisode {
            season,
            episode,
            ending_episode,
        }
    }

    /// Returns `true` unless nothing was identified.
    #[must_use]
    pub fn is_identified(&self) -> bool {
        !matches!(self, Self::Unidentified)
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeasonEpisode {
                season,
                episode,
                ending_episode,
            } => {
                if let Some(season) = season {
                    write!(f, "S{season:02}")?;
                }
                match episode {
                    Some(ep) => write!(f, "E{ep:02}")?,
                    None => write!(f, "E??")?,
                }
                if let Some(end) = ending_episode {
                    write!(f, "-E{end:02}")?;
                }
                Ok(())
            }
            Self::ByDate { year, month, day } => write!(f, "{year:04}-{month:02}-{day:02}"),
            Self::Unidentified => write!(f, "unidentified"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_episode_display() {
        let id = Identification::season_episode(Some(2), Some(5), None);
        assert_eq!(id.to_string(), "S02E05");

        let id = Identification::season_episode(Some(2), Some(5), Some(6));
        assert_eq!(id.to_string(), "S02E05-E06");

        let id = Identification::season_episode(None, Some(1084), None);
        assert_eq!(id.to_string(), "E1084");
    }

    #[test]
    fn by_date_display() {
        let id = Identification::ByDate {
            year: 2017,
            month: 5,
            day: 3,
        };
        assert_eq!(id.to_string(), "2017-05-03");
    }

    #[test]
    fn backwards_span_is_dropped() {
        let id = Identification::season_episode(Some(1), Some(14), Some(10));
        assert_eq!(
            id,
            Identification::SeasonEpisode {
                season: Some(1),
                episode: Some(14),
                ending_episode: None,
            }
        );
    }

    #[test]
    fn span_without_start_is_dropped() {
        let id = Identification::season_episode(Some(1), None, Some(3));
        assert!(matches!(
            id,
            Identification::SeasonEpisode {
                ending_episode: None,
                ..
            }
        ));
    }

    #[test]
    fn default_is_unidentified() {
        assert_eq!(Identification::default(), Identification::Unidentified);
        assert!(!Identification::default().is_identified());
    }

    #[test]
    fn serialized_form_is_tagged() {
        let id = Identification::ByDate {
            year: 2020,
            month: 12,
            day: 31,
        };
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json["scheme"], "by_date");
        assert_eq!(json["year"], 2020);
    }
}
