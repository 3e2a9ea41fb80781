use serde::{Deserialize, Serialize};

use super::episode::Identification;
use super::format::Format3D;

/// The primary output of the episode resolver.
///
/// Built once from the merged classifier, flag, 3D and path-parser
/// results. Flags such as "is stub" or "is 3D" are derived from the
/// corresponding optional field, so they can never disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    /// Original input path.
    pub path: String,

    /// File extension without the leading dot, original case preserved.
    /// Absent for directories.
    pub container: Option<String>,

    /// Stub type (e.g. "dvd", "bluray", "disc") when the file is a stub.
    pub stub_type: Option<String>,

    /// Stereoscopic format when the file is 3D.
    pub format_3d: Option<Format3D>,

    /// Series name inferred from the path.
    pub series_name: Option<String>,

    /// Season/episode or date identification.
    pub identification: Identification,
}

impl EpisodeInfo {
    /// Creates an unidentified `EpisodeInfo` for the given path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            container: None,
            stub_type: None,
            format_3d: None,
            series_name: None,
            identification: Identification::Unidentified,
        }
    }

    /// Returns `true` if the file is a placeholder stub.
    #[must_use]
    pub fn is_stub(&self) -> bool {
        self.stub_type.is_some()
    }

    /// Returns `true` if a 3D format was detected.
    #[must_use]
    pub fn is_3d(&self) -> bool {
        self.format_3d.is_some()
    }

    /// Returns `true` if the episode is identified by broadcast date.
    #[must_use]
    pub fn is_by_date(&self) -> bool {
        matches!(self.identification, Identification::ByDate { .. })
    }

    #[must_use]
    pub fn season_number(&self) -> Option<u32> {
        match self.identification {
            Identification::SeasonEpisode { season, .. } => season,
            _ => None,
        }
    }

    #[must_use]
    pub fn episode_number(&self) -> Option<u32> {
        match self.identification {
            Identification::SeasonEpisode { episode, .. } => episode,
            _ => None,
        }
    }

    /// Last episode covered by a multi-episode file.
    #[must_use]
    pub fn ending_episode_number(&self) -> Option<u32> {
        match self.identification {
            Identification::SeasonEpisode { ending_episode, .. } => ending_episode,
            _ => None,
        }
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self.identification {
            Identification::ByDate { year, .. } => Some(year),
            _ => None,
        }
    }

    #[must_use]
    pub fn month(&self) -> Option<u32> {
        match self.identification {
            Identification::ByDate { month, .. } => Some(month),
            _ => None,
        }
    }

    #[must_use]
    pub fn day(&self) -> Option<u32> {
        match self.identification {
            Identification::ByDate { day, .. } => Some(day),
            _ => None,
        }
    }
}

impl std::fmt::Display for EpisodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EpisodeInfo(")?;
        if let Some(ref series) = self.series_name {
            write!(f, "series={series:?}, ")?;
        }
        write!(f, "{}", self.identification)?;
        if let Some(ref container) = self.container {
            write!(f, ", container={container}")?;
        }
        if let Some(ref stub) = self.stub_type {
            write!(f, ", stub={stub}")?;
        }
        if let Some(format) = self.format_3d {
            write!(f, ", 3d={format}")?;
        }
        write!(f, ")")
    }
}
