use std::fmt;

use serde::{Deserialize, Serialize};

/// Stereoscopic encoding of a 3D video file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format3D {
    /// Full side-by-side.
    #[serde(rename = "fsbs")]
    FullSideBySide,
    /// Half side-by-side.
    #[serde(rename = "hsbs")]
    HalfSideBySide,
    /// Side-by-side, unspecified width.
    #[serde(rename = "sbs")]
    SideBySide,
    /// Full top-and-bottom.
    #[serde(rename = "ftab")]
    FullTopAndBottom,
    /// Half top-and-bottom (half-height).
    #[serde(rename = "htab")]
    HalfTopAndBottom,
    /// Top-and-bottom, unspecified height.
    #[serde(rename = "tab")]
    TopAndBottom,
    /// Side-by-side tagged as `sbs3d`.
    #[serde(rename = "sbs3d")]
    SideBySide3D,
    /// Multiview video coding.
    #[serde(rename = "mvc")]
    Mvc,
}

impl Format3D {
    /// All variants, in the order the default rule table lists them.
    pub const ALL: [Format3D; 8] = [
        Self::FullSideBySide,
        Self::HalfSideBySide,
        Self::SideBySide,
        Self::FullTopAndBottom,
        Self::HalfTopAndBottom,
        Self::TopAndBottom,
        Self::SideBySide3D,
        Self::Mvc,
    ];

    /// The canonical filename token for this format.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::FullSideBySide => "fsbs",
            Self::HalfSideBySide => "hsbs",
            Self::SideBySide => "sbs",
            Self::FullTopAndBottom => "ftab",
            Self::HalfTopAndBottom => "htab",
            Self::TopAndBottom => "tab",
            Self::SideBySide3D => "sbs3d",
            Self::Mvc => "mvc",
        }
    }

    /// Looks up a format by its canonical token, ignoring case.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.token().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Format3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lookup_is_case_insensitive() {
        assert_eq!(Format3D::from_token("HSBS"), Some(Format3D::HalfSideBySide));
        assert_eq!(Format3D::from_token("mvc"), Some(Format3D::Mvc));
        assert_eq!(Format3D::from_token("3d"), None);
    }

    #[test]
    fn tokens_are_unique() {
        for (i, a) in Format3D::ALL.iter().enumerate() {
            for b in &Format3D::ALL[i + 1..] {
                assert_ne!(a.token(), b.token());
            }
        }
    }

    #[test]
    fn serializes_as_token() {
        let json = serde_json::to_string(&Format3D::HalfTopAndBottom).unwrap();
        assert_eq!(json, "\"htab\"");
        let back: Format3D = serde_json::from_str("\"sbs3d\"").unwrap();
        assert_eq!(back, Format3D::SideBySide3D);
    }
}
