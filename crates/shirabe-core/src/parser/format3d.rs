use crate::options::{Format3DRule, NamingOptions};
use crate::types::Format3D;

/// Detects stereoscopic 3D formats from extracted flags.
///
/// Rules are evaluated in table order and the first match wins, so a
/// `3d.hsbs` pair beats a lone `sbs` appearing elsewhere in the name.
#[derive(Debug, Clone)]
pub struct Format3DDetector {
    rules: Vec<Format3DRule>,
}

impl Format3DDetector {
    pub fn new(options: &NamingOptions) -> Self {
        Self {
            rules: options.format_3d_rules.clone(),
        }
    }

    /// Returns the format of the first matching rule, if any.
    pub fn detect(&self, flags: &[String]) -> Option<Format3D> {
        self.rules
            .iter()
            .find(|rule| Self::matches(rule, flags))
            .map(|rule| rule.format)
    }

    fn matches(rule: &Format3DRule, flags: &[String]) -> bool {
        match rule.preceding_token {
            None => flags.iter().any(|flag| flag.eq_ignore_ascii_case(&rule.token)),
            Some(ref preceding) => flags.windows(2).any(|pair| {
                pair[0].eq_ignore_ascii_case(preceding) && pair[1].eq_ignore_ascii_case(&rule.token)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::flags::FlagExtractor;

    fn detect(path: &str) -> Option<Format3D> {
        let options = NamingOptions::default();
        let flags = FlagExtractor::new(&options).extract(path);
        Format3DDetector::new(&options).detect(&flags)
    }

    #[test]
    fn no_flags_means_not_3d() {
        assert_eq!(detect("/movies/Avatar (2009).mkv"), None);
        assert_eq!(Format3DDetector::new(&NamingOptions::default()).detect(&[]), None);
    }

    #[test]
    fn standalone_tokens() {
        for (input, expected) in [
            ("Movie.fsbs.mkv", Format3D::FullSideBySide),
            ("Movie.hsbs.mkv", Format3D::HalfSideBySide),
            ("Movie [SBS].mkv", Format3D::SideBySide),
            ("Movie.ftab.mkv", Format3D::FullTopAndBottom),
            ("Movie.HTAB.mkv", Format3D::HalfTopAndBottom),
            ("Movie.tab.mkv", Format3D::TopAndBottom),
            ("Movie.sbs3d.mkv", Format3D::SideBySide3D),
            ("Movie.mvc.mkv", Format3D::Mvc),
        ] {
            assert_eq!(detect(input), Some(expected), "failed for input: {input}");
        }
    }

    #[test]
    fn preceded_pair_wins_over_earlier_standalone() {
        // "fsbs" appears first, but the "3d.htab" pair rule is listed earlier
        assert_eq!(detect("Movie.fsbs.3d.htab.mkv"), Some(Format3D::HalfTopAndBottom));
    }

    #[test]
    fn lone_3d_token_is_not_a_format() {
        assert_eq!(detect("Movie.3d.mkv"), None);
    }

    #[test]
    fn preceded_rule_requires_adjacency() {
        let options = NamingOptions::default().with_format_3d_rules(vec![
            Format3DRule::preceded_by("3d", Format3D::SideBySide),
        ]);
        let flags = FlagExtractor::new(&options).extract("Movie.3d.1080p.sbs.mkv");
        assert_eq!(Format3DDetector::new(&options).detect(&flags), None);

        let flags = FlagExtractor::new(&options).extract("Movie.1080p.3D.SBS.mkv");
        assert_eq!(
            Format3DDetector::new(&options).detect(&flags),
            Some(Format3D::SideBySide)
        );
    }

    #[test]
    fn first_standalone_rule_wins() {
        assert_eq!(detect("Movie.tab.hsbs.mkv"), Some(Format3D::HalfSideBySide));
    }
}
