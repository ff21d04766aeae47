//! Compact labels for publication venues.

use once_cell::sync::Lazy;
use regex::Regex;

/// Known venue fragments (lower-case) and their customary abbreviation. Checked in
/// order; the first fragment contained in the venue text wins.
const KNOWN_VENUES: &[(&str, &str)] = &[
    ("neurips", "NeurIPS"),
    ("nips", "NeurIPS"),
    ("neural information processing systems", "NeurIPS"),
    ("icml", "ICML"),
    ("international conference on machine learning", "ICML"),
    ("iclr", "ICLR"),
    ("learning representations", "ICLR"),
    ("cvpr", "CVPR"),
    ("computer vision and pattern recognition", "CVPR"),
    ("iccv", "ICCV"),
    ("international conference on computer vision", "ICCV"),
    ("eccv", "ECCV"),
    ("european conference on computer vision", "ECCV"),
    ("aaai", "AAAI"),
    ("ijcai", "IJCAI"),
    ("emnlp", "EMNLP"),
    ("empirical methods in natural language processing", "EMNLP"),
    ("naacl", "NAACL"),
    ("association for computational linguistics", "ACL"),
    ("sigkdd", "KDD"),
    ("knowledge discovery and data mining", "KDD"),
    ("siggraph", "SIGGRAPH"),
    ("pattern analysis and machine intelligence", "TPAMI"),
    ("transactions on image processing", "TIP"),
    ("arxiv", "arXiv"),
];

static ACRONYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,7}[0-9]?\b").expect("venue acronym pattern is valid"));

/// Abbreviate a venue name for pill display.
///
/// Table lookup first (case-insensitive substring), then the first token of two to
/// seven capitals optionally followed by one digit, then the text unchanged.
pub fn abbr_venue(venue: &str) -> String {
    let lowered = venue.to_lowercase();
    if let Some((_, abbr)) = KNOWN_VENUES
        .iter()
        .find(|(fragment, _)| lowered.contains(fragment))
    {
        return (*abbr).to_string();
    }

    match ACRONYM.find(venue) {
        Some(found) => found.as_str().to_string(),
        None => venue.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_venues_are_matched_case_insensitively() {
        assert_eq!(abbr_venue("Advances in NeurIPS 2023"), "NeurIPS");
        assert_eq!(
            abbr_venue("Proceedings of the IEEE/CVF Conference on Computer Vision and Pattern Recognition"),
            "CVPR"
        );
        assert_eq!(abbr_venue("iclr workshop"), "ICLR");
        assert_eq!(abbr_venue("arXiv preprint arXiv:2401.00001"), "arXiv");
    }

    #[test]
    fn unknown_venues_fall_back_to_acronym_token() {
        assert_eq!(abbr_venue("Proc. of ICASSP 2024"), "ICASSP");
        assert_eq!(abbr_venue("MICCAI3 Workshop"), "MICCAI3");
    }

    #[test]
    fn venues_without_acronym_are_returned_unchanged() {
        assert_eq!(abbr_venue("Journal of Things"), "Journal of Things");
        assert_eq!(abbr_venue(""), "");
    }
}
