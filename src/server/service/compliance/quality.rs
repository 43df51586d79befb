//! Grades how usable the OCR output is, from text length, garbled-output
//! detection and the density of architectural vocabulary.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::compliance::TextQuality;

static GARBLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\w\s.,;:'"\-()\[\]{}?!@#$%^&*+=<>|\\/]{10,}"#).unwrap());

static MISSING_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]{20,}").unwrap());

static ARCHITECTURAL_TERMS: &[&str] = &[
    "floor",
    "wall",
    "ceiling",
    "roof",
    "foundation",
    "dimension",
    "height",
    "width",
    "length",
    "area",
    "square",
    "meter",
    "feet",
    "building",
    "structure",
    "plan",
    "elevation",
    "section",
    "detail",
];

/// Assesses the quality of extracted text
pub fn assess_text_quality(text: &str) -> TextQuality {
    if text.trim().len() < 50 {
        return TextQuality::Poor;
    }

    let has_garbled_text = GARBLED.is_match(text);
    let has_missing_spaces = MISSING_SPACES.is_match(text);

    let lower = text.to_lowercase();
    let term_count = ARCHITECTURAL_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .count();

    if text.len() > 1000 && term_count >= 10 && !has_garbled_text && !has_missing_spaces {
        TextQuality::Excellent
    } else if text.len() > 500 && term_count >= 5 && !has_garbled_text {
        TextQuality::Good
    } else if text.len() > 200 && term_count >= 3 {
        TextQuality::Fair
    } else {
        TextQuality::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::assess_text_quality;
    use crate::model::compliance::TextQuality;

    #[test]
    fn short_text_is_poor() {
        assert_eq!(assess_text_quality(""), TextQuality::Poor);
        assert_eq!(assess_text_quality("floor plan"), TextQuality::Poor);
    }

    #[test]
    fn term_rich_medium_text_is_fair() {
        let text = "The floor plan shows each wall and the ceiling finish in detail, \
                    with a note on the roof covering and the general layout of the building \
                    site area. Annotations reference the boundary pegs, access road and the \
                    position of the septic tank relative to the proposed structure.";

        assert_eq!(assess_text_quality(text), TextQuality::Fair);
    }

    /// Expect run-together words to cap the grade below excellent
    #[test]
    fn garbled_text_downgrades() {
        let mut text = String::from("floorwallceilingrooffoundationdimensionheightwidtharea ");
        for _ in 0..40 {
            text.push_str("floor wall ceiling roof foundation dimension height width area plan ");
        }

        assert_ne!(assess_text_quality(&text), TextQuality::Excellent);
    }
}
