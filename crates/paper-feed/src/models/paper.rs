//! Paper data model matching the `/papers` response.

use serde::{Deserialize, Serialize};

/// A ranked paper as served by the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper identifier, in practice the abstract-page URL
    /// (`http://arxiv.org/abs/2410.01234v1`).
    pub id: String,

    /// Paper title.
    #[serde(default)]
    pub title: String,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: String,

    /// Last-updated timestamp (ISO 8601).
    #[serde(default)]
    pub published: String,

    /// Relevance score from the server's ranker.
    pub score: f64,
}

impl Paper {
    /// Link to the PDF variant of this paper.
    ///
    /// The first `"abs"` in the id becomes `"pdf"`; ids without it are
    /// returned unchanged.
    #[must_use]
    pub fn pdf_url(&self) -> String {
        self.id.replacen("abs", "pdf", 1)
    }

    /// Score with exactly four decimal places.
    #[must_use]
    pub fn score_display(&self) -> String {
        fixed4(self.score)
    }
}

/// Format `value` with four decimal places.
///
/// Midpoints round away from zero and non-finite values print as
/// `NaN`/`Infinity`, matching the fixed-point convention of the page this
/// list was designed for. Magnitudes of `1e21` and above print every
/// integer digit rather than switching to exponent notation.
#[must_use]
pub fn fixed4(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();

    // The only f64 values exactly halfway between two 4-decimal numbers are
    // odd multiples of 1/32. `{:.4}` rounds those to even, so round up here.
    let scaled = magnitude * 32.0;
    let digits = if scaled.fract() == 0.0 && scaled % 2.0 == 1.0 {
        format!("{:.4}", (magnitude * 10_000.0).ceil() / 10_000.0)
    } else {
        format!("{magnitude:.4}")
    };

    if value < 0.0 { format!("-{digits}") } else { digits }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, score: f64) -> Paper {
        Paper { id: id.to_string(), score, ..Default::default() }
    }

    #[test]
    fn test_pdf_url_replaces_first_abs() {
        let p = paper("http://arxiv.org/abs/2410.01234v1", 0.0);
        assert_eq!(p.pdf_url(), "http://arxiv.org/pdf/2410.01234v1");
    }

    #[test]
    fn test_pdf_url_only_first_occurrence() {
        let p = paper("abs/abstracts/abs", 0.0);
        assert_eq!(p.pdf_url(), "pdf/abstracts/abs");
    }

    #[test]
    fn test_pdf_url_without_abs() {
        let p = paper("1603.02754", 0.0);
        assert_eq!(p.pdf_url(), "1603.02754");
    }

    #[test]
    fn test_fixed4_basic() {
        assert_eq!(fixed4(1.0), "1.0000");
        assert_eq!(fixed4(0.123_456), "0.1235");
        assert_eq!(fixed4(-2.5), "-2.5000");
        assert_eq!(fixed4(12.345_64), "12.3456");
    }

    #[test]
    fn test_fixed4_midpoint_rounds_away_from_zero() {
        // 0.03125 = 1/32, exactly halfway between 0.0312 and 0.0313
        assert_eq!(fixed4(0.031_25), "0.0313");
        assert_eq!(fixed4(-0.031_25), "-0.0313");
        assert_eq!(fixed4(0.093_75), "0.0938");
        assert_eq!(fixed4(1.156_25), "1.1563");
    }

    #[test]
    fn test_fixed4_negative_zero_and_tiny_negatives() {
        assert_eq!(fixed4(-0.0), "0.0000");
        assert_eq!(fixed4(-0.000_01), "-0.0000");
    }

    #[test]
    fn test_fixed4_huge_values_stay_positional() {
        assert_eq!(fixed4(1e21), "1000000000000000000000.0000");
    }

    #[test]
    fn test_fixed4_non_finite() {
        assert_eq!(fixed4(f64::NAN), "NaN");
        assert_eq!(fixed4(f64::INFINITY), "Infinity");
        assert_eq!(fixed4(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_deserialize_minimal_paper() {
        let p: Paper = serde_json::from_str(r#"{"id": "abs/1", "score": 0.5}"#).unwrap();
        assert_eq!(p.id, "abs/1");
        assert!(p.title.is_empty());
        assert!(p.published.is_empty());
    }

    #[test]
    fn test_deserialize_requires_score() {
        let result = serde_json::from_str::<Paper>(r#"{"id": "abs/1", "title": "T"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_abstract_field_name_on_the_wire() {
        let json = serde_json::to_value(paper("abs/1", 1.0)).unwrap();
        assert!(json.get("abstract").is_some());
    }
}
