//! Terminal rendering of chat responses and model listings

use crate::chat::ModelEntry;
use std::time::Duration;

/// Approximate throughput as whitespace-delimited words per second.
///
/// This counts words, not model tokens; the coarseness is deliberate and
/// documented CLI behavior. Zero elapsed time reports zero rather than
/// dividing by it.
pub fn tokens_per_second(text: &str, elapsed: Duration) -> f64 {
    let words = text.split_whitespace().count();
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        words as f64 / secs
    } else {
        0.0
    }
}

/// Format the throughput report line
pub fn throughput_line(rate: f64) -> String {
    format!("Tokens per second: {rate:.2}")
}

/// Format one model-listing line, with a placeholder when the endpoint
/// reports no size metadata
pub fn model_line(entry: &ModelEntry) -> String {
    format!(
        "- {} ({})",
        entry.id,
        entry.parameter_size.as_deref().unwrap_or("unknown size")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_words_over_two_seconds_is_one_per_second() {
        let rate = tokens_per_second("Hi there", Duration::from_secs(2));
        assert_eq!(throughput_line(rate), "Tokens per second: 1.00");
    }

    #[test]
    fn zero_elapsed_reports_zero() {
        assert_eq!(tokens_per_second("some words here", Duration::ZERO), 0.0);
    }

    #[test]
    fn empty_text_reports_zero() {
        assert_eq!(tokens_per_second("", Duration::from_secs(3)), 0.0);
        assert_eq!(tokens_per_second("   \n\t ", Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn rate_is_never_negative() {
        for (text, secs) in [("", 0), ("a", 1), ("a b c", 10)] {
            assert!(tokens_per_second(text, Duration::from_secs(secs)) >= 0.0);
        }
    }

    #[test]
    fn model_line_with_and_without_size() {
        let sized = ModelEntry {
            id: "m1".to_string(),
            parameter_size: Some("7B".to_string()),
        };
        assert_eq!(model_line(&sized), "- m1 (7B)");

        let unsized_entry = ModelEntry {
            id: "m2".to_string(),
            parameter_size: None,
        };
        assert_eq!(model_line(&unsized_entry), "- m2 (unknown size)");
    }
}
