//! # Message Formatter
//!
//! Renders spots as numbered APRS message lines that fit the 67 character
//! message text limit.

use crate::domain::types::Spot;
use crate::strings::messages;

pub const MAX_LINE_LEN: usize = 67;
pub const MAX_LINES: usize = 5;
pub const PLACEHOLDER: &str = "N/A";
const ELLIPSIS: &str = "...";

pub struct MessageFormatter;

impl MessageFormatter {
    /// One line per spot (at most five), or the "no spots" line when empty.
    pub fn format(spots: &[Spot]) -> Vec<String> {
        if spots.is_empty() {
            return vec![messages::NO_SPOTS.to_string()];
        }
        spots
            .iter()
            .take(MAX_LINES)
            .enumerate()
            .map(|(i, spot)| Self::format_spot(i + 1, spot))
            .collect()
    }

    /// `"<index>:<activator> <frequency> <reference> <mode>"`, truncated to fit.
    pub fn format_spot(index: usize, spot: &Spot) -> String {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
        let line = format!(
            "{}:{} {} {} {}",
            index,
            field(&spot.activator),
            field(&spot.frequency),
            field(&spot.reference),
            field(&spot.mode)
        );
        Self::truncate(line)
    }

    /// Lines over the limit keep their first 64 characters plus `...`.
    pub fn truncate(line: String) -> String {
        if line.chars().count() <= MAX_LINE_LEN {
            return line;
        }
        let keep = MAX_LINE_LEN - ELLIPSIS.len();
        let mut out: String = line.chars().take(keep).collect();
        out.push_str(ELLIPSIS);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_single_no_spots_line() {
        assert_eq!(MessageFormatter::format(&[]), vec!["No POTA spots available"]);
    }

    #[test]
    fn formats_single_spot() {
        let spot = Spot::new("W1ABC", "14.260", "K-1234", "SSB");
        assert_eq!(
            MessageFormatter::format(&[spot]),
            vec!["1:W1ABC 14.260 K-1234 SSB"]
        );
    }

    #[test]
    fn missing_fields_use_placeholder() {
        let spot = Spot {
            activator: Some("W1ABC".to_string()),
            ..Spot::default()
        };
        assert_eq!(MessageFormatter::format_spot(2, &spot), "2:W1ABC N/A N/A N/A");
    }

    #[test]
    fn caps_at_five_lines_in_order() {
        let spots: Vec<_> = (0..8)
            .map(|i| Spot::new(&format!("W{i}X"), "7.074", "US-0001", "FT8"))
            .collect();
        let lines = MessageFormatter::format(&spots);
        assert_eq!(lines.len(), 5);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.starts_with(&format!("{}:W{}X ", i + 1, i)));
        }

        let lines = MessageFormatter::format(&spots[..3]);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn long_lines_are_truncated_to_exactly_67() {
        let long_ref = "R".repeat(80);
        let spot = Spot::new("W1ABC", "14.260", &long_ref, "SSB");
        let line = MessageFormatter::format_spot(1, &spot);
        let full = format!("1:W1ABC 14.260 {long_ref} SSB");

        assert_eq!(line.chars().count(), MAX_LINE_LEN);
        assert!(line.ends_with("..."));
        assert_eq!(&line[..64], &full[..64]);
    }

    #[test]
    fn line_at_limit_is_untouched() {
        let line = "x".repeat(MAX_LINE_LEN);
        assert_eq!(MessageFormatter::truncate(line.clone()), line);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let line = "é".repeat(70);
        let out = MessageFormatter::truncate(line);
        assert_eq!(out.chars().count(), MAX_LINE_LEN);
        assert!(out.starts_with(&"é".repeat(64)));
    }
}
