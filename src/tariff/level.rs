//! Dash-level decoding for tariff descriptions.
//!
//! The tariff book encodes nesting as a run of leading dashes in the English
//! description: `"-- Pure-bred breeding"` sits two levels below its heading.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading run made only of dashes and whitespace.
static LEADING_DASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-\s]+").expect("Failed to compile leading dash regex"));

/// Split a description into its leading dash/space run and the remainder.
fn split_leading_run(description: &str) -> (&str, &str) {
    let end = LEADING_DASHES.find(description).map_or(0, |m| m.end());
    description.split_at(end)
}

/// Count the dashes in the leading dash/space run. No leading dashes is level 0.
pub fn dash_level(description: &str) -> usize {
    let (run, _) = split_leading_run(description);
    run.chars().filter(|c| *c == '-').count()
}

/// Strip the leading dash/space run, surrounding whitespace and one trailing colon.
pub fn clean_description(description: &str) -> String {
    let (_, rest) = split_leading_run(description);
    let cleaned = rest.trim();

    match cleaned.strip_suffix(':') {
        Some(rest) => rest.trim().to_string(),
        None => cleaned.to_string(),
    }
}

/// First four characters of a code, or the whole code when it is shorter.
pub fn heading_prefix(code: &str) -> &str {
    match code.char_indices().nth(4) {
        Some((idx, _)) => &code[..idx],
        None => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_zero_without_dashes() {
        assert_eq!(dash_level("Live animals"), 0);
        assert_eq!(dash_level(""), 0);
        assert_eq!(dash_level("Live - animals"), 0);
    }

    #[test]
    fn test_level_counts_leading_dashes() {
        assert_eq!(dash_level("- Horses"), 1);
        assert_eq!(dash_level("-- Pure-bred breeding"), 2);
        assert_eq!(dash_level("- - - Other"), 3);
        assert_eq!(dash_level("  --- Other"), 3);
    }

    #[test]
    fn test_level_ignores_inner_dashes() {
        // the dash inside "Pure-bred" is not part of the leading run
        assert_eq!(dash_level("- Pure-bred"), 1);
    }

    #[test]
    fn test_clean_strips_dashes_and_colon() {
        assert_eq!(clean_description("-- Pure-bred breeding"), "Pure-bred breeding");
        assert_eq!(clean_description("- Other :"), "Other");
        assert_eq!(clean_description("Live animals:"), "Live animals");
        assert_eq!(clean_description("  Live animals  "), "Live animals");
    }

    #[test]
    fn test_tab_and_nbsp_led_runs_agree() {
        for (desc, level) in [
            ("\t-- Tabbed", 2),
            ("\u{a0}- Nbsp", 1),
            ("- \t- Mixed :", 2),
        ] {
            assert_eq!(dash_level(desc), level, "{desc:?}");
        }
        assert_eq!(clean_description("\t-- Tabbed"), "Tabbed");
        assert_eq!(clean_description("\u{a0}- Nbsp"), "Nbsp");
        assert_eq!(clean_description("- \t- Mixed :"), "Mixed");
    }

    #[test]
    fn test_clean_removes_single_trailing_colon() {
        assert_eq!(clean_description("Ratio::"), "Ratio:");
    }

    #[test]
    fn test_clean_blank() {
        assert_eq!(clean_description("---"), "");
        assert_eq!(clean_description("   "), "");
    }

    #[test]
    fn test_heading_prefix() {
        assert_eq!(heading_prefix("200510120001"), "2005");
        assert_eq!(heading_prefix("1234.56.78.001"), "1234");
        assert_eq!(heading_prefix("01"), "01");
        assert_eq!(heading_prefix("0101"), "0101");
    }
}
