use scraper::{ElementRef, Selector};
use std::str::FromStr;

use crate::error::{Result, ScrapeError};

/// Builds a selector from a CSS literal known at compile time
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

/// Trimmed text content of an element, including all descendants
pub fn cell_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Direct `<td>` children of a row; cells of nested tables are not included
pub fn direct_cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "td")
        .collect()
}

/// Parses an integer field, naming the field in the error
pub fn parse_int<T: FromStr>(field: &'static str, text: &str) -> Result<T> {
    text.trim().parse().map_err(|_| ScrapeError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

/// Parses a decimal written with a comma separator (e.g. 73,45)
pub fn parse_decimal(field: &'static str, text: &str) -> Result<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized.parse().map_err(|_| ScrapeError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

/// Extracts the points value from a team header cell such as "IWF : 312,5 pts"
/// by dropping non-ASCII characters and keeping the last token
pub fn parse_team_points(text: &str) -> Result<f64> {
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    let last = ascii.split_whitespace().last().unwrap_or_default();
    parse_decimal("ranking_points", last)
}

/// Last whitespace-separated token of a cell, as an integer
pub fn parse_last_int<T: FromStr>(field: &'static str, text: &str) -> Result<T> {
    let last = text.split_whitespace().last().unwrap_or_default();
    parse_int(field, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("body_weight", "73,45").unwrap(), 73.45);
        assert_eq!(parse_decimal("body_weight", " 81 ").unwrap(), 81.0);
        assert!(parse_decimal("body_weight", "abc").is_err());
    }

    #[test]
    fn test_parse_int_reports_field() {
        let err = parse_int::<i32>("total", "12a").unwrap_err();
        assert!(err.to_string().contains("total"));
        assert_eq!(parse_int::<i32>("snatch", "-95").unwrap(), -95);
    }

    #[test]
    fn test_parse_team_points_strips_non_ascii() {
        assert_eq!(parse_team_points("Points IWF\u{a0}: 312,5").unwrap(), 312.5);
        assert_eq!(parse_team_points("Total → 1024,25").unwrap(), 1024.25);
        assert!(parse_team_points("").is_err());
    }

    #[test]
    fn test_parse_last_int() {
        assert_eq!(parse_last_int::<u32>("drawing_number", "Tirage 7").unwrap(), 7);
        assert!(parse_last_int::<u32>("drawing_number", "Tirage").is_err());
    }
}
