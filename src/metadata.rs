use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

pub type CompetitionId = u32;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
    MF,
}

/// One competition as listed on the catalog page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionMeta {
    pub id: CompetitionId,
    pub name: String,
    pub team: bool,
    pub gender: Gender,
    pub open: bool,
    pub date: NaiveDate,
    pub serie: String,
    pub region: String,
}

// ============================================================================
// KNOWN VALUES
// ============================================================================

pub const TEAM_MARKER: &str = "Equipes";
pub const OPEN_MARKER: &str = "Ouverte";

/// Source month abbreviations and their English equivalents
const MONTHS: &[(&str, &str)] = &[
    ("Jan", "Jan"),
    ("Fév", "Feb"),
    ("Mar", "Mar"),
    ("Avr", "Apr"),
    ("Mai", "May"),
    ("Jui", "Jun"),
    ("Jul", "Jul"),
    ("Aoû", "Aug"),
    ("Sep", "Sep"),
    ("Oct", "Oct"),
    ("Nov", "Nov"),
    ("Déc", "Dec"),
];

// ============================================================================
// PARSING
// ============================================================================

/// Normalizes the gender cell; anything other than the two known values is mixed
pub fn parse_gender(text: &str) -> Gender {
    match text {
        "masculin" => Gender::M,
        "feminin" => Gender::F,
        _ => Gender::MF,
    }
}

pub fn is_team(text: &str) -> bool {
    text == TEAM_MARKER
}

pub fn is_open(text: &str) -> bool {
    text == OPEN_MARKER
}

/// Parses a listing date such as "Dim. 05 Jui 2023".
/// The first token (weekday) is dropped, then day, month and year are read.
pub fn parse_listing_date(text: &str) -> Result<NaiveDate> {
    let tokens: Vec<&str> = text.split_whitespace().skip(1).take(3).collect();
    let &[day, month, year] = tokens.as_slice() else {
        return Err(ScrapeError::InvalidDate(text.to_string()));
    };

    let month = MONTHS
        .iter()
        .find(|(source, _)| *source == month)
        .map(|(_, canonical)| *canonical)
        .ok_or_else(|| ScrapeError::UnknownMonth(month.to_string()))?;

    NaiveDate::parse_from_str(&format!("{} {} {}", day, month, year), "%d %b %Y")
        .map_err(|_| ScrapeError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gender() {
        assert_eq!(parse_gender("masculin"), Gender::M);
        assert_eq!(parse_gender("feminin"), Gender::F);
        assert_eq!(parse_gender("autre"), Gender::MF);
        assert_eq!(parse_gender(""), Gender::MF);
    }

    #[test]
    fn test_parse_listing_date() {
        let date = parse_listing_date("X 05 Jui 2023 Y").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 5).unwrap());

        let date = parse_listing_date("Sam.  17  Déc  2022").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 12, 17).unwrap());

        let date = parse_listing_date("Lun. 01 Aoû 2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    }

    #[test]
    fn test_parse_listing_date_errors() {
        assert!(matches!(
            parse_listing_date("Dim. 05 June 2023"),
            Err(ScrapeError::UnknownMonth(m)) if m == "June"
        ));
        assert!(matches!(
            parse_listing_date("05 Jui"),
            Err(ScrapeError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_listing_date("Dim. 35 Jui 2023"),
            Err(ScrapeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_markers_are_exact() {
        assert!(is_open("Ouverte"));
        assert!(!is_open("ouverte"));
        assert!(!is_open("Fermée"));
        assert!(is_team("Equipes"));
        assert!(!is_team("Individuel"));
    }
}
