use scraper::{ElementRef, Html};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::Result;
use crate::metadata::{is_open, is_team, parse_gender, parse_listing_date, CompetitionId, CompetitionMeta};
use crate::utils::{cell_text, selector};

pub type Listing = HashMap<CompetitionId, CompetitionMeta>;

const LINK_PREFIX: &str = "/scoresheet/";
const LINK_PATH: &str = "competition/view/";
const LISTING_CELLS: usize = 7;

// ============================================================================
// LINK PARSING
// ============================================================================

/// Extracts the competition id from a detail link such as
/// `/scoresheet/competition/view/9260` or `/scoresheet/team/competition/view/9175`
pub fn extract_competition_id(href: &str) -> Option<CompetitionId> {
    href.match_indices(LINK_PREFIX).find_map(|(pos, _)| {
        let rest = &href[pos + LINK_PREFIX.len()..];
        let rest = rest.strip_prefix("team/").unwrap_or(rest);
        let rest = rest.strip_prefix(LINK_PATH)?;

        let digits: &str = &rest[..rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len())];
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    })
}

// ============================================================================
// LISTING PARSING
// ============================================================================

/// Parses the catalog page.
/// A page without the `competitionSet` table (or its body) yields an empty listing.
pub fn parse_listing_html(html: &str) -> Listing {
    let document = Html::parse_document(html);
    let table_selector = selector("table#competitionSet");
    let tbody_selector = selector("tbody");
    let row_selector = selector("tr");

    let Some(table) = document.select(&table_selector).next() else {
        warn!("Listing page has no competition table");
        return Listing::new();
    };
    let Some(tbody) = table.select(&tbody_selector).next() else {
        warn!("Listing table has no body");
        return Listing::new();
    };

    let mut listing = Listing::new();
    for row in tbody.select(&row_selector) {
        match parse_listing_row(row) {
            Ok(Some(meta)) => {
                listing.insert(meta.id, meta);
            }
            Ok(None) => debug!("Skipping listing row without a competition link"),
            Err(e) => warn!(error = %e, "Skipping malformed listing row"),
        }
    }

    listing
}

/// Reads one catalog row; `None` when the row does not link to a competition
fn parse_listing_row(row: ElementRef) -> Result<Option<CompetitionMeta>> {
    let cell_selector = selector("td");
    let link_selector = selector("a");

    let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
    if cells.len() < LISTING_CELLS {
        return Ok(None);
    }

    let Some(link) = cells[0].select(&link_selector).next() else {
        return Ok(None);
    };
    let Some(id) = link.value().attr("href").and_then(extract_competition_id) else {
        return Ok(None);
    };

    Ok(Some(CompetitionMeta {
        id,
        name: cell_text(link),
        team: is_team(&cell_text(cells[3])),
        gender: parse_gender(&cell_text(cells[2])),
        open: is_open(&cell_text(cells[5])),
        date: parse_listing_date(&cell_text(cells[4]))?,
        serie: cell_text(cells[6]),
        region: cell_text(cells[1]),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Gender;
    use chrono::NaiveDate;

    fn listing_row(href: &str, name: &str, gender: &str, kind: &str, date: &str, status: &str) -> String {
        format!(
            "<tr><td><a href=\"{}\">{}</a></td><td>Grand Est</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>Nationale 1</td></tr>",
            href, name, gender, kind, date, status
        )
    }

    #[test]
    fn test_extract_competition_id() {
        assert_eq!(extract_competition_id("/scoresheet/competition/view/9260"), Some(9260));
        assert_eq!(extract_competition_id("/scoresheet/team/competition/view/9175"), Some(9175));
        assert_eq!(
            extract_competition_id("http://scoresheet.ffhaltero.fr/scoresheet/competition/view/42?tab=1"),
            Some(42)
        );
        assert_eq!(extract_competition_id("/scoresheet/competition/list"), None);
        assert_eq!(extract_competition_id("/scoresheet/competition/view/"), None);
        assert_eq!(extract_competition_id("/other/competition/view/12"), None);
    }

    #[test]
    fn test_parse_listing_rows() {
        let html = format!(
            "<table id=\"competitionSet\"><thead><tr><th>Nom</th></tr></thead><tbody>{}{}{}</tbody></table>",
            listing_row("/scoresheet/competition/view/9260", "Coupe de Lorraine", "masculin", "Individuel", "Sam. 17 Jui 2023", "Ouverte"),
            listing_row("/scoresheet/team/competition/view/9175", "Interclubs", "autre", "Equipes", "Dim. 05 Fév 2023", "Terminée"),
            listing_row("/news/12", "Annonce", "feminin", "Individuel", "Dim. 05 Fév 2023", "Terminée"),
        );

        let listing = parse_listing_html(&html);
        assert_eq!(listing.len(), 2);

        let open = &listing[&9260];
        assert_eq!(open.name, "Coupe de Lorraine");
        assert_eq!(open.gender, Gender::M);
        assert!(!open.team);
        assert!(open.open);
        assert_eq!(open.date, NaiveDate::from_ymd_opt(2023, 6, 17).unwrap());
        assert_eq!(open.region, "Grand Est");
        assert_eq!(open.serie, "Nationale 1");

        let team = &listing[&9175];
        assert!(team.team);
        assert!(!team.open);
        assert_eq!(team.gender, Gender::MF);
        assert_eq!(team.date, NaiveDate::from_ymd_opt(2023, 2, 5).unwrap());
    }

    #[test]
    fn test_malformed_row_does_not_void_listing() {
        let html = format!(
            "<table id=\"competitionSet\"><tbody>{}{}</tbody></table>",
            listing_row("/scoresheet/competition/view/1", "A", "feminin", "Individuel", "Sam. 17 Juin 2023", "Ouverte"),
            listing_row("/scoresheet/competition/view/2", "B", "feminin", "Individuel", "Sam. 17 Jul 2023", "Ouverte"),
        );

        let listing = parse_listing_html(&html);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[&2].gender, Gender::F);
    }

    #[test]
    fn test_missing_table_gives_empty_listing() {
        assert!(parse_listing_html("<html><body><p>Maintenance</p></body></html>").is_empty());
        assert!(parse_listing_html("<table id=\"other\"><tr><td>x</td></tr></table>").is_empty());
    }
}
