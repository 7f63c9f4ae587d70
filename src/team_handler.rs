use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};
use crate::sheet_handler::{decode_row, AthleteResult};
use crate::utils::{cell_text, direct_cells, parse_last_int, parse_team_points, selector};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A team and its lifters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: String,
    pub ranking_points: f64,
    pub athletes: Vec<AthleteResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing_number: Option<u32>,
}

/// Cells in a finished-competition team header row
const CLOSED_HEADER_CELLS: usize = 3;
/// Cells in an in-progress team header row; longer rows are lifters
const OPEN_HEADER_CELLS: usize = 5;

// ============================================================================
// TEAM TABLES
// ============================================================================

/// Finished team competition.
/// A three-cell row opens a team; a row holding nested rows adds one lifter per nested row.
pub fn parse_team_closed(table: ElementRef) -> Result<Vec<TeamEntry>> {
    let row_selector = selector("tr");
    let mut teams: Vec<TeamEntry> = Vec::new();

    for row in table.select(&row_selector) {
        let cells = direct_cells(row);
        let sub_rows: Vec<ElementRef> = row
            .select(&row_selector)
            .filter(|sub_row| sub_row.id() != row.id())
            .collect();

        if cells.len() == CLOSED_HEADER_CELLS {
            teams.push(TeamEntry {
                team: cell_text(cells[0]),
                ranking_points: parse_team_points(&cell_text(cells[1]))?,
                athletes: Vec::new(),
                drawing_number: None,
            });
        } else if !sub_rows.is_empty() {
            let current = teams.last_mut().ok_or(ScrapeError::OrphanAthlete)?;
            for sub_row in sub_rows {
                current.athletes.push(decode_row(sub_row)?);
            }
        }
    }

    Ok(teams)
}

/// Team competition in progress.
/// Bodies and rows are visited in document order, a body standing for its first row,
/// so the first row of each body is read twice.
/// A five-cell row opens a team; any longer row is a lifter of the current team.
pub fn parse_team_open(table: ElementRef) -> Result<Vec<TeamEntry>> {
    let visit_selector = selector("tbody, tr");
    let row_selector = selector("tr");
    let mut teams: Vec<TeamEntry> = Vec::new();

    for element in table.select(&visit_selector) {
        let row = if element.value().name() == "tbody" {
            match element.select(&row_selector).next() {
                Some(row) => row,
                None => continue,
            }
        } else {
            element
        };
        let cells = direct_cells(row);

        if cells.len() == OPEN_HEADER_CELLS {
            teams.push(TeamEntry {
                team: cell_text(cells[1]),
                ranking_points: parse_team_points(&cell_text(cells[3]))?,
                athletes: Vec::new(),
                drawing_number: Some(parse_last_int("drawing_number", &cell_text(cells[4]))?),
            });
        } else if cells.len() > OPEN_HEADER_CELLS {
            let current = teams.last_mut().ok_or(ScrapeError::OrphanAthlete)?;
            current.athletes.push(decode_row(row)?);
        }
    }

    Ok(teams)
}
