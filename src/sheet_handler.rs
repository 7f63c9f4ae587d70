use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};
use crate::team_handler::{parse_team_closed, parse_team_open, TeamEntry};
use crate::utils::{cell_text, parse_decimal, parse_int, selector};

/// Cells in a result row once the optional drawing number is removed
pub const ROW_FIELDS: usize = 18;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One lifter's line on a score sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteResult {
    pub drawing_number: Option<u32>,
    pub licence: u64,
    pub name: String,
    pub year_of_birth: u16,
    pub club: String,
    pub nationality: String,
    pub body_weight: f64,
    pub snatch_attempts: [i32; 3],
    pub snatch_result: i32,
    pub clean_and_jerk_attempts: [i32; 3],
    pub clean_and_jerk_result: i32,
    pub total: i32,
    pub serie: String,
    pub category: String,
    pub ranking_points: f64,
}

/// Parsed content of one `event-datatable` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetTable {
    Individual(Vec<AthleteResult>),
    Team(Vec<TeamEntry>),
}

/// All tables of a competition page, in document order
pub type SheetContent = Vec<SheetTable>;

/// Table shape of a detail page, chosen by the team and closed flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    IndividualClosed,
    IndividualOpen,
    TeamClosed,
    TeamOpen,
}

impl SheetLayout {
    pub fn from_flags(team: bool, closed: bool) -> Self {
        match (team, closed) {
            (false, true) => SheetLayout::IndividualClosed,
            (false, false) => SheetLayout::IndividualOpen,
            (true, true) => SheetLayout::TeamClosed,
            (true, false) => SheetLayout::TeamOpen,
        }
    }
}

// ============================================================================
// SHEET PARSING (dispatcher)
// ============================================================================

/// Parses a detail page body
pub fn parse_sheet_html(html: &str, team: bool, closed: bool) -> Result<SheetContent> {
    let document = Html::parse_document(html);
    parse_sheet(&document, team, closed)
}

/// Parses every result table of a detail page with the layout selected by the flags.
/// Any row that fails to decode fails the whole sheet.
pub fn parse_sheet(document: &Html, team: bool, closed: bool) -> Result<SheetContent> {
    let table_selector = selector("table.event-datatable");
    let layout = SheetLayout::from_flags(team, closed);

    document
        .select(&table_selector)
        .map(|table| match layout {
            SheetLayout::IndividualClosed => parse_individual_closed(table).map(SheetTable::Individual),
            SheetLayout::IndividualOpen => parse_individual_open(table).map(SheetTable::Individual),
            SheetLayout::TeamClosed => parse_team_closed(table).map(SheetTable::Team),
            SheetLayout::TeamOpen => parse_team_open(table).map(SheetTable::Team),
        })
        .collect()
}

// ============================================================================
// INDIVIDUAL TABLES
// ============================================================================

/// Finished competition: every row of the table body is a lifter
fn parse_individual_closed(table: ElementRef) -> Result<Vec<AthleteResult>> {
    let tbody_selector = selector("tbody");
    let row_selector = selector("tr");

    // HTML5 parsing inserts a body into every table with rows, so this only hits empty tables
    let Some(tbody) = table.select(&tbody_selector).next() else {
        return Ok(Vec::new());
    };

    tbody.select(&row_selector).map(decode_row).collect()
}

/// Competition in progress: only the first row of each body is kept
fn parse_individual_open(table: ElementRef) -> Result<Vec<AthleteResult>> {
    let tbody_selector = selector("tbody");
    let row_selector = selector("tr");

    table
        .select(&tbody_selector)
        .filter_map(|tbody| tbody.select(&row_selector).next())
        .map(decode_row)
        .collect()
}

// ============================================================================
// ROW DECODING
// ============================================================================

/// Decodes a result row from its non-empty cells.
/// 19 cells means the first one is the drawing number; 18 means there is none.
pub fn decode_row(row: ElementRef) -> Result<AthleteResult> {
    let cell_selector = selector("td");
    let mut cells: Vec<String> = row
        .select(&cell_selector)
        .map(cell_text)
        .filter(|text| !text.is_empty())
        .collect();

    let drawing_number = if cells.len() > ROW_FIELDS {
        let first = cells.remove(0);
        Some(parse_int("drawing_number", &first)?)
    } else {
        None
    };

    if cells.len() != ROW_FIELDS {
        return Err(ScrapeError::CellCount {
            expected: ROW_FIELDS,
            found: cells.len(),
        });
    }

    Ok(AthleteResult {
        drawing_number,
        licence: parse_int("licence", &cells[0])?,
        name: cells[1].clone(),
        year_of_birth: parse_int("year_of_birth", &cells[2])?,
        club: cells[3].clone(),
        nationality: cells[4].clone(),
        body_weight: parse_decimal("body_weight", &cells[5])?,
        snatch_attempts: [
            parse_int("snatch_attempt", &cells[6])?,
            parse_int("snatch_attempt", &cells[7])?,
            parse_int("snatch_attempt", &cells[8])?,
        ],
        snatch_result: parse_int("snatch_result", &cells[9])?,
        clean_and_jerk_attempts: [
            parse_int("clean_and_jerk_attempt", &cells[10])?,
            parse_int("clean_and_jerk_attempt", &cells[11])?,
            parse_int("clean_and_jerk_attempt", &cells[12])?,
        ],
        clean_and_jerk_result: parse_int("clean_and_jerk_result", &cells[13])?,
        total: parse_int("total", &cells[14])?,
        serie: cells[15].clone(),
        category: cells[16].clone(),
        ranking_points: parse_decimal("ranking_points", &cells[17])?,
    })
}
