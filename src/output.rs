use std::io::Write;

use crate::error::Result;
use crate::metadata::CompetitionId;
use crate::sheet_handler::{AthleteResult, SheetContent, SheetTable};

const CSV_HEADER: [&str; 22] = [
    "competition_id", "table", "team", "drawing_number", "licence", "name", "year_of_birth",
    "club", "nationality", "body_weight", "snatch1", "snatch2", "snatch3", "snatch",
    "clean_and_jerk1", "clean_and_jerk2", "clean_and_jerk3", "clean_and_jerk", "total",
    "serie", "category", "ranking_points",
];

/// One lifter with the table and team it was listed under
pub struct SheetRow<'a> {
    pub table: usize,
    pub team: Option<&'a str>,
    pub athlete: &'a AthleteResult,
}

/// Flattens a sheet into lifter rows, in document order
pub fn sheet_rows(sheet: &SheetContent) -> Vec<SheetRow<'_>> {
    let mut rows = Vec::new();

    for (table, content) in sheet.iter().enumerate() {
        match content {
            SheetTable::Individual(athletes) => {
                rows.extend(athletes.iter().map(|athlete| SheetRow { table, team: None, athlete }));
            }
            SheetTable::Team(teams) => {
                for team in teams {
                    rows.extend(team.athletes.iter().map(|athlete| SheetRow {
                        table,
                        team: Some(team.team.as_str()),
                        athlete,
                    }));
                }
            }
        }
    }

    rows
}

// ============================================================================
// CSV OUTPUT
// ============================================================================

/// Writes one CSV record per lifter
pub fn write_sheet_csv<W: Write>(out: W, id: CompetitionId, sheet: &SheetContent) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;

    for row in sheet_rows(sheet) {
        let a = row.athlete;
        let record: Vec<String> = vec![
            id.to_string(),
            row.table.to_string(),
            row.team.unwrap_or_default().to_string(),
            a.drawing_number.map(|n| n.to_string()).unwrap_or_default(),
            a.licence.to_string(),
            a.name.clone(),
            a.year_of_birth.to_string(),
            a.club.clone(),
            a.nationality.clone(),
            a.body_weight.to_string(),
            a.snatch_attempts[0].to_string(),
            a.snatch_attempts[1].to_string(),
            a.snatch_attempts[2].to_string(),
            a.snatch_result.to_string(),
            a.clean_and_jerk_attempts[0].to_string(),
            a.clean_and_jerk_attempts[1].to_string(),
            a.clean_and_jerk_attempts[2].to_string(),
            a.clean_and_jerk_result.to_string(),
            a.total.to_string(),
            a.serie.clone(),
            a.category.clone(),
            a.ranking_points.to_string(),
        ];
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

// ============================================================================
// OUTPUT FORMATTING
// ============================================================================

/// Prints a sheet to stdout, one line per lifter
pub fn print_sheet(id: CompetitionId, sheet: &SheetContent) {
    println!("\nCompetition {} ({} tables)", id, sheet.len());

    let mut current_table = None;
    let mut current_team = None;
    for row in sheet_rows(sheet) {
        if current_table != Some(row.table) {
            println!("{:-<80}", "");
            current_table = Some(row.table);
            current_team = None;
        }
        if row.team.is_some() && row.team != current_team {
            println!("[{}]", row.team.unwrap_or_default());
            current_team = row.team;
        }

        let a = row.athlete;
        let drawing = a.drawing_number.map(|n| format!("{:3}", n)).unwrap_or_else(|| " --".to_string());
        println!(
            "{} {:25} {:20} {:6.2} {:>4} {:>4} {:>4} {:8.2}",
            drawing, a.name, a.club, a.body_weight, a.snatch_result, a.clean_and_jerk_result, a.total, a.ranking_points
        );
    }
}
