#![allow(dead_code)]

use chrono::NaiveDate;
use scoresheet_cache::{CacheRecord, CompetitionMeta, Gender, Records};

pub const FIELDS: [&str; 18] = [
    "345678", "LEROY Camille", "2000", "Haltéro Club Tours", "FRA", "58,9", "70", "73", "-75",
    "73", "88", "-92", "92", "92", "165", "Nationale", "SF 59", "231,75",
];

pub fn row(cells: &[&str]) -> String {
    let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
    format!("<tr>{}</tr>", tds)
}

pub fn sheet_page(tables: &[String]) -> String {
    let body: String = tables
        .iter()
        .map(|t| format!("<table class=\"event-datatable\">{}</table>", t))
        .collect();
    format!("<html><body><h1>Feuille de match</h1>{}</body></html>", body)
}

/// Closed individual page with one lifter
pub fn closed_page(name: &str) -> String {
    let mut cells = FIELDS;
    cells[1] = name;
    sheet_page(&[format!("<tbody>{}</tbody>", row(&cells))])
}

/// Open individual page: each body holds the lifter line then a detail line
pub fn open_page(names: &[&str]) -> String {
    let bodies: String = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut cells = vec![];
            let number = (i + 1).to_string();
            cells.push(number.as_str());
            cells.extend_from_slice(&FIELDS);
            cells[2] = *name;
            format!("<tbody>{}<tr><td>Prochaine barre</td></tr></tbody>", row(&cells))
        })
        .collect();
    sheet_page(&[bodies])
}

pub struct ListingEntry<'a> {
    pub id: u32,
    pub name: &'a str,
    pub team: bool,
    pub open: bool,
}

pub fn listing_page(entries: &[ListingEntry]) -> String {
    let rows: String = entries
        .iter()
        .map(|e| {
            format!(
                "<tr><td><a href=\"/scoresheet/{}competition/view/{}\">{}</a></td>\
                 <td>Centre-Val de Loire</td><td>feminin</td><td>{}</td><td>Sam. 17 Jui 2023</td>\
                 <td>{}</td><td>Nationale</td></tr>",
                if e.team { "team/" } else { "" },
                e.id,
                e.name,
                if e.team { "Equipes" } else { "Individuel" },
                if e.open { "Ouverte" } else { "Terminée" },
            )
        })
        .collect();
    format!(
        "<html><body><table id=\"competitionSet\"><thead><tr><th>Compétition</th></tr></thead>\
         <tbody>{}</tbody></table></body></html>",
        rows
    )
}

pub fn meta(id: u32, name: &str, team: bool, open: bool) -> CompetitionMeta {
    CompetitionMeta {
        id,
        name: name.to_string(),
        team,
        gender: Gender::F,
        open,
        date: NaiveDate::from_ymd_opt(2023, 6, 17).unwrap(),
        serie: "Nationale".to_string(),
        region: "Centre-Val de Loire".to_string(),
    }
}

pub fn records(records: Vec<CacheRecord>) -> Records {
    records.into_iter().map(|r| (r.meta.id, r)).collect()
}
