//! Standings table extraction from uncontrolled HTML.
//!
//! The source page is a WordPress sports-league plugin whose markup shifts
//! without notice, so parsing is deliberately position-based rather than
//! header-based: cell 0 is treated as the position, cell 1 as the team name,
//! cell 2 as games played. A header row, if present, is dropped naturally
//! because its position cell does not parse as an integer.
//!
//! Points are located heuristically: standings tables conventionally put a
//! derived differential in the last numeric column and cumulative points
//! just before it, so the second-to-last integer-parseable cell wins. This
//! is a known accuracy limitation on irregular tables, accepted in exchange
//! for resilience to column reordering.

use scraper::{Html, Selector};

use crate::domain::{Extraction, TeamRow};

/// Parse the first table in `html` into standings plus an optional
/// highlighted row for the team matching `team_query` (case-insensitive
/// substring). No table at all is a valid empty result, not an error.
///
/// Pure function of its inputs: repeated calls on the same markup yield
/// identical output.
pub fn extract_standings(html: &str, team_query: &str) -> Extraction {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").expect("static selector");
    let tbody_row_sel = Selector::parse("tbody tr").expect("static selector");
    let row_sel = Selector::parse("tr").expect("static selector");
    let cell_sel = Selector::parse("td, th").expect("static selector");

    let Some(table) = document.select(&table_sel).next() else {
        return Extraction::default();
    };

    // Prefer tbody rows; fall back to every row under the table when the
    // markup has no distinct body section.
    let mut rows: Vec<TeamRow> = Vec::new();
    let row_elements: Vec<_> = {
        let body_rows: Vec<_> = table.select(&tbody_row_sel).collect();
        if body_rows.is_empty() {
            table.select(&row_sel).collect()
        } else {
            body_rows
        }
    };

    for tr in row_elements {
        let cells: Vec<String> = tr
            .select(&cell_sel)
            .map(|cell| normalize_ws(&cell.text().collect::<String>()))
            .collect();
        if let Some(row) = row_from_cells(&cells) {
            rows.push(row);
        }
    }

    // Highlight is chosen among retained rows in original table order,
    // before sorting, so it does not depend on where the team lands in the
    // standings. Unretained rows (header rows, rows without a position)
    // cannot be highlighted.
    let query = team_query.to_lowercase();
    let highlight = if query.is_empty() {
        None
    } else {
        rows.iter()
            .filter(|row| row.is_retained())
            .find(|row| row.team_name.to_lowercase().contains(&query))
            .cloned()
    };

    let mut standings: Vec<TeamRow> = rows.into_iter().filter(TeamRow::is_retained).collect();
    standings.sort_by_key(|row| row.position);

    Extraction {
        standings,
        highlight,
    }
}

/// Map one row's normalized cell texts to a [`TeamRow`].
///
/// Pure and markup-free so the positional mapping and points heuristic can
/// be tested against literal cell arrays. Rows with fewer than 3 cells are
/// not standings entries and yield `None`.
pub fn row_from_cells(cells: &[String]) -> Option<TeamRow> {
    if cells.len() < 3 {
        return None;
    }

    let position = parse_int(&cells[0]).and_then(|n| u32::try_from(n).ok());
    let team_name = cells[1].clone();
    let games_played = parse_int(&cells[2]).and_then(|n| u32::try_from(n).ok());

    let integers: Vec<i64> = cells.iter().filter_map(|cell| parse_int(cell)).collect();
    let points = match integers.len() {
        0 => None,
        1 => Some(integers[0]),
        n => Some(integers[n - 2]),
    };

    Some(TeamRow {
        position,
        team_name,
        games_played,
        points,
        raw_cells: cells.to_vec(),
    })
}

/// Collapse every run of whitespace to a single space and trim the ends.
fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Integer parse tolerant of a leading `+` (goal differentials render as
/// `+12` on the source page).
fn parse_int(cell: &str) -> Option<i64> {
    let trimmed = cell.trim();
    let stripped = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if stripped.is_empty() {
        return None;
    }
    stripped.parse().ok()
}
