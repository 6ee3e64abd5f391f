//! Domain types for one extraction run.

use serde::{Deserialize, Serialize};

/// One standings entry parsed from the league table.
///
/// Everything except the team name is best-effort: the source page's markup
/// is uncontrolled, so numeric cells that fail to parse become `None` rather
/// than failing the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRow {
    /// League position. Rows without a parseable position never enter the
    /// standings (see [`TeamRow::is_retained`]).
    pub position: Option<u32>,
    /// Team name as displayed on the page.
    pub team_name: String,
    /// Games played, when the third column parses as an integer.
    pub games_played: Option<u32>,
    /// Cumulative points, located heuristically (see the extract module).
    pub points: Option<i64>,
    /// Normalized text of every cell in the row, kept for diagnostics.
    pub raw_cells: Vec<String>,
}

impl TeamRow {
    /// Retention invariant: a row belongs in the standings only when both
    /// its position and team name survived parsing.
    pub fn is_retained(&self) -> bool {
        self.position.is_some() && !self.team_name.is_empty()
    }
}

/// Result of one table extraction: rows sorted ascending by position, plus
/// the team of interest if it appeared anywhere in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Retained rows, ascending by position.
    pub standings: Vec<TeamRow>,
    /// First row (in original table order) whose team name matched the
    /// configured substring. Independent of the sorted order above.
    pub highlight: Option<TeamRow>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}
