//! Message formatting for the webhook post.
//!
//! Plain structured text with Discord markdown accents. Five structural
//! rules, in order: title with period key and zone-fixed "as of" timestamp;
//! a lone no-data line when the standings are empty; a success or warning
//! line for the team of interest; then the top ten entries with the team of
//! interest marked.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::domain::Extraction;

/// How many standings entries the message lists.
const LISTING_LIMIT: usize = 10;

/// Render the extraction into one publish-ready message.
pub fn format_message(
    extraction: &Extraction,
    period_key: &str,
    now: DateTime<Tz>,
    team_query: &str,
    title: &str,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "🏒 **{title}** — {period_key} (as of {})\n",
        now.format("%a %d %b %H:%M %Z")
    ));

    if extraction.is_empty() {
        out.push_str("No standings data detected this week.\n");
        return out;
    }

    match &extraction.highlight {
        Some(team) => {
            out.push_str(&format!(
                "✅ {}: position {} — {} pts from {} games\n",
                team.team_name,
                opt(team.position),
                opt(team.points),
                opt(team.games_played),
            ));
        }
        None => {
            out.push_str(&format!(
                "⚠️ No team matching \"{team_query}\" detected this week\n"
            ));
        }
    }

    out.push('\n');
    for row in extraction.standings.iter().take(LISTING_LIMIT) {
        let marked = extraction
            .highlight
            .as_ref()
            .is_some_and(|h| h.team_name == row.team_name);
        let marker = if marked { "➡️ " } else { "" };
        out.push_str(&format!(
            "{marker}{}. {} — {} pts ({} GP)\n",
            opt(row.position),
            row.team_name,
            opt(row.points),
            opt(row.games_played),
        ));
    }

    out
}

/// Render an optional numeric field, with a dash for absent values.
fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
