//! Search results page

use crate::search::{SearchOutcome, SearchResult};

/// Unquoted results are listed only while fewer exact results than this are shown
pub const UNQUOTED_DISPLAY_THRESHOLD: usize = 3;

fn result_card(result: &SearchResult<'_>) -> String {
    let document = result.document;
    let mut out = format!("#### [{}](/entity/{})\n", document.label(), document.id);
    if let Some(description) = document.description().filter(|d| !d.is_empty()) {
        out.push_str(&format!("{}\n", description));
    }
    if !result.exacts.is_empty() {
        out.push_str(&format!("_{}_\n", result.exacts.join(", ")));
    }
    out
}

fn result_list(results: &[SearchResult<'_>]) -> String {
    results
        .iter()
        .map(result_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Results page; `outcome` is absent until a search has run
///
/// The term is shown as the reader typed it.
pub fn render(term: Option<&str>, outcome: Option<&SearchOutcome<'_>>) -> String {
    let mut out = String::from("# Search\n");
    let Some(outcome) = outcome else {
        if term.is_none() {
            out.push_str("\nType a query, e.g. `search \"Yale College\" 1850`\n");
        }
        return out;
    };
    let term = outcome.query.original.as_str();
    let results = &outcome.refined.results;

    out.push_str(&format!("\n##### {} results for {}\n", results.len(), term));
    if !results.is_empty() {
        out.push('\n');
        out.push_str(&result_list(results));
    }

    if let Some(unquoted) = &outcome.refined.unquoted_results {
        if results.len() < UNQUOTED_DISPLAY_THRESHOLD {
            out.push_str(&format!(
                "\n##### {} additional results for {} without quotes\n",
                unquoted.len(),
                term
            ));
            if !unquoted.is_empty() {
                out.push('\n');
                out.push_str(&result_list(unquoted));
            }
        }
    }
    out
}
