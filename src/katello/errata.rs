//! Errata search composition and per-repository collection.
//!
//! The search expression is handed to the server-side query language, so its
//! syntax has to stay exact: types lower-cased, severities title-cased, date
//! bounds quoted.

use std::collections::HashSet;

use log::info;

use crate::api::Api;
use crate::config::ApiBases;
use crate::error::Result;
use crate::katello::models::{ContentView, Erratum, SearchResults};
use crate::katello::resolver::parse_results;

/// Type, severity and date bounds for one content view scan.
#[derive(Debug, Clone)]
pub struct ErrataFilter {
    types: Vec<String>,
    severities: Vec<String>,
    from_date: String,
    to_date: Option<String>,
}

impl ErrataFilter {
    pub fn new(
        types: &[String],
        severities: &[String],
        from_date: String,
        to_date: Option<String>,
    ) -> Self {
        Self {
            types: types.to_vec(),
            severities: severities.to_vec(),
            from_date,
            to_date,
        }
    }

    /// The combined server-side search expression, e.g.
    /// `(type = security) and (severity = Critical or severity = Important)
    /// and updated > '2024/01/01'`.
    pub fn search_expression(&self) -> String {
        let mut search = format!(
            "{} and {} and updated > '{}'",
            type_clause(&self.types),
            severity_clause(&self.severities),
            self.from_date
        );
        if let Some(to_date) = &self.to_date {
            search.push_str(&format!(" and updated < '{}'", to_date));
        }
        search
    }
}

fn type_clause(types: &[String]) -> String {
    let tokens: Vec<String> = types.iter().map(|t| t.to_lowercase()).collect();
    format!("(type = {})", tokens.join(" or type = "))
}

fn severity_clause(severities: &[String]) -> String {
    let tokens: Vec<String> = severities.iter().map(|s| capitalize(s)).collect();
    format!("(severity = {})", tokens.join(" or severity = "))
}

/// First letter upper-cased, the rest lower-cased, independent of input case.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Scans every repository attached to the content view and returns the
/// matching errata ids, deduplicated while keeping first-seen order.
pub fn collect_errata(
    api: &dyn Api,
    bases: &ApiBases,
    cv: &ContentView,
    filter: &ErrataFilter,
) -> Result<Vec<String>> {
    let search = filter.search_expression();
    let url = bases.katello("errata");
    let mut errata_ids = Vec::new();

    for repo in &cv.repositories {
        info!("Searching for errata in repository {}", repo.name);
        let query = [
            ("repository_id", repo.id.to_string()),
            ("paged", "false".to_string()),
            ("errata_restrict_applicable", "false".to_string()),
            ("errata_restrict_installable", "false".to_string()),
            ("search", search.clone()),
        ];
        let body = api.get_json(&url, &query)?;
        let found: SearchResults<Erratum> = parse_results(body, "errata")?;

        for erratum in found.results {
            info!(
                "Found {} ({} - {}) errata. Reboot suggested: {}.",
                erratum.errata_id,
                capitalize(&erratum.kind),
                erratum.severity,
                if erratum.reboot_suggested { "Yes" } else { "No" }
            );
            errata_ids.push(erratum.errata_id);
        }
    }

    Ok(dedup(errata_ids))
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
