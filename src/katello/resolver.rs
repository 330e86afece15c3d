//! Organization and content view lookups.

use anyhow::Context;
use chrono::NaiveDate;
use log::debug;
use serde_json::Value;

use crate::api::Api;
use crate::config::ApiBases;
use crate::error::Result;
use crate::katello::models::{ContentView, Organization, SearchResults};

/// Page size for the list-all-content-views pagination loop.
const CONTENT_VIEW_PAGE_SIZE: u64 = 100;

/// Resolves the organization by name. Any failure here (unknown name,
/// transport error) aborts the run.
pub fn find_organization(api: &dyn Api, bases: &ApiBases, name: &str) -> Result<Organization> {
    let url = bases.katello(&format!("organizations/{}", name));
    let body = api.get_json(&url, &[])?;
    serde_json::from_value(body)
        .with_context(|| format!("Organization {} could not be resolved", name))
}

fn content_views_url(bases: &ApiBases, org: &Organization) -> String {
    bases.katello(&format!("organizations/{}/content_views", org.id))
}

/// Looks up a single non-composite, non-default content view by name.
///
/// Returns `Ok(None)` when the server knows no such view, which the caller
/// treats as a per-view skip; transport and decode errors stay fatal.
pub fn find_content_view(
    api: &dyn Api,
    bases: &ApiBases,
    org: &Organization,
    name: &str,
) -> Result<Option<ContentView>> {
    let query = [
        ("noncomposite", "1".to_string()),
        ("nondefault", "1".to_string()),
        ("search", format!("name={}", name)),
    ];
    let body = api.get_json(&content_views_url(bases, org), &query)?;
    let mut found: SearchResults<ContentView> = parse_results(body, "content_views")?;
    if found.results.is_empty() {
        Ok(None)
    } else {
        Ok(Some(found.results.swap_remove(0)))
    }
}

/// Lists the names of every non-composite, non-default content view in the
/// organization, walking the server-side pagination until a short page.
pub fn list_content_view_names(
    api: &dyn Api,
    bases: &ApiBases,
    org: &Organization,
) -> Result<Vec<String>> {
    let url = content_views_url(bases, org);
    let mut names = Vec::new();
    let mut page = 1u64;
    loop {
        let query = [
            ("noncomposite", "1".to_string()),
            ("nondefault", "1".to_string()),
            ("per_page", CONTENT_VIEW_PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        let body = api.get_json(&url, &query)?;
        let found: SearchResults<ContentView> = parse_results(body, "content_views")?;
        let count = found.results.len() as u64;
        names.extend(found.results.into_iter().map(|cv| cv.name));
        if count < CONTENT_VIEW_PAGE_SIZE {
            return Ok(names);
        }
        page += 1;
    }
}

/// The lower date bound for the errata search, in `YYYY/MM/DD`.
///
/// An explicit `--from-date` wins verbatim; otherwise the content view's
/// last published timestamp is used, defaulting to the epoch when the view
/// was never published.
pub fn effective_from_date(
    explicit: Option<&str>,
    last_published: Option<&str>,
) -> Result<String> {
    if let Some(date) = explicit {
        return Ok(date.to_string());
    }

    let timestamp = last_published.unwrap_or("1970-01-01 00:00:00 UTC");
    let date_part = timestamp.split_whitespace().next().unwrap_or_default();
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .with_context(|| format!("Unexpected last_published timestamp: {}", timestamp))?;
    let from_date = date.format("%Y/%m/%d").to_string();
    debug!("Using {} as start date.", from_date);
    Ok(from_date)
}

pub(crate) fn parse_results<T>(body: Value, endpoint: &str) -> Result<SearchResults<T>>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(body)
        .with_context(|| format!("Unexpected response shape from {}", endpoint))
}
