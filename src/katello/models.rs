//! Serde views of the Katello/Foreman API responses.
//!
//! Only the fields the workflow reads are modeled; everything else in the
//! server payloads is ignored. All entities are transient, owned by the
//! current iteration of the main loop, never persisted.

use serde::{de, Deserialize, Deserializer};

/// Paged search envelope common to the list endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchResults<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
}

#[derive(Debug, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentView {
    pub id: u64,
    pub name: String,
    /// `YYYY-MM-DD HH:MM:SS TZ`, null when the view was never published.
    pub last_published: Option<String>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub versions: Vec<ContentViewVersion>,
}

#[derive(Debug, Deserialize)]
pub struct ContentViewVersion {
    pub id: u64,
    pub version: String,
    /// Lifecycle environment ids this version is currently promoted to.
    #[serde(default)]
    pub environment_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Erratum {
    /// Vendor-assigned advisory id, e.g. `RHSA-2024:0001`.
    pub errata_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub reboot_suggested: bool,
}

/// A long-running foreman task, re-fetched until it leaves `pending`.
#[derive(Debug, Deserialize)]
pub struct Task {
    pub id: String,
    pub pending: bool,
    /// Fractional completion, `0.05` meaning 5%. The server sometimes
    /// serializes this as a string.
    #[serde(default, deserialize_with = "fraction_from_number_or_string")]
    pub progress: f64,
    pub result: Option<String>,
}

impl Task {
    pub fn succeeded(&self) -> bool {
        self.result.as_deref() == Some("success")
    }
}

#[derive(Debug, Deserialize)]
pub struct JobTemplate {
    pub id: u64,
    pub name: String,
}

fn fraction_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(de::Error::custom),
    }
}
