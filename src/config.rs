//! Run configuration resolved once from the command line.
//!
//! Everything the workflow needs (API bases, credentials, filters, flags) is
//! collected into an immutable [`Config`] at startup and passed by reference
//! from there on; no component reads ambient global state.

use std::time::Duration;

use crate::cli::Args;
use crate::error::Result;

/// The reserved Library lifecycle environment id.
pub const LIBRARY_ENVIRONMENT_ID: u64 = 1;

/// Which content views a run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentViewSelector {
    /// Every non-composite, non-default content view in the organization.
    All,
    /// An explicit list of content view names, in input order.
    Names(Vec<String>),
}

/// HTTP Basic auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The three API roots derived from the server base URL.
///
/// Derivation is plain string concatenation, so the base URL must carry its
/// trailing slash (`https://satellite.default/`).
#[derive(Debug, Clone)]
pub struct ApiBases {
    satellite: String,
    katello: String,
    tasks: String,
}

impl ApiBases {
    pub fn new(server_url: &str) -> Self {
        Self {
            satellite: format!("{}api/v2/", server_url),
            katello: format!("{}katello/api/v2/", server_url),
            tasks: format!("{}foreman_tasks/api/", server_url),
        }
    }

    /// Endpoint under the core Foreman API (job templates, job invocations).
    pub fn satellite(&self, endpoint: &str) -> String {
        format!("{}{}", self.satellite, endpoint)
    }

    /// Endpoint under the Katello API (organizations, content views, errata).
    pub fn katello(&self, endpoint: &str) -> String {
        format!("{}{}", self.katello, endpoint)
    }

    /// Endpoint under the foreman-tasks API (task polling).
    pub fn tasks(&self, endpoint: &str) -> String {
        format!("{}{}", self.tasks, endpoint)
    }
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub selector: ContentViewSelector,
    /// Errata type tokens, lower-cased.
    pub types: Vec<String>,
    /// Errata severity tokens, lower-cased; title-cased when queries are built.
    pub severities: Vec<String>,
    /// Explicit lower date bound (YYYY/MM/DD); None falls back to the content
    /// view's last published date.
    pub from_date: Option<String>,
    /// Optional upper date bound (YYYY/MM/DD).
    pub to_date: Option<String>,
    pub propagate: bool,
    /// Lifecycle environments whose hosts get the errata installed.
    pub update_hosts: Vec<String>,
    pub dry_run: bool,
    pub organization: String,
    pub credentials: Credentials,
    pub bases: ApiBases,
    /// Sleep between publish-task polls.
    pub poll_interval: Duration,
    /// Verify the server TLS certificate. Satellite installs commonly run
    /// with self-signed certificates, so this stays off.
    pub ssl_verify: bool,
}

impl Config {
    /// Resolve the run configuration from parsed arguments, prompting for
    /// the password when `-p` was given without a value.
    pub fn resolve(args: Args) -> Result<Self> {
        let password = if args.password.is_empty() {
            rpassword::prompt_password("Password: ")?
        } else {
            args.password
        };

        Ok(Self {
            selector: selector_from(&args.cv),
            types: split_lowercase(&args.types),
            severities: split_lowercase(&args.severity),
            from_date: non_empty(args.from_date),
            to_date: non_empty(args.to_date),
            propagate: args.propagate,
            update_hosts: split_list(&args.update_hosts),
            dry_run: args.dry_run,
            organization: args.organization,
            credentials: Credentials {
                username: args.username,
                password,
            },
            bases: ApiBases::new(&args.server_url),
            poll_interval: Duration::from_secs(args.poll_interval),
            ssl_verify: false,
        })
    }
}

fn selector_from(cv: &str) -> ContentViewSelector {
    if cv.eq_ignore_ascii_case("all") {
        ContentViewSelector::All
    } else {
        ContentViewSelector::Names(split_list(cv))
    }
}

fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}

fn split_lowercase(value: &str) -> Vec<String> {
    value.split(',').map(str::to_lowercase).collect()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
