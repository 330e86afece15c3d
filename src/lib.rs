//! errata2cv - Content view errata updater for Katello/Satellite servers.
//!
//! Scans one or more content views for newly available errata matching
//! type/severity/date filters, publishes an incremental content-view version
//! containing them, optionally propagates the version to composite content
//! views, and optionally triggers remote installation of the errata on hosts
//! in named lifecycle environments.
//!
//! The crate is a single sequential pipeline over the Satellite REST APIs:
//!
//! - [`cli`]: command-line surface
//! - [`config`]: immutable run configuration
//! - [`api`]: authenticated JSON GET/POST helpers behind the [`api::Api`] seam
//! - [`katello`]: API models, content-view resolution, errata collection,
//!   incremental publishing with task polling, remote-execution trigger
//! - [`workflow`]: the per-content-view loop tying it together

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod katello;
pub mod workflow;
