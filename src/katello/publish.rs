//! Incremental version publishing and task polling.

use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::{debug, info};
use serde_json::{json, Value};

use crate::api::Api;
use crate::config::{ApiBases, LIBRARY_ENVIRONMENT_ID};
use crate::error::Result;
use crate::katello::models::{ContentView, ContentViewVersion, Task};

/// Selects the content view version currently promoted to Library as the
/// baseline for the incremental update.
///
/// All versions are iterated and the last Library match wins; the server is
/// not expected to report more than one version in Library at a time, but
/// that is not checked here.
pub fn select_baseline<'a>(
    cv: &'a ContentView,
    errata_count: usize,
) -> Option<&'a ContentViewVersion> {
    let mut baseline = None;
    for version in &cv.versions {
        if version.environment_ids.contains(&LIBRARY_ENVIRONMENT_ID) {
            info!(
                "Selected content-view {} (version {}) as baseline to include {} errata.",
                cv.name, version.version, errata_count
            );
            baseline = Some(version);
        } else {
            debug!(
                "Skipping content-view {} (version {}): Not in Library.",
                cv.name, version.version
            );
        }
    }
    baseline
}

/// Body for `POST content_view_versions/incremental_update`.
pub fn incremental_update_payload(
    baseline: &ContentViewVersion,
    errata_ids: &[String],
    propagate: bool,
) -> Value {
    let mut payload = json!({
        "resolve_dependencies": 1,
        "add_content": { "errata_ids": errata_ids },
        "content_view_version_environments": [ {
            "content_view_version_id": baseline.id,
            "environment_ids": [ LIBRARY_ENVIRONMENT_ID ]
        } ]
    });
    if propagate {
        payload["propagate_all_composites"] = json!(1);
    }
    payload
}

/// Submits the incremental update and waits for the server-side task to
/// reach a terminal state. Returns the terminal task; the caller decides
/// what a non-success result means.
pub fn publish_incremental(
    api: &dyn Api,
    bases: &ApiBases,
    payload: &Value,
    poll_interval: Duration,
) -> Result<Task> {
    info!("Publishing incremental content-view version.");
    let url = bases.katello("content_view_versions/incremental_update");
    let body = api.post_json(&url, payload)?;
    let task: Task =
        serde_json::from_value(body).context("incremental_update did not return a task")?;
    wait_for_task(api, bases, task, poll_interval)
}

/// Polls the task until it leaves the pending state.
///
/// A fixed sleep between polls is the whole load-shedding strategy: no
/// backoff, no retry cap, no deadline. Publish tasks can run for many
/// minutes and the run has nothing else to do meanwhile.
pub fn wait_for_task(
    api: &dyn Api,
    bases: &ApiBases,
    task: Task,
    poll_interval: Duration,
) -> Result<Task> {
    let mut task = task;
    let mut progress = 0.0f64;
    while task.pending {
        info!(
            "Waiting for publishing task to complete: {}%.",
            progress as i64
        );
        thread::sleep(poll_interval);
        let url = bases.tasks(&format!("tasks/{}", task.id));
        let body = api.get_json(&url, &[])?;
        task = serde_json::from_value(body)
            .with_context(|| format!("task {} poll returned an unexpected shape", task.id))?;
        progress = task.progress * 100.0;
    }
    Ok(task)
}
