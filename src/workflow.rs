//! The per-run pipeline: resolve the organization, then process each
//! requested content view one at a time, top to bottom, fully sequential.

use log::{debug, error, info, warn};

use crate::api::Api;
use crate::config::{Config, ContentViewSelector};
use crate::error::Result;
use crate::katello::errata::{collect_errata, ErrataFilter};
use crate::katello::jobs::install_errata;
use crate::katello::models::Organization;
use crate::katello::publish::{incremental_update_payload, publish_incremental, select_baseline};
use crate::katello::resolver::{
    effective_from_date, find_content_view, find_organization, list_content_view_names,
};

/// Runs the whole workflow once. Per-view problems (unknown name, failed
/// publish task) are logged and skipped; transport and decode errors abort.
pub fn run(api: &dyn Api, config: &Config) -> Result<()> {
    debug!("Looking for organization information.");
    let org = find_organization(api, &config.bases, &config.organization)?;

    let cv_names = match &config.selector {
        ContentViewSelector::All => {
            info!(
                "Getting list of all existing content views in organization {}.",
                config.organization
            );
            list_content_view_names(api, &config.bases, &org)?
        }
        ContentViewSelector::Names(names) => names.clone(),
    };

    for cv_name in &cv_names {
        process_content_view(api, config, &org, cv_name)?;
    }

    Ok(())
}

fn process_content_view(
    api: &dyn Api,
    config: &Config,
    org: &Organization,
    cv_name: &str,
) -> Result<()> {
    info!("Processing content-view {}.", cv_name);

    let Some(cv) = find_content_view(api, &config.bases, org, cv_name)? else {
        warn!("Skipping non existing content-view {}.", cv_name);
        return Ok(());
    };

    let from_date = effective_from_date(
        config.from_date.as_deref(),
        cv.last_published.as_deref(),
    )?;
    if let Some(to_date) = &config.to_date {
        debug!("Using {} as end date.", to_date);
    }

    let filter = ErrataFilter::new(
        &config.types,
        &config.severities,
        from_date,
        config.to_date.clone(),
    );
    let errata_ids = collect_errata(api, &config.bases, &cv, &filter)?;

    if errata_ids.is_empty() {
        info!("No new existing errata for {} CV.", cv.name);
        return Ok(());
    }

    let Some(baseline) = select_baseline(&cv, errata_ids.len()) else {
        error!(
            "No version of content-view {} is promoted to Library. Skipping.",
            cv.name
        );
        return Ok(());
    };
    let payload = incremental_update_payload(baseline, &errata_ids, config.propagate);

    if config.dry_run {
        info!(
            "Skipping incremental content-view and/or installation in hosts as dry-run was specified."
        );
        info!("Finished processing CV {}.", cv_name);
        return Ok(());
    }

    let task = publish_incremental(api, &config.bases, &payload, config.poll_interval)?;
    if !task.succeeded() {
        error!("Error publishing incremental content-view version. Skipping installation in hosts.");
        return Ok(());
    }

    if !config.update_hosts.is_empty() {
        info!("Installing errata in hosts (if applicable).");
        install_errata(api, &config.bases, &config.update_hosts, &errata_ids)?;
    } else {
        debug!("Skipping errata installation as no host lifecycle environments were provided.");
    }

    info!("Finished processing CV {}.", cv_name);
    Ok(())
}
