//! Remote-execution trigger for installing errata on hosts.
//!
//! Fire-and-forget: the job invocation is submitted and never polled.

use anyhow::Context;
use log::info;
use serde_json::json;

use crate::api::Api;
use crate::config::ApiBases;
use crate::error::Result;
use crate::katello::models::{JobTemplate, SearchResults};
use crate::katello::resolver::parse_results;

/// Name of the stock Katello remote-execution template for errata installs.
pub const INSTALL_ERRATA_TEMPLATE: &str = "Install Errata - Katello SSH Default";

/// Host search query targeting hosts in the given lifecycle environments to
/// which any of the given errata still applies.
pub fn host_search_query(environments: &[String], errata_ids: &[String]) -> String {
    let environments_search = format!(
        "(lifecycle_environment={})",
        environments.join(" or lifecycle_environment=")
    );
    let applicable_search = format!(
        "(applicable_errata={})",
        errata_ids.join(" or applicable_errata=")
    );
    format!("{} and {}", environments_search, applicable_search)
}

/// Looks up the errata-install job template and invokes it against hosts in
/// the given lifecycle environments. A missing template is informational,
/// not an error.
pub fn install_errata(
    api: &dyn Api,
    bases: &ApiBases,
    environments: &[String],
    errata_ids: &[String],
) -> Result<()> {
    let search_query = host_search_query(environments, errata_ids);

    let template_url = bases.satellite("job_templates");
    let query = [(
        "search",
        format!("name = \"{}\"", INSTALL_ERRATA_TEMPLATE),
    )];
    let body = api.get_json(&template_url, &query)?;
    let found: SearchResults<JobTemplate> = parse_results(body, "job_templates")?;

    let Some(template) = found.results.first() else {
        info!(
            "Remote execution job \"{}\" not found. Skipping errata installation.",
            INSTALL_ERRATA_TEMPLATE
        );
        return Ok(());
    };

    let payload = json!({
        "job_invocation": {
            "job_template_id": template.id,
            "inputs": {
                "errata": errata_ids.join(",")
            },
            "search_query": search_query,
            "targeting_type": "static_query"
        }
    });
    api.post_json(&bases.satellite("job_invocations"), &payload)
        .context("Failed to invoke the errata installation job")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_host_search_query() {
        let query = host_search_query(
            &strings(&["Production", "QA"]),
            &strings(&["RHSA-1", "RHSA-2"]),
        );
        assert_eq!(
            query,
            "(lifecycle_environment=Production or lifecycle_environment=QA) \
             and (applicable_errata=RHSA-1 or applicable_errata=RHSA-2)"
        );
    }

    #[test]
    fn test_host_search_query_single_values() {
        let query = host_search_query(&strings(&["Production"]), &strings(&["RHSA-1"]));
        assert_eq!(
            query,
            "(lifecycle_environment=Production) and (applicable_errata=RHSA-1)"
        );
    }
}
