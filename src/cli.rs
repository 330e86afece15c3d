use clap::Parser;

/// Update Satellite content views with new errata
#[derive(Parser, Debug)]
#[command(name = "errata2cv")]
#[command(version)]
#[command(about = "Satellite 6 - Content View Errata Updater", long_about = None)]
pub struct Args {
    /// Comma-separated list of content view names to update. If the keyword
    /// "all" is specified, all existing content views in the organization
    /// will be updated
    #[arg(long, value_name = "NAMES")]
    pub cv: String,

    /// Comma-separated list of errata types to include (bugfix, enhancement
    /// or security)
    #[arg(long = "type", value_name = "TYPES", default_value = "security")]
    pub types: String,

    /// Comma-separated list of errata severity levels to include (critical,
    /// important, moderate or low)
    #[arg(long, value_name = "LEVELS", default_value = "critical")]
    pub severity: String,

    /// Date to use as a reference instead of the content view publishing
    /// date (YYYY/MM/DD)
    #[arg(long, value_name = "DATE", default_value = "")]
    pub from_date: String,

    /// Date to use as a reference to stop including errata (YYYY/MM/DD)
    #[arg(long, value_name = "DATE", default_value = "")]
    pub to_date: String,

    /// Propagate the incremental version to composite content views
    #[arg(long)]
    pub propagate: bool,

    /// Comma-separated list of lifecycle environments whose hosts should get
    /// the included errata installed
    #[arg(long, value_name = "ENVS", default_value = "")]
    pub update_hosts: String,

    /// Check for errata but don't update content views nor update hosts
    #[arg(long)]
    pub dry_run: bool,

    /// Satellite organization to work with
    #[arg(short, long)]
    pub organization: String,

    /// Username to authenticate with
    #[arg(short, long)]
    pub username: String,

    /// Password for the given username; prompted interactively when the flag
    /// is given without a value
    #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
    pub password: String,

    /// Satellite base URL. Eg: https://satellite.default/
    #[arg(short, long)]
    pub server_url: String,

    /// Show debug information (including GET/POST requests)
    #[arg(short, long)]
    pub debug: bool,

    /// Seconds to wait between publish-task polls
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    pub poll_interval: u64,
}
