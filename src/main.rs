use std::io::Write;
use std::process;

use chrono::Local;
use clap::Parser;
use log::LevelFilter;

use errata2cv::api::ApiClient;
use errata2cv::cli::Args;
use errata2cv::config::Config;
use errata2cv::error::{ExitCode, Result};
use errata2cv::workflow;

fn main() {
    // clap exits with code 2 and a usage message on its own
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args) {
        eprintln!("\nAn error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::resolve(args)?;
    let client = ApiClient::new(config.credentials.clone(), config.ssl_verify)?;
    workflow::run(&client, &config)
}

/// All status goes to stdout as leveled log lines; `--debug` adds the raw
/// GET/POST request and response bodies.
fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
