//! SkillStack command-line client.

mod cli;
mod commands;
mod paths;

use std::fs::{self, File};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};
use skillstack_api::config::ClientConfig;

use crate::cli::Cli;

fn init_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("warning: cannot create {}: {e}", path.display()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ClientConfig::from_env().timeout(Duration::from_secs(cli.timeout));
    if let Some(url) = cli.url {
        config.url = Some(url);
    }
    if let Some(token) = cli.csrf_token {
        config.csrf_token = Some(token);
    }
    if let Some(session) = cli.session {
        config.session = Some(session);
    }

    match commands::run(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
