use clap::Parser as _;
use std::process::ExitCode;

mod cli;
mod config;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("{err:#}");
            ExitCode::from(cli::exit_code(&err))
        }
    }
}
