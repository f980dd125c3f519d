use std::process::ExitCode;

mod archive;
mod cli;
mod config;
mod library;
mod media;
mod runtime;
mod split;

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli::build_cli().get_matches();
    runtime::run(&matches)
}
