mod db;
mod export;
mod models;
mod report;
mod run;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = run::Cli::parse();
    let Some(command) = cli.command else {
        return run::print_usage();
    };

    let mut db = db::Database::open(&cli.data_file);
    let stdout = std::io::stdout();
    run::as_cli(command, &mut db, &mut stdout.lock())
}
