mod config;
mod db;
mod error;
mod export;
mod format;
mod ledger;
mod models;
mod query;
mod report;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    config::init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    let db = db::Database::open(&config.db_path)?;
    let ledger = ledger::Ledger::new(db, config.categories);

    run::as_cli(&args, &ledger)
}
