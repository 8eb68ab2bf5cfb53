use std::path::PathBuf;
use crate::cli::commands::ImportArgs;
use crate::config::FixstatsConfig;
use crate::db::Database;
use crate::errors::FixstatsError;
use crate::ingest;

pub async fn handle_import(args: ImportArgs, config: FixstatsConfig) -> Result<(), FixstatsError> {
    let report = ingest::load_report_file(&PathBuf::from(&args.file)).await?;
    let db = Database::new(&args.db.unwrap_or_else(|| config.db_path()))?;
    let outcome = ingest::store_report(&db, &report, args.prompt.as_deref())?;

    println!(
        "Stored report for '{}': project {}, configuration {}, {} fixes, {}/{} errors inserted",
        report.project_name,
        outcome.project_id,
        outcome.config_id,
        outcome.number_of_fixes,
        outcome.total_errors_inserted,
        outcome.total_errors_in_report,
    );
    Ok(())
}
