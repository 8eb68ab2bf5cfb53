use console::style;
use crate::cli::commands::{AveragesArgs, StabilityArgs};
use crate::config::FixstatsConfig;
use crate::db::Database;
use crate::errors::FixstatsError;
use crate::models::{AverageSummary, StabilitySummary};
use crate::stats::{self, SingleRunPolicy, StabilitySignal};

/// Reading of a standard deviation for display. Below 0.5 the configuration
/// is highly stable, above 3 it is not.
pub fn stability_label(std_dev: f64) -> &'static str {
    if std_dev < 0.5 {
        "high"
    } else if std_dev > 3.0 {
        "low"
    } else {
        "moderate"
    }
}

pub async fn handle_averages(args: AveragesArgs, config: FixstatsConfig) -> Result<(), FixstatsError> {
    let db = Database::new(&args.db.unwrap_or_else(|| config.db_path()))?;
    let summaries = stats::project_averages(&db, args.project_id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", render_averages(&summaries));
    }
    Ok(())
}

pub async fn handle_stability(args: StabilityArgs, config: FixstatsConfig) -> Result<(), FixstatsError> {
    let mut options = config.stability_options();
    if let Some(signal) = args.signal.as_deref() {
        options.signal = signal.parse::<StabilitySignal>()?;
    }
    if args.omit_single_runs {
        options.single_run_policy = SingleRunPolicy::Omit;
    }

    let db = Database::new(&args.db.unwrap_or_else(|| config.db_path()))?;
    let summaries = stats::project_stability(&db, args.project_id, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("{} {}", style("Signal:").bold(), options.signal);
        print!("{}", render_stability(&summaries));
    }
    Ok(())
}

fn render_averages(summaries: &[AverageSummary]) -> String {
    if summaries.is_empty() {
        return "No results recorded for this project.\n".to_string();
    }
    let mut out = format!(
        "{}\n",
        style(format!("{:>8}  {:>8}  {:>8}  {:>12}  {:>10}", "config", "fixes", "errors", "high-quality", "time")).bold()
    );
    for s in summaries {
        out.push_str(&format!(
            "{:>8}  {:>8.2}  {:>8.2}  {:>12.2}  {:>10.2}\n",
            s.configuration_id, s.mean_fixes, s.mean_errors, s.mean_high_quality_errors, s.mean_duration
        ));
    }
    out
}

fn render_stability(summaries: &[StabilitySummary]) -> String {
    if summaries.is_empty() {
        return "No executed runs recorded for this project.\n".to_string();
    }
    let mut out = format!("{}\n", style(format!("{:>8}  {:>8}  {}", "config", "std_dev", "stability")).bold());
    for s in summaries {
        let label = stability_label(s.std_dev);
        let label = match label {
            "high" => style(label).green(),
            "low" => style(label).red(),
            _ => style(label).yellow(),
        };
        out.push_str(&format!("{:>8}  {:>8.3}  {}\n", s.configuration_id, s.std_dev, label));
    }
    out
}
