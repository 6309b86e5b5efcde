//! Query command implementation.

use crate::cli::QueryArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::{build_meter, run_blocking};

/// Execute the query command.
pub async fn execute_query(args: QueryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let question = args.question.trim().to_string();
    if question.is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".to_string()));
    }

    let profile = config.get_active_profile()?.clone();
    let meter_config = config.meter_config()?;

    let result = run_blocking(config.settings.evaluation_timeout_secs, move || {
        let meter = build_meter(&profile, meter_config)?;
        Ok(meter.evaluate_query(&question)?)
    })
    .await?;

    println!("{}", formatter.format_evaluation(&result)?);
    Ok(())
}
