//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::{build_meter, run_blocking};
use std::fs;
use std::io::{self, Read};

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_input(&args, &mut io::stdin())?;

    let profile = config.get_active_profile()?.clone();
    let meter_config = config.meter_config()?;

    let result = run_blocking(config.settings.evaluation_timeout_secs, move || {
        let meter = build_meter(&profile, meter_config)?;
        Ok(meter.evaluate(&text))
    })
    .await?;

    println!("{}", formatter.format_evaluation(&result)?);
    Ok(())
}

/// Resolve the text to check from the argument, a file, or `stdin`.
fn read_input(args: &CheckArgs, stdin: &mut impl Read) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return Ok(fs::read_to_string(path)?);
    }
    if args.stdin {
        let mut text = String::new();
        stdin.read_to_string(&mut text)?;
        return Ok(text);
    }
    Err(CliError::InvalidInput(
        "Provide text to check, --file <path>, or --stdin".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn args(text: Option<&str>, file: Option<std::path::PathBuf>, stdin: bool) -> CheckArgs {
        CheckArgs {
            text: text.map(str::to_string),
            file,
            stdin,
        }
    }

    #[test]
    fn test_inline_text() {
        let text = read_input(&args(Some("Paris is in France."), None, false), &mut io::empty()).unwrap();
        assert_eq!(text, "Paris is in France.");
    }

    #[test]
    fn test_file_input() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "Water boils at 100 degrees.").unwrap();

        let text = read_input(&args(None, Some(file.path().to_path_buf()), false), &mut io::empty())
            .unwrap();
        assert_eq!(text, "Water boils at 100 degrees.");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_input(&args(None, Some(dir.path().join("none.txt")), false), &mut io::empty());
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_stdin_input() {
        let mut stdin = Cursor::new("Mount Everest is 8849 metres tall.");
        let text = read_input(&args(None, None, true), &mut stdin).unwrap();
        assert_eq!(text, "Mount Everest is 8849 metres tall.");
    }

    #[test]
    fn test_no_input_source() {
        let result = read_input(&args(None, None, false), &mut io::empty());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
