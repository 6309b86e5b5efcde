//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs, SetProfileArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set(args) => set_profile(config, args, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// Describe a profile, one `key: value` line each, with `indent`.
fn describe(profile: &Profile, indent: &str) -> String {
    let mut lines = vec![
        format!("{}Provider: {}", indent, profile.llm_provider),
        format!(
            "{}Model: {}",
            indent,
            profile.model.as_deref().unwrap_or("(provider default)")
        ),
    ];
    if let Some(endpoint) = &profile.endpoint {
        lines.push(format!("{}Endpoint: {}", indent, endpoint));
    }
    lines.push(format!("{}Retrieval: {}", indent, profile.retrieval_method));
    lines.push(format!(
        "{}Scoring: {}",
        indent,
        if profile.use_llm_verification {
            "model verification"
        } else {
            "embedding similarity"
        }
    ));
    lines.push(format!(
        "{}Embeddings: {}",
        indent,
        match (&profile.embedding_provider, &profile.embedding_model) {
            (Some(provider), Some(model)) => format!("{} ({})", provider, model),
            (Some(provider), None) => provider.clone(),
            (None, _) => "none".to_string(),
        }
    ));
    lines.join("\n")
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        println!("{}", describe(profile, "    "));
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("{}", describe(profile, "  "));

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(config: &mut Config, args: SetProfileArgs, formatter: &Formatter) -> Result<()> {
    let profile = Profile {
        llm_provider: args.provider.trim().to_ascii_lowercase(),
        model: args.model,
        endpoint: args.endpoint,
        retrieval_method: args.retrieval.into(),
        use_llm_verification: !args.similarity,
        embedding_provider: args.embedding_provider.map(|p| p.trim().to_ascii_lowercase()),
        embedding_model: args.embedding_model,
    };

    let action = if config.profiles.contains_key(&args.name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(args.name.clone(), profile)?;
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, args.name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if config.delete_profile(&name)? {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RetrievalArg;
    use crate::config::OutputFormat;
    use tempfile::TempDir;
    use truthlens_retrieval::RetrievalMode;

    fn temp_config(dir: &TempDir) -> Config {
        Config::load_from(&dir.path().join("config.toml")).unwrap()
    }

    fn set_args(name: &str, provider: &str) -> SetProfileArgs {
        SetProfileArgs {
            name: name.to_string(),
            provider: provider.to_string(),
            model: None,
            endpoint: None,
            retrieval: RetrievalArg::Wikipedia,
            similarity: false,
            embedding_provider: None,
            embedding_model: None,
        }
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let mut args = set_args("local", "Ollama");
        args.similarity = true;
        args.retrieval = RetrievalArg::Vector;
        args.embedding_provider = Some("ollama".to_string());
        set_profile(&mut config, args, &formatter).unwrap();

        let profile = &config.profiles["local"];
        assert_eq!(profile.llm_provider, "ollama");
        assert!(!profile.use_llm_verification);
        assert_eq!(profile.retrieval_method, RetrievalMode::Vector);

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "local");
        assert!(reloaded.profiles.contains_key("local"));
    }

    #[test]
    fn test_set_rejects_unknown_provider() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        assert!(set_profile(&mut config, set_args("bad", "gemini"), &formatter).is_err());
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_delete_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(&mut config, set_args("spare", "anthropic"), &formatter).unwrap();
        delete_profile(&mut config, "spare".to_string(), &formatter).unwrap();
        assert!(!config.profiles.contains_key("spare"));

        assert!(delete_profile(&mut config, "default".to_string(), &formatter).is_err());
    }

    #[test]
    fn test_describe_profile() {
        let text = describe(&Profile::default(), "");
        assert!(text.contains("Provider: openai"));
        assert!(text.contains("Model: (provider default)"));
        assert!(text.contains("Scoring: model verification"));
        assert!(text.contains("Embeddings: openai"));
    }
}
