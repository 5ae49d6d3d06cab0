//! Loading generator tuning from TOML files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_runner_core::GeneratorConfig;

/// Loads the tuning at `path`, falling back to the defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read generator config {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("failed to load generator config {}", path.display()))
}

/// Parses tuning from TOML text; missing keys take their default values.
pub(crate) fn parse_config(contents: &str) -> Result<GeneratorConfig> {
    toml::from_str(contents).context("failed to parse generator config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::GoalStrategy;

    #[test]
    fn missing_path_uses_defaults() {
        let config = load_config(None).expect("defaults load");
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn loads_config_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "maze-runner-settings-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "max_attempts = 3\n[goal]\nstrategy = \"farthest\"\n")
            .expect("write temp config");

        let loaded = load_config(Some(&path));
        let _ = fs::remove_file(&path);
        let config = loaded.expect("config loads");

        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.goal.strategy, GoalStrategy::Farthest);
    }

    #[test]
    fn unreadable_path_reports_context() {
        let error = load_config(Some(Path::new("/definitely/not/here.toml")))
            .expect_err("missing file must fail");
        assert!(error.to_string().contains("failed to read generator config"));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(parse_config("loops = 3").is_err());
    }
}
