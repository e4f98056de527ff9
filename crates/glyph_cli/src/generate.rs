//! Icon generation command
//!
//! Loads `glyph.toml` (or the file given with `--config`) and runs the
//! generation pipeline once.

use anyhow::{bail, Context, Result};
use forge_glyph::config::CONFIG_FILE;
use forge_glyph::{GlyphBuilder, GlyphConfig, RunOutcome};
use std::path::PathBuf;
use tracing::debug;

const USAGE: &str = "Usage: forge-glyph [--config <path>] [--force]

Options:
  -c, --config <path>  Configuration file (default: glyph.toml if present)
  -f, --force          Regenerate even if the upstream version is unchanged
  -h, --help           Print this help";

/// Run the generate command with the given arguments
pub async fn run(args: &[String]) -> Result<()> {
    let cmd = GenerateCommand::parse(args)?;
    if cmd.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let builder = cmd.builder()?.force(cmd.force);
    let outcome = builder.build().await.context("Icon generation failed")?;

    match outcome {
        RunOutcome::Skipped { version } => {
            println!("  bootstrap-icons {} already generated, nothing to do", version);
        }
        RunOutcome::Generated(output) => {
            println!(
                "  Generated {} icon components from bootstrap-icons {}",
                output.icon_count, output.version
            );
            for file in output.all_files() {
                println!("  Wrote to {}", file.display());
            }
        }
    }
    Ok(())
}

/// Generate command configuration
#[derive(Debug, Default, PartialEq, Eq)]
struct GenerateCommand {
    /// Explicit configuration file
    config: Option<PathBuf>,
    /// Ignore the version gate
    force: bool,
    /// Print usage and exit
    help: bool,
}

impl GenerateCommand {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cmd = GenerateCommand::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        cmd.config = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--config requires a path");
                    }
                }
                "--force" | "-f" => {
                    cmd.force = true;
                    i += 1;
                }
                "--help" | "-h" => {
                    cmd.help = true;
                    i += 1;
                }
                other => {
                    bail!("Unknown argument: {}\n\n{}", other, USAGE);
                }
            }
        }

        Ok(cmd)
    }

    /// Builder from the explicit config, `glyph.toml`, or defaults
    fn builder(&self) -> Result<GlyphBuilder> {
        match &self.config {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                GlyphBuilder::from_config_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILE);
                if default_path.is_file() {
                    debug!("Loading configuration from {}", default_path.display());
                    GlyphBuilder::from_config_file(&default_path)
                        .with_context(|| format!("Failed to load {}", default_path.display()))
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE);
                    Ok(GlyphBuilder::from_config(GlyphConfig::default()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let cmd = GenerateCommand::parse(&[]).unwrap();
        assert_eq!(cmd, GenerateCommand::default());
    }

    #[test]
    fn test_parse_flags() {
        let cmd = GenerateCommand::parse(&args(&["--config", "cfg/glyph.toml", "-f"])).unwrap();
        assert_eq!(cmd.config, Some(PathBuf::from("cfg/glyph.toml")));
        assert!(cmd.force);
        assert!(!cmd.help);
    }

    #[test]
    fn test_parse_missing_value() {
        let err = GenerateCommand::parse(&args(&["--config"])).unwrap_err();
        assert!(err.to_string().contains("--config requires a path"));
    }

    #[test]
    fn test_parse_unknown_flag() {
        let err = GenerateCommand::parse(&args(&["--verbose"])).unwrap_err();
        assert!(err.to_string().contains("Unknown argument: --verbose"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let cmd = GenerateCommand {
            config: Some(PathBuf::from("/nonexistent/glyph.toml")),
            ..GenerateCommand::default()
        };
        assert!(cmd.builder().is_err());
    }
}
