//! Configuration file loading for protodiff.
//!
//! Discovers and loads `protodiff.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use protodiff_core::logging_facility::Profile;
use protodiff_snapshot::{CaptureMode, ProviderConfig};

use crate::commands::OutputFormat;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "protodiff.toml";

/// Top-level configuration from protodiff.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtodiffConfig {
    /// Compiler invocation settings.
    pub compiler: CompilerConfig,

    /// Report output settings.
    pub output: OutputConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Compiler section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Compiler executable.
    pub protoc: Option<PathBuf>,

    /// Include paths, relative to the repository root.
    pub include: Vec<PathBuf>,

    /// Proto files compared on every run.
    pub files: Vec<PathBuf>,

    /// How descriptor output is captured.
    pub capture: Option<CaptureMode>,
}

/// Output section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

/// Logging section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Option<Profile>,
}

/// Discover the protodiff.toml config file.
///
/// Returns `None` if no config file is found in `repo_root`.
pub fn discover_config(repo_root: &Path) -> Option<PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path.display());
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path.display());
        None
    }
}

/// Load and parse a protodiff.toml config file.
pub fn load_config(path: &Path) -> anyhow::Result<ProtodiffConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path.display()))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ProtodiffConfig> {
    let config: ProtodiffConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load an explicit config file, or discover one in the repo root.
pub fn load_or_default(
    repo_root: &Path,
    explicit: Option<&Path>,
) -> anyhow::Result<ProtodiffConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => match discover_config(repo_root) {
            Some(path) => load_config(&path),
            None => Ok(ProtodiffConfig::default()),
        },
    }
}

/// CLI-side settings that can override the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub protoc: Option<PathBuf>,
    pub include: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub capture: Option<CaptureMode>,
    pub format: Option<OutputFormat>,
    pub profile: Option<Profile>,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub provider: ProviderConfig,
    pub format: OutputFormat,
    pub profile: Profile,
}

/// Merge config file settings with CLI arguments.
///
/// Scalar CLI arguments replace config values; list arguments extend them.
pub fn merge(repo: &Path, file: ProtodiffConfig, cli: CliOverrides) -> MergedConfig {
    let mut include = file.compiler.include;
    include.extend(cli.include);
    let mut files = file.compiler.files;
    files.extend(cli.files);

    let mut provider = ProviderConfig::new(files)
        .with_repo(repo)
        .with_capture(cli.capture.or(file.compiler.capture).unwrap_or_default());
    if let Some(protoc) = cli.protoc.or(file.compiler.protoc) {
        provider = provider.with_protoc(protoc);
    }
    provider.include = include;

    MergedConfig {
        provider,
        format: cli.format.or(file.output.format).unwrap_or_default(),
        profile: cli.profile.or(file.logging.profile).unwrap_or(Profile::Quiet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
[compiler]
protoc = "/opt/protoc/bin/protoc"
include = ["proto", "third_party"]
files = ["api/hello.proto"]
capture = "descriptor-set"

[output]
format = "markdown"

[logging]
profile = "production"
"#,
        )
        .unwrap();

        assert_eq!(
            config.compiler.protoc,
            Some(PathBuf::from("/opt/protoc/bin/protoc"))
        );
        assert_eq!(config.compiler.include.len(), 2);
        assert_eq!(config.compiler.capture, Some(CaptureMode::DescriptorSet));
        assert_eq!(config.output.format, Some(OutputFormat::Markdown));
        assert_eq!(config.logging.profile, Some(Profile::Production));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.compiler.files.is_empty());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse_config("[compiler]\nprotocc = \"x\"\n").unwrap_err();
        assert!(format!("{:#}", err).contains("invalid TOML"));
    }

    #[test]
    fn test_discover_config() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(
            discover_config(dir.path()),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_or_default(dir.path(), Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("read config file"));
    }

    #[test]
    fn test_cli_overrides_scalars_and_extends_lists() {
        let file = parse_config(
            r#"
[compiler]
protoc = "/usr/bin/protoc"
include = ["proto"]
files = ["a.proto"]
capture = "descriptor-set"

[output]
format = "json"
"#,
        )
        .unwrap();
        let cli = CliOverrides {
            protoc: Some(PathBuf::from("/custom/protoc")),
            include: vec![PathBuf::from("vendor")],
            files: vec![PathBuf::from("b.proto")],
            capture: Some(CaptureMode::Plugin),
            format: None,
            profile: None,
        };

        let merged = merge(Path::new("/repo"), file, cli);
        assert_eq!(merged.provider.protoc, PathBuf::from("/custom/protoc"));
        assert_eq!(
            merged.provider.include,
            vec![PathBuf::from("proto"), PathBuf::from("vendor")]
        );
        assert_eq!(
            merged.provider.files,
            vec![PathBuf::from("a.proto"), PathBuf::from("b.proto")]
        );
        assert_eq!(merged.provider.capture, CaptureMode::Plugin);
        assert_eq!(merged.provider.repo, PathBuf::from("/repo"));
        assert_eq!(merged.format, OutputFormat::Json);
        assert_eq!(merged.profile, Profile::Quiet);
    }

    #[test]
    fn test_merge_defaults() {
        let merged = merge(
            Path::new("."),
            ProtodiffConfig::default(),
            CliOverrides::default(),
        );
        assert_eq!(merged.provider.protoc, PathBuf::from("protoc"));
        assert_eq!(merged.provider.capture, CaptureMode::Plugin);
        assert_eq!(merged.format, OutputFormat::Text);
    }
}
