//! Configuration loading and discovery for `regrid.toml`
//!
//! A batch is configured by the nearest `regrid.toml` above the working
//! directory, falling back to a user-wide file in the XDG config home. Every
//! error names the file it came from, since a config found by walking up is
//! not always the one the user expects.

use super::schema::RegridConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "regrid.toml";

/// Directory holding the user-wide config under the XDG config home.
pub const CONFIG_DIR_NAME: &str = "regrid";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for the schema
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Parsed values that cannot be used together
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Force a square output scale
    pub force_square: Option<bool>,
    /// Explicit output scale `[vertical, horizontal]`
    pub force_scale: Option<[usize; 2]>,
    /// Keep alpha in animated output
    pub transparent: Option<bool>,
    /// Run the GIF optimizer
    pub optimize_gif: Option<bool>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
}

/// Every path checked for a config, highest priority first.
///
/// `regrid.toml` in `start` and in each of its ancestors, nearest first, then
/// `{config_home}/regrid/regrid.toml`. Either origin may be absent.
pub fn config_candidates(start: Option<&Path>, config_home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = start
        .into_iter()
        .flat_map(Path::ancestors)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .collect();
    candidates.extend(config_home.map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)));
    candidates
}

/// Find the config for the current working directory.
///
/// Returns the first existing file of [`config_candidates`] for the working
/// directory and the XDG config home (`$XDG_CONFIG_HOME`, else `~/.config`).
pub fn find_config() -> Option<PathBuf> {
    let cwd = env::current_dir().ok();
    first_file(config_candidates(cwd.as_deref(), xdg_config_home().as_deref()))
}

/// Find the user-wide config in the XDG config home.
pub fn find_xdg_config() -> Option<PathBuf> {
    first_file(config_candidates(None, xdg_config_home().as_deref()))
}

/// Find the nearest config at or above `start`, ignoring the user-wide one.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    first_file(config_candidates(Some(start), None))
}

fn xdg_config_home() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

fn first_file(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

/// Load configuration from a regrid.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("sprites/regrid.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<RegridConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("Loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(RegridConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<RegridConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config: RegridConfig = toml::from_str(&contents)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    validated(config)
}

fn validated(config: RegridConfig) -> Result<RegridConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration and re-validate it.
///
/// CLI arguments take precedence over config file values. An explicit scale
/// on the command line replaces a configured `force_square` and vice versa.
pub fn merge_cli_overrides(
    mut config: RegridConfig,
    overrides: &CliOverrides,
) -> Result<RegridConfig, ConfigError> {
    if let Some(scale) = overrides.force_scale {
        config.defaults.force_scale = Some(scale);
        config.defaults.force_square = false;
    }

    if let Some(force_square) = overrides.force_square {
        config.defaults.force_square = force_square;
        if force_square {
            config.defaults.force_scale = None;
        }
    }

    if let Some(transparent) = overrides.transparent {
        config.defaults.transparent = transparent;
    }

    if let Some(optimize_gif) = overrides.optimize_gif {
        config.output.optimize_gif = optimize_gif;
    }

    if let Some(jobs) = overrides.jobs {
        config.defaults.jobs = Some(jobs);
    }

    validated(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{OutputScale, ScalePolicy};
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).expect("should create config file");

        let found = find_config_from(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).expect("should create config file");

        let subdir = temp.path().join("sprites").join("walk");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(&subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_candidates_order() {
        let candidates =
            config_candidates(Some(Path::new("/work/sprites")), Some(Path::new("/home/u/.config")));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/work/sprites/regrid.toml"),
                PathBuf::from("/work/regrid.toml"),
                PathBuf::from("/regrid.toml"),
                PathBuf::from("/home/u/.config/regrid/regrid.toml"),
            ]
        );
        assert!(config_candidates(None, None).is_empty());
    }

    #[test]
    fn test_find_config_ignores_directory_named_like_config() {
        let temp = TempDir::new().expect("should create temp dir");
        fs::create_dir(temp.path().join(CONFIG_FILE_NAME)).expect("should create directory");
        assert_eq!(find_config_from(temp.path()), None);
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(
                br#"
[defaults]
force_square = true
jobs = 2

[output]
suffix = "_clean"
"#,
            )
            .expect("should write config content");

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert!(config.defaults.force_square);
        assert_eq!(config.defaults.jobs, Some(2));
        assert_eq!(config.output.suffix, "_clean");
        assert_eq!(config.output.gifsicle, "gifsicle");
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(
            &result,
            Err(ConfigError::Io { path, .. }) if path.ends_with("nonexistent.toml")
        ));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "this is not valid toml {{{").expect("should write config");

        let result = load_config(Some(&config_path));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[defaults]\nforce_scale = [0, 3]\n").expect("should write config");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_merge_cli_force_scale_replaces_force_square() {
        let mut config = RegridConfig::default();
        config.defaults.force_square = true;

        let overrides = CliOverrides { force_scale: Some([3, 6]), ..Default::default() };
        let merged = merge_cli_overrides(config, &overrides).unwrap();

        assert!(!merged.defaults.force_square);
        assert_eq!(merged.defaults.scale_policy(), ScalePolicy::Forced(OutputScale::new(3, 6)));
    }

    #[test]
    fn test_merge_cli_force_square_replaces_force_scale() {
        let mut config = RegridConfig::default();
        config.defaults.force_scale = Some([2, 2]);

        let overrides = CliOverrides { force_square: Some(true), ..Default::default() };
        let merged = merge_cli_overrides(config, &overrides).unwrap();

        assert_eq!(merged.defaults.scale_policy(), ScalePolicy::ForceSquare);
    }

    #[test]
    fn test_merge_cli_flags() {
        let overrides = CliOverrides {
            transparent: Some(true),
            optimize_gif: Some(true),
            jobs: Some(3),
            ..Default::default()
        };
        let merged = merge_cli_overrides(RegridConfig::default(), &overrides).unwrap();

        assert!(merged.defaults.transparent);
        assert!(merged.output.optimize_gif);
        assert_eq!(merged.defaults.jobs, Some(3));
    }

    #[test]
    fn test_merge_cli_revalidates() {
        let overrides = CliOverrides { jobs: Some(0), ..Default::default() };
        let result = merge_cli_overrides(RegridConfig::default(), &overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
