//! Configuration schema types for `regrid.toml`
//!
//! Defines the structure and validation rules for regrid configuration.

use serde::{Deserialize, Serialize};

use crate::grid::{OutputScale, ScalePolicy};

/// Default settings applied to every processed image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Use the larger inferred scale on both axes
    #[serde(default)]
    pub force_square: bool,
    /// Explicit output scale `[vertical, horizontal]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_scale: Option<[usize; 2]>,
    /// Keep alpha in animated GIF output
    #[serde(default)]
    pub transparent: bool,
    /// Color given to fully transparent pixels before analysis
    #[serde(default)]
    pub transparent_fill: [u8; 3],
    /// Worker threads for batches (default: available parallelism)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            force_square: false,
            force_scale: None,
            transparent: false,
            transparent_fill: [0, 0, 0],
            jobs: None,
        }
    }
}

impl DefaultsConfig {
    /// The scale policy selected by these settings.
    pub fn scale_policy(&self) -> ScalePolicy {
        match self.force_scale {
            Some([vertical, horizontal]) => {
                ScalePolicy::Forced(OutputScale::new(vertical, horizontal))
            }
            None if self.force_square => ScalePolicy::ForceSquare,
            None => ScalePolicy::Inferred,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Appended to the input file stem when no output path is given
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Run the external GIF optimizer on animated outputs
    #[serde(default)]
    pub optimize_gif: bool,
    /// GIF optimizer executable
    #[serde(default = "default_gifsicle")]
    pub gifsicle: String,
}

fn default_suffix() -> String {
    "_regrid".to_string()
}

fn default_gifsicle() -> String {
    "gifsicle".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { suffix: default_suffix(), optimize_gif: false, gifsicle: default_gifsicle() }
    }
}

/// Complete `regrid.toml` configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegridConfig {
    /// Processing defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.force_scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "regrid.toml: '{}' {}", self.field, self.message)
    }
}

impl RegridConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Some(scale) = self.defaults.force_scale {
            if scale.contains(&0) {
                errors.push(ConfigValidationError {
                    field: "defaults.force_scale".to_string(),
                    message: "must contain positive integers".to_string(),
                });
            }
            if self.defaults.force_square {
                errors.push(ConfigValidationError {
                    field: "defaults.force_square".to_string(),
                    message: "cannot be combined with defaults.force_scale".to_string(),
                });
            }
        }

        if self.defaults.jobs == Some(0) {
            errors.push(ConfigValidationError {
                field: "defaults.jobs".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.output.suffix.is_empty() {
            errors.push(ConfigValidationError {
                field: "output.suffix".to_string(),
                message: "must be non-empty so outputs never overwrite inputs".to_string(),
            });
        }

        if self.output.gifsicle.is_empty() {
            errors.push(ConfigValidationError {
                field: "output.gifsicle".to_string(),
                message: "must name an executable".to_string(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RegridConfig::default().validate().is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config: RegridConfig = toml::from_str(
            r#"
[defaults]
force_scale = [2, 3]
transparent = true
transparent_fill = [255, 0, 255]
jobs = 4

[output]
suffix = "_fixed"
optimize_gif = true
gifsicle = "/usr/local/bin/gifsicle"
"#,
        )
        .unwrap();

        assert_eq!(config.defaults.force_scale, Some([2, 3]));
        assert!(config.defaults.transparent);
        assert_eq!(config.defaults.transparent_fill, [255, 0, 255]);
        assert_eq!(config.defaults.jobs, Some(4));
        assert_eq!(config.output.suffix, "_fixed");
        assert!(config.output.optimize_gif);
        assert_eq!(config.output.gifsicle, "/usr/local/bin/gifsicle");
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: RegridConfig = toml::from_str("").unwrap();
        assert_eq!(config, RegridConfig::default());
    }

    #[test]
    fn test_scale_policy() {
        let mut defaults = DefaultsConfig::default();
        assert_eq!(defaults.scale_policy(), ScalePolicy::Inferred);

        defaults.force_square = true;
        assert_eq!(defaults.scale_policy(), ScalePolicy::ForceSquare);

        defaults.force_square = false;
        defaults.force_scale = Some([4, 2]);
        assert_eq!(defaults.scale_policy(), ScalePolicy::Forced(OutputScale::new(4, 2)));
    }

    #[test]
    fn test_validate_rejects_conflicts_and_zeros() {
        let mut config = RegridConfig::default();
        config.defaults.force_square = true;
        config.defaults.force_scale = Some([0, 2]);
        config.defaults.jobs = Some(0);
        config.output.suffix.clear();

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "defaults.force_scale",
                "defaults.force_square",
                "defaults.jobs",
                "output.suffix"
            ]
        );
    }

    #[test]
    fn test_validation_error_display() {
        let error = ConfigValidationError {
            field: "defaults.jobs".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert_eq!(error.to_string(), "regrid.toml: 'defaults.jobs' must be a positive integer");
    }
}
