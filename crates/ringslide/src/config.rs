use crate::color::Color;
use crate::error::SliderError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, IntoStaticStr};
use thiserror::Error;

pub const DEFAULT_START_ANGLE: i32 = 180;
pub const DEFAULT_SWEEP_ANGLE: i32 = 180;
pub const DEFAULT_TOUCH_CORRECTION: i32 = 40;
/// Line width in density-independent pixels.
pub const DEFAULT_LINE_WIDTH_DP: f64 = 4.0;
pub const MAX_ANGLE: i32 = 360;

/// Names every configurable field. Carried by property-changed
/// notifications and range errors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
    StrumDisplay,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Maximum,
    Progress,
    StartAngle,
    SweepAngle,
    Clockwise,
    LineWidth,
    RoundEdges,
    TouchCorrection,
    Thumb,
    TrackColor,
    ProgressColor,
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThumbSize {
    pub width: u32,
    pub height: u32,
}

impl ThumbSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    pub fn ensure_square(&self) -> Result<(), SliderError> {
        if self.width == self.height {
            Ok(())
        } else {
            Err(SliderError::Shape {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Every configurable knob of the slider. Derived geometry is a pure
/// function of this plus the widget size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub maximum: u32,
    pub progress: u32,
    pub start_angle: i32,
    pub sweep_angle: i32,
    pub clockwise: bool,
    pub line_width: f64,
    pub round_edges: bool,
    pub touch_correction: i32,
    pub thumb: Option<ThumbSize>,
    pub track_color: Color,
    pub progress_color: Color,
    pub enabled: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            maximum: 0,
            progress: 0,
            start_angle: DEFAULT_START_ANGLE,
            sweep_angle: DEFAULT_SWEEP_ANGLE,
            clockwise: true,
            line_width: DEFAULT_LINE_WIDTH_DP,
            round_edges: true,
            touch_correction: DEFAULT_TOUCH_CORRECTION,
            thumb: None,
            track_color: Color::black(),
            progress_color: Color::black(),
            enabled: true,
        }
    }
}

pub(crate) fn check_progress(progress: u32, maximum: u32) -> Result<(), SliderError> {
    if progress > maximum {
        return Err(SliderError::range(
            Property::Progress,
            progress,
            "must not exceed maximum",
        ));
    }
    Ok(())
}

pub(crate) fn check_maximum(maximum: u32, progress: u32) -> Result<(), SliderError> {
    if maximum < progress {
        return Err(SliderError::range(
            Property::Maximum,
            maximum,
            "must not be less than progress",
        ));
    }
    Ok(())
}

pub(crate) fn check_angle(property: Property, value: i32) -> Result<(), SliderError> {
    if !(0..=MAX_ANGLE).contains(&value) {
        return Err(SliderError::range(
            property,
            value,
            "must be between 0 and 360",
        ));
    }
    Ok(())
}

pub(crate) fn check_line_width(value: f64) -> Result<(), SliderError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(SliderError::range(
            Property::LineWidth,
            value,
            "must be a positive number",
        ));
    }
    Ok(())
}

pub(crate) fn check_touch_correction(value: i32) -> Result<(), SliderError> {
    if value < 0 {
        return Err(SliderError::range(
            Property::TouchCorrection,
            value,
            "must be at least 0",
        ));
    }
    Ok(())
}

impl SliderConfig {
    /// Default configuration for a display with the given pixel density.
    pub fn with_density(density: f64) -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH_DP * density,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SliderError> {
        check_progress(self.progress, self.maximum)?;
        check_angle(Property::StartAngle, self.start_angle)?;
        check_angle(Property::SweepAngle, self.sweep_angle)?;
        check_line_width(self.line_width)?;
        check_touch_correction(self.touch_correction)?;
        if let Some(thumb) = &self.thumb {
            thumb.ensure_square()?;
        }
        Ok(())
    }

    /// Fields whose value differs between `self` and `other`, in
    /// declaration order.
    pub fn diff(&self, other: &Self) -> Vec<Property> {
        let checks = [
            (Property::Maximum, self.maximum != other.maximum),
            (Property::Progress, self.progress != other.progress),
            (Property::StartAngle, self.start_angle != other.start_angle),
            (Property::SweepAngle, self.sweep_angle != other.sweep_angle),
            (Property::Clockwise, self.clockwise != other.clockwise),
            (Property::LineWidth, self.line_width != other.line_width),
            (Property::RoundEdges, self.round_edges != other.round_edges),
            (
                Property::TouchCorrection,
                self.touch_correction != other.touch_correction,
            ),
            (Property::Thumb, self.thumb != other.thumb),
            (Property::TrackColor, self.track_color != other.track_color),
            (
                Property::ProgressColor,
                self.progress_color != other.progress_color,
            ),
            (Property::Enabled, self.enabled != other.enabled),
        ];

        checks
            .into_iter()
            .filter_map(|(property, changed)| changed.then_some(property))
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid slider configuration: {0}")]
    Invalid(#[from] SliderError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const ENV_PREFIX: &str = "RINGSLIDE";

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "ringslide", "ringslide").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("slider.toml"))
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<SliderConfig, ConfigError> {
    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    let slider: SliderConfig = settings.try_deserialize()?;
    slider.validate()?;
    Ok(slider)
}

/// Loads `path` (if it exists) overlaid with `RINGSLIDE_*` environment
/// variables, then validates the result.
pub fn load(path: &Path) -> Result<SliderConfig, ConfigError> {
    finish(config::Config::builder().add_source(config::File::from(path).required(false)))
}

pub fn load_from_str(toml: &str) -> Result<SliderConfig, ConfigError> {
    finish(
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml)),
    )
}

pub fn load_or_default(path: Option<&Path>) -> SliderConfig {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                return SliderConfig::default();
            }
        },
    };

    match load(&path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to load {}: {}, using defaults", path.display(), e);
            SliderConfig::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.maximum, 0);
        assert_eq!(config.progress, 0);
        assert_eq!(config.start_angle, 180);
        assert_eq!(config.sweep_angle, 180);
        assert!(config.clockwise);
        assert_eq!(config.touch_correction, 40);
        assert!(config.validate().is_ok());

        assert_eq!(SliderConfig::with_density(2.5).line_width, 10.0);
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let config = load_from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.maximum, 50);
        assert_eq!(config.progress, 20);
        assert_eq!(config.track_color, Color::rgb(255, 0, 0));
        assert_eq!(config.thumb, None);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config =
            load_from_str("sweep_angle = 270\n[thumb]\nwidth = 24\nheight = 24\n").unwrap();
        assert_eq!(config.sweep_angle, 270);
        assert_eq!(config.start_angle, DEFAULT_START_ANGLE);
        assert_eq!(config.thumb, Some(ThumbSize::square(24)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = load_from_str("maximum = 10\nprogress = 20\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(SliderError::Range {
                property: Property::Progress,
                ..
            }))
        ));

        let result = load_from_str("[thumb]\nwidth = 24\nheight = 12\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(SliderError::Shape { .. }))
        ));
    }

    #[test]
    fn test_validation_bounds() {
        assert!(check_angle(Property::StartAngle, 0).is_ok());
        assert!(check_angle(Property::StartAngle, 360).is_ok());
        assert!(check_angle(Property::StartAngle, -1).is_err());
        assert!(check_angle(Property::SweepAngle, 361).is_err());
        assert!(check_line_width(0.0).is_err());
        assert!(check_line_width(f64::NAN).is_err());
        assert!(check_touch_correction(-1).is_err());
        assert!(check_touch_correction(0).is_ok());
        assert!(check_maximum(10, 20).is_err());
        assert!(check_progress(20, 10).is_err());
    }

    #[test]
    fn test_diff() {
        let a = SliderConfig::default();
        let mut b = a.clone();
        assert!(a.diff(&b).is_empty());

        b.maximum = 10;
        b.clockwise = false;
        b.thumb = Some(ThumbSize::square(8));
        assert_eq!(
            a.diff(&b),
            vec![Property::Maximum, Property::Clockwise, Property::Thumb]
        );
    }

    #[test]
    fn test_property_names() {
        let cases = vec![
            ("\"start_angle\"", Property::StartAngle),
            ("\"touch_correction\"", Property::TouchCorrection),
            ("\"progress_color\"", Property::ProgressColor),
        ];

        for (json, expected) in cases {
            let deserialized: Property = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
            assert_eq!(format!("\"{}\"", expected), json);
        }

        assert_eq!(Property::iter().count(), 12);
        let name: &'static str = Property::LineWidth.into();
        assert_eq!(name, "line_width");
    }
}
