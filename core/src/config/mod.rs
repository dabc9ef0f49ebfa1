//! Config file location, persistence and validation
//!
//! The file is TOML. A missing file is replaced by a commented template; an
//! existing one is read through confy and checked by [`validate`] before the
//! overlay sees it.

mod error;

pub use error::{ConfigError, ValidationError};

use std::fs;
use std::path::{Path, PathBuf};

use crosshair_types::{Config, Rgb, Shape};

use crate::shapes::CrosshairSpec;

pub const APP_NAME: &str = "crosshair";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const SIZE_RANGE: (i32, i32) = (1, 500);
pub const THICKNESS_RANGE: (i32, i32) = (1, 100);
pub const GAP_RANGE: (i32, i32) = (0, 100);
pub const OUTLINE_RANGE: (i32, i32) = (0, 50);
pub const MONITOR_RANGE: (i32, i32) = (-1, 100);

/// Written verbatim when no config file exists yet
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# crosshair configuration file

[crosshair]
# Shape of the crosshair: "cross", "dot", "circle", "cross-dot"
shape = "cross"

# Color in hex format (#RRGGBB, 0xRRGGBB, or RRGGBB)
color = "#00FF00"

# Size of the crosshair arms in pixels (from center)
# For "circle" this is the radius, for "dot" the diameter
size = 10

# Thickness of lines in pixels
thickness = 2

# Gap in center (pixels) - creates hollow cross shape
gap = 0

# Outline settings (set outline_thickness to 0 to disable)
outline_thickness = 0
outline_color = "#000000"

[position]
# Monitor index (0 = first, 1 = second, etc.)
# Monitors are ordered left-to-right by X position
# Use -1 for primary monitor
monitor = 0

# Offset from monitor center (pixels)
# Positive X = right, Positive Y = down
offset_x = 0
offset_y = 0
"##;

// ─────────────────────────────────────────────────────────────────────────────
// Locations
// ─────────────────────────────────────────────────────────────────────────────

/// `$XDG_CONFIG_HOME/crosshair` (or `~/.config/crosshair`), falling back to a
/// dot-directory in the working directory when no home is known
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_NAME}")))
}

pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

fn ensure_parent(path: &Path) -> Result<(), ConfigError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    confy::load_path(path).map_err(|source| ConfigError::Load {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    ensure_parent(path)?;
    confy::store_path(path, config).map_err(|source| ConfigError::Save {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the commented default template
pub fn save_default(path: &Path) -> Result<(), ConfigError> {
    ensure_parent(path)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|source| ConfigError::WriteDefault {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config at `path`, creating the default template if it does not
/// exist. The flag is `true` when a new file was written.
pub fn load_or_create(path: &Path) -> Result<(Config, bool), ConfigError> {
    if !path.exists() {
        save_default(path)?;
        tracing::info!(path = %path.display(), "Created default configuration");
        return Ok((Config::default(), true));
    }
    load(path).map(|config| (config, false))
}

/// Move an unusable config aside and replace it with the default template.
///
/// Returns the backup location, or `None` if the old file could not be moved
/// (it is then simply overwritten).
pub fn backup_and_reset(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let backup = PathBuf::from(format!(
        "{}.bak.{}",
        path.display(),
        chrono::Utc::now().timestamp()
    ));

    let moved = match fs::rename(path, &backup) {
        Ok(()) => {
            tracing::info!(backup = %backup.display(), "Backed up invalid configuration");
            Some(backup)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not back up configuration");
            None
        }
    };

    save_default(path)?;
    Ok(moved)
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

fn check_range(problems: &mut Vec<String>, field: &str, value: i32, (min, max): (i32, i32)) {
    if !(min..=max).contains(&value) {
        problems.push(format!("{field} must be between {min} and {max} (got {value})"));
    }
}

/// Collect every problem in `config` rather than stopping at the first
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    let c = &config.crosshair;
    let mut problems = Vec::new();

    if c.shape.parse::<Shape>().is_err() {
        let names: Vec<_> = Shape::ALL.iter().map(|s| s.name()).collect();
        problems.push(format!(
            "invalid shape {:?} (must be one of: {})",
            c.shape,
            names.join(", ")
        ));
    }
    if let Err(e) = c.color.parse::<Rgb>() {
        problems.push(format!("invalid color {:?}: {e}", c.color));
    }
    if let Err(e) = c.outline_color.parse::<Rgb>() {
        problems.push(format!("invalid outline_color {:?}: {e}", c.outline_color));
    }

    check_range(&mut problems, "size", c.size, SIZE_RANGE);
    check_range(&mut problems, "thickness", c.thickness, THICKNESS_RANGE);
    check_range(&mut problems, "gap", c.gap, GAP_RANGE);
    check_range(&mut problems, "outline_thickness", c.outline_thickness, OUTLINE_RANGE);
    check_range(&mut problems, "monitor", config.position.monitor, MONITOR_RANGE);

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { problems })
    }
}

/// Validate `config` and turn it into the generator's input
pub fn crosshair_spec(config: &Config) -> Result<CrosshairSpec, ValidationError> {
    validate(config)?;
    let c = &config.crosshair;
    let unsigned = |v: i32| u32::try_from(v).unwrap_or(0);

    Ok(CrosshairSpec {
        shape: Shape::from_name(&c.shape),
        size: unsigned(c.size),
        thickness: unsigned(c.thickness),
        gap: unsigned(c.gap),
        outline_thickness: unsigned(c.outline_thickness),
        color: c.color.parse().unwrap_or(Rgb::GREEN),
        outline_color: c.outline_color.parse().unwrap_or(Rgb::BLACK),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosshair_types::{CrosshairSettings, PositionSettings};

    #[test]
    fn template_matches_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(validate(&parsed).is_ok());
    }

    #[test]
    fn default_spec() {
        let spec = crosshair_spec(&Config::default()).unwrap();
        assert_eq!(spec, CrosshairSpec::default());
    }

    #[test]
    fn validation_collects_all_problems() {
        let config = Config {
            crosshair: CrosshairSettings {
                shape: "star".into(),
                color: "#12".into(),
                size: 0,
                thickness: 101,
                gap: -1,
                outline_thickness: 51,
                outline_color: "zzzzzz".into(),
            },
            position: PositionSettings {
                monitor: -2,
                ..Default::default()
            },
        };
        let err = validate(&config).unwrap_err();
        assert_eq!(err.problems.len(), 8);
        assert!(err.problems[0].starts_with("invalid shape \"star\""));
        assert!(err.to_string().contains("\n  - size must be between 1 and 500 (got 0)"));
    }

    #[test]
    fn range_edges_are_inclusive() {
        let mut config = Config::default();
        config.crosshair.size = 500;
        config.crosshair.thickness = 100;
        config.crosshair.gap = 100;
        config.crosshair.outline_thickness = 50;
        config.position.monitor = -1;
        assert!(validate(&config).is_ok());

        config.position.monitor = 101;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn spec_carries_parsed_values() {
        let mut config = Config::default();
        config.crosshair.shape = "cross-dot".into();
        config.crosshair.color = "0xff8800".into();
        config.crosshair.outline_thickness = 2;
        let spec = crosshair_spec(&config).unwrap();
        assert_eq!(spec.shape, Shape::CrossDot);
        assert_eq!(spec.color, Rgb(0xFF8800));
        assert_eq!(spec.outline_thickness, 2);
    }

    #[test]
    fn load_or_create_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let (config, created) = load_or_create(&path).unwrap();
        assert!(created);
        assert_eq!(config, Config::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);

        let (config, created) = load_or_create(&path).unwrap();
        assert!(!created);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.crosshair.shape = "circle".into();
        config.position.offset_x = -12;
        save(&path, &config).unwrap();

        assert_eq!(load(&path).unwrap(), config);
    }

    #[test]
    fn unparseable_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[crosshair\nsize = ").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::Load { .. })));
    }

    #[test]
    fn backup_and_reset_keeps_old_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "garbage").unwrap();

        let backup = backup_and_reset(&path).unwrap().unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "garbage");
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }
}
