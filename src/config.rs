use crate::color::Color;
use crate::editor::{EditorOptions, PaintStyle};
use crate::grid::GridLimits;
use crate::history::HistoryPolicy;
use crate::layout::CellSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "stitchgrid.json";
pub const CONFIG_ENV_VAR: &str = "STITCHGRID_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub cell_size: CellSize,
    pub background: Color,
    pub primary_color: Color,
    pub palette: Vec<Color>,
    pub guide_visible: bool,
    pub guide_color: Color,
    pub paint_style: PaintStyle,
    pub history: HistoryPolicy,
    pub font_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            max_width: 50,
            max_height: 20,
            cell_size: CellSize::default(),
            background: Color::WHITE,
            primary_color: Color::rgb(0x00, 0x95, 0x78),
            palette: vec![
                Color::rgb(0x00, 0x95, 0x78),
                Color::BLACK,
                Color::rgb(0xe5, 0x39, 0x35),
                Color::rgb(0xfb, 0x8c, 0x00),
                Color::rgb(0xfd, 0xd8, 0x35),
                Color::rgb(0x43, 0xa0, 0x47),
                Color::rgb(0x1e, 0x88, 0xe5),
                Color::rgb(0x8e, 0x24, 0xaa),
                Color::rgb(0x75, 0x75, 0x75),
            ],
            guide_visible: true,
            guide_color: Color::rgb(0xcc, 0xcc, 0xcc),
            paint_style: PaintStyle::Toggle,
            history: HistoryPolicy::default(),
            font_path: None,
        }
    }
}

impl EditorConfig {
    /// Picks the config path: explicit argument, then the environment, then
    /// the default file name in the working directory.
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Loads and validates a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: EditorConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "maximum grid size must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        self.limits()
            .check(self.grid_width, self.grid_height)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        let CellSize { width, height } = self.cell_size;
        if !(width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "cell size must be at least 1x1 pixels, got {}x{}",
                width, height
            )));
        }
        Ok(())
    }

    pub fn limits(&self) -> GridLimits {
        GridLimits {
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            width: self.grid_width,
            height: self.grid_height,
            limits: self.limits(),
            primary_color: self.primary_color,
            guide_visible: self.guide_visible,
            style: self.paint_style,
            history_policy: self.history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.primary_color.to_hex(), "#009578");
        assert_eq!(config.limits(), GridLimits::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stitchgrid.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r##"{{
                "grid_width": 30,
                "grid_height": 12,
                "cell_size": {{ "width": 16, "height": 20 }},
                "primary_color": "#ff0000",
                "paint_style": "brush",
                "history": {{ "purge_on_clear": true }}
            }}"##
        )
        .unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.cell_size, CellSize { width: 16.0, height: 20.0 });
        assert_eq!(config.primary_color, Color::rgb(255, 0, 0));
        assert_eq!(config.paint_style, PaintStyle::Brush);
        assert!(config.history.purge_on_clear);
        assert!(config.history.purge_on_resize);
        assert_eq!(config.max_width, 50);
    }

    #[test]
    fn rejects_bad_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r##"{ "background": "#12" }"##).unwrap();
        let err = EditorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Invalid hex color: #12"), "{}", err);
    }

    #[test]
    fn rejects_unknown_color_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "palette": ["red", "mauvish"] }"#).unwrap();
        let err = EditorConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unknown color name: mauvish"), "{}", err);
    }

    #[test]
    fn rejects_grid_larger_than_maximum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.json");
        std::fs::write(&path, r#"{ "grid_width": 60, "grid_height": 10 }"#).unwrap();
        assert!(matches!(EditorConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_degenerate_cell_size() {
        let config = EditorConfig {
            cell_size: CellSize { width: 0.0, height: 10.0 },
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_path_wins() {
        let path = EditorConfig::resolve_path(Some("custom.json".to_string()));
        assert_eq!(path, PathBuf::from("custom.json"));
    }
}
