use crate::filter::UpperBound;
use crate::geo::LngLat;
use crate::moods::{Mood, MoodAliases};
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the map opens. Default is the UC Berkeley campus.
    pub center: LngLat,
    /// Initial zoom level. Default is 14.
    pub zoom: f64,
    /// Zoom level used when an entry is selected for editing. Default is 17.
    pub focus_zoom: f64,
    /// How a bare-date "to" filter is read. Default is the whole day.
    pub upper_bound: UpperBound,
    /// chrono format used when showing entry dates.
    pub date_format: String,
    /// Preferred editor name/binary for long descriptions. Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    center: Option<[f64; 2]>,
    zoom: Option<f64>,
    focus_zoom: Option<f64>,
    upper_bound: Option<UpperBound>,
    date_format: Option<String>,
    editor: Option<String>,
    /// Optional table:
    /// [moods]
    /// calm = "Calmness"
    /// mad = "Anger"
    moods: Option<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            center: Self::default_center(),
            zoom: 14.0,
            focus_zoom: 17.0,
            upper_bound: UpperBound::default(),
            date_format: "%a, %d %b %Y %H:%M".to_string(),
            editor: None,
        }
    }
}

impl Config {
    /// Loads the first config file found (XDG path, then native), applies
    /// defaults, and registers `[moods]` aliases.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::from_file_config(file_config))
    }

    /// Same as [`Config::load`] but from an explicit TOML file.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_config =
            Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let defaults = Self::default();

        let center = file_config
            .center
            .and_then(|pair| match LngLat::try_from(pair) {
                Ok(center) => Some(center),
                Err(e) => {
                    tracing::warn!("ignoring configured center: {e}");
                    None
                }
            })
            .unwrap_or(defaults.center);

        Self::load_mood_aliases(&file_config.moods);

        Self {
            center,
            zoom: file_config.zoom.unwrap_or(defaults.zoom),
            focus_zoom: file_config.focus_zoom.unwrap_or(defaults.focus_zoom),
            upper_bound: file_config.upper_bound.unwrap_or(defaults.upper_bound),
            date_format: file_config.date_format.unwrap_or(defaults.date_format),
            editor: file_config.editor,
        }
    }

    fn default_center() -> LngLat {
        LngLat::new(-122.2585, 37.8719).expect("valid coordinate")
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("moodmap")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("moodmap").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[moods]` into the global alias registry. Aliases named like a
    /// canonical mood are skipped (with a warning) so "Energy" always means
    /// Energy. Returns how many aliases were registered.
    fn load_mood_aliases(aliases: &Option<HashMap<String, String>>) -> usize {
        match aliases {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> =
                    map.iter().map(|(a, t)| (a.clone(), t.clone())).collect();
                let added = MoodAliases::extend(&pairs);
                tracing::debug!(added, "mood aliases loaded");
                added
            }
            _ => 0,
        }
    }

    /// Every mood name the user can type: canonical names only.
    pub fn mood_names() -> Vec<&'static str> {
        Mood::all().map(Mood::name).collect()
    }
}
