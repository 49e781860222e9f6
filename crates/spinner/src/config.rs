use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use spindle::{
    Color, EntryError, EntryList, Label, Palette, PaletteError, SessionOptions, SpinSettings,
};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Slice colors; empty means the built-in palette.
    #[serde(default)]
    pub palette: Vec<Color>,
    #[serde(default = "SessionOptions::default_labels")]
    pub entries: Vec<Label>,
    #[serde(default)]
    pub spin: SpinSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: Vec::new(),
            entries: SessionOptions::default_labels(),
            spin: SpinSettings::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),
    #[error("Entry error: {0}")]
    Entries(#[from] EntryError),
}

impl Config {
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        if self.palette.is_empty() {
            Ok(Palette::default())
        } else {
            Palette::new(self.palette.clone())
        }
    }

    pub fn session_options(&self) -> Result<SessionOptions, ConfigError> {
        Ok(SessionOptions {
            palette: self.palette()?,
            spin: self.spin,
            entries: EntryList::from_labels(self.entries.iter().cloned())?,
        })
    }
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "spinner").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// `SPINNER_*` variables. Nested keys use `__` (`SPINNER_SPIN__DURATION_MS`)
/// and `SPINNER_ENTRIES` / `SPINNER_PALETTE` take comma separated lists.
fn environment() -> config::Environment {
    config::Environment::with_prefix("SPINNER")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("entries")
        .with_list_parse_key("palette")
}

/// Session options from the config file, or the defaults when the file is
/// missing or invalid.
pub fn load_options() -> SessionOptions {
    match load_config().and_then(|c| c.session_options()) {
        Ok(options) => options,
        Err(e) => {
            log::warn!("Using default settings: {}", e);
            SessionOptions::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
