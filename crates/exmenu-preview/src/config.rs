use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MENU_SIZE: f64 = 400.0;
const MIN_MENU_SIZE: f64 = 160.0;
const MAX_MENU_SIZE: f64 = 1200.0;

fn default_menu_size() -> f64 {
    DEFAULT_MENU_SIZE
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Avatar descriptor to preview.
    #[serde(default)]
    pub avatar: Option<PathBuf>,
    /// Edge length of the square the menu disc is drawn in, in pixels.
    #[serde(default = "default_menu_size")]
    pub menu_size: f64,
    /// Directory checked first for builtin icons (`back.png`, `radial.png`, ...).
    #[serde(default)]
    pub icon_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            avatar: None,
            menu_size: DEFAULT_MENU_SIZE,
            icon_dir: None,
        }
    }
}

impl Config {
    pub fn menu_size(&self) -> f64 {
        if self.menu_size.is_finite() {
            self.menu_size.clamp(MIN_MENU_SIZE, MAX_MENU_SIZE)
        } else {
            DEFAULT_MENU_SIZE
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub avatar: Option<PathBuf>,
    pub menu_size: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(avatar) = &self.avatar {
            config.avatar = Some(avatar.clone());
        }
        if let Some(size) = self.menu_size {
            config.menu_size = size;
        }
        config
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "exmenu", "exmenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Config, ConfigError> {
    let s = builder
        .add_source(config::Environment::with_prefix("EXMENU"))
        .build()?;
    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build(config::Config::builder().add_source(config::File::from(config_path).required(false)))
}

pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    build(
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml)),
    )
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// A file whose changes should be reported as `event`.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub event: AppEvent,
}

pub fn watch_targets(config: &Config) -> Vec<WatchTarget> {
    let mut targets = Vec::new();
    if let Ok(path) = get_config_path() {
        targets.push(WatchTarget {
            path,
            event: AppEvent::ConfigReload,
        });
    }
    if let Some(path) = &config.avatar {
        targets.push(WatchTarget {
            path: path.clone(),
            event: AppEvent::AvatarReload,
        });
    }
    targets
}

fn watched_dirs(targets: &[WatchTarget]) -> BTreeSet<PathBuf> {
    targets
        .iter()
        .filter_map(|t| t.path.parent())
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                dir.to_path_buf()
            }
        })
        .collect()
}

fn matching_events<'a>(targets: &'a [WatchTarget], paths: &[PathBuf]) -> Vec<&'a AppEvent> {
    targets
        .iter()
        .filter(|t| paths.iter().any(|p| same_file(p, &t.path)))
        .map(|t| &t.event)
        .collect()
}

fn same_file(a: &Path, b: &Path) -> bool {
    a == b || a.ends_with(b)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>, targets: Vec<WatchTarget>) {
    let dirs = watched_dirs(&targets);

    for dir in &dirs {
        if let Err(e) = fs_err::create_dir_all(dir) {
            log::error!("Failed to create directory for watching: {}", e);
            return;
        }
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

    for dir in &dirs {
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::error!("Failed to watch {}: {}", dir.display(), e);
            return;
        }
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                if !meaningful_event {
                    continue;
                }

                for app_event in matching_events(&targets, &event.paths) {
                    if tx.send(app_event.clone()).await.is_err() {
                        return;
                    }
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
