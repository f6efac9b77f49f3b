use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Settings that may come from a YAML file named by `WEBSERVER_CONFIG`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub host: Option<String>,
    pub root: Option<PathBuf>,
    pub confine_to_root: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory request paths are resolved against.
    pub root: PathBuf,
    /// Reject absolute targets, `..` components, and symlinks leading
    /// outside `root`.
    pub confine_to_root: bool,
}

/// Missing or invalid port argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub program: String,
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "usage: {} <port>", self.program)
    }
}

impl std::error::Error for UsageError {}

impl Config {
    pub fn new(port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
            root: PathBuf::from("."),
            confine_to_root: true,
        }
    }

    /// Validates `<program> <port>` without consulting the environment.
    pub fn from_args<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| "webserver".to_string());

        let port = match (args.next(), args.next()) {
            (Some(port), None) => port.parse::<u16>().ok(),
            _ => None,
        };

        port.map(Self::new).ok_or(UsageError { program })
    }

    /// Full startup configuration: port from `args`, then the optional YAML
    /// file, then `WEBSERVER_HOST` / `WEBSERVER_ROOT`.
    pub fn load<I, S>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cfg = Self::from_args(args)?;

        if let Ok(path) = std::env::var("WEBSERVER_CONFIG") {
            let file = FileConfig::read(Path::new(&path))?;
            cfg.apply(file);
        }

        if let Ok(host) = std::env::var("WEBSERVER_HOST") {
            cfg.host = host;
        }
        if let Ok(root) = std::env::var("WEBSERVER_ROOT") {
            cfg.root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn apply(&mut self, file: FileConfig) {
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(root) = file.root {
            self.root = root;
        }
        if let Some(confine) = file.confine_to_root {
            self.confine_to_root = confine;
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FileConfig {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
