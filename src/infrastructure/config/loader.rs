use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::value::Dict;
use figment::Figment;
use tracing::{debug, info};

use super::figment_source::FigmentSource;
use crate::domain::models::{keys, CONFIG_FILE_NAME, DEFAULT_CONFIG_DIR};
use crate::domain::ConfigError;

/// Directories searched for the config file, in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    /// Standard search path for a service
    ///
    /// 1. `/etc/<name>/`
    /// 2. `$HOME/.<name>` (skipped when `HOME` is unset)
    /// 3. the current working directory
    ///
    /// An empty name searches for `micro` instead.
    pub fn for_name(name: &str) -> Self {
        let name = if name.is_empty() {
            DEFAULT_CONFIG_DIR
        } else {
            name
        };

        let mut dirs = vec![PathBuf::from(format!("/etc/{name}/"))];
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join(format!(".{name}")));
        }
        dirs.push(PathBuf::from("."));

        Self { dirs }
    }

    /// Explicit search path
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
    /// `KEY=value` lines; keys are lowercased and values kept as strings
    Dotenv,
}

impl ConfigFormat {
    /// Extensions tried in each directory, in order.
    pub const EXTENSIONS: [&'static str; 5] = ["json", "toml", "yaml", "yml", "env"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "env" => Some(Self::Dotenv),
            _ => None,
        }
    }

    /// Figment holding the parsed contents of `raw`.
    fn figment(self, raw: &str) -> Result<Figment, String> {
        match self {
            Self::Json => Ok(Figment::from(Json::string(raw))),
            Self::Toml => Ok(Figment::from(Toml::string(raw))),
            Self::Yaml => Ok(Figment::from(Yaml::string(raw))),
            Self::Dotenv => {
                let pairs = dotenvy::from_read_iter(raw.as_bytes())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| e.to_string())?;
                Ok(string_layer(pairs))
            }
        }
    }
}

/// Layer of verbatim string values, one per `(key, value)` pair
///
/// Keys are lowercased and dotted keys nest (`REDIS.ADDR` -> `redis.addr`).
/// Values are never reinterpreted, so `0123` stays `"0123"`.
fn string_layer<I>(pairs: I) -> Figment
where
    I: IntoIterator<Item = (String, String)>,
{
    pairs.into_iter().fold(Figment::new(), |figment, (key, value)| {
        figment.merge(Serialized::default(&key.to_lowercase(), value))
    })
}

/// A config file located on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

/// Locates the config file and layers the environment over it
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the given search path
    ///
    /// Precedence (lowest to highest):
    /// 1. The first `config.<ext>` found on the search path
    /// 2. Environment variables, matched to keys case-insensitively
    ///
    /// A missing file is not an error: the result then holds environment
    /// values only.
    ///
    /// The source lists the file's keys plus any recognized key set in the
    /// environment; other environment variables are readable but not listed.
    pub fn load(paths: &SearchPaths) -> Result<FigmentSource, ConfigError> {
        let (file_layer, origin) = match Self::discover(paths) {
            Ok(file) => {
                let figment = Self::read(&file)?;
                (figment, Some(file.path))
            }
            Err(err) if err.is_not_found() => {
                info!(error = %err, "no config file, using environment only");
                (Figment::new(), None)
            }
            Err(err) => return Err(err),
        };

        let env_layer = Self::env_layer();

        let mut listed: BTreeSet<String> = file_layer
            .extract::<Dict>()
            .map(|dict| dict.into_keys().collect())
            .unwrap_or_default();
        listed.extend(
            keys::ALL
                .iter()
                .filter(|key| env_layer.find_value(key).is_ok())
                .map(|key| (*key).to_string()),
        );

        let figment = file_layer.merge(env_layer);
        Ok(FigmentSource::new(figment, origin).with_keys(listed.into_iter().collect()))
    }

    /// Every process environment variable as a string value
    pub fn env_layer() -> Figment {
        string_layer(
            Env::raw()
                .iter()
                .map(|(key, value)| (key.as_str().to_string(), value)),
        )
    }

    /// Find the first config file on the search path
    ///
    /// Directories are tried in order and, within a directory, extensions in
    /// the order of [`ConfigFormat::EXTENSIONS`]. Candidates that do not exist,
    /// or whose parent is not a directory, are skipped. Any other I/O error
    /// while probing (e.g. permission denied) is returned as `ConfigError::Read`.
    pub fn discover(paths: &SearchPaths) -> Result<ConfigFile, ConfigError> {
        for dir in paths.dirs() {
            for ext in ConfigFormat::EXTENSIONS {
                let candidate = dir.join(format!("{CONFIG_FILE_NAME}.{ext}"));
                if !Self::is_file(&candidate)? {
                    continue;
                }

                let Some(format) = ConfigFormat::from_extension(ext) else {
                    continue;
                };
                debug!(path = %candidate.display(), ?format, "found config file");
                return Ok(ConfigFile {
                    path: candidate,
                    format,
                });
            }
        }

        Err(ConfigError::NotFound {
            searched: paths.dirs().to_vec(),
        })
    }

    /// Read and parse a config file
    ///
    /// A blank file is an empty configuration. Anything else must parse to a
    /// key/value map.
    pub fn read(file: &ConfigFile) -> Result<Figment, ConfigError> {
        let raw = fs::read_to_string(&file.path).map_err(|source| ConfigError::Read {
            path: file.path.clone(),
            source,
        })?;

        if raw.trim().is_empty() {
            debug!(path = %file.path.display(), "config file is empty");
            return Ok(Figment::new());
        }

        let parse_error = |message: String| ConfigError::Parse {
            path: file.path.clone(),
            message,
        };
        let figment = file.format.figment(&raw).map_err(parse_error)?;
        figment
            .extract::<Dict>()
            .map_err(|e| parse_error(e.to_string()))?;

        info!(path = %file.path.display(), "loaded config file");
        Ok(figment)
    }

    fn is_file(candidate: &Path) -> Result<bool, ConfigError> {
        match fs::metadata(candidate) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Ok(false)
            }
            Err(source) => Err(ConfigError::Read {
                path: candidate.to_path_buf(),
                source,
            }),
        }
    }
}
