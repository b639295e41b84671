use crate::error::{ExtractError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_SOURCE: &str = "./union-types/slides-source.md";
pub const DEFAULT_OUT_DIR: &str = "./union-types/snippets";
pub const DEFAULT_LANG: &str = "typescript";
pub const DEFAULT_EXTENSION: &str = "ts";
pub const DEFAULT_FILE_PREFIX: &str = "code_";
/// Keeps the snippet directory in version control when it is otherwise empty.
pub const DEFAULT_PLACEHOLDER: &str = ".keep";

/// Config files picked up from the working directory when `--config` is absent
const CONFIG_CANDIDATES: &[&str] = &["extract-code.yml", "extract-code.yaml"];

/// Resolved settings for one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub source: PathBuf,
    pub out_dir: PathBuf,
    pub lang: String,
    pub extension: String,
    pub file_prefix: String,
    pub placeholder: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            lang: DEFAULT_LANG.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Optional YAML overrides. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub file_prefix: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl ExtractConfig {
    /// Layer a config file over the current values.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(source) = file.source {
            self.source = source;
        }
        if let Some(out_dir) = file.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(lang) = file.lang {
            self.lang = lang;
        }
        if let Some(extension) = file.extension {
            self.extension = extension;
        }
        if let Some(file_prefix) = file.file_prefix {
            self.file_prefix = file_prefix;
        }
        if let Some(placeholder) = file.placeholder {
            self.placeholder = placeholder;
        }
        self
    }
}

pub fn parse_config(text: &str, path: &Path) -> Result<FileConfig> {
    // An empty YAML document deserializes to unit, not a map.
    if text.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(text).map_err(|source| ExtractError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// First candidate name in `dir` that is a regular file.
pub fn find_config_candidate(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Load an explicit config path, or fall back to the working-directory candidates.
/// Returns `None` if no explicit path was given and no candidate exists.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match find_config_candidate(Path::new(".")) {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    let text = fs::read_to_string(&path).map_err(|source| ExtractError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&text, &path)?;
    info!(path = %path.display(), "loaded config");
    Ok(Some(config))
}
