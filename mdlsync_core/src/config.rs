use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MdlsyncError;
use crate::MdlsyncResult;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default suffix appended to a model file's stem when writing a backup.
pub const DEFAULT_BACKUP_SUFFIX: &str = "_BACKUP";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["mdlsync.toml", ".mdlsync.toml"];

/// Configuration loaded from an `mdlsync.toml` file.
///
/// ```toml
/// [backup]
/// enabled = true
/// suffix = "_BACKUP"
///
/// max_file_size = 10485760
/// rules = "varnames.json"
/// ```
#[derive(Debug, Deserialize)]
pub struct MdlsyncConfig {
	/// Backup behavior for in-place model rewrites.
	#[serde(default)]
	pub backup: BackupConfig,
	/// Maximum file size in bytes to read. Larger files are refused.
	/// Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// Default rename dictionary used by `rename` when `--rules` is not
	/// given, relative to the config root.
	#[serde(default)]
	pub rules: Option<PathBuf>,
}

impl Default for MdlsyncConfig {
	fn default() -> Self {
		Self {
			backup: BackupConfig::default(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			rules: None,
		}
	}
}

impl MdlsyncConfig {
	/// Load configuration from the first config file candidate found under
	/// `root`. Returns `Ok(None)` when no config file exists.
	pub fn load(root: &Path) -> MdlsyncResult<Option<Self>> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if !path.is_file() {
				continue;
			}
			let raw = std::fs::read_to_string(&path)?;
			let config = toml::from_str(&raw)
				.map_err(|error| MdlsyncError::ConfigParse(error.to_string()))?;
			return Ok(Some(config));
		}
		Ok(None)
	}
}

/// Backup settings for in-place model rewrites.
#[derive(Debug, Deserialize)]
pub struct BackupConfig {
	/// Whether a backup copy is written before overwriting a model file.
	#[serde(default = "default_true")]
	pub enabled: bool,
	/// Suffix appended to the file stem of the backup copy. Rerunning
	/// overwrites an existing backup with the same suffix.
	#[serde(default = "default_backup_suffix")]
	pub suffix: String,
}

impl Default for BackupConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
		}
	}
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

fn default_true() -> bool {
	true
}

fn default_backup_suffix() -> String {
	DEFAULT_BACKUP_SUFFIX.to_string()
}
