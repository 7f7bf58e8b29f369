use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdlsyncError {
	#[error(transparent)]
	#[diagnostic(code(mdlsync::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdlsync::config_parse),
		help("check that mdlsync.toml is valid TOML with an optional [backup] section")
	)]
	ConfigParse(String),

	#[error("failed to load rename rules from `{path}`: {reason}")]
	#[diagnostic(code(mdlsync::rules_file))]
	RulesFile { path: String, reason: String },

	#[error("unsupported rules file format: `{0}`")]
	#[diagnostic(
		code(mdlsync::unsupported_rules_format),
		help("supported formats: json, toml")
	)]
	UnsupportedRulesFormat(String),

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(mdlsync::file_too_large),
		help("increase the file size limit in mdlsync.toml")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("file list `{0}` contains no usable entries")]
	#[diagnostic(
		code(mdlsync::empty_file_list),
		help("list one file path per line; blank lines are ignored")
	)]
	EmptyFileList(String),
}

pub type MdlsyncResult<T> = Result<T, MdlsyncError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
