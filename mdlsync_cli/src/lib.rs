use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Keep Vensim model files synchronized with calibration results.",
	long_about = "mdlsync keeps the constant values of Vensim-style model files in sync with \
	              calibration output files, and renames variables across whole suites of \
	              text-readable model files without breaking cross-file references.\n\nQuick \
	              start:\n  mdlsync params results.out model.mdl   Write calibrated values into \
	              the model\n  mdlsync check results.out model.mdl    Verify the model is up to \
	              date\n  mdlsync rename --rules names.json ...  Rename variables across \
	              files\n  mdlsync extract results.out            List the assignments in a file"
)]
pub struct MdlsyncCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the directory searched for `mdlsync.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Overwrite constant values in a model file with values from an input
	/// file.
	///
	/// Reads `name = value` entries from INPUT (an `out`, `cin`, or any other
	/// text file using that syntax), then rewrites the value of every
	/// matching constant in MODEL in place. Names defined through
	/// non-constant equations are quietly ignored, as are subscripted
	/// constants written in compact form.
	///
	/// A backup copy of MODEL is written next to it before overwriting.
	/// Rerunning overwrites the previous backup, so check and restore as
	/// needed before rerunning.
	Params {
		/// Text file with `name = value` entries (with extension).
		input: PathBuf,

		/// Model file whose constants are rewritten in place.
		model: PathBuf,

		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a unified diff of the rewritten model text.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Skip the backup copy normally written next to the model file.
		#[arg(long, default_value_t = false)]
		no_backup: bool,

		/// Output format. Use `text` for human-readable output or `json`
		/// for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Check whether a model file's constants match an input file.
	///
	/// Performs the same matching as `params` but writes nothing. Exits
	/// with a non-zero status code when any constant is out of sync, which
	/// makes this suitable for CI pipelines.
	Check {
		/// Text file with `name = value` entries (with extension).
		input: PathBuf,

		/// Model file to compare against.
		model: PathBuf,

		/// Show a unified diff for the out-of-sync constants.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format. Use `text` for human-readable output or `json`
		/// for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Rename variables across a set of text-readable model files.
	///
	/// Applies a dictionary of old → new names to every listed file,
	/// rewriting them in place. Longer names always take priority over
	/// names that are substrings of them, and replacement output is never
	/// rescanned, so chained renames cannot cascade.
	///
	/// WARNING: files are overwritten in place without backups.
	Rename {
		/// JSON or TOML dictionary mapping old names to new names. Falls
		/// back to the `rules` path in `mdlsync.toml` when omitted.
		#[arg(long)]
		rules: Option<PathBuf>,

		/// Files to rewrite in place.
		files: Vec<PathBuf>,

		/// Read the file list from a text file, one path per line.
		#[arg(long, conflicts_with = "files")]
		file_list: Option<PathBuf>,

		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// List the assignments extracted from an input file.
	///
	/// Useful for inspecting what `params` would try to apply: control
	/// lines are dropped, bound markers are discarded, and compact-form
	/// subscript lines are excluded.
	Extract {
		/// Text file with `name = value` entries (with extension).
		input: PathBuf,

		/// Output format. Use `text` for human-readable output or `json`
		/// for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
