use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdlsync_cli::Commands;
use mdlsync_cli::MdlsyncCli;
use mdlsync_cli::OutputFormat;
use mdlsync_core::ApplyOutcome;
use mdlsync_core::ApplyStatus;
use mdlsync_core::MdlsyncConfig;
use mdlsync_core::ParamSync;
use mdlsync_core::compute_param_sync;
use mdlsync_core::compute_renames;
use mdlsync_core::extract_assignments;
use mdlsync_core::load_rules;
use mdlsync_core::read_file_list;
use mdlsync_core::read_to_string_limited;
use mdlsync_core::write_param_sync;
use mdlsync_core::write_renames;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = MdlsyncCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Params {
			input,
			model,
			dry_run,
			diff,
			no_backup,
			format,
		}) => run_params(&args, input, model, *dry_run, *diff, *no_backup, *format),
		Some(Commands::Check {
			input,
			model,
			diff,
			format,
		}) => run_check(&args, input, model, *diff, *format),
		Some(Commands::Rename {
			rules,
			files,
			file_list,
			dry_run,
		}) => run_rename(&args, rules.as_deref(), files, file_list.as_deref(), *dry_run),
		Some(Commands::Extract { input, format }) => run_extract(&args, input, *format),
		None => {
			eprintln!("No subcommand specified. Run `mdlsync --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<mdlsync_core::MdlsyncError>() {
			Ok(sync_err) => {
				let report: miette::Report = (*sync_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn resolve_root(args: &MdlsyncCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &MdlsyncCli) -> Result<MdlsyncConfig, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	Ok(MdlsyncConfig::load(&root)?.unwrap_or_default())
}

fn count_status(outcomes: &[ApplyOutcome], status: ApplyStatus) -> usize {
	outcomes
		.iter()
		.filter(|outcome| outcome.status == status)
		.count()
}

fn print_outcomes(sync: &ParamSync, verbose: bool) {
	println!(
		"applied: {}, skipped (no match): {}, skipped (compact form): {}",
		sync.applied_count(),
		count_status(&sync.outcomes, ApplyStatus::SkippedNoMatch),
		count_status(&sync.outcomes, ApplyStatus::SkippedUnsupportedForm),
	);

	if !verbose {
		return;
	}

	for outcome in &sync.outcomes {
		match outcome.status {
			ApplyStatus::Applied => {
				let lines = outcome
					.lines
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(", ");
				println!(
					"  {} = {} [applied, line(s) {lines}]",
					outcome.name, outcome.value
				);
			}
			ApplyStatus::SkippedNoMatch => {
				println!("  {} [skipped: no match]", outcome.name);
			}
			ApplyStatus::SkippedUnsupportedForm => {
				println!("  {} [skipped: compact subscript form]", outcome.name);
			}
			_ => {}
		}
	}
}

fn params_json(sync: &ParamSync, dry_run: bool, backup: Option<&Path>) -> serde_json::Value {
	serde_json::json!({
		"model": sync.model_file.display().to_string(),
		"changed": sync.is_changed(),
		"applied": sync.applied_count(),
		"dry_run": dry_run,
		"backup": backup.map(|path| path.display().to_string()),
		"outcomes": sync.outcomes,
	})
}

fn run_params(
	args: &MdlsyncCli,
	input: &Path,
	model: &Path,
	dry_run: bool,
	show_diff: bool,
	no_backup: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let sync = compute_param_sync(input, model, config.max_file_size)?;

	if show_diff && sync.is_changed() {
		let original = std::fs::read_to_string(model)?;
		print_diff(&original, &sync.text);
	}

	if dry_run {
		match format {
			OutputFormat::Json => {
				println!("{}", params_json(&sync, true, None));
			}
			OutputFormat::Text => {
				print_outcomes(&sync, args.verbose);
				if sync.is_changed() {
					println!(
						"Dry run: would rewrite {} ({} value(s)).",
						model.display(),
						sync.applied_count()
					);
				} else {
					println!("Model is already up to date.");
				}
			}
		}
		return Ok(());
	}

	if !sync.is_changed() {
		match format {
			OutputFormat::Json => {
				println!("{}", params_json(&sync, false, None));
			}
			OutputFormat::Text => {
				print_outcomes(&sync, args.verbose);
				println!("Model is already up to date; nothing written.");
			}
		}
		return Ok(());
	}

	let make_backup = !no_backup && config.backup.enabled;
	let backup = write_param_sync(&sync, make_backup.then_some(config.backup.suffix.as_str()))?;

	match format {
		OutputFormat::Json => {
			println!("{}", params_json(&sync, false, backup.as_deref()));
		}
		OutputFormat::Text => {
			print_outcomes(&sync, args.verbose);
			println!(
				"Updated {} value(s) in {}.",
				sync.applied_count(),
				model.display()
			);
			if let Some(backup) = backup {
				println!("Backup written to {}.", backup.display());
			}
		}
	}

	Ok(())
}

fn run_check(
	args: &MdlsyncCli,
	input: &Path,
	model: &Path,
	show_diff: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let sync = compute_param_sync(input, model, config.max_file_size)?;

	let stale: Vec<&ApplyOutcome> = sync
		.outcomes
		.iter()
		.filter(|outcome| outcome.status == ApplyStatus::Applied && outcome.changed)
		.collect();

	if stale.is_empty() {
		match format {
			OutputFormat::Json => {
				println!("{}", serde_json::json!({ "ok": true, "stale": [] }));
			}
			OutputFormat::Text => {
				println!("Check passed: all constants are up to date.");
			}
		}
		return Ok(());
	}

	match format {
		OutputFormat::Json => {
			println!(
				"{}",
				serde_json::json!({ "ok": false, "stale": stale })
			);
		}
		OutputFormat::Text => {
			eprintln!("{}", colored!("Check failed.", bold));
			eprintln!("Out-of-date constants:");
			for outcome in &stale {
				let lines = outcome
					.lines
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(", ");
				eprintln!(
					"  {} should be {} (line(s) {lines})",
					outcome.name, outcome.value
				);
			}
			if show_diff {
				let original = std::fs::read_to_string(model)?;
				print_diff(&original, &sync.text);
			}
			eprintln!();
			eprintln!(
				"{} constant(s) out of date. Run `mdlsync params` to fix.",
				stale.len()
			);
		}
	}

	process::exit(1);
}

fn run_rename(
	args: &MdlsyncCli,
	rules: Option<&Path>,
	files: &[PathBuf],
	file_list: Option<&Path>,
	dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let root = resolve_root(args);

	let rules_path = match rules {
		Some(path) => path.to_path_buf(),
		None => {
			match &config.rules {
				Some(path) => root.join(path),
				None => {
					return Err(
						"no rules file given; pass --rules or set `rules` in mdlsync.toml".into(),
					);
				}
			}
		}
	};

	let files: Vec<PathBuf> = match file_list {
		Some(list) => read_file_list(list)?,
		None => files.to_vec(),
	};
	if files.is_empty() {
		return Err("no files given; pass file paths or --file-list".into());
	}

	let rules = load_rules(&rules_path)?;
	if rules.is_empty() {
		println!("Rule dictionary is empty; nothing to do.");
		return Ok(());
	}

	if args.verbose {
		println!(
			"Applying {} rule(s) from {} to {} file(s)",
			rules.len(),
			rules_path.display(),
			files.len()
		);
	}

	let result = compute_renames(&files, &rules, config.max_file_size)?;

	if result.updated_files.is_empty() {
		println!("No occurrences found in {} file(s).", result.scanned_count);
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would modify {} of {} file(s):",
			result.updated_files.len(),
			result.scanned_count
		);
		for file in &result.updated_files {
			println!(
				"  {} ({} replacement(s))",
				file.path.display(),
				file.replacement_count
			);
		}
		return Ok(());
	}

	for file in &result.updated_files {
		println!(
			"Modifying {} ({} replacement(s))...",
			file.path.display(),
			file.replacement_count
		);
	}
	write_renames(&result)?;
	println!(
		"Updated {} of {} file(s).",
		result.updated_files.len(),
		result.scanned_count
	);

	Ok(())
}

fn run_extract(
	args: &MdlsyncCli,
	input: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let text = read_to_string_limited(input, config.max_file_size)?;
	let assignments = extract_assignments(&text);

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string(&assignments)?);
		}
		OutputFormat::Text => {
			if assignments.is_empty() {
				println!("No assignments found in {}.", input.display());
				return Ok(());
			}
			for entry in &assignments {
				println!("{} = {}", entry.name, entry.value);
			}
			println!();
			println!("{} assignment(s)", assignments.len());
		}
	}

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
