use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use regex::Regex;
use tracing::debug;

use crate::MdlsyncError;
use crate::MdlsyncResult;
use crate::engine::read_to_string_limited;

/// An ordered set of rename rules with longest-key priority.
///
/// Keys are sorted by length descending (ties broken lexicographically) and
/// compiled into a single escaped alternation. The regex engine prefers
/// earlier alternation branches, so at any position the longest matching key
/// wins: a key that is a substring of a longer key never fires where the
/// longer key also matches.
#[derive(Debug)]
pub struct RuleSet {
	replacements: HashMap<String, String>,
	matcher: Option<Regex>,
}

impl RuleSet {
	/// Build a rule set from old → new pairs. Keys and replacements are
	/// literal text, not pattern syntax. Empty keys are ignored.
	pub fn new(rules: impl IntoIterator<Item = (String, String)>) -> Self {
		let replacements: HashMap<String, String> = rules
			.into_iter()
			.filter(|(old, _)| !old.is_empty())
			.collect();

		let mut keys: Vec<&String> = replacements.keys().collect();
		keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

		let matcher = if keys.is_empty() {
			None
		} else {
			let pattern = keys
				.iter()
				.map(|key| regex::escape(key))
				.collect::<Vec<_>>()
				.join("|");
			// An alternation of escaped literals always compiles.
			Regex::new(&pattern).ok()
		};

		Self {
			replacements,
			matcher,
		}
	}

	/// Number of rules in the set.
	pub fn len(&self) -> usize {
		self.replacements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.replacements.is_empty()
	}

	/// Replace every occurrence of a rule key in one left-to-right pass.
	/// Scanning resumes after each replacement's source span, so replacement
	/// output is never rescanned and chained rules cannot cascade.
	pub fn substitute_all(&self, text: &str) -> String {
		self.substitute_all_counting(text).0
	}

	/// Like [`substitute_all`](Self::substitute_all), but also reports how
	/// many replacements were made.
	pub fn substitute_all_counting(&self, text: &str) -> (String, usize) {
		let Some(matcher) = &self.matcher else {
			return (text.to_string(), 0);
		};

		let mut count = 0;
		let replaced = matcher.replace_all(text, |caps: &regex::Captures<'_>| {
			count += 1;
			self.replacements
				.get(&caps[0])
				.cloned()
				.unwrap_or_default()
		});

		(replaced.into_owned(), count)
	}
}

/// Load a rename dictionary from a JSON or TOML file, keyed on extension.
/// Both formats map old names to new names as plain string pairs.
pub fn load_rules(path: &Path) -> MdlsyncResult<RuleSet> {
	let raw = std::fs::read_to_string(path).map_err(|error| {
		MdlsyncError::RulesFile {
			path: path.display().to_string(),
			reason: error.to_string(),
		}
	})?;

	let extension = path
		.extension()
		.and_then(|ext| ext.to_str())
		.unwrap_or_default()
		.to_ascii_lowercase();

	let map: HashMap<String, String> = match extension.as_str() {
		"json" => {
			serde_json::from_str(&raw).map_err(|error| {
				MdlsyncError::RulesFile {
					path: path.display().to_string(),
					reason: error.to_string(),
				}
			})?
		}
		"toml" => {
			toml::from_str(&raw).map_err(|error| {
				MdlsyncError::RulesFile {
					path: path.display().to_string(),
					reason: error.to_string(),
				}
			})?
		}
		other => return Err(MdlsyncError::UnsupportedRulesFormat(other.to_string())),
	};

	Ok(RuleSet::new(map))
}

/// Read a list of file paths from a text file, one path per line. Blank
/// lines are ignored; an empty list is a hard error.
pub fn read_file_list(path: &Path) -> MdlsyncResult<Vec<PathBuf>> {
	let raw = std::fs::read_to_string(path)?;
	let files: Vec<PathBuf> = raw
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(PathBuf::from)
		.collect();

	if files.is_empty() {
		return Err(MdlsyncError::EmptyFileList(path.display().to_string()));
	}

	Ok(files)
}

/// A file rewritten by a rename pass.
#[derive(Debug)]
pub struct RenamedFile {
	/// The file the rewritten text belongs to.
	pub path: PathBuf,
	/// The full rewritten content.
	pub text: String,
	/// Number of rule applications within the file.
	pub replacement_count: usize,
}

/// Result of computing renames across a set of files.
#[derive(Debug)]
pub struct RenameResult {
	/// Files whose content changed, with their new content.
	pub updated_files: Vec<RenamedFile>,
	/// Total number of files scanned.
	pub scanned_count: usize,
}

/// Apply `rules` to every file and collect the rewritten contents of those
/// that changed. Nothing is written to disk. Each file is read fully,
/// transformed, and kept in memory; files are never cross-referenced.
pub fn compute_renames(
	files: &[PathBuf],
	rules: &RuleSet,
	max_file_size: u64,
) -> MdlsyncResult<RenameResult> {
	let mut updated_files = Vec::new();

	for file in files {
		let original = read_to_string_limited(file, max_file_size)?;
		let (replaced, replacement_count) = rules.substitute_all_counting(&original);

		debug!(file = %file.display(), replacement_count, "rename pass");

		if replaced != original {
			updated_files.push(RenamedFile {
				path: file.clone(),
				text: replaced,
				replacement_count,
			});
		}
	}

	Ok(RenameResult {
		updated_files,
		scanned_count: files.len(),
	})
}

/// Write the rewritten contents back to disk, overwriting the originals in
/// place.
pub fn write_renames(result: &RenameResult) -> MdlsyncResult<()> {
	for file in &result.updated_files {
		std::fs::write(&file.path, &file.text)?;
	}
	Ok(())
}
