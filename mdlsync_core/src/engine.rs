use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;
use tracing::trace;

use crate::MdlsyncError;
use crate::MdlsyncResult;
use crate::parser::Assignment;
use crate::parser::AssignmentLine;
use crate::parser::LineKind;
use crate::parser::extract_assignments;
use crate::parser::parse_line;

/// How a single assignment attempt against the target document concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApplyStatus {
	/// At least one anchored occurrence had its value literal rewritten.
	Applied,
	/// The document has no anchored constant assignment of this name. This
	/// covers names that are absent as well as names defined through
	/// non-constant equations, which must not be touched.
	SkippedNoMatch,
	/// The only anchored occurrences use the compact subscript list form,
	/// which this grammar does not support.
	SkippedUnsupportedForm,
}

/// The result of applying one extracted assignment to the target document.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutcome {
	/// The assignment name as it appeared in the input file.
	pub name: String,
	/// The replacement value literal.
	pub value: String,
	/// How the attempt concluded.
	pub status: ApplyStatus,
	/// 1-indexed physical lines whose value literal was rewritten.
	pub lines: Vec<usize>,
	/// Whether any rewritten literal actually differed from the new value.
	pub changed: bool,
}

/// The outcome of substituting assignments into a document.
#[derive(Debug)]
pub struct Substitution {
	/// The full rewritten document text.
	pub text: String,
	/// One outcome per input assignment, in input order.
	pub outcomes: Vec<ApplyOutcome>,
}

impl Substitution {
	/// Number of assignments that rewrote at least one line.
	pub fn applied_count(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|outcome| outcome.status == ApplyStatus::Applied)
			.count()
	}

	/// Number of assignments skipped for any reason.
	pub fn skipped_count(&self) -> usize {
		self.outcomes.len() - self.applied_count()
	}

	/// True when the rewritten text differs from the original document.
	pub fn is_changed(&self) -> bool {
		self.outcomes.iter().any(|outcome| outcome.changed)
	}
}

/// Rewrite the value literal of every line-anchored constant assignment in
/// `document` whose name exactly matches one of `assignments`.
///
/// The document is parsed once, then the assignments are applied in input
/// order against the evolving line set, so a duplicated input name leaves
/// the value of its last occurrence everywhere (last writer wins). Only the
/// literal's byte span is replaced; all other bytes of the document survive
/// verbatim, including whitespace style, inline annotations, and bound
/// syntax. Substituting a value equal to the one already present returns a
/// byte-identical document.
pub fn substitute_values(document: &str, assignments: &[Assignment]) -> Substitution {
	let mut lines: Vec<String> = document
		.split_inclusive('\n')
		.map(str::to_string)
		.collect();
	let mut parsed: Vec<Option<AssignmentLine>> = lines
		.iter()
		.map(|line| {
			match parse_line(line) {
				LineKind::Assignment(assignment) => Some(assignment),
				_ => None,
			}
		})
		.collect();

	// Index anchored assignment lines by exact name. The anchor is what
	// keeps `peng neewom` from matching inside a line that defines
	// `ni peng neewom`.
	let mut index: HashMap<String, Vec<usize>> = HashMap::new();
	for (idx, entry) in parsed.iter().enumerate() {
		if let Some(assignment) = entry {
			if assignment.anchored {
				index
					.entry(assignment.name.clone())
					.or_default()
					.push(idx);
			}
		}
	}

	let mut outcomes = Vec::with_capacity(assignments.len());

	for assignment in assignments {
		let mut rewritten = Vec::new();
		let mut changed = false;
		let mut compact_seen = false;

		if let Some(line_indices) = index.get(&assignment.name) {
			for &idx in line_indices {
				let Some(entry) = parsed[idx].as_mut() else {
					continue;
				};
				if entry.list_form {
					compact_seen = true;
					trace!(
						name = %assignment.name,
						line = idx + 1,
						"compact subscript form left untouched"
					);
					continue;
				}

				if entry.value != assignment.value {
					changed = true;
				}
				lines[idx].replace_range(entry.value_span.clone(), &assignment.value);
				entry.value_span =
					entry.value_span.start..entry.value_span.start + assignment.value.len();
				entry.value.clone_from(&assignment.value);
				rewritten.push(idx + 1);
			}
		}

		let status = if rewritten.is_empty() {
			if compact_seen {
				ApplyStatus::SkippedUnsupportedForm
			} else {
				ApplyStatus::SkippedNoMatch
			}
		} else {
			ApplyStatus::Applied
		};
		debug!(
			name = %assignment.name,
			value = %assignment.value,
			?status,
			"substitution attempt"
		);

		outcomes.push(ApplyOutcome {
			name: assignment.name.clone(),
			value: assignment.value.clone(),
			status,
			lines: rewritten,
			changed,
		});
	}

	Substitution {
		text: lines.concat(),
		outcomes,
	}
}

/// A computed parameter synchronization, ready to be written to disk.
#[derive(Debug)]
pub struct ParamSync {
	/// The model file the rewritten text belongs to.
	pub model_file: PathBuf,
	/// The full rewritten model text.
	pub text: String,
	/// Per-assignment outcomes in input order.
	pub outcomes: Vec<ApplyOutcome>,
}

impl ParamSync {
	/// Number of assignments that rewrote at least one line.
	pub fn applied_count(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|outcome| outcome.status == ApplyStatus::Applied)
			.count()
	}

	/// True when the rewritten text differs from the model file on disk.
	pub fn is_changed(&self) -> bool {
		self.outcomes.iter().any(|outcome| outcome.changed)
	}
}

/// Read assignments from `input_file` and compute the rewritten text of
/// `model_file`. Nothing is written to disk.
pub fn compute_param_sync(
	input_file: &Path,
	model_file: &Path,
	max_file_size: u64,
) -> MdlsyncResult<ParamSync> {
	let input = read_to_string_limited(input_file, max_file_size)?;
	let model = read_to_string_limited(model_file, max_file_size)?;

	let assignments = extract_assignments(&input);
	debug!(
		count = assignments.len(),
		input = %input_file.display(),
		"extracted assignments"
	);

	let substitution = substitute_values(&model, &assignments);

	Ok(ParamSync {
		model_file: model_file.to_path_buf(),
		text: substitution.text,
		outcomes: substitution.outcomes,
	})
}

/// Write the rewritten model text to disk, optionally creating a backup copy
/// next to the model file first. Returns the backup path if one was written.
/// Rerunning overwrites any previous backup with the same suffix.
pub fn write_param_sync(
	sync: &ParamSync,
	backup_suffix: Option<&str>,
) -> MdlsyncResult<Option<PathBuf>> {
	let backup = match backup_suffix {
		Some(suffix) => Some(create_backup(&sync.model_file, suffix)?),
		None => None,
	};
	std::fs::write(&sync.model_file, &sync.text)?;
	Ok(backup)
}

/// Copy `file` to a sibling whose stem carries `suffix` (e.g. `model.mdl` →
/// `model_BACKUP.mdl`).
pub fn create_backup(file: &Path, suffix: &str) -> MdlsyncResult<PathBuf> {
	let stem = file
		.file_stem()
		.and_then(|stem| stem.to_str())
		.unwrap_or_default();
	let backup_name = match file.extension().and_then(|ext| ext.to_str()) {
		Some(ext) => format!("{stem}{suffix}.{ext}"),
		None => format!("{stem}{suffix}"),
	};
	let backup_path = file.with_file_name(backup_name);
	std::fs::copy(file, &backup_path)?;
	Ok(backup_path)
}

/// Read a file into a string, refusing files larger than `limit` bytes.
pub fn read_to_string_limited(path: &Path, limit: u64) -> MdlsyncResult<String> {
	let size = std::fs::metadata(path)?.len();
	if size > limit {
		return Err(MdlsyncError::FileTooLarge {
			path: path.display().to_string(),
			size,
			limit,
		});
	}
	Ok(std::fs::read_to_string(path)?)
}
