use mdlsync_core::AnyEmptyResult;

mod common;
use common::mdlsync_cmd;

#[test]
fn params_rewrites_stale_constants() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(&input, ":OPTIMIZE\ngrowth rate = 0.025\n")?;
	std::fs::write(&model, "growth rate = 0.02\n\t~\t1/Year\n\t|\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg(&input)
		.arg(&model)
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated 1 value(s)"));

	let content = std::fs::read_to_string(&model)?;
	assert!(content.contains("growth rate = 0.025"));
	assert!(!content.contains("growth rate = 0.02\n"));

	Ok(())
}

#[test]
fn params_writes_a_backup_copy() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(&input, "rate = 0.5\n")?;
	std::fs::write(&model, "rate = 0.1\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg(&input)
		.arg(&model)
		.assert()
		.success()
		.stdout(predicates::str::contains("Backup written"));

	let backup = tmp.path().join("model_BACKUP.mdl");
	assert_eq!(std::fs::read_to_string(&backup)?, "rate = 0.1\n");
	assert_eq!(std::fs::read_to_string(&model)?, "rate = 0.5\n");

	Ok(())
}

#[test]
fn params_no_backup_flag_skips_the_copy() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(&input, "rate = 0.5\n")?;
	std::fs::write(&model, "rate = 0.1\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg("--no-backup")
		.arg(&input)
		.arg(&model)
		.assert()
		.success();

	assert!(!tmp.path().join("model_BACKUP.mdl").exists());

	Ok(())
}

#[test]
fn params_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(&input, "rate = 0.5\n")?;
	let model_content = "rate = 0.1\n";
	std::fs::write(&model, model_content)?;

	mdlsync_cmd()
		.arg("params")
		.arg("--dry-run")
		.arg(&input)
		.arg(&model)
		.assert()
		.success()
		.stdout(predicates::str::contains("would rewrite"));

	assert_eq!(std::fs::read_to_string(&model)?, model_content);
	assert!(!tmp.path().join("model_BACKUP.mdl").exists());

	Ok(())
}

#[test]
fn params_noop_when_in_sync() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(&input, "rate = 0.5\n")?;
	std::fs::write(&model, "rate = 0.5\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg(&input)
		.arg(&model)
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	// An in-sync model is never rewritten, so no backup appears either.
	assert!(!tmp.path().join("model_BACKUP.mdl").exists());

	Ok(())
}

#[test]
fn params_json_format_reports_outcomes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(&input, "rate = 0.5\nmissing = 1\n")?;
	std::fs::write(&model, "rate = 0.1\n")?;

	let output = mdlsync_cmd()
		.arg("params")
		.arg("--format")
		.arg("json")
		.arg(&input)
		.arg(&model)
		.output()?;

	assert!(output.status.success());
	let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(parsed["changed"], true);
	assert_eq!(parsed["applied"], 1);
	assert_eq!(parsed["outcomes"][0]["status"], "applied");
	assert_eq!(parsed["outcomes"][1]["status"], "skipped_no_match");

	Ok(())
}

#[test]
fn params_missing_input_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let model = tmp.path().join("model.mdl");
	std::fs::write(&model, "rate = 0.1\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg(tmp.path().join("nope.out"))
		.arg(&model)
		.assert()
		.code(2);

	Ok(())
}
