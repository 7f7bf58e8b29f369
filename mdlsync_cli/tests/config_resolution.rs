use mdlsync_core::AnyEmptyResult;

mod common;
use common::mdlsync_cmd;

#[test]
fn config_backup_suffix_is_honored() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(
		tmp.path().join("mdlsync.toml"),
		"[backup]\nsuffix = \"_OLD\"\n",
	)?;
	std::fs::write(&input, "rate = 0.5\n")?;
	std::fs::write(&model, "rate = 0.1\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg("--path")
		.arg(tmp.path())
		.arg(&input)
		.arg(&model)
		.assert()
		.success();

	assert!(tmp.path().join("model_OLD.mdl").exists());
	assert!(!tmp.path().join("model_BACKUP.mdl").exists());

	Ok(())
}

#[test]
fn config_can_disable_backups() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(
		tmp.path().join("mdlsync.toml"),
		"[backup]\nenabled = false\n",
	)?;
	std::fs::write(&input, "rate = 0.5\n")?;
	std::fs::write(&model, "rate = 0.1\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg("--path")
		.arg(tmp.path())
		.arg(&input)
		.arg(&model)
		.assert()
		.success();

	assert!(!tmp.path().join("model_BACKUP.mdl").exists());
	assert_eq!(std::fs::read_to_string(&model)?, "rate = 0.5\n");

	Ok(())
}

#[test]
fn config_default_rules_path_is_used() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let model = tmp.path().join("model.mdl");

	std::fs::write(tmp.path().join("mdlsync.toml"), "rules = \"names.json\"\n")?;
	std::fs::write(tmp.path().join("names.json"), r#"{"a": "b"}"#)?;
	std::fs::write(&model, "a = 1\n")?;

	mdlsync_cmd()
		.arg("rename")
		.arg("--path")
		.arg(tmp.path())
		.arg(&model)
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(&model)?, "b = 1\n");

	Ok(())
}

#[test]
fn invalid_config_is_a_hard_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	let model = tmp.path().join("model.mdl");

	std::fs::write(tmp.path().join("mdlsync.toml"), "max_file_size = \"big\"\n")?;
	std::fs::write(&input, "rate = 0.5\n")?;
	std::fs::write(&model, "rate = 0.1\n")?;

	mdlsync_cmd()
		.arg("params")
		.arg("--path")
		.arg(tmp.path())
		.arg(&input)
		.arg(&model)
		.assert()
		.code(2);

	Ok(())
}
