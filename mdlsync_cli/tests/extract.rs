use mdlsync_core::AnyEmptyResult;

mod common;
use common::mdlsync_cmd;

#[test]
fn extract_lists_assignments() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	std::fs::write(
		&input,
		":C comment = 1\n0.01 <= growth rate = 0.025 <= 0.1\ninitial population = 1200\n",
	)?;

	mdlsync_cmd()
		.arg("extract")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::contains("growth rate = 0.025"))
		.stdout(predicates::str::contains("initial population = 1200"))
		.stdout(predicates::str::contains("2 assignment(s)"));

	Ok(())
}

#[test]
fn extract_json_format_round_trips() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	std::fs::write(&input, "rate = 0.5\nrate = 0.7\n")?;

	let output = mdlsync_cmd()
		.arg("extract")
		.arg("--format")
		.arg("json")
		.arg(&input)
		.output()?;

	assert!(output.status.success());
	let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(parsed[0]["name"], "rate");
	assert_eq!(parsed[0]["value"], "0.5");
	// Duplicates are preserved in source order.
	assert_eq!(parsed[1]["value"], "0.7");

	Ok(())
}

#[test]
fn extract_reports_empty_input() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("results.out");
	std::fs::write(&input, ":C nothing here\n")?;

	mdlsync_cmd()
		.arg("extract")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::contains("No assignments found"));

	Ok(())
}
