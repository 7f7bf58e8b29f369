use assert_cmd::Command;

pub fn mdlsync_cmd() -> Command {
	let mut cmd = Command::cargo_bin("mdlsync").expect("mdlsync binary builds");
	cmd.env("NO_COLOR", "1");
	cmd
}
