use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use typegram_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static TYPEGRAM_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_arg(name: &str) -> String {
	shared_fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_typegram(args: &[&str]) -> Output {
	Command::new(typegram_bin()).args(args).output().expect("typegram command executes")
}

pub(crate) fn run_typegram_json(args: &[&str]) -> serde_json::Value {
	let output = run_typegram(args);
	assert!(
		output.status.success(),
		"typegram command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn typegram_bin() -> &'static PathBuf {
	TYPEGRAM_BIN.get_or_init(resolve_typegram_bin)
}

fn resolve_typegram_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_typegram") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "typegram.exe" } else { "typegram" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "typegram"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build typegram binary at {}", bin.display());

	bin
}
