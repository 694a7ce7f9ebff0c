//! Embeds the git revision and build time shown by `--version`.
//!
//! Both values can be pinned through the environment for reproducible
//! builds; otherwise they fall back to `unknown` when git or date is missing.

use std::env;
use std::process::Command;

const GIT_HASH_VAR: &str = "TOOLBOX_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "TOOLBOX_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed={GIT_HASH_VAR}");
    println!("cargo:rerun-if-env-changed={TIMESTAMP_VAR}");

    let git_hash = env::var(GIT_HASH_VAR)
        .ok()
        .or_else(|| capture("git", &["rev-parse", "--short=12", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = env::var(TIMESTAMP_VAR)
        .ok()
        .or_else(|| capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={GIT_HASH_VAR}={git_hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|value| !value.is_empty())
}
