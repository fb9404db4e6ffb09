use std::env;
use std::process::Command;

/// `git describe` output for the working tree, e.g. `a1b2c3d-dirty`
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=7"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?;
    let revision = revision.trim();
    (!revision.is_empty()).then(|| revision.to_string())
}

fn main() {
    let revision = git_revision().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GIT_HASH={}", revision);

    // Packaged builds stamp TRIAGESET_RELEASE_VERSION; everything else reports the crate version
    let version = env::var("TRIAGESET_RELEASE_VERSION")
        .ok()
        .filter(|version| !version.trim().is_empty())
        .or_else(|| env::var("CARGO_PKG_VERSION").ok())
        .unwrap_or_else(|| "0.0.0".to_string());
    println!("cargo:rustc-env=TRIAGESET_VERSION={}", version.trim());

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=TRIAGESET_RELEASE_VERSION");
}
