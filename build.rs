// SPDX-License-Identifier: MPL-2.0

use std::process::Command;

fn main() {
    // Re-run build script if git HEAD changes
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=SUPERCAM_VERSION");

    // Packagers can pin the version string explicitly
    let version = if let Ok(v) = std::env::var("SUPERCAM_VERSION") {
        v
    } else {
        get_git_version()
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

fn get_git_version() -> String {
    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    // "v0.1.0" at a tag, "v0.1.0-5-gabcdef1" after it, or a bare hash without tags
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--match", "v*"])
        .output();

    let described = match output {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        _ => return pkg_version,
    };

    let described = described.strip_prefix('v').unwrap_or(&described);

    // "0.1.0-5-gabcdef1" becomes "0.1.0-dirty-abcdef1"
    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    if parts.len() == 3 {
        let hash = parts[0].strip_prefix('g').unwrap_or(parts[0]);
        format!("{}-dirty-{}", parts[2], hash)
    } else if described.contains('.') {
        described.to_string()
    } else {
        // No tags yet, only a commit hash
        format!("{}-{}", pkg_version, described)
    }
}
