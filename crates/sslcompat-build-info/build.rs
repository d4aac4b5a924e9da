use std::{
    env,
    path::{Path, PathBuf},
};

use sslcompat_core::{SslCapabilities, WATCHED_KEYS, detect, resolve_identity};
use vergen_gix::{Emitter, GixBuilder};

/// `cfg` names this script may set, paired with the capability they mirror.
const CFG_FLAGS: [(&str, SslCapabilities); 3] = [
    ("libressl_in_use", SslCapabilities::LIBRESSL_IN_USE),
    ("openssl_1_1_api", SslCapabilities::OPENSSL_1_1_API),
    ("openssl_3_0_api", SslCapabilities::OPENSSL_3_0_API),
];

fn main() {
    // Always rerun when this build script changes.
    println!("cargo:rerun-if-changed=build.rs");

    emit_ssl_detection();
    emit_git_metadata();
}

fn emit_ssl_detection() {
    for key in WATCHED_KEYS {
        println!("cargo:rerun-if-env-changed={key}");
    }
    for (name, _) in CFG_FLAGS {
        println!("cargo::rustc-check-cfg=cfg({name})");
    }

    // No silent default: an unlinked library has to stop the build here.
    let identity = match resolve_identity(|key| env::var(key).ok()) {
        Ok(identity) => identity,
        Err(err) => panic!("sslcompat-build-info: {err}"),
    };

    let caps = detect(&identity);
    for (name, flag) in CFG_FLAGS {
        if caps.contains(flag) {
            println!("cargo:rustc-cfg={name}");
        }
    }

    // Normalized values for the library's `env!()` constants. They MUST always
    // be set, or compilation will fail.
    println!(
        "cargo:rustc-env=SSLCOMPAT_DETECTED_OPENSSL_VERSION_NUMBER={}",
        identity.version.to_hex()
    );
    println!(
        "cargo:rustc-env=SSLCOMPAT_DETECTED_LIBRESSL_VERSION_NUMBER={}",
        identity
            .libressl_version
            .map(|v| v.to_hex())
            .unwrap_or_default()
    );
    println!(
        "cargo:rustc-env=SSLCOMPAT_DETECTED_BORINGSSL={}",
        identity.boringssl
    );
}

fn emit_git_metadata() {
    // Allow CI or packagers to provide a SHA without any git probing.
    println!("cargo:rerun-if-env-changed=SSLCOMPAT_BUILD_SHA_SHORT");

    if let Some(override_sha) = env::var("SSLCOMPAT_BUILD_SHA_SHORT")
        .ok()
        .and_then(|s| normalize_sha_short(&s))
    {
        emit_git_fallback(Some(&override_sha));
        return;
    }

    // Best-effort git probing, but NEVER fail the build over it.
    let Some(repo_root) = env::var("CARGO_MANIFEST_DIR")
        .ok()
        .and_then(|dir| find_repo_root(Path::new(&dir)))
    else {
        emit_git_fallback(None);
        return;
    };

    let git = match GixBuilder::default()
        .repo_path(Some(repo_root))
        .sha(true) // short SHA
        .build()
    {
        Ok(git) => git,
        Err(err) => {
            println!("cargo:warning=sslcompat-build-info: vergen-gix config failed: {err}");
            emit_git_fallback(None);
            return;
        }
    };

    if let Err(err) = Emitter::default()
        .add_instructions(&git)
        .and_then(|e| e.emit())
    {
        println!("cargo:warning=sslcompat-build-info: vergen-gix emit failed: {err}");
        emit_git_fallback(None);
    }
}

fn emit_git_fallback(sha_short: Option<&str>) {
    let sha = sha_short.unwrap_or("unknown");
    println!("cargo:rustc-env=VERGEN_GIT_SHA={sha}");
}

/// Accept exactly seven hex characters (longer input is truncated).
fn normalize_sha_short(raw: &str) -> Option<String> {
    let candidate: String = raw.trim().chars().take(7).collect();
    (candidate.len() == 7 && candidate.chars().all(|c| c.is_ascii_hexdigit())).then_some(candidate)
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
