//! Build script for steamworks-sys.
//!
//! 1. Locates the `SteamworksPy` shim and the `steam_api` redistributable.
//! 2. Optionally runs `bindgen` to regenerate Rust bindings (feature `regenerate`).
//! 3. Configures the linker for the two shared libraries.
//!
//! # Environment variables
//!
//! - `STEAMWORKS_SHIM_DIR`: Directory holding the built shim library
//!   (`SteamworksPy.so` / `.dylib` / `.dll`), the `steam_api` redistributable
//!   and `SteamworksPy.h`. When unset, the system linker paths are used.
//!
//! - `STEAMWORKS_UPDATE_BINDINGS`: When set (any value) alongside the
//!   `regenerate` feature, the freshly generated `bindings.rs` is copied back
//!   to `src/bindings.rs` so it can be committed to the repository.

use std::env;
#[cfg(feature = "regenerate")]
use std::fs;
#[cfg(feature = "regenerate")]
use std::path::{Path, PathBuf};

/// Header shipped with the shim sources.
#[cfg(feature = "regenerate")]
const HEADER: &str = "SteamworksPy.h";

fn main() {
    println!("cargo:rerun-if-env-changed=STEAMWORKS_SHIM_DIR");
    println!("cargo:rerun-if-env-changed=STEAMWORKS_UPDATE_BINDINGS");
    println!("cargo:rerun-if-env-changed=DOCS_RS");

    // docs.rs has no Steam redistributable; the crate still compiles for docs.
    if env::var("DOCS_RS").is_ok() {
        return;
    }

    let target = env::var("TARGET").expect("TARGET not set");

    if let Ok(shim_dir) = env::var("STEAMWORKS_SHIM_DIR") {
        println!("cargo:warning=Using local Steamworks shim directory: {shim_dir}");
        println!("cargo:rustc-link-search=native={shim_dir}");

        #[cfg(feature = "regenerate")]
        {
            let shim_path = PathBuf::from(&shim_dir);
            let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
            let header_path = find_header(&shim_path);
            println!("cargo:rerun-if-changed={}", header_path.display());
            generate_bindings(&header_path, &out_dir);
        }
    } else {
        #[cfg(feature = "regenerate")]
        panic!("the `regenerate` feature needs STEAMWORKS_SHIM_DIR to locate {HEADER}");
    }

    link_native_libs(&target);
}

/// Name of the Steam redistributable for the given target.
fn steam_api_name(target: &str) -> &'static str {
    if target.contains("windows") && target.starts_with("x86_64") {
        "steam_api64"
    } else {
        "steam_api"
    }
}

/// Emit dynamic link directives for the shim and the Steam API it wraps.
fn link_native_libs(target: &str) {
    println!("cargo:rustc-link-lib=dylib=SteamworksPy");
    println!("cargo:rustc-link-lib=dylib={}", steam_api_name(target));
    if target.contains("linux") {
        println!("cargo:rustc-link-lib=dylib=stdc++");
    } else if target.contains("apple") {
        println!("cargo:rustc-link-lib=dylib=c++");
    }
}

/// Locate the C header relative to the shim directory.
///
/// Tries `{dir}/include/SteamworksPy.h` and then `{dir}/SteamworksPy.h`.
#[cfg(feature = "regenerate")]
fn find_header(shim_dir: &Path) -> PathBuf {
    let candidates = [shim_dir.join("include").join(HEADER), shim_dir.join(HEADER)];
    for c in &candidates {
        if c.exists() {
            return c.clone();
        }
    }
    panic!(
        "Cannot find {HEADER} near STEAMWORKS_SHIM_DIR={}\nSearched: {:?}",
        shim_dir.display(),
        candidates
    );
}

/// Run `bindgen` on the shim header to produce `$OUT_DIR/bindings.rs`.
#[cfg(feature = "regenerate")]
fn generate_bindings(header: &Path, out_dir: &Path) {
    let bindings = bindgen::Builder::default()
        .header(header.to_str().expect("path is not valid UTF-8"))
        // The shim header is C++ (it exports with `extern "C"` linkage).
        .clang_arg("-xc++")
        .use_core()
        // Only the shim's exports and the callback structs it passes by value.
        .allowlist_function(
            "Steam.*|RunCallbacks|IsSteamRunning|GetPersonaName|GetSteamID|\
             ActivateGameOverlayInviteDialog|Lobby_.*|CreateLobby|JoinLobby|LeaveLobby|\
             InviteUserToLobby|GetNumLobbyMembers|GetLobbyMemberByIndex|.*P2P.*",
        )
        .allowlist_type(".*_t")
        .derive_debug(true)
        .derive_default(true)
        .derive_eq(true)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .generate()
        .expect("bindgen failed to generate bindings from SteamworksPy.h");

    let out_file = out_dir.join("bindings.rs");
    bindings
        .write_to_file(&out_file)
        .expect("Failed to write bindings.rs");

    if env::var("STEAMWORKS_UPDATE_BINDINGS").is_ok() {
        let manifest_dir =
            PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
        let committed = manifest_dir.join("src").join("bindings.rs");
        fs::copy(&out_file, &committed).expect("Failed to copy bindings.rs to src/");
        println!(
            "cargo:warning=Updated committed bindings: {}",
            committed.display()
        );
    }
}
