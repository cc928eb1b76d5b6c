//! Raw FFI bindings to the `SteamworksPy` shim, a flat C ABI over the
//! Steamworks SDK's matchmaking, friends and P2P networking interfaces.
//!
//! The declarations mirror the shim's `SteamworksPy.h` header. Do not edit
//! `bindings.rs` by hand; regenerate it with the `regenerate` feature.
//!
//! # Build
//!
//! The build script (`build.rs`):
//! 1. Adds `STEAMWORKS_SHIM_DIR` to the native search path, if set.
//! 2. Optionally runs `bindgen` on `SteamworksPy.h` (feature `regenerate`).
//! 3. Links the shim and `steam_api` dynamically.
//!
//! The shim keeps one callback slot per callback type for the whole process.
//! Callbacks only fire from inside [`RunCallbacks`].

// sys crate: unsafe FFI, non-idiomatic generated code
#![allow(
    unsafe_code,
    missing_docs,
    non_camel_case_types,
    non_upper_case_globals,
    non_snake_case,
    clippy::missing_safety_doc,
    clippy::upper_case_acronyms
)]

#[cfg(feature = "regenerate")]
include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
#[cfg(not(feature = "regenerate"))]
include!("bindings.rs");
