//! Unified error types for the Steamworks wrapper.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the Steamworks wrapper.
///
/// Only hard failures surface here. Commands issued while the SDK is
/// unavailable log and return `false` instead of erroring.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Steam API is not loaded for this process.
    #[error("steam api not loaded")]
    NotLoaded,

    /// The shim's init call returned a non-zero status.
    #[error("steam api init failed (status {0})")]
    Init(i32),

    /// A live `Steam` handle already exists in this process.
    #[error("steam api already initialized in this process")]
    AlreadyInitialized,

    /// A returned pointer was unexpectedly null.
    #[error("unexpected null pointer from FFI")]
    NullPointer,

    /// A string received from FFI or a peer contained invalid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,

    /// An argument passed to the wrapper was invalid.
    #[error("{0}")]
    InvalidArgument(String),
}
