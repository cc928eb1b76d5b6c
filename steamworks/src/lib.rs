#![doc = include_str!("../README.md")]

pub mod backend;
pub mod callback;
pub mod client;
pub mod error;
pub mod mirror;
pub mod types;

#[cfg_attr(not(feature = "native"), allow(dead_code))]
mod ffi;
#[cfg(feature = "native")]
mod native;

// Re-export core public API at crate root.
pub use backend::{Backend, Handle};
pub use callback::{CallbackEvent, GameLobbyJoinRequested, LobbyCreated, LobbyEnter, Observer};
pub use client::{Client, ClientBuilder, ClientConfig, DEFAULT_P2P_BUFFER_SIZE, P2PMessage};
pub use error::{Error, Result};
pub use mirror::{LobbyQuery, LobbyState, SessionMirror, SessionState};
#[cfg(feature = "native")]
pub use native::Steam;
pub use types::{ChatRoomEnterResponse, EResult, LobbyType, P2PSend, SteamId};
