//! Steam client: the primary entry point for the wrapper.
//!
//! A [`Client`] owns the [`SessionMirror`] and, through it, the backend
//! [`Handle`]. Every command checks the handle first: when the SDK never came
//! up, commands log a warning and report failure instead of erroring, so the
//! application's main loop keeps running.

mod matchmaking;
mod networking;

use crate::backend::{Backend, Handle};
use crate::callback::CallbackEvent;
use crate::error::Result;
use crate::mirror::SessionMirror;
use crate::types::{LobbyType, P2PSend, SteamId};

pub use networking::P2PMessage;

/// Default size of the P2P receive buffer, in bytes.
pub const DEFAULT_P2P_BUFFER_SIZE: usize = 1024;

/// A Steam session: lobby mirror plus matchmaking and P2P commands.
#[derive(Debug)]
pub struct Client<B> {
    mirror: SessionMirror<Handle<B>>,
    config: ClientConfig,
    p2p_buf: Vec<u8>,
}

impl<B: Backend> Client<B> {
    /// Whether the SDK is available.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.mirror.query().is_ready()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The lobby mirror.
    #[must_use]
    pub const fn mirror(&self) -> &SessionMirror<Handle<B>> {
        &self.mirror
    }

    /// Mutable access to the lobby mirror (e.g. to register callbacks).
    pub const fn mirror_mut(&mut self) -> &mut SessionMirror<Handle<B>> {
        &mut self.mirror
    }

    /// The backend, if the SDK is available.
    #[must_use]
    pub const fn backend(&self) -> Option<&B> {
        self.mirror.query().backend()
    }

    /// Display name of the logged-in user.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`](crate::Error::NotLoaded) when the SDK is
    /// unavailable, or the backend's error if the name cannot be read.
    pub fn persona_name(&self) -> Result<String> {
        self.mirror.query().ready()?.persona_name()
    }

    /// Id of the logged-in user.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`](crate::Error::NotLoaded) when the SDK is unavailable.
    pub fn steam_id(&self) -> Result<SteamId> {
        Ok(self.mirror.query().ready()?.steam_id())
    }

    /// Pump the SDK and feed every delivered callback to the mirror.
    ///
    /// Call this often from the application's main loop. Returns the number
    /// of callbacks dispatched.
    pub fn run_callbacks(&mut self) -> usize {
        let Some(backend) = self.backend() else {
            tracing::warn!("steam not initialized, cannot run callbacks");
            return 0;
        };
        let events = backend.run_callbacks();
        for event in &events {
            self.mirror.dispatch(event);
        }
        events.len()
    }

    /// Feed one externally delivered callback to the mirror.
    pub fn dispatch(&mut self, event: &CallbackEvent) {
        self.mirror.dispatch(event);
    }

    /// The backend for a command named `op`, logging when unavailable.
    fn ready_for(&self, op: &str) -> Option<&B> {
        let backend = self.backend();
        if backend.is_none() {
            tracing::warn!("steam not initialized, cannot {op}");
        }
        backend
    }
}

/// Tunables for a [`Client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Visibility used by [`Client::create_default_lobby`].
    pub lobby_type: LobbyType,
    /// Member cap used by [`Client::create_default_lobby`].
    pub max_members: u32,
    /// P2P channel for sends and reads.
    pub p2p_channel: i32,
    /// Largest P2P packet [`Client::receive_p2p_message`] accepts.
    pub p2p_buffer_size: usize,
    /// Delivery mode for [`Client::send_p2p_message`].
    pub send_type: P2PSend,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            lobby_type: LobbyType::Public,
            max_members: 2,
            p2p_channel: 0,
            p2p_buffer_size: DEFAULT_P2P_BUFFER_SIZE,
            send_type: P2PSend::Reliable,
        }
    }
}

/// Builder for constructing a [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// A builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lobby visibility for [`Client::create_default_lobby`] (default: public).
    #[must_use]
    pub const fn lobby_type(mut self, t: LobbyType) -> Self {
        self.config.lobby_type = t;
        self
    }

    /// Member cap for [`Client::create_default_lobby`] (default: 2).
    #[must_use]
    pub const fn max_members(mut self, n: u32) -> Self {
        self.config.max_members = n;
        self
    }

    /// P2P channel (default: 0).
    #[must_use]
    pub const fn p2p_channel(mut self, c: i32) -> Self {
        self.config.p2p_channel = c;
        self
    }

    /// P2P receive buffer size in bytes (default: 1024).
    #[must_use]
    pub const fn p2p_buffer_size(mut self, n: usize) -> Self {
        self.config.p2p_buffer_size = n;
        self
    }

    /// Delivery mode for text messages (default: reliable).
    #[must_use]
    pub const fn send_type(mut self, s: P2PSend) -> Self {
        self.config.send_type = s;
        self
    }

    /// Build a client over `handle`. A [`Handle::NotReady`] client is inert.
    pub fn build<B: Backend>(self, handle: Handle<B>) -> Client<B> {
        if !handle.is_ready() {
            tracing::warn!("steam not initialized, client is inert");
        }
        Client {
            mirror: SessionMirror::new(handle),
            p2p_buf: vec![0; self.config.p2p_buffer_size],
            config: self.config,
        }
    }

    /// Initialize the native SDK and build a client over it.
    ///
    /// Initialization failure is logged and yields an inert client.
    #[cfg(feature = "native")]
    pub fn connect(self) -> Client<crate::native::Steam> {
        let handle = match crate::native::Steam::init() {
            Ok(steam) => Handle::Ready(steam),
            Err(e) => {
                tracing::error!(error = %e, "steam initialization failed");
                Handle::NotReady
            }
        };
        self.build(handle)
    }
}
