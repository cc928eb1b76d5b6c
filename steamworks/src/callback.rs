//! Callback payloads delivered by the dispatch loop, and the single-slot
//! observer the embedding application registers for each of them.

use std::fmt;

use crate::types::{ChatRoomEnterResponse, EResult, SteamId};

/// Result of a `create_lobby` request (`LobbyCreated_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbyCreated {
    /// Raw `EResult` code.
    pub result: i32,
    /// The new lobby, or [`SteamId::NIL`] on failure.
    pub lobby: SteamId,
}

impl LobbyCreated {
    /// Decoded result code, `None` if not a known `EResult`.
    #[must_use]
    pub const fn result(&self) -> Option<EResult> {
        EResult::from_ffi(self.result)
    }

    /// Whether the lobby was created.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result == EResult::Ok as i32
    }
}

/// Result of entering a lobby (`LobbyEnter_t`), after a join or a create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbyEnter {
    /// The lobby that was entered.
    pub lobby: SteamId,
    /// Raw `EChatRoomEnterResponse` code. `1` is success.
    pub chat_room_enter_response: i32,
    /// Chat permission flags.
    pub chat_permissions: i32,
    /// Whether the lobby is locked.
    pub locked: bool,
    /// Game id associated with the lobby.
    pub game_id: u32,
}

impl LobbyEnter {
    /// Decoded enter response, `None` if unknown.
    #[must_use]
    pub const fn response(&self) -> Option<ChatRoomEnterResponse> {
        ChatRoomEnterResponse::from_ffi(self.chat_room_enter_response)
    }

    /// Whether the lobby was entered.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.chat_room_enter_response == ChatRoomEnterResponse::Success as i32
    }
}

/// A friend invited us into a lobby and we accepted from the overlay
/// (`GameLobbyJoinRequested_t`). The application decides whether to join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLobbyJoinRequested {
    /// The lobby to join.
    pub lobby: SteamId,
    /// The friend who sent the invite.
    pub friend: SteamId,
}

/// Any callback the dispatch loop can surface, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackEvent {
    /// See [`LobbyCreated`].
    LobbyCreated(LobbyCreated),
    /// See [`LobbyEnter`].
    LobbyEnter(LobbyEnter),
    /// See [`GameLobbyJoinRequested`].
    GameLobbyJoinRequested(GameLobbyJoinRequested),
}

impl From<LobbyCreated> for CallbackEvent {
    fn from(e: LobbyCreated) -> Self {
        Self::LobbyCreated(e)
    }
}

impl From<LobbyEnter> for CallbackEvent {
    fn from(e: LobbyEnter) -> Self {
        Self::LobbyEnter(e)
    }
}

impl From<GameLobbyJoinRequested> for CallbackEvent {
    fn from(e: GameLobbyJoinRequested) -> Self {
        Self::GameLobbyJoinRequested(e)
    }
}

/// Single-slot listener. A new registration replaces the previous one.
pub struct Observer<T> {
    slot: Option<Box<dyn FnMut(&T)>>,
}

impl<T> Observer<T> {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Install `f`, dropping whatever was registered before.
    pub fn set(&mut self, f: impl FnMut(&T) + 'static) {
        self.slot = Some(Box::new(f));
    }

    /// Remove the listener.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Whether a listener is installed.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.slot.is_some()
    }

    /// Call the listener, if any.
    pub fn notify(&mut self, payload: &T) {
        if let Some(f) = self.slot.as_mut() {
            f(payload);
        }
    }
}

impl<T> Default for Observer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("is_set", &self.is_set())
            .finish()
    }
}
