//! The SDK surface the wrapper consumes, and the ready / not-ready handle
//! that stands in for a process-wide SDK global.

use crate::callback::CallbackEvent;
use crate::error::{Error, Result};
use crate::mirror::LobbyQuery;
use crate::types::{LobbyType, P2PSend, SteamId};

/// Everything the wrapper asks of the native SDK.
///
/// Implemented by the native `Steam` handle (feature `native`) and by test
/// doubles. Lobby requests are fire-and-forget: their outcome arrives later
/// through [`run_callbacks`](Self::run_callbacks).
pub trait Backend: LobbyQuery {
    /// Pump the SDK and return the callbacks it delivered, in order.
    fn run_callbacks(&self) -> Vec<CallbackEvent>;

    /// Display name of the logged-in user.
    ///
    /// # Errors
    ///
    /// Fails if the SDK returns no name or a name that is not UTF-8.
    fn persona_name(&self) -> Result<String>;

    /// Id of the logged-in user.
    fn steam_id(&self) -> SteamId;

    /// Ask for a new lobby. Answered by a `LobbyCreated` (and `LobbyEnter`).
    fn create_lobby(&self, lobby_type: LobbyType, max_members: u32);

    /// Ask to join `lobby`. Answered by a `LobbyEnter`.
    fn join_lobby(&self, lobby: SteamId);

    /// Leave `lobby` immediately. No callback follows.
    fn leave_lobby(&self, lobby: SteamId);

    /// Send a lobby invite. `true` if the invite was sent.
    fn invite_user_to_lobby(&self, lobby: SteamId, invitee: SteamId) -> bool;

    /// Open the overlay's invite dialog for `lobby`.
    fn activate_invite_dialog(&self, lobby: SteamId);

    /// Send one packet to `remote`. `true` if it was queued.
    fn send_p2p_packet(&self, remote: SteamId, data: &[u8], send: P2PSend, channel: i32)
    -> bool;

    /// Size of the next waiting packet on `channel`, if any.
    fn p2p_packet_available(&self, channel: i32) -> Option<u32>;

    /// Read the next packet on `channel` into `buf`. Returns bytes written and sender.
    fn read_p2p_packet(&self, buf: &mut [u8], channel: i32) -> Option<(usize, SteamId)>;

    /// Accept a session request from `remote`.
    fn accept_p2p_session(&self, remote: SteamId) -> bool;

    /// Close the session with `remote`.
    fn close_p2p_session(&self, remote: SteamId) -> bool;
}

/// An SDK backend, or the explicit sentinel for "the SDK never came up".
///
/// A [`NotReady`](Self::NotReady) handle answers lobby queries with zero
/// members, so anything built on it degrades to an empty, inert session.
#[derive(Debug)]
pub enum Handle<B> {
    /// The SDK is initialized.
    Ready(B),
    /// The SDK is unavailable for the rest of the process.
    NotReady,
}

impl<B> Handle<B> {
    /// Whether a backend is present.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The backend.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] for a [`NotReady`](Self::NotReady) handle.
    pub const fn ready(&self) -> Result<&B> {
        match self {
            Self::Ready(b) => Ok(b),
            Self::NotReady => Err(Error::NotLoaded),
        }
    }

    /// The backend, if present.
    #[must_use]
    pub const fn backend(&self) -> Option<&B> {
        match self {
            Self::Ready(b) => Some(b),
            Self::NotReady => None,
        }
    }
}

impl<B> Default for Handle<B> {
    fn default() -> Self {
        Self::NotReady
    }
}

impl<B> From<Result<B>> for Handle<B> {
    fn from(r: Result<B>) -> Self {
        r.map_or(Self::NotReady, Self::Ready)
    }
}

impl<B: LobbyQuery> LobbyQuery for Handle<B> {
    fn member_count(&self, lobby: SteamId) -> u32 {
        self.backend().map_or(0, |b| b.member_count(lobby))
    }

    fn member_at(&self, lobby: SteamId, index: u32) -> SteamId {
        self.backend()
            .map_or(SteamId::NIL, |b| b.member_at(lobby, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl LobbyQuery for Fixed {
        fn member_count(&self, _: SteamId) -> u32 {
            2
        }

        fn member_at(&self, _: SteamId, index: u32) -> SteamId {
            SteamId(100 + u64::from(index))
        }
    }

    #[test]
    fn test_not_ready_answers_zero() {
        let h: Handle<Fixed> = Handle::NotReady;
        assert!(!h.is_ready());
        assert_eq!(h.member_count(SteamId(1)), 0);
        assert_eq!(h.member_at(SteamId(1), 0), SteamId::NIL);
        assert!(matches!(h.ready(), Err(Error::NotLoaded)));
    }

    #[test]
    fn test_ready_delegates() {
        let h = Handle::Ready(Fixed);
        assert!(h.is_ready());
        assert_eq!(h.member_count(SteamId(1)), 2);
        assert_eq!(h.member_at(SteamId(1), 1), SteamId(101));
    }

    #[test]
    fn test_failed_init_becomes_not_ready() {
        let h: Handle<Fixed> = Err(Error::Init(1)).into();
        assert!(!h.is_ready());
        let h: Handle<Fixed> = Ok(Fixed).into();
        assert!(h.is_ready());
    }
}
