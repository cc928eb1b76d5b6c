//! Lobby commands. Outcomes arrive later through
//! [`Client::run_callbacks`].

use super::Client;
use crate::backend::Backend;
use crate::callback::{GameLobbyJoinRequested, LobbyCreated, LobbyEnter};
use crate::types::{LobbyType, SteamId};

impl<B: Backend> Client<B> {
    /// Request a lobby. `true` means requested, not created.
    pub fn create_lobby(&self, lobby_type: LobbyType, max_members: u32) -> bool {
        let Some(b) = self.ready_for("create lobby") else {
            return false;
        };
        tracing::info!(?lobby_type, max_members, "creating lobby");
        b.create_lobby(lobby_type, max_members);
        true
    }

    /// Request a lobby with the configured type and member cap.
    pub fn create_default_lobby(&self) -> bool {
        self.create_lobby(self.config.lobby_type, self.config.max_members)
    }

    /// Request to join `lobby`. `true` means requested, not joined.
    pub fn join_lobby(&self, lobby: SteamId) -> bool {
        let Some(b) = self.ready_for("join lobby") else {
            return false;
        };
        tracing::info!(%lobby, "joining lobby");
        b.join_lobby(lobby);
        true
    }

    /// Leave `lobby` and reset the mirror.
    pub fn leave_lobby(&mut self, lobby: SteamId) -> bool {
        let Some(b) = self.ready_for("leave lobby") else {
            return false;
        };
        tracing::info!(%lobby, "leaving lobby");
        b.leave_lobby(lobby);
        self.mirror.leave(lobby);
        true
    }

    /// Invite `invitee` to `lobby`. Rejects nil ids without calling the SDK.
    pub fn invite_user_to_lobby(&self, lobby: SteamId, invitee: SteamId) -> bool {
        let Some(b) = self.ready_for("invite to lobby") else {
            return false;
        };
        if lobby.is_nil() {
            tracing::warn!("no lobby id, create or join a lobby first");
            return false;
        }
        if invitee.is_nil() {
            tracing::warn!("no invitee id");
            return false;
        }
        let sent = b.invite_user_to_lobby(lobby, invitee);
        if sent {
            tracing::info!(%lobby, %invitee, "invite sent");
        } else {
            tracing::warn!(%lobby, %invitee, "invite failed");
        }
        sent
    }

    /// Open the overlay's invite dialog for `lobby`.
    pub fn activate_invite_dialog(&self, lobby: SteamId) -> bool {
        let Some(b) = self.ready_for("open invite dialog") else {
            return false;
        };
        b.activate_invite_dialog(lobby);
        true
    }

    /// Lobby the mirror believes we are in, or [`SteamId::NIL`].
    #[must_use]
    pub const fn current_lobby_id(&self) -> SteamId {
        self.mirror.current_lobby_id()
    }

    /// Snapshot of the mirrored member list.
    #[must_use]
    pub fn lobby_members(&self) -> Vec<SteamId> {
        self.mirror.members()
    }

    /// Re-read the member list of the current lobby.
    pub fn refresh_lobby_members(&mut self) {
        self.mirror.refresh_members();
    }

    /// Live member count of any lobby, straight from the SDK.
    #[must_use]
    pub fn member_count(&self, lobby: SteamId) -> u32 {
        self.backend().map_or(0, |b| b.member_count(lobby))
    }

    /// See [`SessionMirror::set_lobby_created_callback`](crate::SessionMirror::set_lobby_created_callback).
    pub fn set_lobby_created_callback(&mut self, f: impl FnMut(&LobbyCreated) + 'static) {
        self.mirror.set_lobby_created_callback(f);
    }

    /// See [`SessionMirror::set_lobby_enter_callback`](crate::SessionMirror::set_lobby_enter_callback).
    pub fn set_lobby_enter_callback(&mut self, f: impl FnMut(&LobbyEnter) + 'static) {
        self.mirror.set_lobby_enter_callback(f);
    }

    /// See [`SessionMirror::set_game_lobby_join_requested_callback`](crate::SessionMirror::set_game_lobby_join_requested_callback).
    pub fn set_game_lobby_join_requested_callback(
        &mut self,
        f: impl FnMut(&GameLobbyJoinRequested) + 'static,
    ) {
        self.mirror.set_game_lobby_join_requested_callback(f);
    }
}
