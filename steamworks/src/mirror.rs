//! Local mirror of "which lobby am I in and who else is in it".
//!
//! The mirror never polls. It changes only when the dispatch loop hands it a
//! lobby-created or lobby-entered confirmation, or when the application
//! leaves. Each confirmation re-reads the member list from the remote service
//! and overwrites the local copy wholesale.
//!
//! ```text
//!   NoLobby ──(created ok / entered ok)──→ InLobby ──(leave)──→ NoLobby
//!                                            │  ↑
//!                                            └──┘ (created ok / entered ok)
//! ```

use crate::callback::{CallbackEvent, GameLobbyJoinRequested, LobbyCreated, LobbyEnter, Observer};
use crate::types::{ChatRoomEnterResponse, EResult, SteamId};

/// Read-only membership queries against the remote lobby service.
///
/// Both calls are synchronous. An unavailable service answers with a zero
/// count, which the mirror treats as an empty lobby.
pub trait LobbyQuery {
    /// Number of members currently in `lobby`.
    fn member_count(&self, lobby: SteamId) -> u32;

    /// Member at position `index` in `lobby`.
    fn member_at(&self, lobby: SteamId, index: u32) -> SteamId;
}

impl<Q: LobbyQuery + ?Sized> LobbyQuery for &Q {
    fn member_count(&self, lobby: SteamId) -> u32 {
        (**self).member_count(lobby)
    }

    fn member_at(&self, lobby: SteamId, index: u32) -> SteamId {
        (**self).member_at(lobby, index)
    }
}

/// The mirrored lobby and its members.
///
/// `current_lobby_id` is [`SteamId::NIL`] exactly when not in a lobby, and
/// then `members` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbyState {
    /// Lobby we believe we are in.
    pub current_lobby_id: SteamId,
    /// Members in remote index order.
    pub members: Vec<SteamId>,
}

/// Coarse view of [`LobbyState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not in a lobby.
    NoLobby,
    /// In the given lobby.
    InLobby(SteamId),
}

/// Callback-driven cache of the current lobby, refreshed from a [`LobbyQuery`].
///
/// Not synchronized. Drive it from the thread that runs the dispatch loop.
#[derive(Debug)]
pub struct SessionMirror<Q> {
    query: Q,
    state: LobbyState,
    on_created: Observer<LobbyCreated>,
    on_enter: Observer<LobbyEnter>,
    on_join_requested: Observer<GameLobbyJoinRequested>,
}

impl<Q: LobbyQuery> SessionMirror<Q> {
    /// Start out of any lobby, querying through `query`.
    pub fn new(query: Q) -> Self {
        Self {
            query,
            state: LobbyState::default(),
            on_created: Observer::new(),
            on_enter: Observer::new(),
            on_join_requested: Observer::new(),
        }
    }

    /// The query handle this mirror reads from.
    pub const fn query(&self) -> &Q {
        &self.query
    }

    /// Adopt `lobby` if `result` is `EResult::Ok`; any other code is ignored.
    pub fn on_lobby_created(&mut self, result: i32, lobby: SteamId) {
        if result != EResult::Ok as i32 {
            tracing::debug!(result, %lobby, "lobby creation failed, keeping state");
            return;
        }
        tracing::info!(%lobby, "lobby created");
        self.state.current_lobby_id = lobby;
        self.refresh_members();
    }

    /// Adopt `lobby` if `chat_room_enter_response` is success (`1`).
    pub fn on_lobby_entered(&mut self, lobby: SteamId, chat_room_enter_response: i32) {
        if chat_room_enter_response != ChatRoomEnterResponse::Success as i32 {
            tracing::debug!(
                %lobby,
                response = chat_room_enter_response,
                "lobby enter refused, keeping state"
            );
            return;
        }
        tracing::info!(%lobby, "lobby entered");
        self.state.current_lobby_id = lobby;
        self.refresh_members();
    }

    /// Rebuild the member list from the remote service.
    ///
    /// Reads the count, then each index in ascending order. The two steps are
    /// not atomic: if membership changes in between, the list may come back
    /// short, truncated or with duplicates. No query is made outside a lobby.
    pub fn refresh_members(&mut self) {
        self.state.members.clear();
        let lobby = self.state.current_lobby_id;
        if lobby.is_nil() {
            return;
        }
        let count = self.query.member_count(lobby);
        self.state
            .members
            .extend((0..count).map(|i| self.query.member_at(lobby, i)));
        tracing::debug!(%lobby, count, "lobby members refreshed");
    }

    /// Forget the current lobby. `lobby` is not checked against it.
    pub fn leave(&mut self, lobby: SteamId) {
        tracing::debug!(%lobby, current = %self.state.current_lobby_id, "leaving lobby");
        self.state = LobbyState::default();
    }

    /// Snapshot of the member list.
    #[must_use]
    pub fn members(&self) -> Vec<SteamId> {
        self.state.members.clone()
    }

    /// Lobby we are in, or [`SteamId::NIL`].
    #[must_use]
    pub const fn current_lobby_id(&self) -> SteamId {
        self.state.current_lobby_id
    }

    /// Borrow the full mirrored state.
    #[must_use]
    pub const fn state(&self) -> &LobbyState {
        &self.state
    }

    /// [`SessionState::InLobby`] when a lobby id is held.
    #[must_use]
    pub const fn session_state(&self) -> SessionState {
        if self.state.current_lobby_id.is_nil() {
            SessionState::NoLobby
        } else {
            SessionState::InLobby(self.state.current_lobby_id)
        }
    }

    /// Register the lobby-created listener, replacing any previous one.
    ///
    /// It runs after the mirror has applied the event.
    pub fn set_lobby_created_callback(&mut self, f: impl FnMut(&LobbyCreated) + 'static) {
        self.on_created.set(f);
    }

    /// Register the lobby-enter listener, replacing any previous one.
    ///
    /// It runs after the mirror has applied the event.
    pub fn set_lobby_enter_callback(&mut self, f: impl FnMut(&LobbyEnter) + 'static) {
        self.on_enter.set(f);
    }

    /// Register the join-requested listener, replacing any previous one.
    pub fn set_game_lobby_join_requested_callback(
        &mut self,
        f: impl FnMut(&GameLobbyJoinRequested) + 'static,
    ) {
        self.on_join_requested.set(f);
    }

    /// Drop all registered listeners.
    pub fn clear_callbacks(&mut self) {
        self.on_created.clear();
        self.on_enter.clear();
        self.on_join_requested.clear();
    }

    /// Apply a lobby-created confirmation, then notify the listener.
    pub fn handle_lobby_created(&mut self, event: &LobbyCreated) {
        self.on_lobby_created(event.result, event.lobby);
        self.on_created.notify(event);
    }

    /// Apply a lobby-enter confirmation, then notify the listener.
    pub fn handle_lobby_enter(&mut self, event: &LobbyEnter) {
        self.on_lobby_entered(event.lobby, event.chat_room_enter_response);
        self.on_enter.notify(event);
    }

    /// Forward a join request. The mirror itself does not react to it.
    pub fn handle_game_lobby_join_requested(&mut self, event: &GameLobbyJoinRequested) {
        tracing::info!(lobby = %event.lobby, friend = %event.friend, "lobby join requested");
        self.on_join_requested.notify(event);
    }

    /// Route any event to its handler.
    pub fn dispatch(&mut self, event: &CallbackEvent) {
        match event {
            CallbackEvent::LobbyCreated(e) => self.handle_lobby_created(e),
            CallbackEvent::LobbyEnter(e) => self.handle_lobby_enter(e),
            CallbackEvent::GameLobbyJoinRequested(e) => self.handle_game_lobby_join_requested(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    /// In-memory lobby service that counts every query it answers.
    ///
    /// The counter is shared so listeners can read it while they run.
    #[derive(Default)]
    struct FakeLobbies {
        lobbies: RefCell<HashMap<SteamId, Vec<SteamId>>>,
        queries: Rc<Cell<usize>>,
    }

    impl FakeLobbies {
        fn with(lobby: u64, members: &[u64]) -> Self {
            let fake = Self::default();
            fake.set(lobby, members);
            fake
        }

        fn set(&self, lobby: u64, members: &[u64]) {
            self.lobbies.borrow_mut().insert(
                SteamId(lobby),
                members.iter().copied().map(SteamId).collect(),
            );
        }
    }

    impl LobbyQuery for FakeLobbies {
        fn member_count(&self, lobby: SteamId) -> u32 {
            self.queries.set(self.queries.get() + 1);
            self.lobbies
                .borrow()
                .get(&lobby)
                .map_or(0, |m| u32::try_from(m.len()).unwrap())
        }

        fn member_at(&self, lobby: SteamId, index: u32) -> SteamId {
            self.queries.set(self.queries.get() + 1);
            self.lobbies
                .borrow()
                .get(&lobby)
                .and_then(|m| m.get(index as usize).copied())
                .unwrap_or(SteamId::NIL)
        }
    }

    /// Reports `count` members, then drops to `after` before the per-index
    /// reads, the way a lobby shrinks between the two remote calls.
    struct ShrinkingLobby {
        count: u32,
        members: RefCell<Vec<SteamId>>,
        after: Vec<SteamId>,
    }

    impl LobbyQuery for ShrinkingLobby {
        fn member_count(&self, _: SteamId) -> u32 {
            let n = self.count;
            *self.members.borrow_mut() = self.after.clone();
            n
        }

        fn member_at(&self, _: SteamId, index: u32) -> SteamId {
            self.members
                .borrow()
                .get(index as usize)
                .copied()
                .unwrap_or(SteamId::NIL)
        }
    }

    fn ids(raw: &[u64]) -> Vec<SteamId> {
        raw.iter().copied().map(SteamId).collect()
    }

    const OK: i32 = 1;

    // =====================================================================
    // Construction and refresh
    // =====================================================================

    #[test]
    fn test_starts_with_no_lobby() {
        let mirror = SessionMirror::new(FakeLobbies::default());
        assert_eq!(mirror.current_lobby_id(), SteamId::NIL);
        assert!(mirror.members().is_empty());
        assert_eq!(mirror.session_state(), SessionState::NoLobby);
    }

    #[test]
    fn test_refresh_without_lobby_makes_no_query() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(1, &[10]));
        mirror.refresh_members();
        assert!(mirror.members().is_empty());
        assert_eq!(mirror.query().queries.get(), 0);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(42, &[7, 8, 9]));
        mirror.on_lobby_created(OK, SteamId(42));
        let first = mirror.members();
        mirror.refresh_members();
        assert_eq!(mirror.members(), first);
        assert_eq!(first, ids(&[7, 8, 9]));
    }

    #[test]
    fn test_refresh_picks_up_remote_changes() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(42, &[7]));
        mirror.on_lobby_entered(SteamId(42), 1);
        mirror.query().set(42, &[7, 11]);
        mirror.refresh_members();
        assert_eq!(mirror.members(), ids(&[7, 11]));
    }

    #[test]
    fn test_zero_count_degrades_to_empty_lobby() {
        let mut mirror = SessionMirror::new(FakeLobbies::default());
        mirror.on_lobby_created(OK, SteamId(77));
        assert_eq!(mirror.current_lobby_id(), SteamId(77));
        assert!(mirror.members().is_empty());
    }

    #[test]
    fn test_refresh_is_not_atomic_across_count_and_reads() {
        let mut mirror = SessionMirror::new(ShrinkingLobby {
            count: 3,
            members: RefCell::new(ids(&[7, 8, 9])),
            after: ids(&[7]),
        });
        mirror.on_lobby_entered(SteamId(50), 1);
        assert_eq!(mirror.members(), vec![SteamId(7), SteamId::NIL, SteamId::NIL]);
    }

    #[test]
    fn test_refresh_keeps_duplicate_members() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(51, &[4, 4, 5, 4]));
        mirror.on_lobby_created(OK, SteamId(51));
        assert_eq!(mirror.members(), ids(&[4, 4, 5, 4]));
    }

    // =====================================================================
    // Created / entered reactions
    // =====================================================================

    #[test]
    fn test_created_ok_adopts_lobby_and_members_in_order() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(12345, &[111, 222, 333]));
        mirror.on_lobby_created(OK, SteamId(12345));
        assert_eq!(mirror.current_lobby_id(), SteamId(12345));
        assert_eq!(mirror.members(), ids(&[111, 222, 333]));
        assert_eq!(mirror.session_state(), SessionState::InLobby(SteamId(12345)));
    }

    #[test]
    fn test_failed_callbacks_leave_state_unchanged() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(5, &[1, 2]));
        mirror.on_lobby_created(OK, SteamId(5));
        let before = mirror.state().clone();

        for code in [0, 2, 3, 16, 25, -1] {
            mirror.on_lobby_created(code, SteamId(6));
        }
        for code in [0, 2, 4, 5, 15] {
            mirror.on_lobby_entered(SteamId(6), code);
        }

        assert_eq!(*mirror.state(), before);
    }

    #[test]
    fn test_enter_with_non_success_code_from_fresh_mirror() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(999, &[1]));
        mirror.on_lobby_entered(SteamId(999), 2);
        assert_eq!(mirror.current_lobby_id(), SteamId::NIL);
        assert!(mirror.members().is_empty());
        assert_eq!(mirror.query().queries.get(), 0);
    }

    #[test]
    fn test_second_confirmation_overwrites_without_guard() {
        let fake = FakeLobbies::with(1, &[10, 11]);
        fake.set(2, &[20]);
        let mut mirror = SessionMirror::new(fake);

        mirror.on_lobby_created(OK, SteamId(1));
        mirror.on_lobby_entered(SteamId(2), 1);

        assert_eq!(mirror.current_lobby_id(), SteamId(2));
        assert_eq!(mirror.members(), ids(&[20]));
    }

    // =====================================================================
    // Leave and snapshots
    // =====================================================================

    #[test]
    fn test_leave_resets_regardless_of_id() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(3, &[1, 2, 3]));
        mirror.on_lobby_created(OK, SteamId(3));
        mirror.leave(SteamId(4242));
        assert_eq!(mirror.current_lobby_id(), SteamId::NIL);
        assert!(mirror.members().is_empty());

        mirror.leave(SteamId::NIL);
        assert_eq!(*mirror.state(), LobbyState::default());
    }

    #[test]
    fn test_members_returns_a_snapshot() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(3, &[1, 2]));
        mirror.on_lobby_created(OK, SteamId(3));
        let mut snapshot = mirror.members();
        snapshot.push(SteamId(99));
        snapshot.clear();
        assert_eq!(mirror.members(), ids(&[1, 2]));
    }

    // =====================================================================
    // Two-stage dispatch
    // =====================================================================

    #[test]
    fn test_observer_runs_after_state_update() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(8, &[80, 81]));
        let seen = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&seen);
        mirror.set_lobby_created_callback(move |e| *slot.borrow_mut() = Some(*e));
        mirror.handle_lobby_created(&LobbyCreated {
            result: OK,
            lobby: SteamId(8),
        });

        assert_eq!(mirror.current_lobby_id(), SteamId(8));
        assert_eq!(
            *seen.borrow(),
            Some(LobbyCreated {
                result: OK,
                lobby: SteamId(8),
            })
        );
    }

    #[test]
    fn test_created_listener_sees_refreshed_state() {
        let fake = FakeLobbies::with(8, &[80, 81]);
        let queries = Rc::clone(&fake.queries);
        let mut mirror = SessionMirror::new(fake);
        let seen_at = Rc::new(Cell::new(None));

        let slot = Rc::clone(&seen_at);
        mirror.set_lobby_created_callback(move |_| slot.set(Some(queries.get())));
        mirror.handle_lobby_created(&LobbyCreated {
            result: OK,
            lobby: SteamId(8),
        });

        // One count query plus one read per member, all before the listener.
        assert_eq!(seen_at.get(), Some(3));
    }

    #[test]
    fn test_enter_listener_sees_refreshed_state() {
        let fake = FakeLobbies::with(9, &[90, 91, 92]);
        let queries = Rc::clone(&fake.queries);
        let mut mirror = SessionMirror::new(fake);
        let seen_at = Rc::new(Cell::new(None));

        let slot = Rc::clone(&seen_at);
        mirror.set_lobby_enter_callback(move |_| slot.set(Some(queries.get())));
        mirror.dispatch(&CallbackEvent::LobbyEnter(LobbyEnter {
            lobby: SteamId(9),
            chat_room_enter_response: 1,
            chat_permissions: 0,
            locked: false,
            game_id: 0,
        }));

        assert_eq!(seen_at.get(), Some(4));
        assert_eq!(mirror.members(), ids(&[90, 91, 92]));
    }

    #[test]
    fn test_observer_sees_failures_too() {
        let mut mirror = SessionMirror::new(FakeLobbies::default());
        let responses = Rc::new(RefCell::new(Vec::new()));

        let r = Rc::clone(&responses);
        mirror.set_lobby_enter_callback(move |e| r.borrow_mut().push(e.chat_room_enter_response));
        mirror.dispatch(&CallbackEvent::LobbyEnter(LobbyEnter {
            lobby: SteamId(4),
            chat_room_enter_response: 4,
            chat_permissions: 0,
            locked: false,
            game_id: 0,
        }));

        assert_eq!(*responses.borrow(), vec![4]);
        assert_eq!(mirror.current_lobby_id(), SteamId::NIL);
    }

    #[test]
    fn test_join_requested_is_forwarded_without_state_change() {
        let mut mirror = SessionMirror::new(FakeLobbies::with(6, &[1]));
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        mirror.set_game_lobby_join_requested_callback(move |_| h.set(h.get() + 1));
        mirror.dispatch(&CallbackEvent::GameLobbyJoinRequested(GameLobbyJoinRequested {
            lobby: SteamId(6),
            friend: SteamId(2),
        }));

        assert_eq!(hits.get(), 1);
        assert_eq!(mirror.session_state(), SessionState::NoLobby);
    }

    #[test]
    fn test_clear_callbacks() {
        let mut mirror = SessionMirror::new(FakeLobbies::default());
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        mirror.set_lobby_created_callback(move |_| h.set(h.get() + 1));
        mirror.clear_callbacks();
        mirror.handle_lobby_created(&LobbyCreated {
            result: 2,
            lobby: SteamId::NIL,
        });
        assert_eq!(hits.get(), 0);
    }
}
