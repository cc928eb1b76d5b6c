//! A client whose SDK never initialized stays inert: every command reports
//! failure, nothing panics, and the lobby mirror stays empty.

use steamworks::{
    Backend, CallbackEvent, ClientBuilder, Error, Handle, LobbyCreated, LobbyQuery, LobbyType,
    P2PSend, SteamId,
};

/// Fails the test if any call reaches it.
#[derive(Debug)]
struct Unreachable;

impl LobbyQuery for Unreachable {
    fn member_count(&self, _: SteamId) -> u32 {
        panic!("member_count on a not-ready handle")
    }

    fn member_at(&self, _: SteamId, _: u32) -> SteamId {
        panic!("member_at on a not-ready handle")
    }
}

impl Backend for Unreachable {
    fn run_callbacks(&self) -> Vec<CallbackEvent> {
        panic!("run_callbacks on a not-ready handle")
    }

    fn persona_name(&self) -> steamworks::Result<String> {
        panic!("persona_name on a not-ready handle")
    }

    fn steam_id(&self) -> SteamId {
        panic!("steam_id on a not-ready handle")
    }

    fn create_lobby(&self, _: LobbyType, _: u32) {
        panic!("create_lobby on a not-ready handle")
    }

    fn join_lobby(&self, _: SteamId) {
        panic!("join_lobby on a not-ready handle")
    }

    fn leave_lobby(&self, _: SteamId) {
        panic!("leave_lobby on a not-ready handle")
    }

    fn invite_user_to_lobby(&self, _: SteamId, _: SteamId) -> bool {
        panic!("invite_user_to_lobby on a not-ready handle")
    }

    fn activate_invite_dialog(&self, _: SteamId) {
        panic!("activate_invite_dialog on a not-ready handle")
    }

    fn send_p2p_packet(&self, _: SteamId, _: &[u8], _: P2PSend, _: i32) -> bool {
        panic!("send_p2p_packet on a not-ready handle")
    }

    fn p2p_packet_available(&self, _: i32) -> Option<u32> {
        panic!("p2p_packet_available on a not-ready handle")
    }

    fn read_p2p_packet(&self, _: &mut [u8], _: i32) -> Option<(usize, SteamId)> {
        panic!("read_p2p_packet on a not-ready handle")
    }

    fn accept_p2p_session(&self, _: SteamId) -> bool {
        panic!("accept_p2p_session on a not-ready handle")
    }

    fn close_p2p_session(&self, _: SteamId) -> bool {
        panic!("close_p2p_session on a not-ready handle")
    }
}

#[test]
fn test_every_command_degrades() {
    let mut c = ClientBuilder::new().build(Handle::<Unreachable>::NotReady);
    let lobby = SteamId(5);
    let peer = SteamId(6);

    assert!(!c.is_ready());
    assert!(!c.create_default_lobby());
    assert!(!c.create_lobby(LobbyType::Private, 4));
    assert!(!c.join_lobby(lobby));
    assert!(!c.leave_lobby(lobby));
    assert!(!c.invite_user_to_lobby(lobby, peer));
    assert!(!c.activate_invite_dialog(lobby));
    assert!(!c.send_p2p_message(peer, "hi"));
    assert!(!c.send_p2p_packet(peer, &[1, 2], P2PSend::Unreliable));
    assert!(c.receive_p2p_message().is_none());
    assert!(!c.accept_p2p_session(peer));
    assert!(!c.close_p2p_session(peer));
    assert_eq!(c.run_callbacks(), 0);
    assert_eq!(c.member_count(lobby), 0);
}

#[test]
fn test_identity_reports_not_loaded() {
    let c = ClientBuilder::new().build(Handle::<Unreachable>::NotReady);
    assert!(matches!(c.persona_name(), Err(Error::NotLoaded)));
    assert!(matches!(c.steam_id(), Err(Error::NotLoaded)));
}

#[test]
fn test_confirmation_without_sdk_yields_empty_lobby() {
    let mut c = ClientBuilder::new().build(Handle::<Unreachable>::NotReady);
    c.dispatch(&CallbackEvent::LobbyCreated(LobbyCreated {
        result: 1,
        lobby: SteamId(12345),
    }));

    assert_eq!(c.current_lobby_id(), SteamId(12345));
    assert!(c.lobby_members().is_empty());

    c.leave_lobby(SteamId(12345));
    assert_eq!(c.current_lobby_id(), SteamId(12345));

    c.mirror_mut().leave(SteamId(12345));
    assert_eq!(c.current_lobby_id(), SteamId::NIL);
}
