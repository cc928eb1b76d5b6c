#![allow(unsafe_code)]
//! Native backend over the `SteamworksPy` shim.
//!
//! The shim holds one process-wide function pointer per callback type and
//! passes no context pointer, so the trampolines below cannot reach a
//! particular [`Steam`] value. They push converted payloads onto a global
//! queue instead, and [`Steam::run_callbacks`](Backend::run_callbacks) drains
//! it right after pumping the SDK. Only one [`Steam`] may be alive at a time.

use std::ffi::c_int;
use std::marker::PhantomData;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::Backend;
use crate::callback::{CallbackEvent, GameLobbyJoinRequested, LobbyCreated, LobbyEnter};
use crate::error::{Error, Result};
use crate::ffi::{from_c_count, read_borrowed_string, to_c_int};
use crate::mirror::LobbyQuery;
use crate::types::{LobbyType, P2PSend, SteamId};

/// Set while a [`Steam`] handle is alive.
static LIVE: AtomicBool = AtomicBool::new(false);

/// Callbacks delivered by the shim, waiting to be drained.
static PENDING: Mutex<Vec<CallbackEvent>> = Mutex::new(Vec::new());

fn push_pending(event: CallbackEvent) {
    match PENDING.lock() {
        Ok(mut q) => q.push(event),
        Err(poisoned) => poisoned.into_inner().push(event),
    }
}

fn take_pending() -> Vec<CallbackEvent> {
    match PENDING.lock() {
        Ok(mut q) => std::mem::take(&mut *q),
        Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
    }
}

/// The initialized Steam API. Shuts the SDK down on drop.
///
/// The SDK is not thread-safe, so this handle is neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct Steam {
    _not_send: PhantomData<*const ()>,
}

impl Steam {
    /// Initialize the SDK and register the lobby callback trampolines.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyInitialized`] if another handle is alive, or
    /// [`Error::Init`] with the shim's status if the SDK refused to start
    /// (Steam client not running, missing `steam_appid.txt`, ...).
    pub fn init() -> Result<Self> {
        if LIVE.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyInitialized);
        }
        let status = unsafe { steamworks_sys::SteamInit() };
        if status != 0 {
            LIVE.store(false, Ordering::Release);
            return Err(Error::Init(status));
        }
        take_pending();
        unsafe {
            steamworks_sys::Lobby_SetLobbyCreatedCallback(Some(lobby_created_trampoline));
            steamworks_sys::Lobby_SetLobbyEnterCallback(Some(lobby_enter_trampoline));
            steamworks_sys::Lobby_SetGameLobbyJoinRequestedCallback(Some(
                join_requested_trampoline,
            ));
        }
        tracing::info!("steam api initialized");
        Ok(Self {
            _not_send: PhantomData,
        })
    }

    /// Whether the Steam client is running.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn is_running(&self) -> bool {
        unsafe { steamworks_sys::IsSteamRunning() }
    }
}

impl Drop for Steam {
    fn drop(&mut self) {
        unsafe {
            steamworks_sys::Lobby_SetLobbyCreatedCallback(None);
            steamworks_sys::Lobby_SetLobbyEnterCallback(None);
            steamworks_sys::Lobby_SetGameLobbyJoinRequestedCallback(None);
            steamworks_sys::SteamShutdown();
        }
        take_pending();
        LIVE.store(false, Ordering::Release);
        tracing::info!("steam api shut down");
    }
}

impl LobbyQuery for Steam {
    fn member_count(&self, lobby: SteamId) -> u32 {
        from_c_count(unsafe { steamworks_sys::GetNumLobbyMembers(lobby.raw()) })
    }

    fn member_at(&self, lobby: SteamId, index: u32) -> SteamId {
        SteamId(unsafe { steamworks_sys::GetLobbyMemberByIndex(lobby.raw(), to_c_int(index)) })
    }
}

impl Backend for Steam {
    fn run_callbacks(&self) -> Vec<CallbackEvent> {
        unsafe { steamworks_sys::RunCallbacks() };
        take_pending()
    }

    fn persona_name(&self) -> Result<String> {
        unsafe { read_borrowed_string(steamworks_sys::GetPersonaName()) }
    }

    fn steam_id(&self) -> SteamId {
        SteamId(unsafe { steamworks_sys::GetSteamID() })
    }

    fn create_lobby(&self, lobby_type: LobbyType, max_members: u32) {
        unsafe { steamworks_sys::CreateLobby(lobby_type as c_int, to_c_int(max_members)) };
    }

    fn join_lobby(&self, lobby: SteamId) {
        unsafe { steamworks_sys::JoinLobby(lobby.raw()) };
    }

    fn leave_lobby(&self, lobby: SteamId) {
        unsafe { steamworks_sys::LeaveLobby(lobby.raw()) };
    }

    fn invite_user_to_lobby(&self, lobby: SteamId, invitee: SteamId) -> bool {
        unsafe { steamworks_sys::InviteUserToLobby(lobby.raw(), invitee.raw()) }
    }

    fn activate_invite_dialog(&self, lobby: SteamId) {
        unsafe { steamworks_sys::ActivateGameOverlayInviteDialog(lobby.raw()) };
    }

    fn send_p2p_packet(
        &self,
        remote: SteamId,
        data: &[u8],
        send: P2PSend,
        channel: i32,
    ) -> bool {
        let Ok(len) = u32::try_from(data.len()) else {
            return false;
        };
        unsafe {
            steamworks_sys::SendP2PPacket(
                remote.raw(),
                data.as_ptr().cast(),
                len,
                send as c_int,
                channel,
            )
        }
    }

    fn p2p_packet_available(&self, channel: i32) -> Option<u32> {
        let mut size = 0u32;
        unsafe { steamworks_sys::IsP2PPacketAvailable(&raw mut size, channel) }.then_some(size)
    }

    fn read_p2p_packet(&self, buf: &mut [u8], channel: i32) -> Option<(usize, SteamId)> {
        let cap = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut size = 0u32;
        let mut sender = 0u64;
        let ok = unsafe {
            steamworks_sys::ReadP2PPacket(
                buf.as_mut_ptr().cast(),
                cap,
                &raw mut size,
                &raw mut sender,
                channel,
            )
        };
        ok.then(|| (size as usize, SteamId(sender)))
    }

    fn accept_p2p_session(&self, remote: SteamId) -> bool {
        unsafe { steamworks_sys::AcceptP2PSessionWithUser(remote.raw()) }
    }

    fn close_p2p_session(&self, remote: SteamId) -> bool {
        unsafe { steamworks_sys::CloseP2PSessionWithUser(remote.raw()) }
    }
}

unsafe extern "C" fn lobby_created_trampoline(raw: steamworks_sys::LobbyCreated_t) {
    push_pending(CallbackEvent::LobbyCreated(LobbyCreated {
        result: raw.m_eResult,
        lobby: SteamId(raw.m_ulSteamIDLobby),
    }));
}

unsafe extern "C" fn lobby_enter_trampoline(raw: steamworks_sys::LobbyEnter_t) {
    push_pending(CallbackEvent::LobbyEnter(LobbyEnter {
        lobby: SteamId(raw.m_ulSteamIDLobby),
        chat_room_enter_response: raw.m_EChatRoomEnterResponse,
        chat_permissions: raw.m_rgfChatPermissions,
        locked: raw.m_bLocked,
        game_id: raw.m_ulGameID,
    }));
}

unsafe extern "C" fn join_requested_trampoline(raw: steamworks_sys::GameLobbyJoinRequested_t) {
    push_pending(CallbackEvent::GameLobbyJoinRequested(
        GameLobbyJoinRequested {
            lobby: SteamId(raw.m_steamIDLobby),
            friend: SteamId(raw.m_steamIDFriend),
        },
    ));
}
