//! SDK types: Steam identifiers and mirrors of the native enumerations.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A 64-bit Steam identifier. Users and lobbies share the same id space.
///
/// [`SteamId::NIL`] (`0`) stands for "no id", e.g. "not in a lobby".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SteamId(pub u64);

impl SteamId {
    /// The "no id" sentinel.
    pub const NIL: Self = Self(0);

    /// Whether this is the [`NIL`](Self::NIL) sentinel.
    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }

    /// Raw value for FFI calls.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for SteamId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<SteamId> for u64 {
    fn from(id: SteamId) -> Self {
        id.0
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::InvalidArgument(format!("bad steam id: {s}")))
    }
}

macro_rules! ffi_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident {
        $($(#[$vm:meta])* $variant:ident = $val:expr),* $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        $vis enum $name { $($(#[$vm])* $variant = $val),* }

        impl $name {
            /// Convert from FFI `i32`. Returns `None` for unknown values.
            #[must_use]
            pub const fn from_ffi(v: i32) -> Option<Self> {
                match v { $($val => Some(Self::$variant),)* _ => None }
            }
        }
    };
}

ffi_enum! {
    /// Lobby visibility (`ELobbyType`).
    #[derive(Default)]
    pub enum LobbyType {
        /// Joinable by invitation only.
        Private = 0,
        /// Joinable by friends and invitees.
        FriendsOnly = 1,
        /// Returned by search and visible to friends.
        #[default]
        Public = 2,
        /// Returned by search but not visible to friends.
        Invisible = 3,
    }
}

ffi_enum! {
    /// Result codes (`EResult`) reported by asynchronous SDK calls.
    ///
    /// Only the codes a lobby creation can report are mirrored.
    pub enum EResult {
        /// Success.
        Ok = 1,
        /// Generic failure.
        Fail = 2,
        /// No connection to the Steam servers.
        NoConnection = 3,
        /// A parameter was invalid.
        InvalidParam = 8,
        /// Not allowed for this user.
        AccessDenied = 15,
        /// The request timed out.
        Timeout = 16,
        /// Too many lobbies created recently.
        LimitExceeded = 25,
    }
}

ffi_enum! {
    /// Outcome of entering a chat room or lobby (`EChatRoomEnterResponse`).
    pub enum ChatRoomEnterResponse {
        /// Entered successfully.
        Success = 1,
        /// The lobby no longer exists.
        DoesntExist = 2,
        /// Not allowed to join.
        NotAllowed = 3,
        /// The lobby is full.
        Full = 4,
        /// Unexpected error.
        Error = 5,
        /// Banned from this lobby.
        Banned = 6,
        /// Limited accounts cannot join.
        Limited = 7,
        /// Clan chat is disabled.
        ClanDisabled = 8,
        /// Community ban.
        CommunityBan = 9,
        /// A member of the lobby blocked you.
        MemberBlockedYou = 10,
        /// You blocked a member of the lobby.
        YouBlockedMember = 11,
        /// Joining too fast.
        RatelimitExceeded = 15,
    }
}

ffi_enum! {
    /// Delivery mode for a P2P packet (`EP2PSend`).
    #[derive(Default)]
    pub enum P2PSend {
        /// Fire-and-forget; may be dropped or reordered.
        Unreliable = 0,
        /// Unreliable, sent immediately or dropped.
        UnreliableNoDelay = 1,
        /// Reliable, ordered; large packets are fragmented.
        #[default]
        Reliable = 2,
        /// Reliable with Nagle-style coalescing.
        ReliableWithBuffering = 3,
    }
}
