//! Command types and line parsing.
//!
//! The main thread reads stdin and turns each line into a [`Cmd`]; the
//! worker thread owns the Steam client and executes them between callback
//! pumps.

use std::sync::mpsc;

use clap::{Parser, Subcommand};
use steamworks::SteamId;

/// Command sender (stdin reader → worker thread).
pub type CmdTx = mpsc::Sender<Cmd>;

/// One interactive line, parsed with clap.
#[derive(Parser)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct Line {
    #[command(subcommand)]
    cmd: Cmd,
}

/// Commands executed by the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Cmd {
    /// Create a lobby with the configured type and size.
    #[command(alias = "1")]
    Create,
    /// Invite a friend to the current lobby.
    #[command(alias = "2")]
    Invite {
        /// Friend to invite (defaults to --friend).
        friend: Option<SteamId>,
    },
    /// Send a P2P text message to the friend.
    #[command(alias = "3")]
    Send {
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Read one waiting P2P message.
    #[command(alias = "4")]
    Recv,
    /// Leave the current lobby.
    #[command(alias = "5")]
    Leave,
    /// Join a lobby by id.
    #[command(alias = "6")]
    Join {
        /// Lobby id.
        lobby: SteamId,
    },
    /// Pump Steam callbacks now.
    #[command(alias = "7")]
    Callbacks,
    /// Show the current lobby and its members.
    #[command(alias = "8")]
    Lobby,
    /// Open the overlay invite dialog for the current lobby.
    #[command(alias = "9")]
    Overlay,
    /// Quit.
    #[command(alias = "10", alias = "quit")]
    Exit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Cmd>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(words)
        .map(|l| Some(l.cmd))
        .map_err(|e| e.to_string())
}

/// Menu printed at startup.
pub const MENU: &str = "\
commands:
  1  create            create lobby
  2  invite [ID]       invite friend to lobby
  3  send TEXT...      send P2P message
  4  recv              receive P2P message
  5  leave             leave lobby
  6  join ID           join lobby
  7  callbacks         run callbacks
  8  lobby             check lobby
  9  overlay           overlay invite dialog
  10 exit              exit";
