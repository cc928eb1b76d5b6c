//! Worker thread. Owns the Steam [`Client`] and handles every FFI call.
//!
//! The SDK is single-threaded, so the client is created here and never
//! leaves this thread. Between commands the worker pumps callbacks on a
//! fixed tick, which is what keeps the lobby mirror current.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use steamworks::{Client, ClientBuilder, Steam, SteamId};

use crate::event::Cmd;

/// Settings handed to the worker at spawn time.
#[derive(Debug, Clone)]
pub struct Settings {
    pub builder: ClientBuilder,
    pub friend: SteamId,
    pub tick: Duration,
}

/// Run the worker loop until [`Cmd::Exit`] or the command channel closes.
///
/// Whether the SDK came up is reported once on `ready` before any command
/// is read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(rx: mpsc::Receiver<Cmd>, ready: mpsc::Sender<bool>, settings: Settings) {
    let mut client = settings.builder.clone().connect();
    let _ = ready.send(client.is_ready());
    if !client.is_ready() {
        tracing::error!("steam initialization failed, worker stopping");
        return;
    }
    greet(&client);
    install_callbacks(&mut client);

    if !settings.friend.is_nil() {
        client.accept_p2p_session(settings.friend);
    }

    let mut w = Worker { client, settings };
    loop {
        match rx.recv_timeout(w.settings.tick) {
            Ok(Cmd::Exit) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(cmd) => w.dispatch(cmd),
            Err(RecvTimeoutError::Timeout) => {}
        }
        w.client.run_callbacks();
    }
    tracing::debug!("worker stopped");
    println!("Exiting.");
}

fn greet(client: &Client<Steam>) {
    match client.persona_name() {
        Ok(name) => println!("Player name: {name}"),
        Err(e) => println!("Player name unavailable: {e}"),
    }
    if let Ok(id) = client.steam_id() {
        println!("Player Steam ID: {id}");
    }
}

fn install_callbacks(client: &mut Client<Steam>) {
    client.set_lobby_created_callback(|e| {
        if e.is_ok() {
            println!("Lobby created: {}", e.lobby);
        } else {
            println!("Lobby creation failed: {:?} ({})", e.result(), e.result);
        }
    });
    client.set_lobby_enter_callback(|e| {
        if e.is_success() {
            println!("Entered lobby {}", e.lobby);
        } else {
            println!(
                "Could not enter lobby {}: {:?}",
                e.lobby,
                e.response()
            );
        }
    });
    client.set_game_lobby_join_requested_callback(|e| {
        println!(
            "{} invited you to lobby {} (type `join {}`)",
            e.friend, e.lobby, e.lobby
        );
    });
}

/// Worker state; owns the [`Client`].
struct Worker {
    client: Client<Steam>,
    settings: Settings,
}

impl Worker {
    fn dispatch(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::Create => {
                if self.client.create_default_lobby() {
                    println!("Lobby creation requested.");
                }
            }
            Cmd::Invite { friend } => {
                let friend = friend.unwrap_or(self.settings.friend);
                let lobby = self.client.current_lobby_id();
                if self.client.invite_user_to_lobby(lobby, friend) {
                    println!("Invite sent to {friend} (may not be accepted yet).");
                } else {
                    println!("Failed to send invite.");
                }
            }
            Cmd::Send { words } => {
                let text = words.join(" ");
                if self.client.send_p2p_message(self.settings.friend, &text) {
                    println!("Sent to {}: '{text}'", self.settings.friend);
                } else {
                    println!("Failed to send P2P message.");
                }
            }
            Cmd::Recv => match self.client.receive_p2p_message() {
                Some(msg) => match msg.text() {
                    Ok(text) => println!("Received '{text}' from {}", msg.sender),
                    Err(_) => println!(
                        "Received {} non-text bytes from {}",
                        msg.payload.len(),
                        msg.sender
                    ),
                },
                None => println!("No P2P message received."),
            },
            Cmd::Leave => {
                let lobby = self.client.current_lobby_id();
                if lobby.is_nil() {
                    println!("Not in a lobby.");
                } else if self.client.leave_lobby(lobby) {
                    println!("Left lobby {lobby}.");
                }
            }
            Cmd::Join { lobby } => {
                if self.client.join_lobby(lobby) {
                    println!("Join lobby {lobby} requested.");
                }
            }
            Cmd::Callbacks => {
                let n = self.client.run_callbacks();
                println!("Ran callbacks ({n} delivered).");
            }
            Cmd::Lobby => self.print_lobby(),
            Cmd::Overlay => {
                let lobby = self.client.current_lobby_id();
                self.client.activate_invite_dialog(lobby);
            }
            Cmd::Exit => {}
        }
    }

    fn print_lobby(&mut self) {
        let lobby = self.client.current_lobby_id();
        println!("Current lobby ID: {lobby}");
        println!(
            "Number of players in lobby: {}",
            self.client.member_count(lobby)
        );
        self.client.refresh_lobby_members();
        let members: Vec<String> = self
            .client
            .lobby_members()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Lobby members: [{}]", members.join(", "));
    }
}
