//! steam-lobby: interactive driver for Steam lobbies and P2P messages.
//!
//! Architecture: **main thread = stdin only**, **worker thread = all FFI**.
//! The worker pumps Steam callbacks on a fixed tick and runs commands as they
//! arrive over a channel.

#![allow(
    missing_docs,
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

mod event;
mod worker;

use std::io::{self, BufRead, Write};
use std::process;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use steamworks::{ClientBuilder, LobbyType, P2PSend, SteamId};
use tracing_subscriber::EnvFilter;

use crate::event::{Cmd, MENU, parse_line};

/// Interactive Steam lobby and P2P client.
///
/// Needs a running Steam client and a `steam_appid.txt` next to the binary.
#[derive(Parser)]
#[command(name = "steam-lobby", version, about, long_about = None)]
struct Args {
    /// Friend's Steam ID64 used for invites and P2P messages.
    #[arg(short, long, default_value = "0")]
    friend: SteamId,

    /// Visibility of lobbies created with `create`.
    #[arg(long, default_value = "public", value_parser = parse_lobby_type)]
    lobby_type: LobbyType,

    /// Member cap of lobbies created with `create`.
    #[arg(short, long, default_value = "2")]
    max_members: u32,

    /// P2P channel.
    #[arg(long, default_value = "0")]
    channel: i32,

    /// Send P2P messages unreliably.
    #[arg(long)]
    unreliable: bool,

    /// Callback pump interval in milliseconds.
    #[arg(long, default_value = "100")]
    tick_ms: u64,
}

fn parse_lobby_type(s: &str) -> Result<LobbyType, String> {
    match s.to_ascii_lowercase().as_str() {
        "private" => Ok(LobbyType::Private),
        "friends" | "friends-only" => Ok(LobbyType::FriendsOnly),
        "public" => Ok(LobbyType::Public),
        "invisible" => Ok(LobbyType::Invisible),
        _ => Err(format!(
            "unknown lobby type: {s} (expected: private, friends, public, invisible)"
        )),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let builder = ClientBuilder::new()
        .lobby_type(args.lobby_type)
        .max_members(args.max_members)
        .p2p_channel(args.channel)
        .send_type(if args.unreliable {
            P2PSend::Unreliable
        } else {
            P2PSend::Reliable
        });
    let settings = worker::Settings {
        builder,
        friend: args.friend,
        tick: Duration::from_millis(args.tick_ms.max(1)),
    };

    let (cmd_tx, cmd_rx) = mpsc::channel::<Cmd>();
    let (ready_tx, ready_rx) = mpsc::channel::<bool>();
    let handle = thread::Builder::new()
        .name("steam-worker".into())
        .spawn(move || worker::run(cmd_rx, ready_tx, settings))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "cannot spawn worker");
            process::exit(1);
        });

    if !worker_started(&ready_rx) {
        join_worker(handle);
        eprintln!("Steam initialization failed. Is the Steam client running?");
        process::exit(1);
    }

    println!("{MENU}");
    read_commands(&cmd_tx);
    drop(cmd_tx);
    join_worker(handle);
}

/// Wait for the worker's readiness report. A dropped sender means the worker
/// died before reporting.
fn worker_started(ready: &mpsc::Receiver<bool>) -> bool {
    ready.recv() == Ok(true)
}

fn join_worker(handle: thread::JoinHandle<()>) {
    if handle.join().is_err() {
        tracing::error!("worker thread panicked");
        process::exit(1);
    }
}

/// Forward stdin lines to the worker until `exit`, EOF, or the worker stops.
fn read_commands(tx: &event::CmdTx) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            return;
        };
        match parse_line(&line) {
            Ok(Some(cmd)) => {
                let exit = cmd == Cmd::Exit;
                if tx.send(cmd).is_err() || exit {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }
}
