//! P2P packet commands over the legacy `ISteamNetworking` interface.

use super::Client;
use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{P2PSend, SteamId};

/// A packet read from a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P2PMessage {
    /// The peer that sent it.
    pub sender: SteamId,
    /// Raw packet bytes.
    pub payload: Vec<u8>,
}

impl P2PMessage {
    /// The payload as UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUtf8`] if the payload is not valid UTF-8.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.payload).map_err(|_| Error::InvalidUtf8)
    }
}

impl<B: Backend> Client<B> {
    /// Send raw bytes to `remote` on the configured channel.
    pub fn send_p2p_packet(&self, remote: SteamId, data: &[u8], send: P2PSend) -> bool {
        let Some(b) = self.ready_for("send p2p packet") else {
            return false;
        };
        if remote.is_nil() {
            tracing::warn!("no remote id for p2p send");
            return false;
        }
        let sent = b.send_p2p_packet(remote, data, send, self.config.p2p_channel);
        if sent {
            tracing::debug!(%remote, len = data.len(), ?send, "p2p packet sent");
        } else {
            tracing::warn!(%remote, len = data.len(), "p2p send failed");
        }
        sent
    }

    /// Send `message` as UTF-8 with the configured send type.
    pub fn send_p2p_message(&self, remote: SteamId, message: &str) -> bool {
        self.send_p2p_packet(remote, message.as_bytes(), self.config.send_type)
    }

    /// Read the next waiting packet, if any.
    ///
    /// Packets larger than the configured buffer are truncated by the SDK.
    pub fn receive_p2p_message(&mut self) -> Option<P2PMessage> {
        let channel = self.config.p2p_channel;
        let b = self.mirror.query().backend();
        let Some(b) = b else {
            tracing::warn!("steam not initialized, cannot receive p2p message");
            return None;
        };
        let size = b.p2p_packet_available(channel)?;
        if size as usize > self.p2p_buf.len() {
            tracing::warn!(size, cap = self.p2p_buf.len(), "p2p packet exceeds buffer");
        }
        let (len, sender) = b.read_p2p_packet(&mut self.p2p_buf, channel)?;
        let len = len.min(self.p2p_buf.len());
        Some(P2PMessage {
            sender,
            payload: self.p2p_buf[..len].to_vec(),
        })
    }

    /// Accept a session request from `remote`.
    pub fn accept_p2p_session(&self, remote: SteamId) -> bool {
        let Some(b) = self.ready_for("accept p2p session") else {
            return false;
        };
        if remote.is_nil() {
            tracing::warn!("no remote id for p2p session");
            return false;
        }
        b.accept_p2p_session(remote)
    }

    /// Close the session with `remote`.
    pub fn close_p2p_session(&self, remote: SteamId) -> bool {
        let Some(b) = self.ready_for("close p2p session") else {
            return false;
        };
        if remote.is_nil() {
            tracing::warn!("no remote id for p2p session");
            return false;
        }
        let closed = b.close_p2p_session(remote);
        if closed {
            tracing::info!(%remote, "p2p session closed");
        }
        closed
    }
}
