use crate::room::room_command::RoomCommand;
use crate::room::room_registry::RoomRegistry;
use axum::extract::ws::Message;
use huddle_core::{ConnectionId, Identity, RoomId};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

struct Member {
    identity: Identity,
    tx: mpsc::UnboundedSender<Message>,
}

/// One room's event loop. Owns the member map and does nothing but
/// routing: frames are forwarded verbatim to every other member of the
/// same room, never parsed and never sent outside it. When the last
/// member leaves, the room deregisters itself and exits.
pub struct Room {
    id: RoomId,
    members: HashMap<ConnectionId, Member>,
    command_rx: mpsc::Receiver<RoomCommand>,
    registry: RoomRegistry,
}

impl Room {
    pub fn new(id: RoomId, command_rx: mpsc::Receiver<RoomCommand>, registry: RoomRegistry) -> Self {
        Self {
            id,
            members: HashMap::new(),
            command_rx,
            registry,
        }
    }

    pub async fn run(mut self) {
        info!("Room '{}' event loop started", self.id);

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);

            if self.members.is_empty() {
                break;
            }
        }

        self.registry.deregister(&self.id);

        // Joins that raced with shutdown get re-homed through the
        // registry, which now spawns a fresh room for this id.
        while let Ok(cmd) = self.command_rx.try_recv() {
            if let RoomCommand::Join { conn, identity, tx } = cmd {
                let sender = self.registry.sender_for(&self.id);
                let _ = sender.try_send(RoomCommand::Join { conn, identity, tx });
            }
        }

        info!("Room '{}' empty, discarded", self.id);
    }

    fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join { conn, identity, tx } => {
                info!("Room '{}': {} joined as {}", self.id, identity, conn);
                self.members.insert(conn, Member { identity, tx });
            }

            RoomCommand::Forward { from, frame } => {
                if !self.members.contains_key(&from) {
                    warn!("Room '{}': frame from non-member {}, dropped", self.id, from);
                    return;
                }

                debug!(
                    "Room '{}': forwarding frame from {} to {} member(s)",
                    self.id,
                    from,
                    self.members.len() - 1
                );

                for (conn, member) in &self.members {
                    if *conn == from {
                        continue;
                    }
                    if member.tx.send(frame.clone()).is_err() {
                        warn!(
                            "Room '{}': member {} ({}) unreachable",
                            self.id, conn, member.identity
                        );
                    }
                }
            }

            RoomCommand::Leave { conn } => {
                if let Some(member) = self.members.remove(&conn) {
                    info!("Room '{}': {} ({}) left", self.id, member.identity, conn);
                }
            }
        }
    }
}
