//! Per-lobby hubs: one task owns the subscriber set, commands arrive over
//! a bounded channel, delivery never blocks on a slow consumer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::LobbyCode;
use crate::sse::protocol::ServerEvent;

enum Command {
    Register {
        token: Uuid,
        sender: mpsc::Sender<Arc<str>>,
    },
    Unregister {
        token: Uuid,
    },
    Broadcast {
        frame: Arc<str>,
    },
}

/// Handle to one lobby's fan-out task. Cheap to clone; the task runs until
/// `shutdown` or until every handle is dropped.
#[derive(Clone)]
pub struct Hub {
    lobby_code: LobbyCode,
    commands: mpsc::Sender<Command>,
    cancel: CancellationToken,
    subscriber_count: Arc<AtomicUsize>,
    dropped_frames: Arc<AtomicU64>,
    capacity: usize,
}

impl Hub {
    /// Spawn the hub task for a lobby. `capacity` bounds both the command
    /// channel and each subscriber's outbound queue.
    pub fn spawn(lobby_code: LobbyCode, capacity: usize) -> Self {
        let (commands, receiver) = mpsc::channel(capacity);
        let cancel = CancellationToken::new();
        let subscriber_count = Arc::new(AtomicUsize::new(0));
        let dropped_frames = Arc::new(AtomicU64::new(0));

        tokio::spawn(run(
            lobby_code.clone(),
            receiver,
            cancel.clone(),
            Arc::clone(&subscriber_count),
            Arc::clone(&dropped_frames),
        ));

        Self {
            lobby_code,
            commands,
            cancel,
            subscriber_count,
            dropped_frames,
            capacity,
        }
    }

    pub fn lobby_code(&self) -> &LobbyCode {
        &self.lobby_code
    }

    /// Register a new subscriber and hand back its frame queue.
    pub async fn subscribe(&self) -> Subscriber {
        let token = Uuid::new_v4();
        let (sender, receiver) = mpsc::channel(self.capacity);
        // A send failure means the loop is gone; the subscriber then sees
        // its queue close on first recv.
        let _ = self.commands.send(Command::Register { token, sender }).await;
        Subscriber {
            token,
            hub: self.clone(),
            receiver,
        }
    }

    pub async fn unsubscribe(&self, token: Uuid) {
        let _ = self.commands.send(Command::Unregister { token }).await;
    }

    /// Queue a frame for every subscriber. Non-blocking: a full command
    /// channel drops the whole broadcast, a full subscriber queue drops it
    /// for that subscriber only. Neither case surfaces to the caller.
    pub fn broadcast(&self, frame: impl Into<Arc<str>>) {
        let frame = frame.into();
        if self
            .commands
            .try_send(Command::Broadcast { frame })
            .is_err()
        {
            self.dropped_frames.fetch_add(1, Ordering::Relaxed);
            warn!(lobby_code = %self.lobby_code, "broadcast dropped, hub command queue full");
        }
    }

    pub fn broadcast_event(&self, event: &ServerEvent) {
        self.broadcast(event.frame());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::Relaxed)
    }

    /// Frames that never reached at least one subscriber.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames.load(Ordering::Relaxed)
    }

    /// Stop the hub task and close every subscriber queue.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// The receiving half of a hub registration. Dropping it without
/// `unsubscribe` is safe; the hub prunes the closed queue on the next
/// broadcast.
pub struct Subscriber {
    token: Uuid,
    hub: Hub,
    receiver: mpsc::Receiver<Arc<str>>,
}

impl Subscriber {
    pub fn token(&self) -> Uuid {
        self.token
    }

    /// Next frame, or `None` once the hub has closed this queue.
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        self.receiver.recv().await
    }

    pub async fn unsubscribe(self) {
        self.hub.unsubscribe(self.token).await;
    }
}

async fn run(
    lobby_code: LobbyCode,
    mut commands: mpsc::Receiver<Command>,
    cancel: CancellationToken,
    subscriber_count: Arc<AtomicUsize>,
    dropped_frames: Arc<AtomicU64>,
) {
    let mut subscribers: HashMap<Uuid, mpsc::Sender<Arc<str>>> = HashMap::new();
    info!(lobby_code = %lobby_code, "sse hub started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            command = commands.recv() => {
                let Some(command) = command else { break };
                match command {
                    Command::Register { token, sender } => {
                        subscribers.insert(token, sender);
                        subscriber_count.store(subscribers.len(), Ordering::Relaxed);
                        debug!(
                            lobby_code = %lobby_code,
                            token = %token,
                            total = subscribers.len(),
                            "sse subscriber registered",
                        );
                    }
                    Command::Unregister { token } => {
                        if subscribers.remove(&token).is_some() {
                            subscriber_count.store(subscribers.len(), Ordering::Relaxed);
                            debug!(
                                lobby_code = %lobby_code,
                                token = %token,
                                total = subscribers.len(),
                                "sse subscriber unregistered",
                            );
                        }
                    }
                    Command::Broadcast { frame } => {
                        let mut stale = Vec::new();
                        for (token, sender) in &subscribers {
                            match sender.try_send(Arc::clone(&frame)) {
                                Ok(()) => {}
                                Err(TrySendError::Full(_)) => {
                                    dropped_frames.fetch_add(1, Ordering::Relaxed);
                                    warn!(
                                        lobby_code = %lobby_code,
                                        token = %token,
                                        "sse frame dropped, subscriber queue full",
                                    );
                                }
                                Err(TrySendError::Closed(_)) => stale.push(*token),
                            }
                        }
                        for token in stale {
                            subscribers.remove(&token);
                        }
                        subscriber_count.store(subscribers.len(), Ordering::Relaxed);
                    }
                }
            }
        }
    }

    let disconnected = subscribers.len();
    subscribers.clear();
    subscriber_count.store(0, Ordering::Relaxed);
    info!(lobby_code = %lobby_code, disconnected, "sse hub stopped");
}

/// All live hubs, keyed by lobby code. Hubs are created lazily on first
/// use and reaped explicitly or by the idle sweep.
pub struct HubManager {
    hubs: DashMap<LobbyCode, Hub>,
    capacity: usize,
}

impl HubManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            hubs: DashMap::new(),
            capacity,
        }
    }

    pub fn get_or_create(&self, code: &LobbyCode) -> Hub {
        self.hubs
            .entry(code.clone())
            .or_insert_with(|| Hub::spawn(code.clone(), self.capacity))
            .clone()
    }

    pub fn get(&self, code: &LobbyCode) -> Option<Hub> {
        self.hubs.get(code).map(|entry| entry.clone())
    }

    /// Remove and shut down the hub for a lobby, if one exists.
    pub fn remove(&self, code: &LobbyCode) {
        if let Some((_, hub)) = self.hubs.remove(code) {
            hub.shutdown();
            info!(lobby_code = %code, "sse hub removed");
        }
    }

    /// Shut down and drop every hub with zero subscribers. Returns the
    /// number removed.
    pub fn sweep_idle(&self) -> usize {
        let mut removed = 0;
        self.hubs.retain(|_, hub| {
            if hub.subscriber_count() == 0 {
                hub.shutdown();
                removed += 1;
                false
            } else {
                true
            }
        });
        if removed > 0 {
            info!(removed, "idle sse hubs swept");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }
}
