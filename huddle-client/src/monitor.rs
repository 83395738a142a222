use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use webrtc::track::track_remote::TrackRemote;

/// Liveness diagnostic for the remote stream: samples the energy of
/// recently received audio payload on a fixed interval and publishes
/// whether audio is currently present. Never a control input to
/// negotiation. Encoded payload energy stands in for the browser
/// analyser's frequency bins.
pub struct AudioActivityMonitor {
    active_rx: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl AudioActivityMonitor {
    pub fn start(track: Arc<TrackRemote>, interval: Duration) -> Self {
        let (tx, active_rx) = watch::channel(false);
        let task = tokio::spawn(watch_track(track, interval, tx));
        Self { active_rx, task }
    }

    pub fn is_active(&self) -> bool {
        *self.active_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.active_rx.clone()
    }
}

impl Drop for AudioActivityMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn watch_track(track: Arc<TrackRemote>, interval: Duration, tx: watch::Sender<bool>) {
    let mut ticker = tokio::time::interval(interval);
    let mut window_energy: u64 = 0;

    loop {
        tokio::select! {
            packet = track.read_rtp() => match packet {
                Ok((packet, _attributes)) => {
                    window_energy += payload_energy(&packet.payload);
                }
                Err(_) => break,
            },

            _ = ticker.tick() => {
                let active = window_energy > 0;
                if tx.send_replace(active) != active {
                    debug!("Remote audio {}", if active { "present" } else { "silent" });
                }
                window_energy = 0;
            }
        }
    }

    let _ = tx.send(false);
}

fn payload_energy(payload: &[u8]) -> u64 {
    payload.iter().map(|byte| u64::from(*byte)).sum()
}
