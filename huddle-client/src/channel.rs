use crate::error::ChannelError;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use huddle_core::SignalMessage;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, warn};

/// Events surfaced by an open signaling channel, in arrival order.
#[derive(Debug)]
pub enum ChannelEvent {
    Connected,
    Message(SignalMessage),
    Disconnected,
}

/// Outbound half of the negotiation state machine. Implemented by
/// [`SignalChannel`] in production and by collecting mocks in tests.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn send(&self, msg: SignalMessage) -> Result<(), ChannelError>;
}

/// Persistent bidirectional connection to the relay. Delivery is
/// at-most-once: a dropped message stalls negotiation rather than
/// being retried here.
#[derive(Clone)]
pub struct SignalChannel {
    out_tx: mpsc::UnboundedSender<WsMessage>,
}

impl SignalChannel {
    /// Opens the channel and returns it together with its event stream.
    pub async fn open(url: &str) -> Result<(Self, mpsc::Receiver<ChannelEvent>), ChannelError> {
        if url.trim().is_empty() {
            return Err(ChannelError::MissingAddress);
        }

        let (socket, _response) = connect_async(url).await?;
        let (mut sink, mut stream) = socket.split();

        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<WsMessage>();
        let (evt_tx, evt_rx) = mpsc::channel(64);

        // Channel is up before either pump runs.
        let _ = evt_tx.send(ChannelEvent::Connected).await;

        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                if sink.send(msg).await.is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(WsMessage::Text(text)) => match serde_json::from_str::<SignalMessage>(&text)
                    {
                        Ok(msg) => {
                            debug!("Signaling message received");
                            if evt_tx.send(ChannelEvent::Message(msg)).await.is_err() {
                                return;
                            }
                        }
                        Err(e) => warn!("Undecodable signaling frame dropped: {}", e),
                    },
                    Ok(WsMessage::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
            let _ = evt_tx.send(ChannelEvent::Disconnected).await;
        });

        Ok((Self { out_tx }, evt_rx))
    }

    pub fn send(&self, msg: &SignalMessage) -> Result<(), ChannelError> {
        let json = serde_json::to_string(msg)?;
        self.out_tx
            .send(WsMessage::Text(json))
            .map_err(|_| ChannelError::Closed)
    }
}

#[async_trait]
impl SignalSink for SignalChannel {
    async fn send(&self, msg: SignalMessage) -> Result<(), ChannelError> {
        SignalChannel::send(self, &msg)
    }
}
