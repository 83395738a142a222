use crate::utils::init_tracing;
use futures::{SinkExt, Stream, StreamExt};
use huddle_server::{RoomRegistry, router};
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

async fn spawn_relay() -> String {
    let registry = RoomRegistry::new();
    let app = router(registry);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("ws://{addr}")
}

async fn next_text<S>(stream: &mut S, ms: u64) -> Option<String>
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    match tokio::time::timeout(Duration::from_millis(ms), stream.next()).await {
        Ok(Some(Ok(Message::Text(text)))) => Some(text),
        _ => None,
    }
}

#[tokio::test]
async fn test_offer_answer_flow_over_live_relay() {
    init_tracing();

    let base = spawn_relay().await;

    let (mut host, _) = connect_async(format!("{base}/rooms/rH/rH")).await.unwrap();
    let (mut guest, _) = connect_async(format!("{base}/rooms/rH/rG")).await.unwrap();
    let (mut outsider, _) = connect_async(format!("{base}/rooms/rX/rX")).await.unwrap();

    // Joins are processed asynchronously after the upgrade completes.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let offer = r#"{"offer":{"type":"offer","sdp":"v=0 host"}}"#;
    host.send(Message::Text(offer.to_string())).await.unwrap();

    assert_eq!(next_text(&mut guest, 2000).await.as_deref(), Some(offer));
    assert_eq!(next_text(&mut outsider, 300).await, None);

    let answer = r#"{"answer":{"type":"answer","sdp":"v=0 guest"}}"#;
    guest.send(Message::Text(answer.to_string())).await.unwrap();

    assert_eq!(next_text(&mut host, 2000).await.as_deref(), Some(answer));

    let candidate = r#"{"candidate":{"candidate":"candidate:1 1 udp 1 192.0.2.1 1 typ host"}}"#;
    host.send(Message::Text(candidate.to_string())).await.unwrap();
    assert_eq!(next_text(&mut guest, 2000).await.as_deref(), Some(candidate));
}

#[tokio::test]
async fn test_disconnect_is_observed_as_silence() {
    init_tracing();

    let base = spawn_relay().await;

    let (mut host, _) = connect_async(format!("{base}/rooms/rD/rD")).await.unwrap();
    let (mut guest, _) = connect_async(format!("{base}/rooms/rD/rG")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    guest.close(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Host's frames now fan out to nobody: no error, no echo.
    host.send(Message::Text("{\"offer\":{}}".to_string()))
        .await
        .unwrap();
    assert_eq!(next_text(&mut host, 300).await, None);
}
