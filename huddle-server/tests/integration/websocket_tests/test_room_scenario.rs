use huddle_core::{ClientMessage, ServerMessage};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, spawn_server};

#[tokio::test]
async fn test_three_clients_over_websocket() {
    init_tracing();
    let (addr, _router) = spawn_server().await.expect("server failed to start");

    let mut a = TestClient::connect(addr).await.expect("client A");
    let mut b = TestClient::connect(addr).await.expect("client B");
    let mut c = TestClient::connect(addr).await.expect("client C");

    a.join("demo").await.unwrap();
    assert_eq!(a.recv().await.unwrap(), ServerMessage::ExistingUsers(vec![]));

    b.join("demo").await.unwrap();
    assert_eq!(b.recv().await.unwrap(), ServerMessage::ExistingUsers(vec![a.id]));
    assert_eq!(a.recv().await.unwrap(), ServerMessage::UserConnected(b.id));

    c.join("demo").await.unwrap();
    assert_eq!(
        c.recv().await.unwrap(),
        ServerMessage::ExistingUsers(vec![a.id, b.id])
    );
    assert_eq!(a.recv().await.unwrap(), ServerMessage::UserConnected(c.id));
    assert_eq!(b.recv().await.unwrap(), ServerMessage::UserConnected(c.id));

    // The newcomer initiates negotiation with each existing member.
    let offer = json!({ "type": "offer", "sdp": "v=0\r\n" });
    c.send(&ClientMessage::Offer {
        offer: offer.clone(),
        to: a.id,
        room_id: None,
    })
    .await
    .unwrap();
    assert_eq!(
        a.recv().await.unwrap(),
        ServerMessage::Offer { offer, from: c.id }
    );

    let b_id = b.id;
    b.close().await.unwrap();
    assert_eq!(a.recv().await.unwrap(), ServerMessage::UserDisconnected(b_id));
    assert_eq!(c.recv().await.unwrap(), ServerMessage::UserDisconnected(b_id));

    a.send(&ClientMessage::ChatMessage {
        text: "hi".into(),
        room_id: Some("demo".into()),
    })
    .await
    .unwrap();
    assert_eq!(
        c.recv().await.unwrap(),
        ServerMessage::ChatMessage {
            text: "hi".into(),
            sender_id: a.id,
        }
    );
    assert!(a.is_silent().await);
    assert!(c.is_silent().await);
}

#[tokio::test]
async fn test_reconnect_gets_new_id() {
    init_tracing();
    let (addr, _router) = spawn_server().await.unwrap();

    let first = TestClient::connect(addr).await.unwrap();
    let first_id = first.id;
    first.close().await.unwrap();

    let second = TestClient::connect(addr).await.unwrap();
    assert_ne!(second.id, first_id);
}
