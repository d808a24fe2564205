use huddle_core::{ClientMessage, ConnectionId, RoomId, ServerMessage};
use serde_json::json;

use crate::integration::{create_test_router, init_tracing};
use crate::utils::FakePeer;

#[test]
fn test_offer_answer_candidate_reach_target_only() {
    init_tracing();
    let mut router = create_test_router();

    let mut a = FakePeer::connect(&mut router);
    let mut b = FakePeer::connect(&mut router);
    let mut c = FakePeer::connect(&mut router);
    for peer in [&a, &b, &c] {
        peer.join(&mut router, "demo");
    }
    a.drain();
    b.drain();
    c.drain();

    let offer = json!({ "type": "offer", "sdp": "v=0\r\no=- 1 1 IN IP4 0.0.0.0\r\n" });
    c.send(
        &mut router,
        ClientMessage::Offer {
            offer: offer.clone(),
            to: a.id,
            room_id: Some(RoomId::from("demo")),
        },
    );

    let answer = json!({ "type": "answer", "sdp": "v=0\r\n" });
    a.send(
        &mut router,
        ClientMessage::Answer {
            answer: answer.clone(),
            to: c.id,
            room_id: None,
        },
    );

    let candidate = json!({ "candidate": "candidate:1 1 udp 2122260223 10.0.0.2 50000 typ host", "sdpMid": "0" });
    a.send(
        &mut router,
        ClientMessage::IceCandidate {
            candidate: candidate.clone(),
            to: c.id,
            room_id: None,
        },
    );

    assert_eq!(a.drain(), vec![ServerMessage::Offer { offer, from: c.id }]);
    assert_eq!(
        c.drain(),
        vec![
            ServerMessage::Answer { answer, from: a.id },
            ServerMessage::IceCandidate {
                candidate,
                from: a.id
            },
        ]
    );
    assert!(b.drain().is_empty());
}

#[test]
fn test_relay_preserves_sender_order() {
    init_tracing();
    let mut router = create_test_router();

    let a = FakePeer::connect(&mut router);
    let mut b = FakePeer::connect(&mut router);

    for n in 0..20 {
        a.send(
            &mut router,
            ClientMessage::IceCandidate {
                candidate: json!({ "candidate": format!("candidate:{n}") }),
                to: b.id,
                room_id: None,
            },
        );
    }

    let received: Vec<_> = b
        .drain()
        .into_iter()
        .map(|msg| match msg {
            ServerMessage::IceCandidate { candidate, from } => {
                assert_eq!(from, a.id);
                candidate["candidate"].as_str().unwrap().to_owned()
            }
            other => panic!("unexpected message {:?}", other),
        })
        .collect();
    let expected: Vec<_> = (0..20).map(|n| format!("candidate:{n}")).collect();
    assert_eq!(received, expected);
}

#[test]
fn test_relay_to_unknown_target_is_silent() {
    init_tracing();
    let mut router = create_test_router();

    let mut a = FakePeer::connect(&mut router);
    let gone = FakePeer::connect(&mut router);
    gone.disconnect(&mut router);

    for to in [ConnectionId::new(), gone.id] {
        a.send(
            &mut router,
            ClientMessage::Offer {
                offer: json!({ "type": "offer" }),
                to,
                room_id: None,
            },
        );
    }

    assert!(a.drain().is_empty());
    assert_eq!(router.stats().connections, 1);
}
