use cucumber::{given, then, when};
use huddle_core::{ClientMessage, Payload, RelayEvent, RoomName};
use huddle_relay::{Delivery, ErrorKind};
use huddle_tests::RelayWorld;
use serde_json::json;

fn room(name: &str) -> RoomName {
    RoomName::new(name).expect("valid room name")
}

async fn connect_and_join(world: &mut RelayWorld, name: &str, room_name: &str) {
    world.connect(name).await;
    world.send(name, ClientMessage::join(room(room_name))).await;
    assert!(matches!(world.last_delivery, Some(Ok(Delivery::Handled))));
}

/// Forget everything received so far
fn settle(world: &mut RelayWorld) {
    for participant in world.participants.values_mut() {
        participant.drain();
        participant.received.clear();
    }
}

// ===== Given Steps =====

#[given("a running relay")]
async fn running_relay(world: &mut RelayWorld) {
    *world = RelayWorld::new();
}

#[given(expr = "{string} is connected")]
async fn is_connected(world: &mut RelayWorld, name: String) {
    world.connect(&name).await;
}

#[given(expr = "{string} is in room {string}")]
async fn is_in_room(world: &mut RelayWorld, name: String, room_name: String) {
    connect_and_join(world, &name, &room_name).await;
    settle(world);
}

#[given(expr = "{string} and {string} are in room {string}")]
async fn both_in_room(world: &mut RelayWorld, first: String, second: String, room_name: String) {
    connect_and_join(world, &first, &room_name).await;
    connect_and_join(world, &second, &room_name).await;
    settle(world);
}

// ===== When Steps =====

#[when(expr = "{string} sends an offer to room {string}")]
async fn sends_offer(world: &mut RelayWorld, name: String, room_name: String) {
    let offer = Payload::from(json!({"type": "offer", "sdp": "v=0"}));
    world
        .send(&name, ClientMessage::offer(room(&room_name), offer))
        .await;
}

#[when(expr = "{string} sends a candidate to room {string}")]
async fn sends_candidate(world: &mut RelayWorld, name: String, room_name: String) {
    let candidate = Payload::from(json!({"candidate": "candidate:1 1 udp 1 127.0.0.1 9 typ host"}));
    world
        .send(&name, ClientMessage::candidate(room(&room_name), candidate))
        .await;
}

#[when(expr = "{string} disconnects")]
async fn disconnects(world: &mut RelayWorld, name: String) {
    world
        .participant(&name)
        .handler
        .disconnect()
        .await
        .expect("disconnect failed");
}

// ===== Then Steps =====

#[then(expr = "{string} receives {int} offer(s) from {string}")]
async fn receives_offers(world: &mut RelayWorld, name: String, count: usize, sender: String) {
    let sender_id = world.participant(&sender).id;
    let offers = world
        .participant(&name)
        .drain()
        .iter()
        .filter(|e| matches!(e, RelayEvent::Offer { from, .. } if *from == sender_id))
        .count();
    assert_eq!(offers, count);
}

#[then(expr = "{string} receives {int} candidate(s) from {string}")]
async fn receives_candidates(world: &mut RelayWorld, name: String, count: usize, sender: String) {
    let sender_id = world.participant(&sender).id;
    let candidates = world
        .participant(&name)
        .drain()
        .iter()
        .filter(|e| matches!(e, RelayEvent::Candidate { from, .. } if *from == sender_id))
        .count();
    assert_eq!(candidates, count);
}

#[then(expr = "{string} receives nothing")]
async fn receives_nothing(world: &mut RelayWorld, name: String) {
    let received = world.participant(&name).drain();
    assert!(received.is_empty(), "unexpected events: {:?}", received);
}

#[then("the message is dropped without error")]
async fn dropped_without_error(world: &mut RelayWorld) {
    assert!(matches!(world.last_delivery, Some(Ok(Delivery::NoPeers))));
}

#[then("the message fails as a routing miss")]
async fn routing_miss(world: &mut RelayWorld) {
    match &world.last_delivery {
        Some(Err(e)) => assert_eq!(e.kind(), ErrorKind::RoutingMiss),
        other => panic!("expected routing miss, got {:?}", other),
    }
}

#[then(expr = "{string} is told that {string} left")]
async fn told_peer_left(world: &mut RelayWorld, name: String, leaver: String) {
    let leaver_id = world.participant(&leaver).id;
    let received = world.participant(&name).drain();
    assert!(received.iter().any(
        |e| matches!(e, RelayEvent::PeerLeft { participant_id, .. } if *participant_id == leaver_id)
    ));
}

#[then(expr = "a candidate from {string} to room {string} is dropped quietly")]
async fn later_candidate_dropped(world: &mut RelayWorld, name: String, room_name: String) {
    sends_candidate(world, name, room_name).await;
    dropped_without_error(world).await;
}
