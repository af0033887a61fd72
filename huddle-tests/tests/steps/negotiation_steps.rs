use cucumber::{given, then, when};
use huddle_core::{
    ClientMessage, IceCandidate, ParticipantId, Payload, RelayEvent, RoomName, RoomPhase,
    SessionDescription,
};
use huddle_negotiator::Role;
use huddle_tests::RelayWorld;

fn room(name: &str) -> RoomName {
    RoomName::new(name).expect("valid room name")
}

async fn relay_event(world: &mut RelayWorld, event: RelayEvent) {
    world
        .negotiator()
        .handle_relay_event(event)
        .await
        .expect("negotiator rejected event");
}

async fn start_endpoint(world: &mut RelayWorld, role: Role, room_name: &str) {
    world.start_negotiator(room(room_name), role);
    world.negotiator().start().await.expect("start failed");
    world.sent_signals();
}

// ===== Given Steps =====

#[given(expr = "an initiator endpoint for room {string}")]
async fn initiator_endpoint(world: &mut RelayWorld, room_name: String) {
    start_endpoint(world, Role::Initiator, &room_name).await;
}

#[given(expr = "a responder endpoint for room {string}")]
async fn responder_endpoint(world: &mut RelayWorld, room_name: String) {
    start_endpoint(world, Role::Responder, &room_name).await;
}

#[given("the endpoint is told it joined with one peer")]
async fn given_joined_with_peer(world: &mut RelayWorld) {
    joined_with_peer(world).await;
}

#[given("the peer sends an offer")]
async fn given_peer_sends_offer(world: &mut RelayWorld) {
    peer_sends_offer(world).await;
}

// ===== When Steps =====

#[when("the endpoint is told it joined with one peer")]
async fn joined_with_peer(world: &mut RelayWorld) {
    world.remote_peer = ParticipantId::new_v4();
    let room = world.negotiator().config().room.clone();
    let event = RelayEvent::Joined {
        room,
        participant_id: ParticipantId::new_v4(),
        peers: vec![world.remote_peer],
        phase: RoomPhase::Connected,
    };
    relay_event(world, event).await;
}

#[when(expr = "the peer sends candidate {string}")]
async fn peer_sends_candidate(world: &mut RelayWorld, candidate: String) {
    let room = world.negotiator().config().room.clone();
    let event = RelayEvent::Candidate {
        candidate: Payload::encode(&IceCandidate::new(candidate)).unwrap(),
        room,
        from: world.remote_peer,
    };
    relay_event(world, event).await;
}

#[when("the peer sends an offer")]
async fn peer_sends_offer(world: &mut RelayWorld) {
    let room = world.negotiator().config().room.clone();
    let event = RelayEvent::Offer {
        offer: Payload::encode(&SessionDescription::offer("v=0 peer")).unwrap(),
        room,
        from: world.remote_peer,
    };
    relay_event(world, event).await;
}

#[when("the peer leaves")]
async fn peer_leaves(world: &mut RelayWorld) {
    let room = world.negotiator().config().room.clone();
    let event = RelayEvent::PeerLeft {
        room,
        participant_id: world.remote_peer,
        phase: RoomPhase::WaitingForPeer,
    };
    relay_event(world, event).await;
}

// ===== Then Steps =====

#[then("the endpoint sends an offer to that peer")]
async fn sends_offer(world: &mut RelayWorld) {
    let peer = world.remote_peer;
    let sent = world.sent_signals();
    assert!(
        sent.iter()
            .any(|m| matches!(m, ClientMessage::Offer { to: Some(p), .. } if *p == peer)),
        "no offer in {:?}",
        sent
    );
}

#[then("the endpoint sends an answer to that peer")]
async fn sends_answer(world: &mut RelayWorld) {
    let peer = world.remote_peer;
    let sent = world.sent_signals();
    assert!(
        sent.iter()
            .any(|m| matches!(m, ClientMessage::Answer { to: Some(p), .. } if *p == peer)),
        "no answer in {:?}",
        sent
    );
}

#[then(expr = "the endpoint state is {string}")]
async fn endpoint_state(world: &mut RelayWorld, state: String) {
    assert_eq!(world.negotiator().state().to_string(), state);
}

#[then(expr = "the media engine applied the remote offer before candidates {string} and {string}")]
async fn offer_before_candidates(world: &mut RelayWorld, first: String, second: String) {
    let log = world.media.log();
    let position = |entry: &str| {
        log.iter()
            .position(|e| e == entry)
            .unwrap_or_else(|| panic!("{} missing from {:?}", entry, log))
    };
    let offer = position("set-remote:Offer");
    let first = position(&format!("candidate:{}", first));
    let second = position(&format!("candidate:{}", second));
    assert!(offer < first && first < second, "unexpected order {:?}", log);
}

#[then("the media engine was reset")]
async fn media_reset(world: &mut RelayWorld) {
    assert!(world.media.log().iter().any(|e| e == "reset"));
}
