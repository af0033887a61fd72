use cucumber::{given, then, when};
use huddle_core::{RoomName, RoomRegistry};
use huddle_tests::RelayWorld;

fn room(name: &str) -> RoomName {
    RoomName::new(name).expect("valid room name")
}

// ===== Given Steps =====

#[given("an empty room registry")]
async fn empty_registry(world: &mut RelayWorld) {
    world.registry = RoomRegistry::new();
    world.registry_ids.clear();
}

// ===== When Steps =====

#[when(expr = "{string} joins room {string}")]
async fn joins_room(world: &mut RelayWorld, name: String, room_name: String) {
    let id = world.registry_id(&name);
    world.registry.join(room(&room_name), id);
}

#[when(expr = "{string} leaves")]
async fn leaves(world: &mut RelayWorld, name: String) {
    let id = world.registry_id(&name);
    world.registry.leave(id);
}

// ===== Then Steps =====

#[then(expr = "the peers of {string} in room {string} are {string}")]
async fn peers_are(world: &mut RelayWorld, name: String, room_name: String, peer: String) {
    let id = world.registry_id(&name);
    let peer_id = world.registry_id(&peer);
    assert_eq!(world.registry.peers_of(&room(&room_name), id), vec![peer_id]);
}

#[then(expr = "{string} has no peers in room {string}")]
async fn has_no_peers(world: &mut RelayWorld, name: String, room_name: String) {
    let id = world.registry_id(&name);
    assert!(world.registry.peers_of(&room(&room_name), id).is_empty());
}

#[then(expr = "room {string} is in phase {string}")]
async fn room_phase(world: &mut RelayWorld, room_name: String, phase: String) {
    let actual = serde_json::to_value(world.registry.phase(&room(&room_name))).unwrap();
    assert_eq!(actual, serde_json::Value::String(phase));
}

#[then(expr = "{string} is in room {string}")]
async fn is_in_room(world: &mut RelayWorld, name: String, room_name: String) {
    let id = world.registry_id(&name);
    assert_eq!(world.registry.room_of(id), Some(&room(&room_name)));
}

#[then(expr = "the registry has {int} room(s)")]
async fn room_count(world: &mut RelayWorld, count: usize) {
    assert_eq!(world.registry.room_count(), count);
}
