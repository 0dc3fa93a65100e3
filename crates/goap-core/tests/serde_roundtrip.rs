#![cfg(feature = "serde")]

use goap_core::{AiVar, WorldState};

#[test]
fn world_state_serde_roundtrip() {
    let s = WorldState::with(AiVar::named("IsNear"), true).and(AiVar::named("Mode"), 3u8);
    let json = serde_json::to_string(&s).expect("serialize");
    let back: WorldState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(s, back);
}
