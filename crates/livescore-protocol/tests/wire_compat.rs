// Verify wire format matches what existing scoreboard viewers expect.
// These tests ensure payload compatibility is never broken.

use livescore_core::types::{Match, SimulationState};
use livescore_protocol::frames::{ControlReply, ScoreUpdate, StatusReply};

fn roster() -> Vec<Match> {
    vec![
        Match::new("Germany", "Poland"),
        Match::new("Brazil", "Mexico"),
        Match::new("Argentina", "Uruguay"),
    ]
}

#[test]
fn score_update_shape() {
    let mut matches = roster();
    matches[1].home.goals = 2;
    let update = ScoreUpdate::new(SimulationState::InProgress, &matches);
    let json = serde_json::to_value(&update).unwrap();

    assert_eq!(json["appState"], "IN_PROGRESS");
    assert_eq!(json["matches"].as_array().unwrap().len(), 3);
    assert_eq!(json["matches"][1]["home"]["teamName"], "Brazil");
    assert_eq!(json["matches"][1]["home"]["goals"], 2);
    assert_eq!(json["matches"][2]["away"]["teamName"], "Uruguay");
}

#[test]
fn finished_update_is_tagged_finished() {
    let matches = roster();
    let json = serde_json::to_string(&ScoreUpdate::finished(&matches)).unwrap();
    assert!(json.starts_with(r#"{"appState":"FINISHED","matches":["#));
}

#[test]
fn score_update_parses_from_viewer_json() {
    let json = r#"{"appState":"PRISTINE","matches":[
        {"home":{"teamName":"Germany","goals":1},"away":{"teamName":"Poland","goals":0}}
    ]}"#;
    let update: ScoreUpdate = serde_json::from_str(json).unwrap();
    assert_eq!(update.app_state, SimulationState::Pristine);
    assert_eq!(update.matches[0].home.goals, 1);
    assert_eq!(update.matches[0].away.name, "Poland");
}

#[test]
fn status_reply_shape() {
    let json = serde_json::to_string(&StatusReply { clients: 3 }).unwrap();
    assert_eq!(json, r#"{"clients":3}"#);
}

#[test]
fn control_reply_shape() {
    let json = serde_json::to_string(&ControlReply {
        status: SimulationState::InProgress,
    })
    .unwrap();
    assert_eq!(json, r#"{"status":"IN_PROGRESS"}"#);
}

#[test]
fn roster_snapshot_is_a_bare_array() {
    let json = serde_json::to_string(&roster()).unwrap();
    assert!(json.starts_with(r#"[{"home":{"teamName":"Germany","goals":0},"away":{"teamName":"Poland","goals":0}}"#));
}
