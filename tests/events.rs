//! Event-loop state transitions, driven without a terminal or a server:
//! `handle_api` is fed the events the worker threads would send.

use std::fs;

use wikiquiz::api::ApiEvent;
use wikiquiz::model::{HistoryEntry, Quiz};
use wikiquiz::state::{AppState, Dialog, Overlay};
use wikiquiz::tui::handle_api;

fn fixture_quiz() -> Quiz {
    let content = fs::read_to_string("fixtures/quiz.json").expect("Cannot read fixture");
    serde_json::from_str(&content).unwrap()
}

fn rows(ids: &[i64]) -> Vec<HistoryEntry> {
    ids.iter()
        .map(|id| {
            serde_json::from_value(serde_json::json!({
                "id": id,
                "url": format!("https://en.wikipedia.org/wiki/Article_{}", id),
                "title": format!("Article {}", id),
                "date_generated": "2025-03-01T14:30:00"
            }))
            .unwrap()
        })
        .collect()
}

#[test]
fn history_reload_replaces_rows() {
    let mut state = AppState::new(None);

    let generation = state.next_history_generation();
    state.history_loading = true;
    handle_api(
        ApiEvent::History {
            generation,
            result: Ok(rows(&[1, 2, 3])),
        },
        &mut state,
    );
    assert_eq!(state.history_rows.len(), 3);
    assert!(!state.history_loading);

    // A second successful fetch leaves only the second set
    let generation = state.next_history_generation();
    state.history_loading = true;
    handle_api(
        ApiEvent::History {
            generation,
            result: Ok(rows(&[9, 10])),
        },
        &mut state,
    );
    assert_eq!(state.history_rows.len(), 2);
    assert_eq!(state.history_rows[0].id, 9);
    assert_eq!(state.history_rows[1].id, 10);
}

#[test]
fn stale_history_response_is_discarded() {
    let mut state = AppState::new(None);

    let stale = state.next_history_generation();
    // Reload fired before the first fetch resolved
    let current = state.next_history_generation();
    state.history_loading = true;

    handle_api(
        ApiEvent::History {
            generation: stale,
            result: Ok(rows(&[1, 2, 3])),
        },
        &mut state,
    );
    // The superseded response changed nothing
    assert!(state.history_rows.is_empty());
    assert!(state.history_loading);

    handle_api(
        ApiEvent::History {
            generation: current,
            result: Ok(rows(&[4])),
        },
        &mut state,
    );
    assert_eq!(state.history_rows.len(), 1);
    assert_eq!(state.history_rows[0].id, 4);
    assert!(!state.history_loading);
}

#[test]
fn failed_reload_keeps_previous_rows() {
    let mut state = AppState::new(None);

    let generation = state.next_history_generation();
    handle_api(
        ApiEvent::History {
            generation,
            result: Ok(rows(&[1, 2])),
        },
        &mut state,
    );

    let generation = state.next_history_generation();
    state.history_loading = true;
    handle_api(
        ApiEvent::History {
            generation,
            result: Err("Failed to fetch history".to_string()),
        },
        &mut state,
    );

    assert_eq!(state.history_rows.len(), 2);
    assert_eq!(
        state.history_error.as_deref(),
        Some("Failed to fetch history")
    );
    assert!(!state.history_loading);
}

#[test]
fn detail_success_seeds_fresh_session() {
    let mut state = AppState::new(None);
    let generation = state.next_detail_generation();
    state.overlay = Some(Overlay::Loading { id: 42 });

    handle_api(
        ApiEvent::Detail {
            generation,
            result: Ok(fixture_quiz()),
        },
        &mut state,
    );

    match &state.overlay {
        Some(Overlay::Detail(take)) => {
            assert_eq!(take.quiz.id, Some(42));
            assert!(!take.session.submitted());
            assert_eq!(take.session.answered_count(), 0);
            assert_eq!(take.cursor, 0);
        }
        _ => panic!("Expected detail overlay"),
    }
}

#[test]
fn detail_failure_notifies_and_dismisses_overlay() {
    let mut state = AppState::new(None);
    let generation = state.next_detail_generation();
    state.overlay = Some(Overlay::Loading { id: 42 });

    handle_api(
        ApiEvent::Detail {
            generation,
            result: Err("Quiz not found".to_string()),
        },
        &mut state,
    );

    assert!(state.overlay.is_none());
    assert_eq!(
        state.top_dialog(),
        Some(&Dialog::Error("Quiz not found".to_string()))
    );
}

#[test]
fn closing_overlay_orphans_inflight_detail() {
    let mut state = AppState::new(None);
    let generation = state.next_detail_generation();
    state.overlay = Some(Overlay::Loading { id: 42 });

    // User closes the overlay before the fetch lands
    state.close_overlay();

    handle_api(
        ApiEvent::Detail {
            generation,
            result: Ok(fixture_quiz()),
        },
        &mut state,
    );
    assert!(state.overlay.is_none());
    assert!(!state.has_dialog());
}

#[test]
fn preview_failure_is_silent_and_does_not_block_generation() {
    let mut state = AppState::new(None);

    let generation = state.next_preview_generation();
    state.preview_loading = true;
    handle_api(
        ApiEvent::Preview {
            generation,
            result: Err("No preview available".to_string()),
        },
        &mut state,
    );
    // Downgraded to "no preview": no error anywhere
    assert!(state.preview.is_none());
    assert!(!state.preview_loading);
    assert!(state.input_error.is_none());

    // A generate afterwards still yields a fully usable quiz
    state.generating = true;
    handle_api(
        ApiEvent::Generated {
            result: Ok(fixture_quiz()),
        },
        &mut state,
    );
    assert!(!state.generating);
    let take = state.generated.as_ref().unwrap();
    assert_eq!(take.quiz.questions.len(), 4);
    assert!(!take.session.submitted());
}

#[test]
fn stale_preview_is_discarded() {
    let mut state = AppState::new(None);

    let stale = state.next_preview_generation();
    let _current = state.next_preview_generation();
    state.preview_loading = true;

    handle_api(
        ApiEvent::Preview {
            generation: stale,
            result: Ok(serde_json::from_value(
                serde_json::json!({"title": "Old article"}),
            )
            .unwrap()),
        },
        &mut state,
    );
    assert!(state.preview.is_none());
    assert!(state.preview_loading);
}

#[test]
fn generate_failure_surfaces_message() {
    let mut state = AppState::new(None);
    state.generating = true;

    handle_api(
        ApiEvent::Generated {
            result: Err("Article too short to generate a quiz".to_string()),
        },
        &mut state,
    );

    assert!(!state.generating);
    assert!(state.generated.is_none());
    assert_eq!(
        state.input_error.as_deref(),
        Some("Article too short to generate a quiz")
    );
}

#[test]
fn full_take_flow_over_fixture_quiz() {
    let mut state = AppState::new(None);
    state.generating = true;
    handle_api(
        ApiEvent::Generated {
            result: Ok(fixture_quiz()),
        },
        &mut state,
    );

    let take = state.generated.as_mut().unwrap();
    let first_answer = take.quiz.questions[0].answer.clone();
    let wrong = take.quiz.questions[1].options[0].clone();

    take.session.select_option(0, &first_answer);
    take.session.select_option(1, &wrong);
    take.session.submit();

    assert_eq!(take.session.score(&take.quiz), 1);

    take.session.retake();
    assert!(!take.session.submitted());
    assert_eq!(take.session.answered_count(), 0);
}
