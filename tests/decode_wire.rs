use std::fs;

use wikiquiz::model::{HistoryEntry, Quiz};

#[test]
fn test_decode_quiz() {
    let content = fs::read_to_string("fixtures/quiz.json").expect("Cannot read fixture");
    let quiz: Quiz = serde_json::from_str(&content).unwrap();

    assert_eq!(quiz.id, Some(42));
    assert_eq!(quiz.url, "https://en.wikipedia.org/wiki/Alan_Turing");
    assert_eq!(quiz.display_title(), "Alan Turing");
    assert_eq!(quiz.sections.len(), 7);
    assert_eq!(quiz.related_topics.len(), 6);

    // The service names the question array "quiz" and the prompt "question"
    assert_eq!(quiz.questions.len(), 4);
    let q1 = &quiz.questions[0];
    assert_eq!(
        q1.text,
        "In which field is Alan Turing considered a founding figure?"
    );
    assert_eq!(q1.options.len(), 4);
    assert_eq!(q1.answer, "Theoretical computer science");
    assert_eq!(q1.difficulty, "easy");
    assert!(q1.explanation.is_some());

    // Explanation is optional per question
    assert!(quiz.questions[2].explanation.is_none());
}

#[test]
fn test_decode_minimal_quiz() {
    let quiz: Quiz = serde_json::from_str(
        r#"{"url": "https://en.wikipedia.org/wiki/Stub", "quiz": []}"#,
    )
    .unwrap();

    assert_eq!(quiz.id, None);
    assert_eq!(quiz.title, None);
    assert_eq!(quiz.summary, None);
    assert!(quiz.sections.is_empty());
    assert!(quiz.related_topics.is_empty());
    assert!(quiz.questions.is_empty());

    // Header falls back to the source URL
    assert_eq!(quiz.display_title(), "https://en.wikipedia.org/wiki/Stub");
}

#[test]
fn test_decode_history() {
    let content = fs::read_to_string("fixtures/history.json").expect("Cannot read fixture");
    let rows: Vec<HistoryEntry> = serde_json::from_str(&content).unwrap();

    // Server order is kept, not re-sorted
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].id, 7);
    assert_eq!(rows[1].id, 3);
    assert_eq!(rows[2].id, 11);

    assert_eq!(rows[0].title.as_deref(), Some("Alan Turing"));
    assert_eq!(rows[1].title, None);
    assert_eq!(rows[2].date_generated, None);
    assert_eq!(
        rows[1].date_generated.as_deref(),
        Some("2025-02-27 09:15:42.123456")
    );
}
