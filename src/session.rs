use crate::model::Quiz;

/// How one option of one question should render.
///
/// Precedence is fixed: a correct option renders Correct even when it is
/// also the user's selection; Wrong applies only to a selected non-answer;
/// Selected exists only before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Wrong,
    Selected,
    Neutral,
}

/// Answer state for one displayed quiz: Answering until `submit`, then
/// frozen until `retake`. Owned by whichever view shows the quiz and thrown
/// away with it; nothing here ever goes back to the service.
#[derive(Debug, Clone)]
pub struct TakeSession {
    answers: Vec<Option<String>>,
    submitted: bool,
}

impl TakeSession {
    pub fn new(question_count: usize) -> Self {
        Self {
            answers: vec![None; question_count],
            submitted: false,
        }
    }

    pub fn for_quiz(quiz: &Quiz) -> Self {
        Self::new(quiz.questions.len())
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn selected(&self, question: usize) -> Option<&str> {
        self.answers.get(question).and_then(|a| a.as_deref())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Record a selection. Last write wins; no-op once submitted or when the
    /// index is out of range.
    pub fn select_option(&mut self, question: usize, option: &str) {
        if self.submitted {
            return;
        }
        if let Some(slot) = self.answers.get_mut(question) {
            *slot = Some(option.to_string());
        }
    }

    /// Freeze the answers. Always permitted; unanswered questions simply
    /// count as incorrect.
    pub fn submit(&mut self) {
        self.submitted = true;
    }

    /// Clear every answer and return to Answering. No-op before submission.
    pub fn retake(&mut self) {
        if !self.submitted {
            return;
        }
        for slot in &mut self.answers {
            *slot = None;
        }
        self.submitted = false;
    }

    /// Correct answers so far, by exact string equality against each
    /// question's `answer`. Meaningful once submitted; 0 for an empty quiz.
    pub fn score(&self, quiz: &Quiz) -> usize {
        quiz.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.selected(*i) == Some(q.answer.as_str()))
            .count()
    }

    pub fn mark(&self, quiz: &Quiz, question: usize, option: &str) -> OptionMark {
        let is_selected = self.selected(question) == Some(option);
        if self.submitted {
            let answer = quiz.questions.get(question).map(|q| q.answer.as_str());
            if answer == Some(option) {
                OptionMark::Correct
            } else if is_selected {
                OptionMark::Wrong
            } else {
                OptionMark::Neutral
            }
        } else if is_selected {
            OptionMark::Selected
        } else {
            OptionMark::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, Quiz};

    fn quiz(answers: &[&str]) -> Quiz {
        Quiz {
            id: None,
            url: "https://en.wikipedia.org/wiki/Test".to_string(),
            title: None,
            summary: None,
            sections: vec![],
            related_topics: vec![],
            questions: answers
                .iter()
                .map(|a| Question {
                    text: format!("What is {}?", a),
                    options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    answer: a.to_string(),
                    difficulty: "easy".to_string(),
                    explanation: None,
                })
                .collect(),
        }
    }

    #[test]
    fn selection_is_last_write_wins() {
        let q = quiz(&["A", "B"]);
        let mut session = TakeSession::for_quiz(&q);
        session.select_option(0, "B");
        session.select_option(0, "C");
        assert_eq!(session.selected(0), Some("C"));

        // Repeating the same selection changes nothing.
        session.select_option(0, "C");
        assert_eq!(session.selected(0), Some("C"));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let q = quiz(&["A"]);
        let mut session = TakeSession::for_quiz(&q);
        session.select_option(5, "A");
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn submit_freezes_answers() {
        let q = quiz(&["A", "B"]);
        let mut session = TakeSession::for_quiz(&q);
        session.select_option(0, "A");
        session.submit();
        assert!(session.submitted());

        session.select_option(0, "D");
        session.select_option(1, "B");
        assert_eq!(session.selected(0), Some("A"));
        assert_eq!(session.selected(1), None);
    }

    #[test]
    fn retake_resets_everything() {
        let q = quiz(&["A", "B"]);
        let mut session = TakeSession::for_quiz(&q);

        // Not submitted yet: retake is a no-op.
        session.select_option(0, "A");
        session.retake();
        assert_eq!(session.selected(0), Some("A"));

        session.submit();
        session.retake();
        assert!(!session.submitted());
        assert_eq!(session.selected(0), None);
        assert_eq!(session.selected(1), None);
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn score_counts_exact_matches() {
        let q = quiz(&["A", "B"]);
        let mut session = TakeSession::for_quiz(&q);
        session.select_option(0, "A");
        session.select_option(1, "C");
        session.submit();
        assert_eq!(session.score(&q), 1);
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let q = quiz(&["A", "B", "C"]);
        let mut session = TakeSession::for_quiz(&q);
        session.submit();
        assert_eq!(session.score(&q), 0);
    }

    #[test]
    fn empty_quiz_scores_zero_of_zero() {
        let q = quiz(&[]);
        let mut session = TakeSession::for_quiz(&q);
        session.submit();
        assert_eq!(session.score(&q), 0);
        assert_eq!(q.questions.len(), 0);
    }

    #[test]
    fn mark_precedence_after_submit() {
        let q = quiz(&["A"]);
        let mut session = TakeSession::for_quiz(&q);
        session.select_option(0, "A");
        session.submit();

        // Selected-and-correct renders Correct, never Wrong or Selected.
        assert_eq!(session.mark(&q, 0, "A"), OptionMark::Correct);
        assert_eq!(session.mark(&q, 0, "B"), OptionMark::Neutral);

        session.retake();
        session.select_option(0, "B");
        session.submit();
        assert_eq!(session.mark(&q, 0, "A"), OptionMark::Correct);
        assert_eq!(session.mark(&q, 0, "B"), OptionMark::Wrong);
        assert_eq!(session.mark(&q, 0, "C"), OptionMark::Neutral);
    }

    #[test]
    fn mark_before_submit() {
        let q = quiz(&["A"]);
        let mut session = TakeSession::for_quiz(&q);
        session.select_option(0, "B");
        assert_eq!(session.mark(&q, 0, "B"), OptionMark::Selected);
        assert_eq!(session.mark(&q, 0, "A"), OptionMark::Neutral);
    }
}
