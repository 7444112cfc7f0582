// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::backend::Question;

/// One generated quiz and the user's selections. `None` is the unanswered
/// sentinel; unanswered questions grade as incorrect.
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self { questions, answers }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    /// Select (or change) the answer to a question. Out-of-range questions
    /// and options are ignored.
    pub fn select(&mut self, question: usize, choice: usize) {
        if let Some(q) = self.questions.get(question) {
            if choice < q.options.len() {
                self.answers[question] = Some(choice);
            }
        }
    }

    fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| **answer == Some(question.correct_answer))
            .count()
    }

    fn percentage(&self) -> u64 {
        // A quiz with no questions scores zero rather than dividing by zero.
        if self.questions.is_empty() {
            return 0;
        }
        ((self.correct_count() as f64 / self.questions.len() as f64) * 100.0).round() as u64
    }
}

/// A graded quiz. Immutable until the next generation replaces it.
pub struct QuizReview {
    pub session: QuizSession,
    pub correct: usize,
    pub percentage: u64,
}

pub enum QuizState {
    Idle,
    Ready(QuizSession),
    Submitted(QuizReview),
}

/// The quiz panel's state machine: Idle, generating (the loading flag),
/// Ready with a live session, Submitted with a graded one.
pub struct QuizPanel {
    epoch: u64,
    loading: bool,
    state: QuizState,
}

impl Default for QuizPanel {
    fn default() -> Self {
        Self {
            epoch: 0,
            loading: false,
            state: QuizState::Idle,
        }
    }
}

impl QuizPanel {
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Start a new generation, clearing any previous results. Returns a
    /// token the completion must present, or `None` when a generation is
    /// already in flight (single-flight policy: the second request is
    /// rejected, not queued).
    pub fn begin_generation(&mut self) -> Option<u64> {
        if self.loading {
            return None;
        }
        self.epoch += 1;
        self.loading = true;
        self.state = QuizState::Idle;
        Some(self.epoch)
    }

    /// Complete a generation. `Some` questions move the panel to Ready,
    /// `None` (a failed call) returns it to Idle; either way the loading
    /// flag is released. A token from a superseded generation is dropped
    /// without touching the panel.
    pub fn finish_generation(&mut self, token: u64, questions: Option<Vec<Question>>) {
        if token != self.epoch {
            log::debug!("Dropping stale quiz generation (token {token}, epoch {})", self.epoch);
            return;
        }
        self.loading = false;
        self.state = match questions {
            Some(questions) => QuizState::Ready(QuizSession::new(questions)),
            None => QuizState::Idle,
        };
    }

    /// Select an answer on the live session. A no-op unless Ready.
    pub fn select_answer(&mut self, question: usize, choice: usize) {
        if let QuizState::Ready(session) = &mut self.state {
            session.select(question, choice);
        }
    }

    /// Grade the live session. Returns `(correct, percentage)` on the
    /// Ready -> Submitted transition, `None` if there is nothing to grade.
    pub fn submit(&mut self) -> Option<(usize, u64)> {
        match std::mem::replace(&mut self.state, QuizState::Idle) {
            QuizState::Ready(session) => {
                let correct = session.correct_count();
                let percentage = session.percentage();
                self.state = QuizState::Submitted(QuizReview {
                    session,
                    correct,
                    percentage,
                });
                Some((correct, percentage))
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_answer: usize) -> Question {
        Question {
            question: "Which one?".to_string(),
            options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_answer,
            explanation: "Because.".to_string(),
        }
    }

    fn ready_panel(questions: Vec<Question>) -> QuizPanel {
        let mut panel = QuizPanel::default();
        let token = panel.begin_generation().unwrap();
        panel.finish_generation(token, Some(questions));
        panel
    }

    #[test]
    fn test_scoring_counts_unanswered_as_incorrect() {
        let mut panel = ready_panel(vec![question(0), question(1), question(2)]);
        panel.select_answer(0, 0);
        panel.select_answer(1, 1);
        // Question 2 stays unanswered.
        let (correct, percentage) = panel.submit().unwrap();
        assert_eq!(correct, 2);
        assert_eq!(percentage, 67);
    }

    #[test]
    fn test_changing_an_answer_keeps_the_last_selection() {
        let mut panel = ready_panel(vec![question(2)]);
        panel.select_answer(0, 0);
        panel.select_answer(0, 2);
        let (correct, percentage) = panel.submit().unwrap();
        assert_eq!(correct, 1);
        assert_eq!(percentage, 100);
    }

    #[test]
    fn test_zero_question_quiz_scores_zero() {
        let mut panel = ready_panel(Vec::new());
        let (correct, percentage) = panel.submit().unwrap();
        assert_eq!(correct, 0);
        assert_eq!(percentage, 0);
    }

    #[test]
    fn test_out_of_range_selections_are_ignored() {
        let mut panel = ready_panel(vec![question(0)]);
        panel.select_answer(5, 0);
        panel.select_answer(0, 9);
        let (correct, _) = panel.submit().unwrap();
        assert_eq!(correct, 0);
    }

    #[test]
    fn test_submit_without_a_session_is_a_no_op() {
        let mut panel = QuizPanel::default();
        assert!(panel.submit().is_none());
        assert!(matches!(panel.state(), QuizState::Idle));
    }

    #[test]
    fn test_submitted_result_is_immutable() {
        let mut panel = ready_panel(vec![question(0)]);
        panel.submit().unwrap();
        panel.select_answer(0, 0);
        assert!(panel.submit().is_none());
        match panel.state() {
            QuizState::Submitted(review) => assert_eq!(review.correct, 0),
            _ => panic!("expected Submitted"),
        }
    }

    #[test]
    fn test_second_generation_is_rejected_while_loading() {
        let mut panel = QuizPanel::default();
        let token = panel.begin_generation();
        assert!(token.is_some());
        assert!(panel.begin_generation().is_none());
        panel.finish_generation(token.unwrap(), None);
        assert!(panel.begin_generation().is_some());
    }

    #[test]
    fn test_loading_flag_is_released_on_failure() {
        let mut panel = QuizPanel::default();
        let token = panel.begin_generation().unwrap();
        panel.finish_generation(token, None);
        assert!(!panel.loading());
        assert!(matches!(panel.state(), QuizState::Idle));
    }

    #[test]
    fn test_generation_clears_previous_results() {
        let mut panel = ready_panel(vec![question(0)]);
        panel.submit().unwrap();
        panel.begin_generation().unwrap();
        assert!(matches!(panel.state(), QuizState::Idle));
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut panel = QuizPanel::default();
        let stale = panel.begin_generation().unwrap();
        panel.finish_generation(stale, None);
        let current = panel.begin_generation().unwrap();
        // The stale token must not write questions into the new generation.
        panel.finish_generation(stale, Some(vec![question(0)]));
        assert!(panel.loading());
        assert!(matches!(panel.state(), QuizState::Idle));
        panel.finish_generation(current, Some(vec![question(1)]));
        assert!(!panel.loading());
        assert!(matches!(panel.state(), QuizState::Ready(_)));
    }
}
