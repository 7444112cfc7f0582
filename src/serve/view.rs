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

use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::markdown::markdown_to_html;
use crate::markdown::markdown_to_html_inline;
use crate::panels::PlannerPanel;
use crate::panels::SummaryPanel;
use crate::panels::VocabularyPanel;
use crate::panels::chat::ChatPanel;
use crate::panels::chat::ChatRole;
use crate::panels::flashcards::CardFace;
use crate::panels::flashcards::FlashcardPanel;
use crate::panels::quiz::QuizPanel;
use crate::panels::quiz::QuizReview;
use crate::panels::quiz::QuizSession;
use crate::panels::quiz::QuizState;
use crate::progress::ProgressDisplay;

pub fn dashboard(display: &ProgressDisplay) -> Markup {
    html! {
        div.panel {
            h2 { "Your Progress" }
            div.stats {
                div.stat {
                    div.value { (display.quizzes_completed) }
                    div.label { "Quizzes Completed" }
                }
                div.stat {
                    div.value { (display.average_score) "%" }
                    div.label { "Average Score" }
                }
                div.stat {
                    div.value { (display.topics_studied) }
                    div.label { "Topics Studied" }
                }
                div.stat {
                    div.value { (display.study_hours) "h" }
                    div.label { "Study Time" }
                }
            }
            h3 { "Recent Activity" }
            div.activity-list {
                @if display.recent_activities.is_empty() {
                    p { "No recent activity" }
                } @else {
                    @for activity in &display.recent_activities {
                        div.activity-item { (activity) }
                    }
                }
            }
        }
    }
}

pub fn quiz(panel: &QuizPanel) -> Markup {
    html! {
        div.panel {
            h2 { "Quiz Generator" }
            form.generator action="/quiz" method="post" {
                label {
                    "Topic"
                    input type="text" name="topic" placeholder="e.g. Photosynthesis";
                }
                label {
                    "Difficulty"
                    select name="difficulty" {
                        option value="easy" { "Easy" }
                        option value="medium" selected { "Medium" }
                        option value="hard" { "Hard" }
                    }
                }
                label {
                    "Questions"
                    input type="number" name="num_questions" value="5" min="1" max="10";
                }
                input type="submit" name="action" value="Generate";
            }
            @if panel.loading() {
                p.loading { "Generating..." }
            }
            @match panel.state() {
                QuizState::Idle => {}
                QuizState::Ready(session) => { (quiz_questions(session)) }
                QuizState::Submitted(review) => { (quiz_results(review)) }
            }
        }
    }
}

fn quiz_questions(session: &QuizSession) -> Markup {
    html! {
        form.quiz action="/quiz" method="post" {
            @for (index, question) in session.questions().iter().enumerate() {
                div.quiz-question {
                    h4 { "Question " (index + 1) ": " (question.question) }
                    @for (opt_index, option) in question.options.iter().enumerate() {
                        label.quiz-option {
                            input type="radio"
                                name=(format!("q{index}"))
                                value=(opt_index)
                                checked[session.answer(index) == Some(opt_index)];
                            " " (option)
                        }
                    }
                }
            }
            input type="submit" name="action" value="Submit";
        }
    }
}

fn quiz_results(review: &QuizReview) -> Markup {
    let session = &review.session;
    let total = session.questions().len();
    html! {
        div.quiz-results {
            h3 { "Quiz Results" }
            p.score { "Score: " (review.correct) "/" (total) " (" (review.percentage) "%)" }
            @for (index, question) in session.questions().iter().enumerate() {
                @let answer = session.answer(index);
                @let is_correct = answer == Some(question.correct_answer);
                @let correct_text = question
                    .options
                    .get(question.correct_answer)
                    .map(|option| option.as_str())
                    .unwrap_or("(unknown)");
                div.review-item.correct[is_correct].incorrect[!is_correct] {
                    p { strong { "Q" (index + 1) ": " } (question.question) }
                    p {
                        strong { "Your answer: " }
                        @match answer {
                            Some(choice) => { (question.options[choice]) }
                            None => { "Not answered" }
                        }
                    }
                    p { strong { "Correct answer: " } (correct_text) }
                    @if !is_correct {
                        p { strong { "Explanation: " } (question.explanation) }
                    }
                }
            }
        }
    }
}

pub fn flashcards(panel: &FlashcardPanel) -> Markup {
    html! {
        div.panel {
            h2 { "Flashcard Generator" }
            form.generator action="/flashcards" method="post" {
                label {
                    "Topic"
                    input type="text" name="topic" placeholder="e.g. The French Revolution";
                }
                label {
                    "Notes (optional)"
                    textarea name="content" rows="4"
                        placeholder="Paste study material to turn into cards" {}
                }
                label {
                    "Cards"
                    input type="number" name="num_cards" value="5" min="1" max="10";
                }
                input type="submit" name="action" value="Generate";
            }
            @if panel.loading() {
                p.loading { "Generating..." }
            }
            @if let Some(deck) = panel.deck() {
                @if let Some(card) = deck.current() {
                    div.flashcard {
                        @match deck.face() {
                            CardFace::Front => { div.face.front { (card.question) } }
                            CardFace::Back => { div.face.back { (card.answer) } }
                        }
                        div.card-counter { (deck.cursor() + 1) " / " (deck.len()) }
                    }
                    form.card-controls action="/flashcards" method="post" {
                        input type="submit" name="action" value="Previous"
                            disabled[deck.cursor() == 0];
                        input type="submit" name="action" value="Flip";
                        input type="submit" name="action" value="Next"
                            disabled[deck.cursor() + 1 >= deck.len()];
                    }
                } @else {
                    p { "The backend returned no flashcards." }
                }
            }
        }
    }
}

pub fn summarizer(panel: &SummaryPanel) -> Markup {
    html! {
        div.panel {
            h2 { "Text Summarizer" }
            form.generator action="/summarizer" method="post" {
                label {
                    "Text"
                    textarea name="text" rows="8"
                        placeholder="Paste the material to summarize" {}
                }
                input type="submit" value="Summarize";
            }
            @if panel.loading {
                p.loading { "Summarizing..." }
            }
            @if let Some(summary) = &panel.summary {
                div.result {
                    h3 { "Summary" }
                    div.rich-text { (PreEscaped(markdown_to_html(summary))) }
                }
            }
        }
    }
}

pub fn tutor(panel: &ChatPanel) -> Markup {
    html! {
        div.panel {
            h2 { "AI Tutor" }
            div.chat-history {
                @if panel.transcript().is_empty() {
                    p.hint { "Ask anything you are stuck on." }
                }
                @for entry in panel.transcript() {
                    @match entry.role {
                        ChatRole::User => {
                            div.chat-message.user-message {
                                strong { "You: " }
                                (entry.text)
                            }
                        }
                        ChatRole::Assistant => {
                            div.chat-message.bot-message {
                                strong { "AI Tutor: " }
                                (PreEscaped(markdown_to_html_inline(&entry.text)))
                            }
                        }
                    }
                }
            }
            @if panel.loading() {
                p.loading { "Thinking..." }
            }
            form.chat-input action="/tutor" method="post" {
                input type="text" name="question" placeholder="Ask a question";
                input type="submit" value="Send";
            }
        }
    }
}

pub fn planner(panel: &PlannerPanel) -> Markup {
    html! {
        div.panel {
            h2 { "Study Planner" }
            form.generator action="/planner" method="post" {
                label {
                    "Exam date"
                    input type="date" name="exam_date";
                }
                label {
                    "Subjects"
                    input type="text" name="subjects"
                        placeholder="Comma-separated, e.g. maths, physics";
                }
                label {
                    "Daily hours"
                    input type="number" name="daily_hours" value="3" min="1" max="12";
                }
                input type="submit" value="Generate Plan";
            }
            @if panel.loading {
                p.loading { "Planning..." }
            }
            @if let Some(plan) = &panel.plan {
                div.result {
                    h3 { "Your Study Plan" }
                    @for day in plan {
                        div.plan-day {
                            h4 { (day.day) }
                            @for task in &day.tasks {
                                div.plan-task { (task) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn vocabulary(panel: &VocabularyPanel) -> Markup {
    html! {
        div.panel {
            h2 { "Vocabulary Builder" }
            form.generator action="/vocabulary" method="post" {
                label {
                    "Text"
                    textarea name="text" rows="6"
                        placeholder="Paste text to mine for vocabulary" {}
                }
                label {
                    "Level"
                    select name="difficulty" {
                        option value="all" selected { "All" }
                        option value="intermediate" { "Intermediate" }
                        option value="advanced" { "Advanced" }
                    }
                }
                input type="submit" value="Extract";
            }
            @if panel.loading {
                p.loading { "Extracting..." }
            }
            @if let Some(entries) = &panel.entries {
                div.result {
                    h3 { "Vocabulary" }
                    @for entry in entries {
                        div.vocab-item {
                            div.vocab-word { (entry.word) }
                            div.vocab-definition { (entry.definition) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Question;

    #[test]
    fn test_quiz_ready_view_renders_radio_groups() {
        let mut panel = QuizPanel::default();
        let token = panel.begin_generation().unwrap();
        panel.finish_generation(
            token,
            Some(vec![Question {
                question: "What is 2 + 2?".to_string(),
                options: vec!["3".to_string(), "4".to_string()],
                correct_answer: 1,
                explanation: "Two plus two is four.".to_string(),
            }]),
        );
        let html = quiz(&panel).into_string();
        assert!(html.contains("name=\"q0\""));
        assert!(html.contains("What is 2 + 2?"));
        assert!(html.contains("value=\"Submit\""));
    }

    #[test]
    fn test_unanswered_question_shows_the_sentinel_text() {
        let mut panel = QuizPanel::default();
        let token = panel.begin_generation().unwrap();
        panel.finish_generation(
            token,
            Some(vec![Question {
                question: "Pick one.".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: 0,
                explanation: "It is a.".to_string(),
            }]),
        );
        panel.submit().unwrap();
        let html = quiz(&panel).into_string();
        assert!(html.contains("Not answered"));
        assert!(html.contains("Explanation:"));
    }

    #[test]
    fn test_dashboard_placeholder_without_activity() {
        let display = ProgressDisplay {
            quizzes_completed: 0,
            average_score: 0,
            topics_studied: 0,
            study_hours: 0,
            recent_activities: Vec::new(),
        };
        let html = dashboard(&display).into_string();
        assert!(html.contains("No recent activity"));
    }
}
