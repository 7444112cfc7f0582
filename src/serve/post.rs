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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::backend::ChatRequest;
use crate::backend::Difficulty;
use crate::backend::FlashcardRequest;
use crate::backend::PlanRequest;
use crate::backend::QuizRequest;
use crate::backend::SummarizeRequest;
use crate::backend::VocabularyLevel;
use crate::backend::VocabularyRequest;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::serve::state::ServerState;
use crate::serve::template::Section;

/// Shown when a second request hits a panel whose previous request is
/// still in flight (single-flight: rejected, not queued).
const BUSY_NOTICE: &str = "Hold on, the previous request is still running.";

// Every handler follows the same shape: validate under the lock, mark the
// panel loading, drop the lock, await the backend, re-lock, release the
// loading flag on every path, and only then commit results and progress.
// Failures become a one-shot notice; progress is never touched on failure.

fn report_failure(state: &ServerState, unavailable_notice: &str, e: ErrorReport) {
    let mut m = state.mutable.lock().unwrap();
    m.notice = Some(match e {
        ErrorReport::Validation(message) => message,
        other => {
            log::error!("{other}");
            unavailable_notice.to_string()
        }
    });
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn parse_count(value: &str, default: usize, max: usize, message: &str) -> Fallible<usize> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(default);
    }
    match value.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(ErrorReport::validation(message)),
    }
}

// The quiz form mixes a fixed action field with per-question radio groups
// (`q0`, `q1`, ...), so it is decoded as raw pairs.
pub async fn quiz(
    State(state): State<ServerState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let result = match field(&fields, "action") {
        Some("Generate") => generate_quiz(&state, &fields).await,
        Some("Submit") => submit_quiz(&state, &fields),
        _ => fail("unknown quiz action"),
    };
    if let Err(e) = result {
        report_failure(
            &state,
            "Error generating quiz. Make sure the generation backend is running.",
            e,
        );
    }
    Redirect::to(Section::Quiz.path())
}

async fn generate_quiz(state: &ServerState, fields: &[(String, String)]) -> Fallible<()> {
    let topic = field(fields, "topic").unwrap_or("").trim().to_string();
    if topic.is_empty() {
        return Err(ErrorReport::validation("Please enter a topic."));
    }
    let difficulty = field(fields, "difficulty")
        .and_then(Difficulty::parse)
        .unwrap_or(Difficulty::Medium);
    let num_questions = parse_count(
        field(fields, "num_questions").unwrap_or(""),
        5,
        10,
        "Please choose between 1 and 10 questions.",
    )?;

    let token = {
        let mut m = state.mutable.lock().unwrap();
        match m.quiz.begin_generation() {
            Some(token) => token,
            None => return Err(ErrorReport::validation(BUSY_NOTICE)),
        }
    };
    let request = QuizRequest {
        topic: topic.clone(),
        difficulty,
        num_questions,
    };
    let result = state.backend.generate_quiz(&request).await;
    let mut m = state.mutable.lock().unwrap();
    match result {
        Ok(questions) => {
            m.quiz.finish_generation(token, Some(questions));
            m.progress.record_topic(&topic)?;
            m.progress
                .append_activity(&format!("Generated quiz on {topic} ({difficulty})"))?;
            Ok(())
        }
        Err(e) => {
            m.quiz.finish_generation(token, None);
            Err(e)
        }
    }
}

fn submit_quiz(state: &ServerState, fields: &[(String, String)]) -> Fallible<()> {
    let mut m = state.mutable.lock().unwrap();
    // Apply the form's selections, then grade. Radios that were left
    // untouched simply do not appear in the form data.
    for (key, value) in fields {
        if let Some(index) = key.strip_prefix('q') {
            if let (Ok(question), Ok(choice)) = (index.parse(), value.parse()) {
                m.quiz.select_answer(question, choice);
            }
        }
    }
    let Some((_, percentage)) = m.quiz.submit() else {
        return Err(ErrorReport::validation("Generate a quiz before submitting."));
    };
    m.progress.record_quiz_result(percentage)?;
    m.progress
        .append_activity(&format!("Completed quiz - Score: {percentage}%"))?;
    Ok(())
}

#[derive(Deserialize)]
pub struct FlashcardsForm {
    #[serde(default)]
    action: String,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    num_cards: String,
}

pub async fn flashcards(
    State(state): State<ServerState>,
    Form(form): Form<FlashcardsForm>,
) -> Redirect {
    let result = match form.action.as_str() {
        "Generate" => generate_flashcards(&state, form).await,
        "Flip" | "Previous" | "Next" => {
            navigate_deck(&state, &form.action);
            Ok(())
        }
        _ => fail("unknown flashcard action"),
    };
    if let Err(e) = result {
        report_failure(
            &state,
            "Error generating flashcards. Make sure the generation backend is running.",
            e,
        );
    }
    Redirect::to(Section::Flashcards.path())
}

fn navigate_deck(state: &ServerState, action: &str) {
    let mut m = state.mutable.lock().unwrap();
    if let Some(deck) = m.flashcards.deck_mut() {
        match action {
            "Flip" => deck.flip(),
            "Previous" => deck.prev(),
            "Next" => deck.next(),
            _ => {}
        }
    }
}

async fn generate_flashcards(state: &ServerState, form: FlashcardsForm) -> Fallible<()> {
    let topic = form.topic.trim().to_string();
    if topic.is_empty() {
        return Err(ErrorReport::validation("Please enter a topic."));
    }
    let num_cards = parse_count(
        &form.num_cards,
        5,
        10,
        "Please choose between 1 and 10 cards.",
    )?;

    let token = {
        let mut m = state.mutable.lock().unwrap();
        match m.flashcards.begin_generation() {
            Some(token) => token,
            None => return Err(ErrorReport::validation(BUSY_NOTICE)),
        }
    };
    let request = FlashcardRequest {
        topic: topic.clone(),
        content: form.content.trim().to_string(),
        num_cards,
    };
    let result = state.backend.generate_flashcards(&request).await;
    let mut m = state.mutable.lock().unwrap();
    match result {
        Ok(cards) => {
            m.flashcards.finish_generation(token, Some(cards));
            m.progress
                .append_activity(&format!("Generated {num_cards} flashcards on {topic}"))?;
            Ok(())
        }
        Err(e) => {
            m.flashcards.finish_generation(token, None);
            Err(e)
        }
    }
}

#[derive(Deserialize)]
pub struct SummarizerForm {
    #[serde(default)]
    text: String,
}

pub async fn summarizer(
    State(state): State<ServerState>,
    Form(form): Form<SummarizerForm>,
) -> Redirect {
    if let Err(e) = summarize(&state, form).await {
        report_failure(
            &state,
            "Error generating summary. Make sure the generation backend is running.",
            e,
        );
    }
    Redirect::to(Section::Summarizer.path())
}

async fn summarize(state: &ServerState, form: SummarizerForm) -> Fallible<()> {
    let text = form.text.trim().to_string();
    if text.is_empty() {
        return Err(ErrorReport::validation("Please paste some text to summarize."));
    }
    {
        let mut m = state.mutable.lock().unwrap();
        if m.summary.loading {
            return Err(ErrorReport::validation(BUSY_NOTICE));
        }
        m.summary.loading = true;
    }
    let result = state.backend.summarize(&SummarizeRequest { text }).await;
    let mut m = state.mutable.lock().unwrap();
    m.summary.loading = false;
    let summary = result?;
    m.summary.summary = Some(summary);
    m.progress.record_summary()?;
    m.progress.append_activity("Summarized study material")?;
    Ok(())
}

#[derive(Deserialize)]
pub struct TutorForm {
    #[serde(default)]
    question: String,
}

pub async fn tutor(State(state): State<ServerState>, Form(form): Form<TutorForm>) -> Redirect {
    if let Err(e) = ask_tutor(&state, form).await {
        report_failure(
            &state,
            "Error contacting the AI Tutor. Make sure the generation backend is running.",
            e,
        );
    }
    Redirect::to(Section::Tutor.path())
}

async fn ask_tutor(state: &ServerState, form: TutorForm) -> Fallible<()> {
    let question = form.question.trim().to_string();
    // An empty question is silently ignored, not an error.
    if question.is_empty() {
        return Ok(());
    }
    {
        let mut m = state.mutable.lock().unwrap();
        if !m.chat.begin_exchange(&question) {
            return Err(ErrorReport::validation(BUSY_NOTICE));
        }
    }
    let result = state.backend.tutor_chat(&ChatRequest { question }).await;
    let mut m = state.mutable.lock().unwrap();
    match result {
        Ok(answer) => {
            m.chat.finish_exchange(Some(&answer));
            m.progress.append_activity("Asked AI Tutor a question")?;
            Ok(())
        }
        Err(e) => {
            m.chat.finish_exchange(None);
            Err(e)
        }
    }
}

#[derive(Deserialize)]
pub struct PlannerForm {
    #[serde(default)]
    exam_date: String,
    #[serde(default)]
    subjects: String,
    #[serde(default)]
    daily_hours: String,
}

pub async fn planner(State(state): State<ServerState>, Form(form): Form<PlannerForm>) -> Redirect {
    if let Err(e) = generate_plan(&state, form).await {
        report_failure(
            &state,
            "Error generating study plan. Make sure the generation backend is running.",
            e,
        );
    }
    Redirect::to(Section::Planner.path())
}

async fn generate_plan(state: &ServerState, form: PlannerForm) -> Fallible<()> {
    let exam_date = form.exam_date.trim().to_string();
    let subjects = form.subjects.trim().to_string();
    if exam_date.is_empty() || subjects.is_empty() {
        return Err(ErrorReport::validation("Please fill in exam date and subjects."));
    }
    if NaiveDate::parse_from_str(&exam_date, "%Y-%m-%d").is_err() {
        return Err(ErrorReport::validation(
            "Exam date must be a date in YYYY-MM-DD form.",
        ));
    }
    let daily_hours = parse_count(
        &form.daily_hours,
        3,
        12,
        "Daily hours must be between 1 and 12.",
    )?;
    {
        let mut m = state.mutable.lock().unwrap();
        if m.planner.loading {
            return Err(ErrorReport::validation(BUSY_NOTICE));
        }
        m.planner.loading = true;
    }
    let request = PlanRequest {
        exam_date,
        subjects,
        daily_hours,
    };
    let result = state.backend.generate_study_plan(&request).await;
    let mut m = state.mutable.lock().unwrap();
    m.planner.loading = false;
    let plan = result?;
    m.planner.plan = Some(plan);
    m.progress.append_activity("Generated study plan")?;
    Ok(())
}

#[derive(Deserialize)]
pub struct VocabularyForm {
    #[serde(default)]
    text: String,
    #[serde(default)]
    difficulty: String,
}

pub async fn vocabulary(
    State(state): State<ServerState>,
    Form(form): Form<VocabularyForm>,
) -> Redirect {
    if let Err(e) = extract_vocabulary(&state, form).await {
        report_failure(
            &state,
            "Error extracting vocabulary. Make sure the generation backend is running.",
            e,
        );
    }
    Redirect::to(Section::Vocabulary.path())
}

async fn extract_vocabulary(state: &ServerState, form: VocabularyForm) -> Fallible<()> {
    let text = form.text.trim().to_string();
    if text.is_empty() {
        return Err(ErrorReport::validation("Please paste some text."));
    }
    let difficulty = VocabularyLevel::parse(form.difficulty.trim()).unwrap_or(VocabularyLevel::All);
    {
        let mut m = state.mutable.lock().unwrap();
        if m.vocabulary.loading {
            return Err(ErrorReport::validation(BUSY_NOTICE));
        }
        m.vocabulary.loading = true;
    }
    let request = VocabularyRequest { text, difficulty };
    let result = state.backend.extract_vocabulary(&request).await;
    let mut m = state.mutable.lock().unwrap();
    m.vocabulary.loading = false;
    let entries = result?;
    m.vocabulary.entries = Some(entries);
    m.progress.append_activity("Extracted vocabulary from text")?;
    Ok(())
}

#[derive(Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    back: String,
}

pub async fn theme(State(state): State<ServerState>, Form(form): Form<ThemeForm>) -> Redirect {
    {
        let mut m = state.mutable.lock().unwrap();
        m.theme = m.theme.toggled();
        if let Err(e) = m.theme.store(&state.db) {
            log::error!("{e}");
        }
    }
    // Only known section paths are redirect targets.
    let back = Section::from_path(&form.back).unwrap_or(Section::Dashboard);
    Redirect::to(back.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_field_lookup() {
        let fields = pairs(&[("action", "Generate"), ("topic", "biology")]);
        assert_eq!(field(&fields, "topic"), Some("biology"));
        assert_eq!(field(&fields, "difficulty"), None);
    }

    #[test]
    fn test_parse_count_defaults_and_bounds() {
        assert_eq!(parse_count("", 5, 10, "bad").unwrap(), 5);
        assert_eq!(parse_count("7", 5, 10, "bad").unwrap(), 7);
        assert!(parse_count("0", 5, 10, "bad").is_err());
        assert!(parse_count("11", 5, 10, "bad").is_err());
        assert!(parse_count("seven", 5, 10, "bad").is_err());
    }
}
