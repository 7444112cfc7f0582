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

use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Default address of the generation backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5001";

/// The backend contract has no timeout of its own; a hung request fails
/// like an unreachable host after this long.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyLevel {
    All,
    Intermediate,
    Advanced,
}

impl VocabularyLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(VocabularyLevel::All),
            "intermediate" => Some(VocabularyLevel::Intermediate),
            "advanced" => Some(VocabularyLevel::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub num_questions: usize,
}

#[derive(Debug, Deserialize)]
struct QuizResponse {
    questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Debug, Serialize)]
pub struct FlashcardRequest {
    pub topic: String,
    pub content: String,
    pub num_cards: usize,
}

#[derive(Debug, Deserialize)]
struct FlashcardResponse {
    flashcards: Vec<Flashcard>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    answer: String,
}

#[derive(Debug, Serialize)]
pub struct PlanRequest {
    pub exam_date: String,
    pub subjects: String,
    pub daily_hours: usize,
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    plan: Vec<PlanDay>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PlanDay {
    pub day: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct VocabularyRequest {
    pub text: String,
    pub difficulty: VocabularyLevel,
}

#[derive(Debug, Deserialize)]
struct VocabularyResponse {
    vocabulary: Vec<VocabularyEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub definition: String,
}

/// Client for the generation backend: one typed wrapper per endpoint over
/// a shared JSON POST helper.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Fallible<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether the backend answers its health endpoint.
    pub async fn healthy(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn generate_quiz(&self, request: &QuizRequest) -> Fallible<Vec<Question>> {
        let response: QuizResponse = self.post("/generate-quiz", request).await?;
        Ok(response.questions)
    }

    pub async fn summarize(&self, request: &SummarizeRequest) -> Fallible<String> {
        let response: SummarizeResponse = self.post("/summarize", request).await?;
        Ok(response.summary)
    }

    pub async fn generate_flashcards(&self, request: &FlashcardRequest) -> Fallible<Vec<Flashcard>> {
        let response: FlashcardResponse = self.post("/generate-flashcards", request).await?;
        Ok(response.flashcards)
    }

    pub async fn tutor_chat(&self, request: &ChatRequest) -> Fallible<String> {
        let response: ChatResponse = self.post("/tutor-chat", request).await?;
        Ok(response.answer)
    }

    pub async fn generate_study_plan(&self, request: &PlanRequest) -> Fallible<Vec<PlanDay>> {
        let response: PlanResponse = self.post("/generate-study-plan", request).await?;
        Ok(response.plan)
    }

    pub async fn extract_vocabulary(
        &self,
        request: &VocabularyRequest,
    ) -> Fallible<Vec<VocabularyEntry>> {
        let response: VocabularyResponse = self.post("/extract-vocabulary", request).await?;
        Ok(response.vocabulary)
    }

    async fn post<P: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
    ) -> Fallible<R> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ErrorReport::Backend(format!(
                "backend returned {status} for {path}"
            )));
        }
        let parsed: R = response.json().await?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_quiz_request_wire_format() {
        let request = QuizRequest {
            topic: "python".to_string(),
            difficulty: Difficulty::Medium,
            num_questions: 5,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"topic": "python", "difficulty": "medium", "num_questions": 5})
        );
    }

    #[test]
    fn test_quiz_response_parses() {
        let body = json!({
            "questions": [{
                "question": "What is the chemical symbol for water?",
                "options": ["O2", "H2O", "CO2", "H2O2"],
                "correct_answer": 1,
                "explanation": "Water consists of 2 hydrogen atoms and 1 oxygen atom, hence H2O"
            }],
            "topic": "science",
            "difficulty": "easy"
        });
        let response: QuizResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.questions.len(), 1);
        assert_eq!(response.questions[0].correct_answer, 1);
        assert_eq!(response.questions[0].options.len(), 4);
    }

    #[test]
    fn test_plan_request_wire_format() {
        let request = PlanRequest {
            exam_date: "2026-09-01".to_string(),
            subjects: "maths, physics".to_string(),
            daily_hours: 3,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"exam_date": "2026-09-01", "subjects": "maths, physics", "daily_hours": 3})
        );
    }

    #[test]
    fn test_plan_response_parses() {
        let body = json!({
            "plan": [
                {"day": "Day 1 (maths)", "tasks": ["maths: Review notes (1h)"]},
                {"day": "Day 2 (physics)", "tasks": ["physics: Practice problems (1h)"]}
            ],
            "total_days": 2
        });
        let response: PlanResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.plan.len(), 2);
        assert_eq!(response.plan[1].tasks.len(), 1);
    }

    #[test]
    fn test_vocabulary_level_wire_format() {
        let request = VocabularyRequest {
            text: "Some text".to_string(),
            difficulty: VocabularyLevel::Advanced,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"text": "Some text", "difficulty": "advanced"}));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("brutal"), None);
        assert_eq!(VocabularyLevel::parse("all"), Some(VocabularyLevel::All));
        assert_eq!(VocabularyLevel::parse(""), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() -> Fallible<()> {
        let client = BackendClient::new("http://localhost:5001/")?;
        assert_eq!(client.base_url(), "http://localhost:5001");
        Ok(())
    }
}
