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

use std::sync::Arc;
use std::sync::Mutex;

use crate::backend::BackendClient;
use crate::db::Database;
use crate::panels::PlannerPanel;
use crate::panels::SummaryPanel;
use crate::panels::VocabularyPanel;
use crate::panels::chat::ChatPanel;
use crate::panels::flashcards::FlashcardPanel;
use crate::panels::quiz::QuizPanel;
use crate::progress::ProgressStore;
use crate::theme::Theme;

#[derive(Clone)]
pub struct ServerState {
    pub backend: BackendClient,
    pub db: Database,
    pub mutable: Arc<Mutex<MutableState>>,
}

/// Everything the panels and the dashboard read and write. Owned by one
/// mutex; handlers never hold the lock across a network await.
pub struct MutableState {
    pub progress: ProgressStore,
    pub theme: Theme,
    /// One-shot notice shown at the top of the next rendered page.
    pub notice: Option<String>,
    pub quiz: QuizPanel,
    pub flashcards: FlashcardPanel,
    pub chat: ChatPanel,
    pub summary: SummaryPanel,
    pub planner: PlannerPanel,
    pub vocabulary: VocabularyPanel,
}

impl MutableState {
    pub fn new(progress: ProgressStore, theme: Theme) -> Self {
        Self {
            progress,
            theme,
            notice: None,
            quiz: QuizPanel::default(),
            flashcards: FlashcardPanel::default(),
            chat: ChatPanel::default(),
            summary: SummaryPanel::default(),
            planner: PlannerPanel::default(),
            vocabulary: VocabularyPanel::default(),
        }
    }
}
