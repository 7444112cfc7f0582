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

pub mod chat;
pub mod flashcards;
pub mod quiz;

use crate::backend::PlanDay;
use crate::backend::VocabularyEntry;

// The summarizer, planner and vocabulary panels hold one result each and
// need no state machine beyond the loading flag.

#[derive(Default)]
pub struct SummaryPanel {
    pub loading: bool,
    pub summary: Option<String>,
}

#[derive(Default)]
pub struct PlannerPanel {
    pub loading: bool,
    pub plan: Option<Vec<PlanDay>>,
}

#[derive(Default)]
pub struct VocabularyPanel {
    pub loading: bool,
    pub entries: Option<Vec<VocabularyEntry>>,
}
