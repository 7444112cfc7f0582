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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use crate::serve::state::ServerState;
use crate::serve::template::Section;
use crate::serve::template::page;
use crate::serve::view;

// Each handler takes the page's notice (one-shot), renders the panel from
// the current state, and wraps it in the chrome.

pub async fn dashboard(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let notice = m.notice.take();
    let body = view::dashboard(&m.progress.display());
    page(m.theme, Section::Dashboard, notice, body)
}

pub async fn quiz(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let notice = m.notice.take();
    let body = view::quiz(&m.quiz);
    page(m.theme, Section::Quiz, notice, body)
}

pub async fn flashcards(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let notice = m.notice.take();
    let body = view::flashcards(&m.flashcards);
    page(m.theme, Section::Flashcards, notice, body)
}

pub async fn summarizer(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let notice = m.notice.take();
    let body = view::summarizer(&m.summary);
    page(m.theme, Section::Summarizer, notice, body)
}

pub async fn tutor(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let notice = m.notice.take();
    let body = view::tutor(&m.chat);
    page(m.theme, Section::Tutor, notice, body)
}

pub async fn planner(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let notice = m.notice.take();
    let body = view::planner(&m.planner);
    page(m.theme, Section::Planner, notice, body)
}

pub async fn vocabulary(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let notice = m.notice.take();
    let body = view::vocabulary(&m.vocabulary);
    page(m.theme, Section::Vocabulary, notice, body)
}
