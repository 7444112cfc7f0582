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

use axum::http::StatusCode;
use axum::response::Html;
use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Quiz,
    Flashcards,
    Summarizer,
    Tutor,
    Planner,
    Vocabulary,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Dashboard,
        Section::Quiz,
        Section::Flashcards,
        Section::Summarizer,
        Section::Tutor,
        Section::Planner,
        Section::Vocabulary,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Section::Dashboard => "/",
            Section::Quiz => "/quiz",
            Section::Flashcards => "/flashcards",
            Section::Summarizer => "/summarizer",
            Section::Tutor => "/tutor",
            Section::Planner => "/planner",
            Section::Vocabulary => "/vocabulary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Progress",
            Section::Quiz => "Quiz",
            Section::Flashcards => "Flashcards",
            Section::Summarizer => "Summarizer",
            Section::Tutor => "AI Tutor",
            Section::Planner => "Study Planner",
            Section::Vocabulary => "Vocabulary",
        }
    }

    pub fn from_path(path: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.path() == path)
    }
}

impl Theme {
    fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark mode",
            Theme::Dark => "Light mode",
        }
    }
}

/// Wrap a panel body in the page chrome: nav, theme toggle, notice banner.
pub fn page(
    theme: Theme,
    section: Section,
    notice: Option<String>,
    body: Markup,
) -> (StatusCode, Html<String>) {
    let markup = html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Studyhall" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                header.topbar {
                    span.brand { "Studyhall" }
                    nav {
                        @for s in Section::ALL {
                            @if s == section {
                                a.active href=(s.path()) { (s.label()) }
                            } @else {
                                a href=(s.path()) { (s.label()) }
                            }
                        }
                    }
                    form.theme-toggle action="/theme" method="post" {
                        input type="hidden" name="back" value=(section.path());
                        input type="submit" value=(theme.toggle_label());
                    }
                }
                @if let Some(notice) = &notice {
                    div.notice role="alert" { (notice) }
                }
                main { (body) }
            }
        }
    };
    (StatusCode::OK, Html(markup.into_string()))
}
