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
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::progress::ProgressStore;
use crate::serve::get as pages;
use crate::serve::post as forms;
use crate::serve::state::MutableState;
use crate::serve::state::ServerState;
use crate::theme::Theme;

pub async fn start_server(config: Config) -> Fallible<()> {
    if !config.data_dir.exists() {
        return fail("data directory does not exist.");
    }
    let db_path = config.db_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?,
    )?;
    log::debug!("Loading progress record...");
    let progress = ProgressStore::load(db.clone());
    let theme = Theme::load(&db);
    let backend = BackendClient::new(&config.backend_url)?;

    // Warn early when the generation backend is down. The panels still
    // render; failing calls surface as notices.
    {
        let probe = backend.clone();
        tokio::spawn(async move {
            if !probe.healthy().await {
                log::warn!(
                    "Generation backend is unreachable at {}.",
                    probe.base_url()
                );
            }
        });
    }

    let state = ServerState {
        backend,
        db,
        mutable: Arc::new(Mutex::new(MutableState::new(progress, theme))),
    };
    let app = Router::new();
    let app = app.route("/", get(pages::dashboard));
    let app = app.route("/quiz", get(pages::quiz));
    let app = app.route("/quiz", post(forms::quiz));
    let app = app.route("/flashcards", get(pages::flashcards));
    let app = app.route("/flashcards", post(forms::flashcards));
    let app = app.route("/summarizer", get(pages::summarizer));
    let app = app.route("/summarizer", post(forms::summarizer));
    let app = app.route("/tutor", get(pages::tutor));
    let app = app.route("/tutor", post(forms::tutor));
    let app = app.route("/planner", get(pages::planner));
    let app = app.route("/planner", post(forms::planner));
    let app = app.route("/vocabulary", get(pages::vocabulary));
    let app = app.route("/vocabulary", post(forms::vocabulary));
    let app = app.route("/theme", post(forms::theme));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{}", config.port);

    // Start a separate task to open the browser once the port answers.
    if config.open_browser {
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
