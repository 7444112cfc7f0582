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

use clap::Parser;
use clap::ValueEnum;

use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::progress::ProgressStore;
use crate::serve::server::start_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the study assistant and open it in the browser.
    Serve {
        /// Directory where local state is stored. Defaults to the current directory.
        #[arg(long)]
        data_dir: Option<String>,
        /// Port to serve the front end on.
        #[arg(long)]
        port: Option<u16>,
        /// Base URL of the generation backend.
        #[arg(long)]
        backend: Option<String>,
        /// Do not open the browser after startup.
        #[arg(long)]
        no_open: bool,
    },
    /// Print progress statistics.
    Progress {
        /// Directory where local state is stored. Defaults to the current directory.
        #[arg(long)]
        data_dir: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = ProgressFormat::Text)]
        format: ProgressFormat,
    },
}

#[derive(ValueEnum, Clone)]
enum ProgressFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for ProgressFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressFormat::Text => write!(f, "text"),
            ProgressFormat::Json => write!(f, "json"),
        }
    }
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            data_dir,
            port,
            backend,
            no_open,
        } => {
            let config = Config::resolve(data_dir, port, backend, !no_open)?;
            start_server(config).await
        }
        Command::Progress { data_dir, format } => {
            let config = Config::resolve(data_dir, None, None, false)?;
            let db_path = config.db_path();
            let db = Database::new(
                db_path
                    .to_str()
                    .ok_or_else(|| ErrorReport::new("invalid path"))?,
            )?;
            let progress = ProgressStore::load(db);
            let display = progress.display();
            match format {
                ProgressFormat::Text => {
                    println!("Quizzes completed: {}", display.quizzes_completed);
                    println!("Average score:     {}%", display.average_score);
                    println!("Topics studied:    {}", display.topics_studied);
                    println!("Study time:        {}h", display.study_hours);
                    println!("Recent activity:");
                    if display.recent_activities.is_empty() {
                        println!("  (none)");
                    }
                    for activity in &display.recent_activities {
                        println!("  {activity}");
                    }
                }
                ProgressFormat::Json => {
                    let json = serde_json::to_string_pretty(&display)?;
                    println!("{json}");
                }
            }
            Ok(())
        }
    }
}
