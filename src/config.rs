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

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::backend::DEFAULT_BACKEND_URL;
use crate::error::Fallible;

pub const DEFAULT_PORT: u16 = 8000;

const CONFIG_FILE: &str = "studyhall.toml";
const DATABASE_FILE: &str = "studyhall.sqlite3";

/// Resolved runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
    pub backend_url: String,
    pub open_browser: bool,
}

/// Optional `studyhall.toml` in the data directory.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    port: Option<u16>,
    backend_url: Option<String>,
}

impl Config {
    /// Resolve configuration: defaults, overridden by the config file,
    /// overridden by CLI flags.
    pub fn resolve(
        data_dir: Option<String>,
        port: Option<u16>,
        backend_url: Option<String>,
        open_browser: bool,
    ) -> Fallible<Self> {
        let data_dir = match data_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };
        let file = read_config_file(&data_dir)?;
        Ok(Self {
            port: port.or(file.port).unwrap_or(DEFAULT_PORT),
            backend_url: backend_url
                .or(file.backend_url)
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            data_dir,
            open_browser,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

fn read_config_file(data_dir: &Path) -> Fallible<ConfigFile> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path)?;
    let parsed: ConfigFile = toml::from_str(&content)?;
    Ok(parsed)
}
