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

pub type Fallible<T> = Result<T, ErrorReport>;

#[derive(Debug)]
pub enum ErrorReport {
    /// Input rejected before any network call was made.
    Validation(String),
    /// The generation backend could not be reached.
    Network(String),
    /// The generation backend answered with a failure, or with a payload
    /// that does not match the expected shape.
    Backend(String),
    /// Local durable storage failed.
    Storage(String),
    Other(String),
}

impl ErrorReport {
    pub fn new(message: &str) -> Self {
        Self::Other(message.to_string())
    }

    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorReport::Validation(message)
            | ErrorReport::Network(message)
            | ErrorReport::Backend(message)
            | ErrorReport::Storage(message)
            | ErrorReport::Other(message) => message,
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message())
    }
}

impl std::error::Error for ErrorReport {}

pub fn fail<T>(message: &str) -> Fallible<T> {
    Err(ErrorReport::new(message))
}

impl From<std::io::Error> for ErrorReport {
    fn from(e: std::io::Error) -> Self {
        ErrorReport::Other(e.to_string())
    }
}

impl From<rusqlite::Error> for ErrorReport {
    fn from(e: rusqlite::Error) -> Self {
        ErrorReport::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(e: serde_json::Error) -> Self {
        ErrorReport::Storage(e.to_string())
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(e: toml::de::Error) -> Self {
        ErrorReport::Other(e.to_string())
    }
}

impl From<reqwest::Error> for ErrorReport {
    fn from(e: reqwest::Error) -> Self {
        // A response that arrived but could not be used is the backend's
        // fault; everything else is transport.
        if e.is_decode() || e.is_status() {
            ErrorReport::Backend(e.to_string())
        } else {
            ErrorReport::Network(e.to_string())
        }
    }
}
