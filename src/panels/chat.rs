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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
}

/// The tutor transcript: ordered, append-only, never edited or truncated.
/// Each successful exchange appends exactly one user and one assistant
/// entry; a failed exchange leaves the user entry with no reply.
#[derive(Default)]
pub struct ChatPanel {
    loading: bool,
    transcript: Vec<ChatEntry>,
}

impl ChatPanel {
    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Append the user's question and mark an exchange in flight. Returns
    /// false (appending nothing) while another exchange is running.
    pub fn begin_exchange(&mut self, question: &str) -> bool {
        if self.loading {
            return false;
        }
        self.transcript.push(ChatEntry {
            role: ChatRole::User,
            text: question.to_string(),
        });
        self.loading = true;
        true
    }

    /// Finish the in-flight exchange, appending the assistant's answer if
    /// there is one. The loading flag is released either way.
    pub fn finish_exchange(&mut self, answer: Option<&str>) {
        self.loading = false;
        if let Some(answer) = answer {
            self.transcript.push(ChatEntry {
                role: ChatRole::Assistant,
                text: answer.to_string(),
            });
        }
    }
}
