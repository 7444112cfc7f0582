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

use crate::backend::Flashcard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Back,
}

/// A generated deck with a cursor clamped to `[0, len - 1]`. Navigation at
/// either end is a no-op, not a wrap, and any cursor move turns the card
/// back to its front.
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    cursor: usize,
    face: CardFace,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            cursor: 0,
            face: CardFace::Front,
        }
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn flip(&mut self) {
        self.face = match self.face {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        };
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
            self.face = CardFace::Front;
        }
    }

    pub fn prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.face = CardFace::Front;
        }
    }
}

/// The flashcard panel: at most one deck, replaced wholesale by each
/// generation.
#[derive(Default)]
pub struct FlashcardPanel {
    epoch: u64,
    loading: bool,
    deck: Option<FlashcardDeck>,
}

impl FlashcardPanel {
    pub fn deck(&self) -> Option<&FlashcardDeck> {
        self.deck.as_ref()
    }

    pub fn deck_mut(&mut self) -> Option<&mut FlashcardDeck> {
        self.deck.as_mut()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Single-flight: `None` while a generation is in flight.
    pub fn begin_generation(&mut self) -> Option<u64> {
        if self.loading {
            return None;
        }
        self.epoch += 1;
        self.loading = true;
        Some(self.epoch)
    }

    /// Install the generated deck (cursor 0, front face) or, on failure,
    /// keep whatever deck was already there. Stale tokens are dropped.
    pub fn finish_generation(&mut self, token: u64, cards: Option<Vec<Flashcard>>) {
        if token != self.epoch {
            log::debug!("Dropping stale flashcard generation (token {token}, epoch {})", self.epoch);
            return;
        }
        self.loading = false;
        if let Some(cards) = cards {
            self.deck = Some(FlashcardDeck::new(cards));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(n: usize) -> Flashcard {
        Flashcard {
            question: format!("Question {n}"),
            answer: format!("Answer {n}"),
        }
    }

    fn deck_of(n: usize) -> FlashcardDeck {
        FlashcardDeck::new((0..n).map(card).collect())
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let mut deck = deck_of(3);
        deck.prev();
        assert_eq!(deck.cursor(), 0);
        deck.next();
        deck.next();
        assert_eq!(deck.cursor(), 2);
        deck.next();
        assert_eq!(deck.cursor(), 2);
    }

    #[test]
    fn test_flip_toggles_and_cursor_moves_reset_to_front() {
        let mut deck = deck_of(2);
        assert_eq!(deck.face(), CardFace::Front);
        deck.flip();
        assert_eq!(deck.face(), CardFace::Back);
        deck.next();
        assert_eq!(deck.face(), CardFace::Front);
        deck.flip();
        deck.prev();
        assert_eq!(deck.face(), CardFace::Front);
    }

    #[test]
    fn test_clamped_move_keeps_the_face() {
        let mut deck = deck_of(1);
        deck.flip();
        deck.next();
        // The cursor did not move, so the card stays revealed.
        assert_eq!(deck.face(), CardFace::Back);
    }

    #[test]
    fn test_empty_deck_has_no_current_card() {
        let mut deck = deck_of(0);
        assert!(deck.is_empty());
        assert!(deck.current().is_none());
        deck.next();
        deck.prev();
        assert_eq!(deck.cursor(), 0);
    }

    #[test]
    fn test_generation_replaces_the_deck_and_resets_the_cursor() {
        let mut panel = FlashcardPanel::default();
        let token = panel.begin_generation().unwrap();
        panel.finish_generation(token, Some((0..3).map(card).collect()));
        panel.deck_mut().unwrap().next();
        panel.deck_mut().unwrap().flip();

        let token = panel.begin_generation().unwrap();
        panel.finish_generation(token, Some((0..2).map(card).collect()));
        let deck = panel.deck().unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cursor(), 0);
        assert_eq!(deck.face(), CardFace::Front);
    }

    #[test]
    fn test_failed_generation_keeps_the_previous_deck() {
        let mut panel = FlashcardPanel::default();
        let token = panel.begin_generation().unwrap();
        panel.finish_generation(token, Some((0..3).map(card).collect()));
        let token = panel.begin_generation().unwrap();
        panel.finish_generation(token, None);
        assert!(!panel.loading());
        assert_eq!(panel.deck().unwrap().len(), 3);
    }
}
