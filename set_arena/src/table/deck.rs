use super::entities::Card;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Undealt cards. Owned by the dealer alone, so it needs no lock.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Deck holding cards `0..size` in order
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, StdRng::from_os_rng())
    }

    /// Deterministic deck for reproducible games
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, rng: StdRng) -> Self {
        let cards = (0..size as u32).map(Card).collect();
        Self { cards, rng }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Takes the top card, `None` once the deck is exhausted
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Returns collected cards to the bottom of the deck
    pub fn refill(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffles the slot order the dealer fills in
    pub fn shuffle_slots(&mut self, slots: &mut [usize]) {
        slots.shuffle(&mut self.rng);
    }
}
