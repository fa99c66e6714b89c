//! Study session state and its transitions.
//!
//! A [`Session`] owns its deck: the cards matching the selected type, copied
//! out of the shared collection and then shuffled. Every transition consumes
//! the session and hands back the next one, and the caller re-renders from
//! whatever it gets back.

use rand::Rng;

use crate::models::{CardType, Flashcard};
use crate::source::Collection;

/// Something the learner asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetFilter(CardType),
    Shuffle,
    Next,
    ToggleReveal,
}

#[derive(Debug, Clone)]
pub struct Session {
    collection: Collection,
    deck: Vec<Flashcard>,
    position: usize,
    revealed: bool,
    selected: CardType,
}

impl Session {
    /// Start a session on `collection` with `kind` selected.
    pub fn start<R: Rng + ?Sized>(collection: Collection, kind: CardType, rng: &mut R) -> Self {
        let session = Self {
            collection,
            deck: Vec::new(),
            position: 0,
            revealed: false,
            selected: kind,
        };
        session.set_filter(kind, rng)
    }

    /// Rebuild the deck from the full collection, keeping source order for
    /// the matching cards before shuffling them.
    #[must_use]
    pub fn set_filter<R: Rng + ?Sized>(mut self, kind: CardType, rng: &mut R) -> Self {
        self.selected = kind;
        self.deck = self
            .collection
            .iter()
            .filter(|card| card.is(kind))
            .cloned()
            .collect();
        shuffle_in_place(&mut self.deck, rng);
        self.position = 0;
        self.revealed = false;

        tracing::debug!(filter = %kind, cards = self.deck.len(), "filter applied");
        self
    }

    #[must_use]
    pub fn shuffle<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        shuffle_in_place(&mut self.deck, rng);
        self.position = 0;
        self.revealed = false;
        self
    }

    /// Move to the next card, wrapping after the last one.
    #[must_use]
    pub fn advance(mut self) -> Self {
        if self.deck.is_empty() {
            return self;
        }
        self.position = (self.position + 1) % self.deck.len();
        self.revealed = false;
        self
    }

    #[must_use]
    pub fn toggle_reveal(mut self) -> Self {
        if !self.deck.is_empty() {
            self.revealed = !self.revealed;
        }
        self
    }

    #[must_use]
    pub fn apply<R: Rng + ?Sized>(self, action: Action, rng: &mut R) -> Self {
        match action {
            Action::SetFilter(kind) => self.set_filter(kind, rng),
            Action::Shuffle => self.shuffle(rng),
            Action::Next => self.advance(),
            Action::ToggleReveal => self.toggle_reveal(),
        }
    }

    pub fn deck(&self) -> &[Flashcard] {
        &self.deck
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn selected(&self) -> CardType {
        self.selected
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.deck.get(self.position)
    }

    pub fn view(&self) -> CardView<'_> {
        match self.current() {
            Some(card) => CardView::Card(CurrentCard {
                chinese: &card.chinese,
                english: self.revealed.then_some(card.english.as_str()),
                category: card.category.as_deref(),
                kind: &card.kind,
                number: self.position + 1,
                total: self.deck.len(),
            }),
            None => CardView::NoCards {
                filter: self.selected,
            },
        }
    }
}

/// An empty session over an empty collection.
impl Default for Session {
    fn default() -> Self {
        Self {
            collection: Vec::<Flashcard>::new().into(),
            deck: Vec::new(),
            position: 0,
            revealed: false,
            selected: CardType::default(),
        }
    }
}

/// What the learner should be looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView<'a> {
    Card(CurrentCard<'a>),
    NoCards { filter: CardType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentCard<'a> {
    pub chinese: &'a str,
    /// Only present once revealed.
    pub english: Option<&'a str>,
    pub category: Option<&'a str>,
    pub kind: &'a str,
    /// 1-based.
    pub number: usize,
    pub total: usize,
}

impl CurrentCard<'_> {
    pub fn counter(&self) -> String {
        format!("{} of {}", self.number, self.total)
    }
}

/// Fisher–Yates: walk from the last index down to 1, swapping each slot
/// with a uniformly chosen slot at or before it.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
