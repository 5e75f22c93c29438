//! Cards and the shuffled board for one game.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::catalog::{ImageCatalog, ImageId};
use crate::core::GameRng;

/// A single card on the board.
///
/// Identity is by `position`. Cards never change after dealing; whether a
/// card is face-up lives in the round state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Index in the shuffled sequence.
    pub position: usize,
    /// Match key, shared with exactly one other card.
    pub image_id: ImageId,
    /// Image the frontend shows when the card is face-up.
    pub face: String,
}

/// Ordered, shuffled sequence of cards.
///
/// Invariant: every `ImageId` present appears on exactly two cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Deal `pair_count` pairs from the front of the catalog and shuffle them.
    ///
    /// The first card of each pair shows the pair's first image, the second
    /// card the second image. Returns `None` if the catalog is too short.
    pub fn deal(catalog: &ImageCatalog, pair_count: usize, rng: &mut GameRng) -> Option<Self> {
        let mut faces = Vec::with_capacity(pair_count * 2);
        for (id, pair) in catalog.prefix(pair_count)? {
            faces.push((id, pair.first.clone()));
            faces.push((id, pair.second.clone()));
        }

        rng.shuffle(&mut faces);

        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(position, (image_id, face))| Card {
                position,
                image_id,
                face,
            })
            .collect();

        Some(Self { cards })
    }

    /// Build a board from cards in a fixed order. Positions are reassigned
    /// to match the order given.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = (ImageId, String)>) -> Self {
        Self {
            cards: cards
                .into_iter()
                .enumerate()
                .map(|(position, (image_id, face))| Card {
                    position,
                    image_id,
                    face,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards per image id.
    #[must_use]
    pub fn image_counts(&self) -> FxHashMap<ImageId, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.image_id).or_insert(0) += 1;
        }
        counts
    }

    /// Check the two-cards-per-image invariant.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.cards.len() % 2 == 0
            && self.cards.iter().enumerate().all(|(i, c)| c.position == i)
            && self.image_counts().values().all(|&n| n == 2)
    }

    /// Position of the other card sharing `position`'s image.
    #[must_use]
    pub fn partner_of(&self, position: usize) -> Option<usize> {
        let image_id = self.get(position)?.image_id;
        self.cards
            .iter()
            .find(|c| c.image_id == image_id && c.position != position)
            .map(|c| c.position)
    }
}
