//! The ordered image-pair catalog boards are dealt from.

use serde::{Deserialize, Serialize};

/// Paths of the built-in pairs.
const DEFAULT_PAIRS: [(&str, &str); 12] = [
    ("./image/image1.jpg", "./image/image2.jpg"),
    ("./image/image5.jpg", "./image/image6.jpg"),
    ("./image/image9.jpg", "./image/image10.jpg"),
    ("./image/image13.jpg", "./image/image14.jpg"),
    ("./image/image17.jpg", "./image/image18.jpg"),
    ("./image/image21.jpg", "./image/image22.jpg"),
    ("./image/image25.jpg", "./image/image26.jpg"),
    ("./image/image29.jpg", "./image/image30.jpg"),
    ("./image/image33.jpg", "./image/image34.jpg"),
    ("./image/image37.jpg", "./image/image38.jpg"),
    ("./image/image41.jpg", "./image/image42.jpg"),
    ("./image/image45.jpg", "./image/image46.jpg"),
];

/// Match key shared by the two cards dealt from one catalog pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub u16);

impl ImageId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Image({})", self.0)
    }
}

/// Two related images that form one matching pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    pub first: String,
    pub second: String,
}

impl ImagePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Ordered catalog of image pairs. Tiers take a prefix of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCatalog {
    pairs: Vec<ImagePair>,
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAIRS
                .iter()
                .map(|(a, b)| ImagePair::new(*a, *b))
                .collect(),
        )
    }
}

impl ImageCatalog {
    #[must_use]
    pub fn new(pairs: Vec<ImagePair>) -> Self {
        Self { pairs }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up a pair by its match key.
    #[must_use]
    pub fn get(&self, id: ImageId) -> Option<&ImagePair> {
        self.pairs.get(id.0 as usize)
    }

    /// The first `count` pairs with their ids, or `None` if the catalog is
    /// shorter than that.
    pub fn prefix(&self, count: usize) -> Option<impl Iterator<Item = (ImageId, &ImagePair)>> {
        if count > self.pairs.len() {
            return None;
        }
        Some(
            self.pairs[..count]
                .iter()
                .enumerate()
                .map(|(i, pair)| (ImageId::new(i as u16), pair)),
        )
    }
}
