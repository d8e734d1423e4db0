use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Whether a shuffled "next" also resumes playback, like a sequential "next" does.
    pub shuffle_resumes_playback: bool,

    /// Fixed seed for the shuffle order. Entropy when unset.
    pub seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            shuffle_resumes_playback: true,
            seed: None,
        }
    }
}

impl PlayerConfig {
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
