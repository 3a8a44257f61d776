use serde::Deserialize;

/// The default slot count
const DEFAULT_CAPACITY: usize = 64;

/// A simulation configuration, usually resulting from parsing JSON
#[derive(Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "HashKindConfig::default")]
    pub hash: HashKindConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hash: HashKindConfig::default(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// The hash function - fnv or poly. Defaults to FNV-1a.
#[derive(Debug, Copy, Clone, Deserialize)]
pub enum HashKindConfig {
    #[serde(alias = "fnv")]
    Fnv,
    #[serde(alias = "poly")]
    Polynomial,
}

impl Default for HashKindConfig {
    fn default() -> Self {
        HashKindConfig::Fnv
    }
}
