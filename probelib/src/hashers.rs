/// A generic trait for implementing new string hashers. Can be used to parameterise a Table.
pub trait KeyHasher {
    /// Hashes a key to a 64-bit value. The table reduces this modulo its capacity to
    /// get the home bucket.
    ///
    /// Implementations must be deterministic and unseeded: the same key must hash to
    /// the same value in every run, or results stop being reproducible. This rules out
    /// the standard library's `RandomState`, which is seeded per process.
    ///
    /// # Arguments
    ///
    /// * `key`: The key to hash
    ///
    /// returns: u64
    fn hash(&self, key: &str) -> u64;
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the key bytes. The default hasher.
///
/// Small, well distributed for short string keys, and trivially deterministic, which
/// is all the simulation needs
#[derive(Debug, Default)]
pub struct Fnv1a;

impl KeyHasher for Fnv1a {
    fn hash(&self, key: &str) -> u64 {
        let mut state = FNV_OFFSET_BASIS;
        for byte in key.bytes() {
            state ^= byte as u64;
            state = state.wrapping_mul(FNV_PRIME);
        }
        state
    }
}

/// A djb2-style polynomial hash, provided as an alternative distribution
///
/// Cheaper per byte than FNV-1a but clusters more on similar keys, which makes it
/// useful for comparing collision behaviour between runs
#[derive(Debug, Default)]
pub struct Polynomial;

impl KeyHasher for Polynomial {
    fn hash(&self, key: &str) -> u64 {
        let mut state: u64 = 5381;
        for byte in key.bytes() {
            state = state.wrapping_mul(33) ^ byte as u64;
        }
        state
    }
}
