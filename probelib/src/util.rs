/// Generates a deterministic synthetic key sequence for tests and benchmarks
///
/// Produces `total` keys cycling through `unique` distinct values in a fixed order,
/// so repeated runs replay the identical workload. With `total > unique` the sequence
/// revisits every key, which exercises the hit path as well as inserts
///
/// # Arguments
///
/// * `unique`: The number of distinct keys to cycle through
/// * `total`: The length of the generated sequence
///
/// returns: Vec<String>
pub fn synthetic_keys(unique: usize, total: usize) -> Vec<String> {
    let unique = unique.max(1);
    (0..total).map(|i| format!("key-{}", i % unique)).collect()
}
