//! # ProbeLib
//!
//! Probelib is a library for simulating fixed-capacity hash-based caches
//!
//! It provides a linear-probing table which can be parameterised by a string hasher,
//! and a simulator which replays an ordered key sequence against the table, counting
//! hits, misses, and collisions, and reporting the final load factor
//!
//! Runs are single-threaded, strictly sequential, and fully deterministic: for a
//! fixed capacity and key sequence, repeated runs produce identical results

/// Contains the simulation configuration, which can be parsed from JSON
pub mod config;

/// Contains the error taxonomy for a simulation run
pub mod error;

/// Contains the provided deterministic string hashers, with a trait for implementing
/// custom hashers
pub mod hashers;

/// Contains key-sequence input handling, for key files and inline lists
pub mod io;

/// Contains the simulator used to replay a key sequence against a table, and the
/// result record it produces
pub mod simulator;

/// Contains the implementation of the probing table, and a utility enum for the
/// provided hasher types
pub mod table;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks
pub mod util;
