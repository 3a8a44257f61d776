use std::io;
use thiserror::Error;

use crate::simulator::ResultRecord;

/// The errors a simulation run can end with
///
/// Everything except `TableFull` is a configuration error, detected before any key is
/// processed. `TableFull` is the one mid-run failure: it stops the run at the
/// offending key and carries the counters accumulated up to, but not including, that
/// key. None of these are recoverable within a run
#[derive(Debug, Error)]
pub enum SimError {
    #[error("no input keys supplied")]
    NoInput,

    #[error("both a key file and an inline key list were supplied, expected exactly one")]
    AmbiguousInput,

    #[error("couldn't read the key file at path {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("couldn't load the config file at path {path}: {reason}")]
    BadConfig { path: String, reason: String },

    #[error("table capacity must be at least one slot")]
    ZeroCapacity,

    #[error("table full: no empty slot for new key {key:?}, all {capacity} slots hold other keys")]
    TableFull {
        key: String,
        capacity: usize,
        partial: ResultRecord,
    },
}

impl SimError {
    /// True for errors raised before the simulation starts, false for the mid-run
    /// table-full failure. Callers relaying errors upward must not conflate the two
    pub fn is_configuration(&self) -> bool {
        !matches!(self, SimError::TableFull { .. })
    }
}
