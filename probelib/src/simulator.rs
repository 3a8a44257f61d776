use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::{HashKindConfig, SimConfig};
use crate::error::SimError;
use crate::hashers::{Fnv1a, Polynomial};
use crate::table::{AccessOutcome, GenericTable, Table, TableState, TableTrait};

/// The simulator owns a table and its counters, replays keys strictly in input order,
/// and collects results.
///
/// It supports calling simulate multiple times within a run, and will update the time
/// taken to simulate and the counters accordingly. A simulator must not be shared
/// across runs; each run constructs its own
#[derive(Debug)]
pub struct Simulator<T: TableTrait = GenericTable> {
    table: T,
    hits: u64,
    misses: u64,
    collisions: u64,
    simulation_time: Duration,
}

/// The result of a simulation run. Can be serialised to the required output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub hits: u64,
    pub misses: u64,
    pub collisions: u64,
    pub load_factor: f64,
}

/// How a single processed key resolved
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Hit,
    Miss,
}

impl Simulator<GenericTable> {
    /// Creates a new simulator for a given configuration
    ///
    /// # Arguments
    ///
    /// * `config`: A simulation configuration, usually resulting from parsing JSON
    ///
    /// returns: Result<Simulator, SimError>
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        Ok(Self::with_table(Self::config_to_table(config)?))
    }

    /// Creates a new table from a configuration
    fn config_to_table(config: &SimConfig) -> Result<GenericTable, SimError> {
        if config.capacity == 0 {
            return Err(SimError::ZeroCapacity);
        }
        Ok(match config.hash {
            HashKindConfig::Fnv => GenericTable::from(Table::new(config.capacity, Fnv1a)),
            HashKindConfig::Polynomial => {
                GenericTable::from(Table::new(config.capacity, Polynomial))
            }
        })
    }
}

impl<T: TableTrait> Simulator<T> {
    /// Creates a simulator around an existing table, for when the hasher is picked
    /// directly rather than through a configuration
    pub fn with_table(table: T) -> Self {
        Self {
            table,
            hits: 0,
            misses: 0,
            collisions: 0,
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Processes a single key against the table
    ///
    /// Exactly one of the hit or miss counters is incremented, plus one collision per
    /// probe step that landed on a slot holding a different key. The exception is the
    /// table-full failure: the key that triggers it changes no counter at all, and the
    /// error carries the counters as they stood before that key
    ///
    /// # Arguments
    ///
    /// * `key`: The key to process. Equality against stored keys is byte-exact
    ///
    /// returns: Result<Access, SimError>
    pub fn process(&mut self, key: &str) -> Result<Access, SimError> {
        match self.table.probe_and_update(key) {
            AccessOutcome::Hit { collisions } => {
                self.collisions += collisions;
                self.hits += 1;
                Ok(Access::Hit)
            }
            AccessOutcome::Miss { collisions } => {
                self.collisions += collisions;
                self.misses += 1;
                Ok(Access::Miss)
            }
            AccessOutcome::Exhausted => Err(SimError::TableFull {
                key: key.to_owned(),
                capacity: self.table.capacity(),
                partial: self.report(),
            }),
        }
    }

    /// Replays an ordered key sequence against the table
    ///
    /// Keys are processed one at a time in input order; there is no reordering and no
    /// batching. On a table-full failure the run stops immediately, no further keys
    /// are consumed, and the error carries the partial result
    ///
    /// # Arguments
    ///
    /// * `keys`: The key sequence, in access order
    ///
    /// returns: Result<ResultRecord, SimError>
    pub fn simulate(&mut self, keys: &[String]) -> Result<ResultRecord, SimError> {
        let start = Instant::now();
        for key in keys {
            if let Err(e) = self.process(key) {
                self.simulation_time += start.elapsed();
                return Err(e);
            }
        }
        self.simulation_time += start.elapsed();
        Ok(self.report())
    }

    /// Assembles the result record from the final counters and occupancy
    ///
    /// Purely a read of simulator state; the load factor is computed here, once the
    /// run has reached a terminal state
    pub fn report(&self) -> ResultRecord {
        ResultRecord {
            hits: self.hits,
            misses: self.misses,
            collisions: self.collisions,
            load_factor: self.table.load_factor(),
        }
    }

    /// Gets the coarse state of the table, accepting or full
    pub fn state(&self) -> TableState {
        self.table.state()
    }

    /// Gets the number of empty slots left in the table. Useful for debugging
    pub fn empty_slot_count(&self) -> usize {
        self.table.empty_slot_count()
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }
}
