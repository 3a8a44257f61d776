use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use clap::Parser;
use probelib::config::SimConfig;
use probelib::error::SimError;
use probelib::io::gather_keys;
use probelib::simulator::Simulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Fixed-capacity hash cache simulator"))]
struct Args {
    /// Path to a key file with one key per line
    trace: Option<String>,

    /// Inline comma-delimited key list, an alternative to the key file
    #[arg(short, long)]
    keys: Option<String>,

    /// Path to a JSON config file, e.g. {"capacity": 64, "hash": "fnv"}
    #[arg(short, long)]
    config: Option<String>,

    /// Number of table slots. Overrides the config file
    #[arg(long)]
    capacity: Option<usize>,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => SimConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    let keys = gather_keys(args.trace.as_deref(), args.keys.as_deref()).map_err(|e| e.to_string())?;
    let mut simulator = Simulator::new(&config).map_err(|e| e.to_string())?;
    let result = match simulator.simulate(&keys) {
        Ok(result) => result,
        Err(e) => {
            if let SimError::TableFull { partial, .. } = &e {
                // The run is fail-open: the overflow aborts it, but the counters
                // accumulated before the overflowing key still go out, on stderr so
                // they can't be mistaken for a successful result
                if let Ok(partial_json) = serde_json::to_string_pretty(partial) {
                    eprintln!("Partial result before the overflow:\n{partial_json}");
                }
            }
            return Err(e.to_string());
        }
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&result).map_err(|e| format!("Couldn't serialise the output: {e}"))?
    );
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!(
            "Total execution time (includes input parsing, configuration, and output): {}s",
            total_time.as_nanos() as f64 / 1e9
        )
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        println!(
            "Final table state: {:?}, empty slots: {} of {}",
            simulator.state(),
            simulator.empty_slot_count(),
            config.capacity
        );
    }
    Ok(())
}

fn load_config(path: &str) -> Result<SimConfig, SimError> {
    let bad_config = |reason: String| SimError::BadConfig {
        path: path.to_owned(),
        reason,
    };
    let config_file = File::open(path).map_err(|e| bad_config(e.to_string()))?;
    serde_json::from_reader(BufReader::new(config_file)).map_err(|e| bad_config(e.to_string()))
}
