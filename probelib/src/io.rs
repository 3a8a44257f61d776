use std::fs::File;
use std::io::BufRead;

use crate::error::SimError;

/// Resolves the two external input forms into one ordered key sequence
///
/// Exactly one form must be supplied, and it must yield at least one key; anything
/// else is a configuration error, raised before any simulation work happens
///
/// # Arguments
///
/// * `file`: Path to a key file with one key per line, if given
/// * `inline`: A comma-delimited key list, if given
///
/// returns: Result<Vec<String>, SimError>
pub fn gather_keys(file: Option<&str>, inline: Option<&str>) -> Result<Vec<String>, SimError> {
    let keys = match (file, inline) {
        (Some(_), Some(_)) => return Err(SimError::AmbiguousInput),
        (Some(path), None) => read_key_file(path)?,
        (None, Some(list)) => parse_inline(list),
        (None, None) => return Err(SimError::NoInput),
    };
    if keys.is_empty() {
        return Err(SimError::NoInput);
    }
    Ok(keys)
}

/// Reads a key file into an ordered key sequence, one key per line
///
/// Blank and whitespace-only lines are dropped. Every other line is kept byte-exact
/// minus its terminator, duplicates included, in file order
pub fn read_key_file(path: &str) -> Result<Vec<String>, SimError> {
    let key_file_error = |source| SimError::KeyFile {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(key_file_error)?;
    let reader = get_reader(file).map_err(key_file_error)?;
    let mut keys = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(key_file_error)?;
        if !line.trim().is_empty() {
            keys.push(line);
        }
    }
    Ok(keys)
}

/// Parses an inline comma-delimited key list
///
/// Entries are trimmed of surrounding whitespace and empty entries are dropped;
/// order and duplicates are preserved
///
/// # Examples
///
/// ```
/// use probelib::io::parse_inline;
/// assert_eq!(parse_inline("a, b,,c"), vec!["a", "b", "c"]);
/// ```
pub fn parse_inline(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

fn get_reader(file: File) -> std::io::Result<impl BufRead> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        // A multiple of 4096, the standard block size (or a multiple of it) on most systems
        const BUFFER_SIZE: usize = 64 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file for speed on unix systems
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // Key files are consumed line by line front to back, so sequential advice applies
        unsafe {
            let m = Mmap::map(&file)?;
            m.advise(Advice::Sequential)?;
            Ok(Cursor::new(m))
        }
    }
}
