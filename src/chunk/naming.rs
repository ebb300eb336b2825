//! Chunk file naming convention: `chunk_0000.log`, `chunk_0001.log`, ...

const PREFIX: &str = "chunk_";
const SUFFIX: &str = ".log";
const MIN_DIGITS: usize = 4;

/// File name for the chunk at `index`, zero padded to at least four digits.
pub fn chunk_file_name(index: usize) -> String {
    format!("{}{:0width$}{}", PREFIX, index, SUFFIX, width = MIN_DIGITS)
}

/// Check whether `name` follows the chunk naming convention.
pub fn is_chunk_file_name(name: &str) -> bool {
    name.strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_suffix(SUFFIX))
        .is_some_and(|digits| {
            digits.len() >= MIN_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
        })
}
