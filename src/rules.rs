//! Rules file I/O (component G) and the embedded default grammar.
//!
//! Kept separate from the B/C/D/E core so that core stays pure and
//! host-agnostic; only this module touches the filesystem.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{GrammarError, Result};
use crate::parser::MAX_RULES_SIZE;

/// The embedded default rules, written out by `-l` and by a bare
/// invocation when `crunchx.rul` does not yet exist.
///
/// Defines `NUM`, `LITER_LOWER`, `LITER_UPPER`, `LITER` (the union of
/// the two letter sets), `WORD` (a single-token alternative of `LITER`
/// or `NUM`), and the entry producer as eight concatenated `WORD`s.
pub const DEFAULT_RULES: &str = concat!(
    "NUM:'0','1','2','3','4','5','6','7','8','9'\n",
    "LITER_LOWER:'a','b','c','d','e','f','g','h','i','j','k','l','m',",
    "'n','o','p','q','r','s','t','u','v','w','x','y','z'\n",
    "LITER_UPPER:'A','B','C','D','E','F','G','H','I','J','K','L','M',",
    "'N','O','P','Q','R','S','T','U','V','W','X','Y','Z'\n",
    "LITER: LITER_LOWER , LITER_UPPER\n",
    "WORD: LITER , NUM\n",
    "PRODUCER: WORD WORD WORD WORD WORD WORD WORD WORD\n",
);

/// The default rules file name used when no `-f <path>` is given.
pub const DEFAULT_RULES_PATH: &str = "crunchx.rul";

/// Load a rules file from `path`.
///
/// Reads at most `MAX_RULES_SIZE + 1` bytes so an oversized file is
/// detected without reading the whole thing into memory.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = fs::File::open(path).map_err(|e| {
        GrammarError::CannotOpenFile(format!("{}: {}", path.display(), e))
    })?;

    let mut buf = Vec::new();
    file.take((MAX_RULES_SIZE as u64) + 1)
        .read_to_end(&mut buf)
        .map_err(|e| GrammarError::ReadFileError(format!("{}: {}", path.display(), e)))?;

    if buf.len() > MAX_RULES_SIZE {
        return Err(GrammarError::FileTooLarge(format!(
            "{} exceeds the {}-byte limit",
            path.display(),
            MAX_RULES_SIZE
        )));
    }

    Ok(buf)
}

/// Write the embedded default rules to `path`.
pub fn write_default_rules(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, DEFAULT_RULES.as_bytes())
        .map_err(|e| GrammarError::WriteFileError(format!("{}: {}", path.display(), e)))
}
