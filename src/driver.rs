//! The driver (component E): orchestrates parsing, analysis and
//! enumeration, and pumps the cursor to a writer one string per line.

use std::io::{self, Write};

use crate::analyser::analyse;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::grammar::Grammar;
use crate::parser::parse;

/// Parse and analyse `rules`, returning the validated [`Grammar`].
///
/// Split out from [`run`] so callers that only want the grammar (e.g. to
/// report producer counts before generating) don't have to build a
/// cursor they won't use.
pub fn load(rules: &[u8]) -> Result<Grammar> {
    analyse(parse(rules)?)
}

/// Parse, analyse and enumerate `rules`, writing one derived string per
/// line to `out` until the grammar's language is exhausted.
pub fn run(rules: &[u8], out: &mut impl Write) -> Result<()> {
    let grammar = load(rules)?;
    let mut cursor = Cursor::new(&grammar)?;
    let mut line = Vec::new();

    while !cursor.exhausted() {
        cursor.current(&mut line);
        out.write_all(&line)?;
        out.write_all(b"\n")?;
        cursor.advance();
    }

    Ok(())
}

impl From<io::Error> for crate::error::GrammarError {
    fn from(err: io::Error) -> Self {
        crate::error::GrammarError::WriteFileError(err.to_string())
    }
}

/// Run the full pipeline over `rules`, writing to a buffered stdout.
pub fn run_to_stdout(rules: &[u8]) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());
    run(rules, &mut writer)?;
    writer.flush()?;
    Ok(())
}
