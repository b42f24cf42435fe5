//! The rule parser (component B): turns a raw byte buffer into a
//! [`Grammar`] of unresolved producers.
//!
//! The parser is a small per-line state machine, driven byte by byte as
//! described by the line grammar `NAME : ELEMENT (',' ELEMENT)*`. It never
//! looks beyond the current line, and it never resolves a non-terminal
//! reference — that is the analyser's job (see [`crate::analyser`]), so
//! that forward references work regardless of definition order.

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Rule, Token};

/// Largest rules buffer the parser will accept, per the file-format
/// contract. Enforced here as well as at the I/O boundary so a caller
/// that hands the parser a buffer directly (e.g. a test, or an embedded
/// default) gets the same guarantee as one that loads from disk.
pub const MAX_RULES_SIZE: usize = 2 * 1024 * 1024;

#[derive(Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Terminal,
    Identifier,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Element,
    Quoted(u8),
    AfterQuoted,
}

/// Parse `buf` into a [`Grammar`] whose non-terminal tokens are still
/// unresolved symbol names.
///
/// Parsing stops at the first malformed line; the returned error names
/// the 1-based line number and the offending (carriage-return- and
/// newline-stripped) line text.
pub fn parse(buf: &[u8]) -> Result<Grammar> {
    if buf.len() > MAX_RULES_SIZE {
        return Err(GrammarError::FileTooLarge(format!(
            "rules buffer is {} bytes, limit is {} bytes",
            buf.len(),
            MAX_RULES_SIZE
        )));
    }

    let mut grammar = Grammar::new();
    let mut line_no = 1usize;

    for raw_line in split_lines(buf) {
        let line_text = strip_cr(raw_line);
        parse_line(&mut grammar, &line_text, line_no)?;
        line_no += 1;
    }

    Ok(grammar)
}

/// Split a buffer into lines on `\n`, dropping the trailing newline from
/// each line but keeping an empty final line out of the result (a
/// trailing newline at end-of-buffer does not introduce a spurious
/// extra blank line; an actual blank final line, without a trailing
/// newline, is still delivered so it can be skipped like any other).
fn split_lines(buf: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, &b) in buf.iter().enumerate() {
        if b == b'\n' {
            lines.push(&buf[start..i]);
            start = i + 1;
        }
    }
    if start < buf.len() {
        lines.push(&buf[start..]);
    }
    lines
}

fn strip_cr(line: &[u8]) -> Vec<u8> {
    line.iter().copied().filter(|&b| b != b'\r').collect()
}

fn line_err(line: &[u8], line_no: usize, why: &str) -> GrammarError {
    let text = String::from_utf8_lossy(line);
    GrammarError::InvalidGrammar(format!("line {}: {}: {}", line_no, why, text))
}

fn parse_line(grammar: &mut Grammar, line: &[u8], line_no: usize) -> Result<()> {
    if is_comment_or_blank(line) {
        return Ok(());
    }

    let (name, rest) = parse_name(line, line_no)?;
    let rules = parse_elements(rest, line, line_no)?;

    for rule in rules {
        grammar.add_rule(&name, rule);
    }
    Ok(())
}

/// A line is a comment if its first non-space, non-tab byte is `#`; it is
/// blank if it has no non-space bytes at all.
fn is_comment_or_blank(line: &[u8]) -> bool {
    for &b in line {
        match b {
            b' ' | b'\t' => continue,
            b'#' => return true,
            _ => return false,
        }
    }
    true
}

/// Consume the `NAME :` prefix of a line. Leading/trailing spaces around
/// the name are ignored; an interior space (a gap between two runs of
/// name characters) is rejected.
fn parse_name<'a>(line: &'a [u8], line_no: usize) -> Result<(String, &'a [u8])> {
    let mut name: Vec<u8> = Vec::new();
    let mut seen_gap_after_name = false;
    let mut i = 0;

    while i < line.len() {
        let b = line[i];
        match b {
            b'\t' => {}
            b':' => {
                if name.is_empty() {
                    return Err(line_err(line, line_no, "empty producer name"));
                }
                return Ok((String::from_utf8_lossy(&name).into_owned(), &line[i + 1..]));
            }
            b' ' => {
                if !name.is_empty() {
                    seen_gap_after_name = true;
                }
            }
            other => {
                if seen_gap_after_name {
                    return Err(line_err(line, line_no, "space inside producer name"));
                }
                name.push(other);
            }
        }
        i += 1;
    }

    Err(line_err(line, line_no, "missing ':' after producer name"))
}

/// Parse the element list after the `:` into one or more alternative
/// rules, following the state machine in the rule-parser specification.
fn parse_elements(rest: &[u8], full_line: &[u8], line_no: usize) -> Result<Vec<Rule>> {
    let mut state = State::Element;
    let mut acc: Vec<u8> = Vec::new();
    let mut acc_kind: Option<TokenKind> = None;
    let mut rule_tokens: Vec<Token> = Vec::new();
    let mut rules: Vec<Rule> = Vec::new();
    // Set immediately after a comma commits a rule; cleared as soon as a new
    // element starts. If it's still set at end-of-line, the comma had
    // nothing following it and the line is malformed.
    let mut dangling_comma = false;

    macro_rules! commit_token {
        () => {
            match acc_kind.take() {
                Some(TokenKind::Terminal) => {
                    rule_tokens.push(Token::Terminal(std::mem::take(&mut acc)));
                }
                Some(TokenKind::Identifier) => {
                    let name = String::from_utf8_lossy(&acc).into_owned();
                    acc.clear();
                    rule_tokens.push(Token::unresolved(name));
                }
                None => {}
            }
        };
    }

    macro_rules! commit_rule {
        () => {
            if rule_tokens.is_empty() {
                return Err(line_err(full_line, line_no, "empty rule"));
            }
            rules.push(Rule::new(std::mem::take(&mut rule_tokens)));
        };
    }

    for &b in rest {
        if b == b'\t' {
            continue;
        }
        match state {
            State::Element => match b {
                b'\'' | b'"' => {
                    dangling_comma = false;
                    acc.clear();
                    acc_kind = Some(TokenKind::Terminal);
                    state = State::Quoted(b);
                }
                b',' => {
                    commit_token!();
                    commit_rule!();
                    dangling_comma = true;
                }
                b' ' => {
                    if acc_kind.is_some() {
                        commit_token!();
                    }
                }
                other => {
                    dangling_comma = false;
                    acc_kind = Some(TokenKind::Identifier);
                    acc.push(other);
                }
            },
            State::Quoted(quote) => {
                if b == quote {
                    state = State::AfterQuoted;
                } else {
                    acc.push(b);
                }
            }
            State::AfterQuoted => match b {
                b' ' => {}
                b',' => {
                    commit_token!();
                    commit_rule!();
                    dangling_comma = true;
                    state = State::Element;
                }
                other => {
                    commit_token!();
                    state = State::Element;
                    dangling_comma = false;
                    acc_kind = Some(TokenKind::Identifier);
                    acc.push(other);
                }
            },
        }
    }

    if matches!(state, State::Quoted(_)) {
        return Err(line_err(full_line, line_no, "unterminated quoted literal"));
    }
    if dangling_comma {
        return Err(line_err(full_line, line_no, "trailing comma with no following element"));
    }

    commit_token!();
    if rule_tokens.is_empty() && rules.is_empty() {
        return Err(line_err(full_line, line_no, "no elements"));
    }
    if !rule_tokens.is_empty() {
        commit_rule!();
    }

    Ok(rules)
}
