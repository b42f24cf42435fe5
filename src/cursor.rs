//! The enumeration engine (component D): an odometer-style tree of
//! cursors that lazily yields each derivable string exactly once, in the
//! order defined by the grammar's declaration order.
//!
//! The tree is built once from the (already analysed) grammar and then
//! only mutated by `advance`. It never shares a producer's cursor
//! between two references to that producer: each non-terminal token
//! cursor owns a fresh producer cursor, trading memory for the absence
//! of aliasing (see the design notes on cyclic back-references).

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, NonTerminalRef, ProducerId, Token};

/// How deep `ProducerCursor::build` will recurse before giving up.
///
/// The productivity check in the analyser only guarantees *some*
/// terminating derivation exists for every reachable producer; it does
/// not rule out a productive rule that loops back through another
/// alternative. Building the cursor tree eagerly instantiates every
/// alternative, so such a grammar would recurse without bound while the
/// tree is being built. That case is explicitly out of the finite-
/// language contract, but we still fail cleanly instead of overflowing
/// the stack.
const MAX_CURSOR_DEPTH: usize = 512;

/// A single terminal's one-shot cursor: it has exactly one value, then
/// is exhausted.
#[derive(Debug)]
struct TerminalCursor {
    bytes: Vec<u8>,
    exhausted: bool,
}

impl TerminalCursor {
    fn new(bytes: Vec<u8>) -> Self {
        TerminalCursor {
            bytes,
            exhausted: false,
        }
    }

    fn current(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.bytes);
    }

    fn exhausted(&self) -> bool {
        self.exhausted
    }

    fn advance(&mut self) {
        self.exhausted = true;
    }

    fn reset(&mut self) {
        self.exhausted = false;
    }
}

/// A cursor over a single token: either a one-shot terminal, or a fresh
/// producer cursor owned for the lifetime of this position in the tree.
#[derive(Debug)]
enum TokenCursor {
    Terminal(TerminalCursor),
    NonTerminal(Box<ProducerCursor>),
}

impl TokenCursor {
    fn build(grammar: &Grammar, token: &Token, depth: usize) -> Result<Self> {
        match token {
            Token::Terminal(bytes) => Ok(TokenCursor::Terminal(TerminalCursor::new(bytes.clone()))),
            Token::NonTerminal(NonTerminalRef::Resolved(id)) => Ok(TokenCursor::NonTerminal(
                Box::new(ProducerCursor::build(grammar, *id, depth + 1)?),
            )),
            Token::NonTerminal(NonTerminalRef::Unresolved(name)) => Err(GrammarError::Misc(
                format!("unresolved non-terminal '{}' reached the enumeration engine", name),
            )),
        }
    }

    fn current(&self, out: &mut Vec<u8>) {
        match self {
            TokenCursor::Terminal(t) => t.current(out),
            TokenCursor::NonTerminal(p) => p.current(out),
        }
    }

    fn exhausted(&self) -> bool {
        match self {
            TokenCursor::Terminal(t) => t.exhausted(),
            TokenCursor::NonTerminal(p) => p.exhausted(),
        }
    }

    fn advance(&mut self) {
        match self {
            TokenCursor::Terminal(t) => t.advance(),
            TokenCursor::NonTerminal(p) => p.advance(),
        }
    }

    fn reset(&mut self) {
        match self {
            TokenCursor::Terminal(t) => t.reset(),
            TokenCursor::NonTerminal(p) => p.reset(),
        }
    }
}

/// A cursor over a single rule (alternative): one token cursor per
/// token, plus an explicit exhaustion flag.
#[derive(Debug)]
struct RuleCursor {
    tokens: Vec<TokenCursor>,
    exhausted: bool,
}

impl RuleCursor {
    fn build(grammar: &Grammar, tokens: &[Token], depth: usize) -> Result<Self> {
        let tokens = tokens
            .iter()
            .map(|t| TokenCursor::build(grammar, t, depth))
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleCursor {
            tokens,
            exhausted: false,
        })
    }

    fn current(&self, out: &mut Vec<u8>) {
        for t in &self.tokens {
            t.current(out);
        }
    }

    fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Odometer step: the first token is the least significant digit.
    /// Advance it; if it rolled over, reset it and carry into the next.
    /// If every token carries, the whole rule is exhausted.
    fn advance(&mut self) {
        for token in &mut self.tokens {
            token.advance();
            if !token.exhausted() {
                return;
            }
            token.reset();
        }
        self.exhausted = true;
    }

    fn reset(&mut self) {
        self.exhausted = false;
        for t in &mut self.tokens {
            t.reset();
        }
    }
}

/// A cursor over a producer: one rule cursor per alternative, plus the
/// index of the currently active alternative.
#[derive(Debug)]
struct ProducerCursor {
    rules: Vec<RuleCursor>,
    active: usize,
}

impl ProducerCursor {
    fn build(grammar: &Grammar, id: ProducerId, depth: usize) -> Result<Self> {
        if depth > MAX_CURSOR_DEPTH {
            return Err(GrammarError::NonProductive(format!(
                "'{}' recurses past depth {} while building the enumeration tree; \
                 the grammar likely has a productive cycle, which yields an infinite language",
                grammar.producer(id).name,
                MAX_CURSOR_DEPTH
            )));
        }
        let producer = grammar.producer(id);
        let rules = producer
            .rules
            .iter()
            .map(|r| RuleCursor::build(grammar, &r.tokens, depth))
            .collect::<Result<Vec<_>>>()?;
        Ok(ProducerCursor { rules, active: 0 })
    }

    fn exhausted(&self) -> bool {
        self.active >= self.rules.len()
    }

    fn current(&self, out: &mut Vec<u8>) {
        debug_assert!(!self.exhausted());
        self.rules[self.active].current(out);
    }

    fn advance(&mut self) {
        if self.exhausted() {
            return;
        }
        let active = self.active;
        self.rules[active].advance();
        if self.rules[active].exhausted() {
            self.rules[active].reset();
            self.active += 1;
        }
    }

    fn reset(&mut self) {
        self.active = 0;
        for r in &mut self.rules {
            r.reset();
        }
    }
}

/// The top-level enumeration engine: a cursor tree rooted at the
/// grammar's entry producer.
#[derive(Debug)]
pub struct Cursor {
    root: ProducerCursor,
}

impl Cursor {
    /// Build a fresh cursor tree over `grammar`'s entry producer.
    /// `grammar` must already have passed [`crate::analyser::analyse`].
    pub fn new(grammar: &Grammar) -> Result<Self> {
        let entry = grammar
            .entry()
            .ok_or_else(|| GrammarError::InvalidRules("grammar has not been analysed".into()))?;
        let root = ProducerCursor::build(grammar, entry, 0)?;
        Ok(Cursor { root })
    }

    /// Write the string currently designated by the cursor tree into
    /// `out`, replacing its previous contents. Undefined if the cursor
    /// is exhausted.
    pub fn current(&self, out: &mut Vec<u8>) {
        out.clear();
        self.root.current(out);
    }

    /// Convenience wrapper around [`Cursor::current`] for callers that
    /// want an owned buffer.
    pub fn current_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.current(&mut out);
        out
    }

    /// Move to the next string in enumeration order.
    pub fn advance(&mut self) {
        self.root.advance();
    }

    /// Whether every string has already been emitted.
    pub fn exhausted(&self) -> bool {
        self.root.exhausted()
    }

    /// Reset the cursor to the first string, without rebuilding the
    /// tree. After this call, `current` yields the same string a freshly
    /// built cursor would.
    pub fn reset(&mut self) {
        self.root.reset();
    }
}
