//! `crunchx` generates every string derivable from a small user-defined
//! context-free grammar, one per line, in a deterministic odometer
//! order.
//!
//! The pipeline is: raw rules text → [`parser`] → [`grammar::Grammar`]
//! (unresolved) → [`analyser`] → resolved, validated `Grammar` →
//! [`cursor::Cursor`] (the enumeration engine) → [`driver`] pumps it to
//! an output stream.
//!
//! # Example
//!
//! ```rust
//! use crunchx::driver;
//!
//! let rules = b"A:'0','1'\nB:'a','b'\nPRODUCER: A B";
//! let mut out = Vec::new();
//! driver::run(rules, &mut out).unwrap();
//! assert_eq!(out, b"0a\n1a\n0b\n1b\n");
//! ```

pub mod analyser;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod rules;

pub use cursor::Cursor;
pub use error::{GrammarError, Result};
pub use grammar::{Grammar, NonTerminalRef, Producer, ProducerId, Rule, Token};
