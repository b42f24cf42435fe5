//! The dependence analyser (component C).
//!
//! Runs once, after the whole rules buffer has been parsed. It resolves
//! every non-terminal's symbolic name to a producer handle, checks that
//! the entry producer exists, and rejects grammars that contain a
//! reachable producer with no terminating derivation.

use std::collections::{HashSet, VecDeque};

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, NonTerminalRef, ProducerId, Token, ENTRY_NAME};

/// Resolve references, verify the entry producer exists, and reject
/// non-productive grammars. Returns the same grammar with every
/// non-terminal token resolved and its entry producer recorded.
pub fn analyse(mut grammar: Grammar) -> Result<Grammar> {
    resolve_references(&mut grammar)?;

    let entry = grammar
        .get(ENTRY_NAME)
        .ok_or_else(|| GrammarError::Misc(format!("no '{}' producer defined", ENTRY_NAME)))?;

    let productive = productive_producers(&grammar);
    check_reachable_are_productive(&grammar, entry, &productive)?;

    grammar.set_entry(entry);
    Ok(grammar)
}

/// Replace every `Unresolved(name)` non-terminal with `Resolved(id)`,
/// looking `name` up in the grammar. Forward references are supported
/// because this runs only after the entire buffer has been parsed.
fn resolve_references(grammar: &mut Grammar) -> Result<()> {
    let ids: Vec<ProducerId> = grammar.producers().map(|(id, _)| id).collect();

    for id in ids {
        let mut resolved_rules = grammar.producer(id).rules.clone();
        for rule in &mut resolved_rules {
            for token in &mut rule.tokens {
                if let Token::NonTerminal(NonTerminalRef::Unresolved(name)) = token {
                    let target = grammar
                        .get(name)
                        .ok_or_else(|| GrammarError::NoSuchProducer(name.clone()))?;
                    *token = Token::NonTerminal(NonTerminalRef::Resolved(target));
                }
            }
        }
        grammar.producer_mut(id).rules = resolved_rules;
    }
    Ok(())
}

/// Fixed-point computation of which producers have at least one rule
/// whose every token is productive (terminals always are; a resolved
/// non-terminal is productive once its target producer is marked so).
fn productive_producers(grammar: &Grammar) -> Vec<bool> {
    let mut productive = vec![false; grammar.len()];

    loop {
        let mut changed = false;
        for (id, producer) in grammar.producers() {
            if productive[id_of(id)] {
                continue;
            }
            let has_productive_rule = producer.rules.iter().any(|rule| {
                rule.tokens.iter().all(|token| match token {
                    Token::Terminal(_) => true,
                    Token::NonTerminal(NonTerminalRef::Resolved(target)) => {
                        productive[id_of(*target)]
                    }
                    Token::NonTerminal(NonTerminalRef::Unresolved(_)) => {
                        unreachable!("resolve_references runs before productivity analysis")
                    }
                })
            });
            if has_productive_rule {
                productive[id_of(id)] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    productive
}

fn id_of(id: ProducerId) -> usize {
    crate::grammar::producer_id_of(id)
}

/// Breadth-first reachability from `entry` over resolved non-terminal
/// edges; the first reachable-but-unproductive producer found is
/// reported by name.
fn check_reachable_are_productive(
    grammar: &Grammar,
    entry: ProducerId,
    productive: &[bool],
) -> Result<()> {
    let mut seen: HashSet<usize> = HashSet::new();
    let mut queue: VecDeque<ProducerId> = VecDeque::new();
    queue.push_back(entry);
    seen.insert(id_of(entry));

    while let Some(id) = queue.pop_front() {
        if !productive[id_of(id)] {
            return Err(GrammarError::NonProductive(format!(
                "{} cannot be instantiated",
                grammar.producer(id).name
            )));
        }
        for rule in &grammar.producer(id).rules {
            for token in &rule.tokens {
                if let Token::NonTerminal(NonTerminalRef::Resolved(target)) = token {
                    if seen.insert(id_of(*target)) {
                        queue.push_back(*target);
                    }
                }
            }
        }
    }

    Ok(())
}
