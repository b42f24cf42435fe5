//! The command-line front-end (component H): a small hand-rolled
//! argument loop over the four-flag surface in the external interface
//! spec, wiring rules I/O through the parser, analyser and enumeration
//! engine down to stdout.
//!
//! This deliberately does not reach for a derive-macro argument parser:
//! the surface is smaller than what one is built for, and the exact
//! diagnostic shape required here — a single `ERROR:<message>` line, not
//! a generated usage block — is simpler to guarantee directly.

use std::path::PathBuf;
use std::process::ExitCode;

use crunchx::error::GrammarError;
use crunchx::{driver, rules};

const HELP: &str = "\
crunchx - exhaustive grammar-driven string enumerator

USAGE:
    crunchx [-f <rules-file>]
    crunchx -l
    crunchx -h

OPTIONS:
    -f <rules-file>   Load rules from <rules-file> instead of crunchx.rul
    -l                Write the built-in default rules to crunchx.rul and exit
    -h                Print this help text and exit

With no arguments, crunchx.rul is used; if it does not exist, the
built-in default rules are written there first, then loaded.

Each derivable string is written to stdout, one per line, in the
deterministic order documented by the enumeration engine.";

enum Command {
    Help,
    WriteDefaultRules,
    /// `-f <path>` was given explicitly: a missing file is an error, never
    /// auto-created.
    GenerateFromPath { rules_path: PathBuf },
    /// No `-f` was given: fall back to `crunchx.rul`, writing the built-in
    /// default rules there first if it doesn't exist yet.
    GenerateFromDefault,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, GrammarError> {
    let mut rules_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" => return Ok(Command::Help),
            "-l" => return Ok(Command::WriteDefaultRules),
            "-f" => {
                let path = args.next().ok_or_else(|| {
                    GrammarError::InvalidParam("-f requires a file path argument".to_string())
                })?;
                rules_path = Some(PathBuf::from(path));
            }
            other => {
                return Err(GrammarError::InvalidParam(format!(
                    "unknown argument '{}'",
                    other
                )));
            }
        }
    }

    Ok(match rules_path {
        Some(rules_path) => Command::GenerateFromPath { rules_path },
        None => Command::GenerateFromDefault,
    })
}

fn run() -> Result<(), GrammarError> {
    match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", HELP);
            Ok(())
        }
        Command::WriteDefaultRules => rules::write_default_rules(rules::DEFAULT_RULES_PATH),
        Command::GenerateFromPath { rules_path } => {
            let buf = rules::load_rules(&rules_path)?;
            driver::run_to_stdout(&buf)
        }
        Command::GenerateFromDefault => {
            let path = rules::DEFAULT_RULES_PATH;
            if !std::path::Path::new(path).exists() {
                rules::write_default_rules(path)?;
            }
            let buf = rules::load_rules(path)?;
            driver::run_to_stdout(&buf)
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR:{}", err);
            if matches!(err, GrammarError::InvalidParam(_)) {
                println!("{}", HELP);
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_uses_default_rules_path() {
        assert!(matches!(
            parse_args(args(&[]).into_iter()).unwrap(),
            Command::GenerateFromDefault
        ));
    }

    #[test]
    fn dash_f_sets_rules_path() {
        match parse_args(args(&["-f", "custom.rul"]).into_iter()).unwrap() {
            Command::GenerateFromPath { rules_path } => {
                assert_eq!(rules_path, PathBuf::from("custom.rul"));
            }
            _ => panic!("expected GenerateFromPath"),
        }
    }

    #[test]
    fn dash_h_is_help() {
        assert!(matches!(
            parse_args(args(&["-h"]).into_iter()).unwrap(),
            Command::Help
        ));
    }

    #[test]
    fn dash_l_is_write_default_rules() {
        assert!(matches!(
            parse_args(args(&["-l"]).into_iter()).unwrap(),
            Command::WriteDefaultRules
        ));
    }

    #[test]
    fn dash_f_without_value_is_invalid_param() {
        let err = parse_args(args(&["-f"]).into_iter()).unwrap_err();
        assert!(matches!(err, GrammarError::InvalidParam(_)));
    }

    #[test]
    fn unknown_flag_is_invalid_param() {
        let err = parse_args(args(&["--bogus"]).into_iter()).unwrap_err();
        assert!(matches!(err, GrammarError::InvalidParam(_)));
        assert!(err.to_string().contains("--bogus"));
    }
}
