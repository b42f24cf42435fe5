use thiserror::Error;

/// The complete failure taxonomy for the grammar pipeline, from loading a
/// rules file through parsing, analysis and enumeration.
///
/// Every component threads this single type rather than an ad hoc
/// `Box<dyn Error>`, so the CLI front-end can map a failure to a stable,
/// distinct exit code without string-matching a message.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("cannot open file: {0}")]
    CannotOpenFile(String),

    #[error("file too large: {0}")]
    FileTooLarge(String),

    #[error("error reading file: {0}")]
    ReadFileError(String),

    #[error("error writing file: {0}")]
    WriteFileError(String),

    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("invalid grammar: {0}")]
    InvalidGrammar(String),

    #[error("no such producer: {0}")]
    NoSuchProducer(String),

    #[error("non-productive grammar: {0}")]
    NonProductive(String),

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("{0}")]
    Misc(String),
}

impl GrammarError {
    /// A short, stable, machine-distinguishable name for the error kind.
    ///
    /// Used for exit-code selection and for tests that want to assert on
    /// the kind of failure without matching the full message text.
    pub fn kind(&self) -> &'static str {
        match self {
            GrammarError::CannotOpenFile(_) => "CannotOpenFile",
            GrammarError::FileTooLarge(_) => "FileTooLarge",
            GrammarError::ReadFileError(_) => "ReadFileError",
            GrammarError::WriteFileError(_) => "WriteFileError",
            GrammarError::InvalidRules(_) => "InvalidRules",
            GrammarError::InvalidGrammar(_) => "InvalidGrammar",
            GrammarError::NoSuchProducer(_) => "NoSuchProducer",
            GrammarError::NonProductive(_) => "NonProductive",
            GrammarError::InvalidParam(_) => "InvalidParam",
            GrammarError::Misc(_) => "Misc",
        }
    }

    /// The process exit code a CLI front-end should use for this error.
    ///
    /// Distinct, stable, non-zero per kind; magnitudes are otherwise
    /// arbitrary (the spec leaves them implementation-defined).
    pub fn exit_code(&self) -> i32 {
        match self {
            GrammarError::CannotOpenFile(_) => 1,
            GrammarError::FileTooLarge(_) => 2,
            GrammarError::ReadFileError(_) => 3,
            GrammarError::WriteFileError(_) => 4,
            GrammarError::InvalidRules(_) => 5,
            GrammarError::InvalidGrammar(_) => 6,
            GrammarError::NoSuchProducer(_) => 7,
            GrammarError::NonProductive(_) => 8,
            GrammarError::InvalidParam(_) => 9,
            GrammarError::Misc(_) => 10,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GrammarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_nonzero_and_distinct() {
        let errors = vec![
            GrammarError::CannotOpenFile("x".into()),
            GrammarError::FileTooLarge("x".into()),
            GrammarError::ReadFileError("x".into()),
            GrammarError::WriteFileError("x".into()),
            GrammarError::InvalidRules("x".into()),
            GrammarError::InvalidGrammar("x".into()),
            GrammarError::NoSuchProducer("x".into()),
            GrammarError::NonProductive("x".into()),
            GrammarError::InvalidParam("x".into()),
            GrammarError::Misc("x".into()),
        ];

        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        for code in &codes {
            assert_ne!(*code, 0);
        }
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn message_is_included_in_display() {
        let err = GrammarError::NoSuchProducer("Q".to_string());
        assert!(err.to_string().contains('Q'));
    }
}
