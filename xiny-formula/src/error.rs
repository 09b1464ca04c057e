use thiserror::Error;

/// Error raised while compiling a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("empty formula")]
    Empty,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("syntax error near \"{0}\"")]
    Syntax(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{func}() expects {expected} arguments, got {got}")]
    ArgCount { func: String, expected: usize, got: usize },
}
