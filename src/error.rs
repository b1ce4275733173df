use crate::parse::ParseError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DiceError {
    /// Construction input that can never describe a valid provider.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid expression: {0}")]
    InvalidExpression(#[from] ParseError),
    /// A provider reached a state that cannot be rolled.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl DiceError {
    pub fn invalid_argument(msg: impl ToString) -> Self {
        Self::InvalidArgument(msg.to_string())
    }

    pub fn invalid_operation(msg: impl ToString) -> Self {
        Self::InvalidOperation(msg.to_string())
    }
}

pub type DiceResult<T> = Result<T, DiceError>;
