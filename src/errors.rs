use thiserror::Error;
use uuid::Uuid;

/// Convenience alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type that captures the engine's recoverable validation failures.
///
/// Every variant is a local, user-correctable rejection: callers surface the
/// message and re-prompt. Reads never produce these; a broken display join
/// degrades to a fallback label instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("amount must be a positive finite number, got {0}")]
    InvalidAmount(f64),
    #[error("transfer source and destination accounts must differ")]
    SameAccountTransfer,
    #[error("withdrawal of {requested} exceeds the goal balance of {available}")]
    InsufficientGoalBalance { requested: f64, available: f64 },
    #[error("refund of {requested} exceeds the paid amount of {available}")]
    InsufficientInstallmentPaid { requested: f64, available: f64 },
    #[error("the default account (or the last remaining account) cannot be deleted")]
    DefaultAccountProtected,
    #[error("default categories cannot be deleted, only edited")]
    DefaultCategoryProtected,
    #[error("{kind} {id} is still referenced by existing records")]
    DanglingReference { kind: &'static str, id: Uuid },
    #[error("unknown {kind}: {id}")]
    UnknownEntity { kind: &'static str, id: Uuid },
    #[error("`{0}` already exists")]
    DuplicateName(String),
    #[error("a budget for {0} already exists")]
    BudgetExists(String),
    #[error("invalid month key `{0}`, expected YYYY-MM")]
    InvalidMonth(String),
    #[error("import document rejected: {0}")]
    ImportMalformed(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn unknown(kind: &'static str, id: Uuid) -> Self {
        Self::UnknownEntity { kind, id }
    }
}
