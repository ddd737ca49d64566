use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapErrorKind {
    /// The solver failed or produced no viable route.
    Solver,
    /// Payload arguments did not fit the vault ABI.
    Encoding,
    /// An external read (balance, adapter, RPC) failed.
    Query,
    InvalidRoute,
    Internal,
}

#[derive(Debug, Clone)]
pub struct SwapError {
    kind: SwapErrorKind,
    message: String,
}

impl SwapError {
    pub fn solver<T: Into<String>>(message: T) -> Self {
        Self {
            kind: SwapErrorKind::Solver,
            message: message.into(),
        }
    }

    pub fn encoding<T: Into<String>>(message: T) -> Self {
        Self {
            kind: SwapErrorKind::Encoding,
            message: message.into(),
        }
    }

    pub fn query<T: Into<String>>(message: T) -> Self {
        Self {
            kind: SwapErrorKind::Query,
            message: message.into(),
        }
    }

    pub fn invalid_route<T: Into<String>>(message: T) -> Self {
        Self {
            kind: SwapErrorKind::InvalidRoute,
            message: message.into(),
        }
    }

    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self {
            kind: SwapErrorKind::Internal,
            message: message.into(),
        }
    }

    /// Query failures may succeed on a later attempt. Retrying is left to the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, SwapErrorKind::Query)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> SwapErrorKind {
        self.kind
    }
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            SwapErrorKind::Solver => "solver failure",
            SwapErrorKind::Encoding => "encoding failure",
            SwapErrorKind::Query => "query failure",
            SwapErrorKind::InvalidRoute => "invalid route",
            SwapErrorKind::Internal => "internal error",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

impl std::error::Error for SwapError {}

pub(crate) fn map_abi_error(context: &str, err: alloy_sol_types::Error) -> SwapError {
    SwapError::encoding(format!("{context}: {err}"))
}
