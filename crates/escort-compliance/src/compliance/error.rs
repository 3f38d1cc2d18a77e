use serde::Serialize;

/// Rejections raised before any jurisdiction is evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComplianceError {
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("invalid route for `{field}`: {reason}")]
    InvalidRoute { field: &'static str, reason: String },
}

impl ComplianceError {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::InvalidRoute { .. } => "invalid_route",
        }
    }

    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } | Self::InvalidRoute { field, .. } => field,
        }
    }

    pub fn view(&self) -> ComplianceErrorView {
        ComplianceErrorView {
            kind: self.kind(),
            field: self.field(),
            message: self.to_string(),
        }
    }
}

/// Wire shape of a [`ComplianceError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceErrorView {
    pub kind: &'static str,
    pub field: &'static str,
    pub message: String,
}
