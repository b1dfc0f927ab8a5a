use thiserror::Error;

// Unified error type for sparse-pursuit

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("support index {index} out of range for {len} columns")]
    SupportOutOfRange { index: usize, len: usize },
    #[error("support index {0} appears more than once")]
    DuplicateSupport(usize),
}

impl SpError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        SpError::ShapeMismatch(msg.into())
    }

    pub(crate) fn param(msg: impl Into<String>) -> Self {
        SpError::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let e = SpError::SupportOutOfRange { index: 12, len: 10 };
        assert_eq!(e.to_string(), "support index 12 out of range for 10 columns");
        let e = SpError::shape("measurement has 7 entries, operator has 5 rows");
        assert_eq!(
            e.to_string(),
            "shape mismatch: measurement has 7 entries, operator has 5 rows"
        );
    }
}
