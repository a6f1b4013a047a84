use thiserror::Error;
use tracing::{debug, error};

use crate::engine::udf::phase::Phase;

/// Engine-visible code for input shapes the function cannot interpret.
pub const STRUCTURAL_ERROR_CODE: u32 = 2106;
/// Engine-visible code for failures inside the summation itself.
pub const COMPUTATION_ERROR_CODE: u32 = 2103;
/// Engine-visible code for orders a central moment cannot be expanded for.
pub const INVALID_ORDER_CODE: u32 = 2107;

/// Errors raised by the moment function. Malformed values never end up here:
/// they are dropped as nulls during coercion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MomentError {
    #[error("Error while computing moment in {phase}: {message}")]
    Structural { phase: Phase, message: String },

    #[error("Problem while computing sum of doubles: {0}")]
    Computation(String),

    #[error("Invalid moment order: {0}")]
    InvalidOrder(String),
}

impl MomentError {
    pub fn structural(phase: Phase, message: impl Into<String>) -> Self {
        MomentError::Structural {
            phase,
            message: message.into(),
        }
    }

    /// Stable diagnostic code reported to the host engine.
    pub fn code(&self) -> u32 {
        match self {
            MomentError::Structural { .. } => STRUCTURAL_ERROR_CODE,
            MomentError::Computation(_) => COMPUTATION_ERROR_CODE,
            MomentError::InvalidOrder(_) => INVALID_ORDER_CODE,
        }
    }

    pub fn log_error(&self) {
        match self {
            MomentError::Structural { phase, message } => {
                error!(code = self.code(), "Structural error in {}: {}", phase, message);
                debug!("Structural error details: {:?}", self);
            }
            MomentError::Computation(e) => {
                error!(code = self.code(), "Computation error: {}", e);
                debug!("Computation error details: {:?}", self);
            }
            MomentError::InvalidOrder(e) => {
                error!(code = self.code(), "Invalid moment order: {}", e);
                debug!("Invalid order details: {:?}", self);
            }
        }
    }
}
