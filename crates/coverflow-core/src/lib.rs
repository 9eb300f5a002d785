// crates/coverflow-core/src/lib.rs
pub mod config;
pub mod geometry;
pub mod properties;
pub mod source;

pub use config::*;
pub use geometry::*;
pub use properties::*;
pub use source::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoverFlowError {
    #[error("Visible item count must be an odd number of at least 3, got {0}")]
    InvalidVisibleItemCount(usize),

    #[error("Reflection height must be a fraction between 0.0 and 1.0, got {0}")]
    InvalidReflectionHeight(f32),

    #[error("Reflection gap must be a finite, non-negative pixel value, got {0}")]
    InvalidReflectionGap(f32),

    #[error("Minimum scale must be within (0.0, 1.0], got {0}")]
    InvalidMinScale(f32),

    #[error("Invalid value for property '{key}': {reason}")]
    InvalidProperty { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CoverFlowError>;
