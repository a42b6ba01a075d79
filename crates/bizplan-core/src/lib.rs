pub mod error;
pub mod types;

pub mod assets;
pub mod costs;
pub mod financing;
pub mod revenue;
pub mod statements;

pub mod pipeline;

pub use error::BizPlanError;
pub use types::*;

/// Standard result type for all bizplan operations
pub type BizPlanResult<T> = Result<T, BizPlanError>;
