//! Revenue projection from monthly activity assumptions.

pub mod projection;
