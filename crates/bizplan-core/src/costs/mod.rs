//! Operating cost aggregation and social-charge modelling.

pub mod operating;
pub mod social;
