//! Fixed-asset depreciation scheduling.

pub mod depreciation;
