//! Startup financing: loan amortization, needs/sources aggregation and the
//! three-year financing plan.

pub mod loan;
pub mod plan;
pub mod startup;
