//! Financial statements: income statement, management balances, break-even,
//! working capital and the monthly cash budget.

pub mod break_even;
pub mod cash_budget;
pub mod income;
pub mod sig;
pub mod working_capital;
