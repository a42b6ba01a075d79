pub mod assets;
pub mod financing;
pub mod loan;
pub mod project;
pub mod revenue;
pub mod statements;
