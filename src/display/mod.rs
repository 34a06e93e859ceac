//! Text rendering for chat replies and terminal output

pub mod report;
pub mod summary;

pub use report::{progress_bar, BAR_WIDTH};
pub use summary::{render_budget_table, render_summary, BudgetLine, LedgerSummary, Markup};
