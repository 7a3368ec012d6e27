pub mod batch;
pub mod fold;

pub use batch::{BatchReport, BatchSummary, FoldEvaluator};
pub use fold::{Fold, FoldReport};
