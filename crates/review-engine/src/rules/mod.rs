pub mod completeness;
pub mod fees;
pub mod limits;
pub mod verdict;
