pub mod analysis_csv;
pub mod numeric;
pub mod registry;
