pub mod file_parsing;
pub mod serde_nan;
