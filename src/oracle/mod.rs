mod availability_aware_oracle;
mod oracle;
mod simple_oracle;

pub use availability_aware_oracle::AvailabilityAwareOracle;
pub use oracle::{Oracle, OracleLedger};
pub use simple_oracle::SimpleOracle;
