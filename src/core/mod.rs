mod record;

pub use record::{Label, Payload, Record};
