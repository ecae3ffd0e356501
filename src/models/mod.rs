pub mod raw;
pub mod record;

pub use raw::RawMrzFields;
pub use record::{CanonicalRecord, MrzRecord, NameParts, RecordStatus};
