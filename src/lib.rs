pub mod config;
pub mod models;
pub mod payload;
pub mod processing;
pub mod reader;
pub mod utils;

pub use config::NormalizerConfig;
pub use models::{CanonicalRecord, MrzRecord, RawMrzFields};
pub use processing::{normalize, Normalizer};
pub use reader::{MrzReader, TextMrzReader};
