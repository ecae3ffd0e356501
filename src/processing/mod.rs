pub mod check_digit;
pub mod date;
pub mod mrz_text;
pub mod name;
pub mod normalizer;

pub use date::{canonicalize_date, CenturyPivot};
pub use mrz_text::{parse_mrz_text, MrzLayout};
pub use name::{disambiguate, NameRule};
pub use normalizer::{normalize, Normalizer, NO_MRZ_FOUND};
