use crate::config::NormalizerConfig;
use crate::models::{CanonicalRecord, MrzRecord, RawMrzFields};
use crate::processing::date::canonicalize_date;
use crate::processing::name::disambiguate_with_marker;
use log::debug;

pub const NO_MRZ_FOUND: &str = "No MRZ found";

/// Turns raw reader output into a `CanonicalRecord`.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads without locking.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new() -> Self {
        Normalizer::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Normalizer { config }
    }

    /// `None` means the reader found no MRZ and yields the fixed FAILURE
    /// record. Any field set, however broken, yields SUCCESS.
    pub fn normalize(&self, raw: Option<&RawMrzFields>) -> CanonicalRecord {
        match raw {
            Some(fields) => CanonicalRecord::Success(self.assemble(fields)),
            None => CanonicalRecord::failure(NO_MRZ_FOUND),
        }
    }

    fn assemble(&self, raw: &RawMrzFields) -> MrzRecord {
        let raw_name = raw.raw_name_field.as_deref().unwrap_or("");
        let (name, rule) = disambiguate_with_marker(raw_name, self.config.filler_marker);
        if name.is_empty() && !raw_name.is_empty() {
            debug!("Name field {:?} holds no name components", raw_name);
        } else {
            debug!("Name {:?} split by {:?} into {:?}", raw_name, rule, name);
        }

        let birth_date = self.date(raw.raw_birth_date.as_deref(), "birth");
        let expiry_date = self.date(raw.raw_expiry_date.as_deref(), "expiry");

        let optional_data = format!(
            "{}{}",
            raw.optional_data_1.as_deref().unwrap_or(""),
            raw.optional_data_2.as_deref().unwrap_or("")
        );

        MrzRecord {
            given_name: name.given_name,
            surname: name.surname,
            birth_date,
            expiry_date,
            mrz_type: raw.mrz_type.clone(),
            document_type_code: raw.document_type_code.clone(),
            issuer_country_code: raw.issuer_country_code.clone(),
            nationality_code: raw.nationality_code.clone(),
            sex: raw.sex.clone(),
            document_number: raw.document_number.clone(),
            optional_data,
            raw_text: raw.raw_text.clone(),
        }
    }

    fn date(&self, raw: Option<&str>, label: &str) -> Option<String> {
        let raw = raw?;
        let date = canonicalize_date(raw, self.config.pivot());
        if date.is_none() && !raw.trim().is_empty() {
            debug!("Dropping unparseable {} date {:?}", label, raw);
        }
        date
    }
}

/// Normalize with the default configuration.
pub fn normalize(raw: Option<&RawMrzFields>) -> CanonicalRecord {
    Normalizer::default().normalize(raw)
}
