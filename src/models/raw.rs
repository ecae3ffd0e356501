use serde::{Deserialize, Serialize};

/// Raw field set produced by an MRZ reader.
///
/// Every value is exactly what the reader extracted from the document glyphs:
/// possibly empty, possibly malformed. Keys from both common reader
/// conventions are accepted (`issuer_code`/`country`, `birth_date`/
/// `date_of_birth`, ...); unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMrzFields {
    pub mrz_type: Option<String>,
    #[serde(alias = "document_code", alias = "type")]
    pub document_type_code: Option<String>,
    #[serde(alias = "issuer_code", alias = "country")]
    pub issuer_country_code: Option<String>,
    /// Full name field as read. For some issuers this holds the whole name
    /// padded with `L` fillers rather than the usual `<<` separator.
    ///
    /// Only the `surname` key feeds it. PassportEye's separate `names` key
    /// (its own given-name split) is ignored: the name is recovered from this
    /// one field alone.
    #[serde(alias = "surname")]
    pub raw_name_field: Option<String>,
    #[serde(alias = "number")]
    pub document_number: Option<String>,
    #[serde(alias = "document_number_checkdigit", alias = "check_number")]
    pub document_number_check_digit: Option<String>,
    #[serde(alias = "nationality")]
    pub nationality_code: Option<String>,
    #[serde(alias = "birth_date", alias = "date_of_birth")]
    pub raw_birth_date: Option<String>,
    pub sex: Option<String>,
    #[serde(alias = "expiry_date", alias = "expiration_date")]
    pub raw_expiry_date: Option<String>,
    #[serde(alias = "optional_data", alias = "personal_number", alias = "optional1")]
    pub optional_data_1: Option<String>,
    #[serde(alias = "optional2")]
    pub optional_data_2: Option<String>,
    #[serde(alias = "mrz_text")]
    pub raw_text: Option<String>,
}

impl RawMrzFields {
    pub fn from_json(json: &str) -> Result<Option<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
