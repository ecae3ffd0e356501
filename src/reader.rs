use crate::models::RawMrzFields;
use crate::processing::mrz_text::parse_mrz_text;
use crate::utils::MrzError;
use std::fs;
use std::path::Path;

/// The OCR side of the pipeline: given a document image on disk, return the
/// raw MRZ fields, `Ok(None)` if no MRZ region was found, or an error if the
/// reader itself broke.
pub trait MrzReader {
    fn read_mrz(&self, path: &Path) -> Result<Option<RawMrzFields>, MrzError>;
}

/// Reader for files that already hold OCR'd text (e.g. a sidecar produced
/// by an external OCR engine). The MRZ block is located and sliced into
/// fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMrzReader;

impl MrzReader for TextMrzReader {
    fn read_mrz(&self, path: &Path) -> Result<Option<RawMrzFields>, MrzError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            MrzError::Reader(format!("{} is not UTF-8 text: {}", path.display(), e))
        })?;
        Ok(parse_mrz_text(&text))
    }
}
