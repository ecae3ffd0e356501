use crate::models::CanonicalRecord;
use crate::processing::Normalizer;
use crate::reader::MrzReader;
use crate::utils::MrzError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{error, info};
use serde::Deserialize;
use std::io::Write;
use tempfile::NamedTempFile;

pub const INVALID_PAYLOAD: &str = "Invalid base64 image payload";

/// Request body of the extraction endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageBase64Request {
    pub image_base64: String,
}

/// Decode a base64 image payload. Accepts an optional `data:...;base64,`
/// prefix and embedded line breaks.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, MrzError> {
    let payload = match payload.find(";base64,") {
        Some(idx) if payload.starts_with("data:") => &payload[idx + ";base64,".len()..],
        _ => payload,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| MrzError::PayloadDecode(e.to_string()))?;
    if bytes.is_empty() {
        return Err(MrzError::PayloadDecode("payload is empty".to_string()));
    }
    Ok(bytes)
}

/// Write image bytes to a temporary `.png` file, removed when dropped.
pub fn stage_image(bytes: &[u8]) -> Result<NamedTempFile, MrzError> {
    let mut file = tempfile::Builder::new()
        .prefix("mrz-")
        .suffix(".png")
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// Full transport path: decode, stage, read, normalize. Every failure ends up
/// in a FAILURE record with a short reason.
pub fn process_payload<R: MrzReader + ?Sized>(
    payload: &str,
    reader: &R,
    normalizer: &Normalizer,
) -> CanonicalRecord {
    info!("Decoding base64 image");
    let bytes = match decode_payload(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Rejecting payload: {}", e);
            return CanonicalRecord::failure(INVALID_PAYLOAD);
        }
    };

    let staged = match stage_image(&bytes) {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to stage image: {}", e);
            return CanonicalRecord::failure("Failed to stage image");
        }
    };
    info!("Image saved to temporary file: {}", staged.path().display());

    info!("Extracting MRZ details");
    match reader.read_mrz(staged.path()) {
        Ok(fields) => normalizer.normalize(fields.as_ref()),
        Err(e) => {
            error!("Error during MRZ extraction: {}", e);
            CanonicalRecord::failure("MRZ extraction failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawMrzFields;
    use crate::reader::TextMrzReader;
    use std::fs;
    use std::path::Path;

    struct StubReader(Option<RawMrzFields>);

    impl MrzReader for StubReader {
        fn read_mrz(&self, path: &Path) -> Result<Option<RawMrzFields>, MrzError> {
            assert!(path.exists());
            Ok(self.0.clone())
        }
    }

    struct BrokenReader;

    impl MrzReader for BrokenReader {
        fn read_mrz(&self, _path: &Path) -> Result<Option<RawMrzFields>, MrzError> {
            Err(MrzError::Reader("engine crashed".to_string()))
        }
    }

    #[test]
    fn test_decode_plain_and_data_url() {
        assert_eq!(decode_payload("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            decode_payload("data:image/png;base64,aGVs\nbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_decode_rejects_garbage_and_empty() {
        assert!(matches!(
            decode_payload("not base64!!"),
            Err(MrzError::PayloadDecode(_))
        ));
        assert!(matches!(decode_payload(""), Err(MrzError::PayloadDecode(_))));
    }

    #[test]
    fn test_staged_file_holds_bytes() {
        let file = stage_image(b"\x89PNG").unwrap();
        assert_eq!(fs::read(file.path()).unwrap(), b"\x89PNG");
        assert_eq!(file.path().extension().and_then(|e| e.to_str()), Some("png"));
    }

    #[test]
    fn test_invalid_payload_is_failure() {
        let out = process_payload("%%%", &StubReader(None), &Normalizer::new());
        assert_eq!(out, CanonicalRecord::failure(INVALID_PAYLOAD));
    }

    #[test]
    fn test_reader_absence_is_no_mrz_failure() {
        let out = process_payload("aGVsbG8=", &StubReader(None), &Normalizer::new());
        assert_eq!(out.error(), Some("No MRZ found"));
    }

    #[test]
    fn test_reader_error_is_failure_without_internals() {
        let out = process_payload("aGVsbG8=", &BrokenReader, &Normalizer::new());
        assert_eq!(out.error(), Some("MRZ extraction failed"));
    }

    #[test]
    fn test_reader_fields_are_normalized() {
        let fields = RawMrzFields {
            raw_name_field: Some("SMITH<<JOHN<<".to_string()),
            raw_birth_date: Some("850101".to_string()),
            ..Default::default()
        };
        let out = process_payload("aGVsbG8=", &StubReader(Some(fields)), &Normalizer::new());
        let record = out.record().unwrap();
        assert_eq!(record.given_name, "SMITH");
        assert_eq!(record.surname, "JOHN");
        assert_eq!(record.birth_date.as_deref(), Some("1985-01-01"));
    }

    #[test]
    fn test_text_reader_through_payload() {
        let text = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                    L898902C36UTO7408122F1204159ZE184226B<<<<<10\n";
        let payload = STANDARD.encode(text);
        let out = process_payload(&payload, &TextMrzReader, &Normalizer::new());
        assert_eq!(out.record().map(|r| r.surname.as_str()), Some("ERIKSSON"));
    }

    #[test]
    fn test_request_body() {
        let request: ImageBase64Request =
            serde_json::from_str(r#"{"image_base64": "aGVsbG8="}"#).unwrap();
        assert_eq!(decode_payload(&request.image_base64).unwrap(), b"hello");
    }
}
