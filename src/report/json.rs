use std::io::Write;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::{BatchItem, DocumentType};
use crate::report::timestamp;
use crate::utils::VerifierError;

#[derive(Serialize)]
struct JsonDocument<'a> {
    document_type: DocumentType,
    generated_at: String,
    documents: &'a [BatchItem],
}

pub struct JsonReport {
    kind: DocumentType,
    generated_at: DateTime<Local>,
}

impl JsonReport {
    pub fn new(kind: DocumentType, generated_at: DateTime<Local>) -> Self {
        JsonReport { kind, generated_at }
    }

    pub fn write<W: Write>(&self, items: &[BatchItem], out: &mut W) -> Result<(), VerifierError> {
        let document = JsonDocument {
            document_type: self.kind,
            generated_at: timestamp(&self.generated_at),
            documents: items,
        };
        serde_json::to_writer_pretty(&mut *out, &document)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{aadhaar_item, pan_item};
    use serde_json::Value;

    fn render(kind: DocumentType, items: &[BatchItem]) -> Value {
        let mut bytes = Vec::new();
        JsonReport::new(kind, Local::now()).write(items, &mut bytes).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_aadhaar_json_shape() {
        let json = render(DocumentType::Aadhaar, &[aadhaar_item(Some("234567890123"))]);
        assert_eq!(json["document_type"], "aadhaar");
        let doc = &json["documents"][0];
        assert_eq!(doc["status"], "processed");
        assert_eq!(doc["source"], "card.png");
        assert_eq!(doc["id_number"], "234567890123");
        assert_eq!(doc["name"], "Amit Shah");
        assert_eq!(doc["validation"]["is_valid"], true);
    }

    #[test]
    fn test_missing_fields_are_null() {
        let json = render(DocumentType::Pan, &[pan_item()]);
        let doc = &json["documents"][0];
        assert_eq!(doc["document_type"], "pan");
        assert!(doc["name"].is_null());
    }

    #[test]
    fn test_failed_item_json() {
        let items = [BatchItem::Failed {
            source: "broken.png".to_string(),
            error: "could not read image".to_string(),
        }];
        let json = render(DocumentType::Pan, &items);
        assert_eq!(json["documents"][0]["status"], "failed");
        assert_eq!(json["documents"][0]["error"], "could not read image");
    }
}
