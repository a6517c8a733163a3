use std::io::Write;

use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::models::{BatchItem, DocumentType};
use crate::report::{document_lines, timestamp};
use crate::utils::VerifierError;

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const FONT_SIZE: i64 = 12;
const LEADING: i64 = 16;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// Single-font text report, one block of lines per document.
pub struct PdfReport {
    kind: DocumentType,
    generated_at: DateTime<Local>,
}

impl PdfReport {
    pub fn new(kind: DocumentType, generated_at: DateTime<Local>) -> Self {
        PdfReport { kind, generated_at }
    }

    pub fn write<W: Write>(&self, items: &[BatchItem], out: &mut W) -> Result<(), VerifierError> {
        let mut doc = self.build(items)?;
        doc.save_to(out)
            .map_err(|e| VerifierError::Report(format!("Failed to write PDF: {}", e)))?;
        Ok(())
    }

    pub fn lines(&self, items: &[BatchItem]) -> Vec<String> {
        let mut lines = vec![
            self.kind.report_title().to_string(),
            format!("Generated: {}", timestamp(&self.generated_at)),
            String::new(),
        ];
        for (i, item) in items.iter().enumerate() {
            lines.extend(document_lines(i, item));
            lines.push(String::new());
        }
        lines
    }

    fn build(&self, items: &[BatchItem]) -> Result<Document, VerifierError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let lines = self.lines(items);
        let mut kids: Vec<Object> = Vec::new();
        for chunk in lines.chunks(LINES_PER_PAGE) {
            let page_id = self.add_page(&mut doc, pages_id, chunk)?;
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(self.kind.report_title()),
            "CreationDate" => Object::string_literal(
                self.generated_at.format("D:%Y%m%d%H%M%S").to_string()
            ),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();
        Ok(doc)
    }

    fn add_page(
        &self,
        doc: &mut Document,
        pages_id: ObjectId,
        lines: &[String],
    ) -> Result<ObjectId, VerifierError> {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LEADING.into()]),
            Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(printable(line))]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| VerifierError::Report(format!("Failed to encode page: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        Ok(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }))
    }
}

// Courier's built-in encoding only covers printable ASCII
fn printable(line: &str) -> String {
    line.chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{aadhaar_item, pan_item};

    fn report(kind: DocumentType) -> PdfReport {
        PdfReport::new(kind, Local::now())
    }

    #[test]
    fn test_lines_start_with_title() {
        let lines = report(DocumentType::Pan).lines(&[pan_item()]);
        assert_eq!(lines[0], "PAN Card Verification Report");
        assert!(lines[1].starts_with("Generated: "));
        assert_eq!(lines[3], "Document 1");
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_pdf_bytes_are_loadable() {
        let mut bytes = Vec::new();
        report(DocumentType::Aadhaar)
            .write(&[aadhaar_item(Some("234567890123"))], &mut bytes)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_batches_paginate() {
        let items: Vec<BatchItem> = (0..50).map(|_| aadhaar_item(Some("234567890123"))).collect();
        let line_count = report(DocumentType::Aadhaar).lines(&items).len();
        let expected_pages = (line_count + LINES_PER_PAGE - 1) / LINES_PER_PAGE;
        assert!(expected_pages > 1);

        let mut bytes = Vec::new();
        report(DocumentType::Aadhaar).write(&items, &mut bytes).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), expected_pages);
    }

    #[test]
    fn test_empty_batch_still_has_a_page() {
        let mut bytes = Vec::new();
        report(DocumentType::Pan).write(&[], &mut bytes).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_printable_replaces_non_ascii() {
        assert_eq!(printable("Name: राज Kumar"), "Name: ??? Kumar");
    }
}
