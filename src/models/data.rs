use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

lazy_static! {
    static ref AADHAAR_NUMBER: Regex = Regex::new(r"^[2-9][0-9]{11}$").unwrap();
    static ref PAN_NUMBER: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();
}

/// Pixel rectangle of a recognized word, as reported by the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// A single OCR word. Geometry and confidence are only present in detailed mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub text: String,
    pub bbox: Option<BoundingBox>,
    pub confidence: Option<f32>,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            bbox: None,
            confidence: None,
        }
    }

    pub fn with_geometry(text: impl Into<String>, bbox: BoundingBox, confidence: f32) -> Self {
        Token {
            text: text.into(),
            bbox: Some(bbox),
            confidence: Some(confidence),
        }
    }
}

/// What the OCR engine hands back for one image: the raw text and its word stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrOutput {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl OcrOutput {
    /// Plain mode: tokens are the whitespace-separated words of the text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = text.split_whitespace().map(Token::new).collect();
        OcrOutput { text, tokens }
    }

    /// Detailed mode: the text is derived by joining the words with spaces.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let text = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        OcrOutput { text, tokens }
    }

    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Aadhaar,
    Pan,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "Aadhaar",
            DocumentType::Pan => "PAN",
        }
    }

    pub fn report_title(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "Aadhaar Card Verification Report",
            DocumentType::Pan => "PAN Card Verification Report",
        }
    }

    pub fn report_prefix(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "aadhaar_report_",
            DocumentType::Pan => "pan_report_",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 12-digit Aadhaar number whose first digit is 2-9.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AadhaarNumber(String);

impl AadhaarNumber {
    pub fn parse(candidate: &str) -> Option<Self> {
        if AADHAAR_NUMBER.is_match(candidate) {
            Some(AadhaarNumber(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number in the 4-4-4 grouping printed on the card.
    pub fn grouped(&self) -> String {
        format!("{} {} {}", &self.0[0..4], &self.0[4..8], &self.0[8..12])
    }
}

impl fmt::Display for AadhaarNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// PAN in the AAAAA9999A layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PanNumber(String);

impl PanNumber {
    pub fn parse(candidate: &str) -> Option<Self> {
        if PAN_NUMBER.is_match(candidate) {
            Some(PanNumber(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Range-checked date of birth. Calendar validity (e.g. 31/02) is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOfBirth {
    day: u32,
    month: u32,
    year: u32,
}

impl DateOfBirth {
    pub fn new(day: u32, month: u32, year: u32) -> Option<Self> {
        if (1..=31).contains(&day) && (1..=12).contains(&month) && (1900..=2100).contains(&year) {
            Some(DateOfBirth { day, month, year })
        } else {
            None
        }
    }
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

impl Serialize for DateOfBirth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    /// Vocabulary the fuzzy matcher compares against.
    pub const VOCABULARY: [&'static str; 3] = ["male", "female", "others"];

    pub fn from_vocabulary(word: &str) -> Option<Self> {
        match word {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "others" => Some(Gender::Others),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Others => "Others",
        };
        f.write_str(label)
    }
}

// Display strings for fields that were not found
pub const NOT_FOUND: &str = "Not Found";
pub const NOT_DETECTED: &str = "Not Detected";
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AadhaarDetails {
    pub id_number: Option<AadhaarNumber>,
    pub name: Option<String>,
    pub date_of_birth: Option<DateOfBirth>,
    pub gender: Option<Gender>,
}

impl AadhaarDetails {
    pub fn verified(&self) -> bool {
        self.id_number.is_some()
    }

    pub fn id_number_display(&self) -> String {
        display_or(&self.id_number, NOT_DETECTED)
    }

    pub fn name_display(&self) -> String {
        display_or(&self.name, UNKNOWN)
    }

    pub fn date_of_birth_display(&self) -> String {
        display_or(&self.date_of_birth, NOT_FOUND)
    }

    pub fn gender_display(&self) -> String {
        display_or(&self.gender, NOT_FOUND)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanDetails {
    pub id_number: Option<PanNumber>,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
}

impl PanDetails {
    pub fn verified(&self) -> bool {
        self.id_number.is_some()
    }

    pub fn id_number_display(&self) -> String {
        display_or(&self.id_number, NOT_FOUND)
    }

    pub fn name_display(&self) -> String {
        display_or(&self.name, UNKNOWN)
    }

    pub fn date_of_birth_display(&self) -> String {
        display_or(&self.date_of_birth, NOT_FOUND)
    }
}

fn display_or<T: fmt::Display>(value: &Option<T>, fallback: &str) -> String {
    match value {
        Some(v) => v.to_string(),
        None => fallback.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "document_type", rename_all = "lowercase")]
pub enum ExtractionResult {
    Aadhaar(AadhaarDetails),
    Pan(PanDetails),
}

impl ExtractionResult {
    pub fn document_type(&self) -> DocumentType {
        match self {
            ExtractionResult::Aadhaar(_) => DocumentType::Aadhaar,
            ExtractionResult::Pan(_) => DocumentType::Pan,
        }
    }

    pub fn verified(&self) -> bool {
        match self {
            ExtractionResult::Aadhaar(details) => details.verified(),
            ExtractionResult::Pan(details) => details.verified(),
        }
    }

    /// Labelled display lines in report order, without the verdict line.
    pub fn field_lines(&self) -> Vec<(&'static str, String)> {
        match self {
            ExtractionResult::Aadhaar(d) => vec![
                ("Aadhaar No", d.id_number_display()),
                ("Name", d.name_display()),
                ("DOB", d.date_of_birth_display()),
                ("Gender", d.gender_display()),
            ],
            ExtractionResult::Pan(d) => vec![
                ("PAN No", d.id_number_display()),
                ("Name", d.name_display()),
                ("DOB", d.date_of_birth_display()),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationIssueType {
    MissingNumber,
    MissingName,
    MissingDateOfBirth,
    MissingGender,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

/// Everything produced for one uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub source: String,
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub validation: ValidationResult,
    #[serde(skip)]
    pub raw_text: String,
}

impl DocumentRecord {
    pub fn verified(&self) -> bool {
        self.validation.is_valid
    }
}

/// Outcome of one image in a batch; a failure never aborts the others.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchItem {
    Processed(DocumentRecord),
    Failed { source: String, error: String },
}

impl BatchItem {
    pub fn source(&self) -> &str {
        match self {
            BatchItem::Processed(record) => &record.source,
            BatchItem::Failed { source, .. } => source,
        }
    }
}
