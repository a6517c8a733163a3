// Field extraction over an OCR word stream for Aadhaar and PAN cards
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::{
    AadhaarDetails, AadhaarNumber, DateOfBirth, DocumentType, ExtractionResult, Gender,
    OcrOutput, PanDetails, PanNumber,
};
use crate::processing::correction::normalize_date_candidate;
use crate::processing::similarity::closest_match;

lazy_static! {
    static ref CLEANED_DATE_PREFIX: Regex = Regex::new(r"^\d{2}/\d{2}/\d{4}").unwrap();
    static ref TEXT_DATE: Regex = Regex::new(r"\d{2}/\d{2}/\d{4}").unwrap();
    static ref NON_LETTER: Regex = Regex::new(r"[^a-zA-Z]").unwrap();
    // Letter categories only (Lu, Ll, Lt, Lm, Lo); combining marks do not count
    static ref LETTERS_ONLY: Regex = Regex::new(r"^\p{L}+$").unwrap();
}

pub const DEFAULT_GENDER_CUTOFF: f64 = 0.7;

// Name tokens considered after "Name :" on an Aadhaar card
const NAME_WINDOW: usize = 3;
// Printed labels that end a name run
const FIELD_LABELS: [&str; 4] = ["gender", "dob", "sex", "year"];
const DOB_MIN_LEN: usize = 8;
const DOB_MAX_LEN: usize = 12;
const PAN_NAME_MIN_LEN: usize = 4;

/// Stateless extractor: every call reads only its arguments.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    gender_cutoff: f64,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor {
    pub fn new() -> Self {
        FieldExtractor {
            gender_cutoff: DEFAULT_GENDER_CUTOFF,
        }
    }

    pub fn with_gender_cutoff(mut self, cutoff: f64) -> Self {
        self.gender_cutoff = cutoff;
        self
    }

    pub fn extract(&self, kind: DocumentType, ocr: &OcrOutput) -> ExtractionResult {
        let words = ocr.words();
        match kind {
            DocumentType::Aadhaar => ExtractionResult::Aadhaar(self.extract_aadhaar(&words)),
            DocumentType::Pan => ExtractionResult::Pan(self.extract_pan(&words, &ocr.text)),
        }
    }

    pub fn extract_aadhaar(&self, words: &[&str]) -> AadhaarDetails {
        AadhaarDetails {
            id_number: Self::find_aadhaar_number(words).map(|(_, number)| number),
            name: Self::find_aadhaar_name(words),
            date_of_birth: Self::find_aadhaar_dob(words),
            gender: self.find_gender(words),
        }
    }

    pub fn extract_pan(&self, words: &[&str], text: &str) -> PanDetails {
        let id_number = Self::find_pan_number(words);
        let name = id_number
            .as_ref()
            .and_then(|number| Self::find_pan_name(words, number));
        PanDetails {
            id_number,
            name,
            date_of_birth: Self::find_text_date(text),
        }
    }

    /// First 4-4-4 digit triple forming a valid Aadhaar number, with the
    /// index of its first group.
    pub fn find_aadhaar_number(words: &[&str]) -> Option<(usize, AadhaarNumber)> {
        for (i, triple) in words.windows(3).enumerate() {
            if !triple.iter().all(|w| is_digit_group(w)) {
                continue;
            }
            let combined = triple.concat();
            debug!("Checking: {} {} {} -> {}", triple[0], triple[1], triple[2], combined);
            if let Some(number) = AadhaarNumber::parse(&combined) {
                return Some((i, number));
            }
        }
        None
    }

    /// Alphabetic words among the three following the first usable "Name :".
    /// Printed field labels inside the window are not part of the name.
    pub fn find_aadhaar_name(words: &[&str]) -> Option<String> {
        for i in 0..words.len() {
            if words[i].to_lowercase() != "name" || i + 2 >= words.len() || words[i + 1] != ":" {
                continue;
            }
            let parts: Vec<&str> = words[i + 2..]
                .iter()
                .copied()
                .take(NAME_WINDOW)
                .filter(|w| is_alphabetic(w) && !is_field_label(w))
                .collect();
            if !parts.is_empty() {
                return Some(parts.join(" "));
            }
        }
        None
    }

    /// First 8-12 character token that cleans up to a plausible DD/MM/YYYY.
    pub fn find_aadhaar_dob(words: &[&str]) -> Option<DateOfBirth> {
        words
            .iter()
            .filter(|w| (DOB_MIN_LEN..=DOB_MAX_LEN).contains(&w.chars().count()))
            .find_map(|raw| {
                let cleaned = normalize_date_candidate(raw);
                if !CLEANED_DATE_PREFIX.is_match(&cleaned) {
                    return None;
                }
                let date = parse_date_parts(&cleaned);
                if date.is_none() {
                    debug!("Rejected date candidate {:?} (cleaned {:?})", raw, cleaned);
                }
                date
            })
    }

    /// Fuzzy gender match of the first token close enough to the vocabulary.
    pub fn find_gender(&self, words: &[&str]) -> Option<Gender> {
        words.iter().find_map(|word| {
            let cleaned = NON_LETTER.replace_all(word, "").to_lowercase();
            closest_match(&cleaned, &Gender::VOCABULARY, self.gender_cutoff)
                .and_then(Gender::from_vocabulary)
        })
    }

    pub fn find_pan_number(words: &[&str]) -> Option<PanNumber> {
        words
            .iter()
            .find_map(|word| PanNumber::parse(word.trim().to_uppercase().as_str()))
    }

    /// The single uppercase word (longer than 3 letters) after the PAN token.
    pub fn find_pan_name(words: &[&str], number: &PanNumber) -> Option<String> {
        let position = words.iter().position(|w| w.contains(number.as_str()))?;
        words[position + 1..]
            .iter()
            .find(|w| {
                is_alphabetic(w) && is_uppercase(w) && w.chars().count() >= PAN_NAME_MIN_LEN
            })
            .map(|w| w.to_string())
    }

    /// First DD/MM/YYYY substring of the raw text, unvalidated.
    pub fn find_text_date(text: &str) -> Option<String> {
        let flattened = text.replace('\n', " ");
        TEXT_DATE.find(&flattened).map(|m| m.as_str().to_string())
    }

    /// Best guess at the holder's name: the nearest non-numeric token before
    /// the Aadhaar number.
    pub fn find_name_before_number(words: &[&str]) -> Option<String> {
        let (index, _) = Self::find_aadhaar_number(words)?;
        words[..index]
            .iter()
            .rev()
            .map(|w| w.trim())
            .find(|w| !w.is_empty() && !w.chars().filter(|c| *c != ' ').all(|c| c.is_ascii_digit()))
            .map(|w| w.to_string())
    }
}

fn is_field_label(word: &str) -> bool {
    let lower = word.to_lowercase();
    FIELD_LABELS.contains(&lower.as_str()) || Gender::VOCABULARY.contains(&lower.as_str())
}

fn is_digit_group(word: &str) -> bool {
    word.len() == 4 && word.chars().all(|c| c.is_ascii_digit())
}

fn is_alphabetic(word: &str) -> bool {
    LETTERS_ONLY.is_match(word)
}

// At least one cased character and no lowercase ones
fn is_uppercase(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

// Exactly three numeric parts, range checked
fn parse_date_parts(cleaned: &str) -> Option<DateOfBirth> {
    let parts: Vec<&str> = cleaned.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let day = parts[0].parse::<u32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let year = parts[2].parse::<u32>().ok()?;
    DateOfBirth::new(day, month, year)
}
