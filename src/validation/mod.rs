pub mod aadhaar;
pub mod pan;

pub use aadhaar::AadhaarValidator;
pub use pan::PanValidator;

use crate::models::{ExtractionResult, ValidationResult};

pub fn validate(result: &ExtractionResult) -> ValidationResult {
    match result {
        ExtractionResult::Aadhaar(details) => AadhaarValidator::validate(details),
        ExtractionResult::Pan(details) => PanValidator::validate(details),
    }
}
