use crate::models::{AadhaarDetails, ValidationIssue, ValidationIssueType, ValidationResult};

pub struct AadhaarValidator;

impl AadhaarValidator {
    /// Only the number decides validity; other gaps are reported as issues.
    pub fn validate(details: &AadhaarDetails) -> ValidationResult {
        let mut issues = Vec::new();

        if details.id_number.is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::MissingNumber,
                message: "No 4-4-4 digit group forms a valid Aadhaar number".to_string(),
            });
        }

        if details.name.is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::MissingName,
                message: "Name could not be read".to_string(),
            });
        }

        if details.date_of_birth.is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::MissingDateOfBirth,
                message: "Date of birth could not be read".to_string(),
            });
        }

        if details.gender.is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::MissingGender,
                message: "Gender could not be read".to_string(),
            });
        }

        ValidationResult {
            is_valid: details.verified(),
            issues,
        }
    }
}
