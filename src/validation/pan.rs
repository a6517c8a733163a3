use crate::models::{PanDetails, ValidationIssue, ValidationIssueType, ValidationResult};

pub struct PanValidator;

impl PanValidator {
    pub fn validate(details: &PanDetails) -> ValidationResult {
        let mut issues = Vec::new();

        if details.id_number.is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::MissingNumber,
                message: "No token matches the PAN format".to_string(),
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

        ValidationResult {
            is_valid: details.verified(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PanNumber;

    #[test]
    fn test_complete_pan_has_no_issues() {
        let details = PanDetails {
            id_number: PanNumber::parse("ABCDE1234F"),
            name: Some("RAHUL".to_string()),
            date_of_birth: Some("01/01/1990".to_string()),
        };
        let result = PanValidator::validate(&details);
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_missing_number_is_invalid() {
        let details = PanDetails {
            id_number: None,
            name: None,
            date_of_birth: Some("01/01/1990".to_string()),
        };
        let result = PanValidator::validate(&details);
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 2);
    }
}
