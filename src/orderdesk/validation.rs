//! Draft validation for orderdesk.
//!
//! Rules (all checks are on the trimmed value):
//! - Order ID: required
//! - User name: required, at least 3 characters
//! - Project name: required
//! - Address: required, at least 5 characters
//!
//! Avatar and status are never validated. Lengths count characters, not bytes.

use crate::form::{DraftField, DraftForm};
use std::collections::BTreeMap;

const MIN_USER_NAME_CHARS: usize = 3;
const MIN_ADDRESS_CHARS: usize = 5;

/// Validates a draft, collecting at most one error per field.
///
/// # Examples
/// ```
/// use orderdesk::form::{DraftField, DraftForm};
/// use orderdesk::validation::validate_draft;
///
/// let draft = DraftForm {
///     id: "#CM1".into(),
///     user_name: "Jo".into(),
///     project: "P".into(),
///     address: "12345".into(),
///     ..Default::default()
/// };
/// let errors = validate_draft(&draft);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(
///     errors.message(DraftField::UserName).as_deref(),
///     Some("User name must be at least 3 characters")
/// );
/// ```
pub fn validate_draft(draft: &DraftForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if let Err(e) = required(DraftField::Id, &draft.id) {
        errors.insert(e);
    }

    if let Err(e) = required(DraftField::UserName, &draft.user_name)
        .and_then(|_| min_chars(DraftField::UserName, &draft.user_name, MIN_USER_NAME_CHARS))
    {
        errors.insert(e);
    }

    if let Err(e) = required(DraftField::Project, &draft.project) {
        errors.insert(e);
    }

    if let Err(e) = required(DraftField::Address, &draft.address)
        .and_then(|_| min_chars(DraftField::Address, &draft.address, MIN_ADDRESS_CHARS))
    {
        errors.insert(e);
    }

    errors
}

fn required(field: DraftField, value: &str) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::Required(field));
    }
    Ok(())
}

fn min_chars(field: DraftField, value: &str, min: usize) -> Result<(), FieldValidationError> {
    if value.trim().chars().count() < min {
        return Err(FieldValidationError::TooShort { field, min });
    }
    Ok(())
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Field is empty or whitespace only
    Required(DraftField),
    /// Field is shorter than `min` characters after trimming
    TooShort { field: DraftField, min: usize },
}

impl FieldValidationError {
    pub fn field(&self) -> DraftField {
        match self {
            FieldValidationError::Required(field) => *field,
            FieldValidationError::TooShort { field, .. } => *field,
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValidationError::Required(field) => write!(f, "{} is required", field.label()),
            FieldValidationError::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field.label(), min)
            }
        }
    }
}

impl std::error::Error for FieldValidationError {}

/// Field → error mapping. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<DraftField, FieldValidationError>,
}

impl FieldErrors {
    fn insert(&mut self, error: FieldValidationError) {
        self.errors.insert(error.field(), error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: DraftField) -> Option<&FieldValidationError> {
        self.errors.get(&field)
    }

    pub fn message(&self, field: DraftField) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    /// Errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &FieldValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: &str, user_name: &str, project: &str, address: &str) -> DraftForm {
        DraftForm {
            id: id.into(),
            user_name: user_name.into(),
            project: project.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_empty_yields_four_errors() {
        let errors = validate_draft(&draft("", "", "", ""));
        assert!(!errors.is_valid());
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.message(DraftField::Id).as_deref(),
            Some("Order ID is required")
        );
        assert_eq!(
            errors.message(DraftField::UserName).as_deref(),
            Some("User name is required")
        );
        assert_eq!(
            errors.message(DraftField::Project).as_deref(),
            Some("Project name is required")
        );
        assert_eq!(
            errors.message(DraftField::Address).as_deref(),
            Some("Address is required")
        );
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let errors = validate_draft(&draft("   ", "   ", "   ", "   "));
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(DraftField::UserName),
            Some(&FieldValidationError::Required(DraftField::UserName))
        );
    }

    #[test]
    fn test_short_user_name() {
        let errors = validate_draft(&draft("#CM1", "Jo", "P", "12345"));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message(DraftField::UserName).as_deref(),
            Some("User name must be at least 3 characters")
        );
    }

    #[test]
    fn test_three_char_user_name_passes() {
        let errors = validate_draft(&draft("#CM1", "Joe", "P", "12345"));
        assert!(errors.get(DraftField::UserName).is_none());
        assert!(errors.is_valid());
    }

    #[test]
    fn test_user_name_length_is_trimmed() {
        let errors = validate_draft(&draft("#CM1", "  ab  ", "P", "12345"));
        assert_eq!(
            errors.get(DraftField::UserName),
            Some(&FieldValidationError::TooShort {
                field: DraftField::UserName,
                min: 3
            })
        );
    }

    #[test]
    fn test_short_address() {
        let errors = validate_draft(&draft("#CM123", "John", "Test", "abcd"));
        assert_eq!(
            errors.message(DraftField::Address).as_deref(),
            Some("Address must be at least 5 characters")
        );
    }

    #[test]
    fn test_five_char_address_passes() {
        let errors = validate_draft(&draft("#CM123", "John Doe", "Test", "abcde"));
        assert!(errors.get(DraftField::Address).is_none());
    }

    #[test]
    fn test_padded_values_validate_after_trim() {
        let errors = validate_draft(&draft("  #CM123  ", "  John Doe  ", "  Test  ", "  123 Street  "));
        assert!(errors.is_valid());
    }

    #[test]
    fn test_special_and_unicode_characters() {
        assert!(validate_draft(&draft(
            "#CM-123@456",
            "John-Paul O'Connor",
            "Test & Development",
            "123 Main St., Apt #5"
        ))
        .is_valid());
        assert!(validate_draft(&draft("#CM123", "José María", "Prøject Tëst", "北京市朝阳区")).is_valid());
    }

    #[test]
    fn test_status_and_avatar_are_not_validated() {
        let mut d = draft("#CM1", "Ann Lee", "X", "123 Road");
        d.user_avatar = String::new();
        assert!(validate_draft(&d).is_valid());
    }

    #[test]
    fn test_errors_iterate_in_field_order() {
        let errors = validate_draft(&draft("", "", "", ""));
        let fields: Vec<DraftField> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![
                DraftField::Id,
                DraftField::UserName,
                DraftField::Project,
                DraftField::Address
            ]
        );
    }
}
