//! Per-step gates checked before the wizard moves forward.

use chrono::NaiveDate;
use shared::{
    catalog::FacultyCatalog,
    domain::{Field, Step},
};

use crate::{draft::RegistrationDraft, error::StepError};

pub fn required_fields(step: Step) -> &'static [Field] {
    match step {
        Step::Identity => &Field::IDENTITY,
        Step::Academic => &Field::ACADEMIC,
        Step::Documents | Step::Confirmation => &[],
    }
}

pub fn validate_step(
    step: Step,
    draft: &RegistrationDraft,
    catalog: &FacultyCatalog,
) -> Result<(), StepError> {
    let missing: Vec<Field> = required_fields(step)
        .iter()
        .copied()
        .filter(|field| !draft.is_filled(*field))
        .collect();
    if !missing.is_empty() {
        return Err(StepError::Incomplete { step, missing });
    }

    match step {
        Step::Identity => validate_identity(draft),
        Step::Academic => validate_academic(draft, catalog),
        Step::Documents | Step::Confirmation => Ok(()),
    }
}

fn validate_identity(draft: &RegistrationDraft) -> Result<(), StepError> {
    let birth_date = draft.text(Field::BirthDate).unwrap_or_default();
    if parse_birth_date(birth_date).is_none() {
        return Err(StepError::Invalid {
            field: Field::BirthDate,
            reason: format!("date invalide '{birth_date}' (format attendu AAAA-MM-JJ)"),
        });
    }

    let email = draft.text(Field::Email).unwrap_or_default();
    if !is_plausible_email(email) {
        return Err(StepError::Invalid {
            field: Field::Email,
            reason: format!("adresse email invalide '{email}'"),
        });
    }

    Ok(())
}

fn validate_academic(draft: &RegistrationDraft, catalog: &FacultyCatalog) -> Result<(), StepError> {
    let faculty = draft.text(Field::TargetFaculty).unwrap_or_default();
    if !catalog.contains(faculty) {
        return Err(StepError::Invalid {
            field: Field::TargetFaculty,
            reason: format!("faculté inconnue '{faculty}'"),
        });
    }

    let department = draft.text(Field::TargetDepartment).unwrap_or_default();
    if !catalog.offers(faculty, department) {
        return Err(StepError::Invalid {
            field: Field::TargetDepartment,
            reason: format!("'{department}' n'est pas proposé par la faculté {faculty}"),
        });
    }

    Ok(())
}

pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Same shape check a browser applies to `type="email"` inputs.
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_plausible_email("alice@example.org"));
        assert!(is_plausible_email(" alice@upg "));
        assert!(!is_plausible_email("alice"));
        assert!(!is_plausible_email("@example.org"));
        assert!(!is_plausible_email("alice@"));
        assert!(!is_plausible_email("a@b@c"));
        assert!(!is_plausible_email("al ice@example.org"));
    }

    #[test]
    fn birth_date_uses_iso_calendar_dates() {
        assert!(parse_birth_date("2004-02-29").is_some());
        assert!(parse_birth_date("2003-02-29").is_none());
        assert!(parse_birth_date("12/05/2004").is_none());
        assert!(parse_birth_date("").is_none());
    }
}
