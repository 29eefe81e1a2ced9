//! Field helpers shared by the form drafts.

use crate::error::FormError;

pub(crate) fn default_true() -> bool {
    true
}

/// Collects missing required fields so they can be reported together.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Trimmed value of a required text field.
    pub(crate) fn text(&mut self, field: &'static str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.missing.push(field);
        }
        value.to_string()
    }

    pub(crate) fn finish(self) -> Result<(), FormError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(self.missing))
        }
    }
}

/// Trimmed value of an optional text field; blank means absent.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn optional_email(field: &'static str, value: &str) -> Result<Option<String>, FormError> {
    let Some(email) = optional_text(value) else {
        return Ok(None);
    };
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(Some(email)),
        _ => Err(FormError::Invalid {
            field,
            reason: "must be an email address".to_string(),
        }),
    }
}

pub(crate) fn optional_count(field: &'static str, value: &str) -> Result<Option<u32>, FormError> {
    optional_text(value)
        .map(|v| {
            v.parse::<u32>().map_err(|_| FormError::Invalid {
                field,
                reason: "must be a whole number".to_string(),
            })
        })
        .transpose()
}

pub(crate) fn optional_amount(field: &'static str, value: &str) -> Result<Option<f64>, FormError> {
    optional_text(value)
        .map(|v| match v.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
            _ => Err(FormError::Invalid {
                field,
                reason: "must be a non-negative amount".to_string(),
            }),
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_collects_all_missing() {
        let mut required = Required::new();
        assert_eq!(required.text("name", "  Dr. Rao "), "Dr. Rao");
        required.text("specialization", "");
        required.text("phone", "   ");

        match required.finish() {
            Err(FormError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["specialization", "phone"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_optional_parsers() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_count("years", "12").unwrap(), Some(12));
        assert!(optional_count("years", "twelve").is_err());
        assert_eq!(optional_amount("fee", "").unwrap(), None);
        assert_eq!(optional_amount("fee", "499.5").unwrap(), Some(499.5));
        assert!(optional_amount("fee", "-1").is_err());
        assert!(optional_email("email", "rao@clinic.in").unwrap().is_some());
        assert!(optional_email("email", "not-an-email").is_err());
    }
}
