//! # Contact Form Validation
//!
//! Pure rule checks for the contact form. Each field produces at most one
//! message, the first rule it breaks; whole-form validation returns the
//! messages in field order (name, email, message).
//!
//! Values are trimmed before checking and lengths count characters, so
//! `"Pé"` is two characters long.
//!
//! ## Example
//!
//! ```rust
//! use folio_core::validation::{validate, ContactFormData};
//!
//! let data = ContactFormData::new("A1", "bad", "short");
//! let errors = validate(&data);
//! assert_eq!(errors.len(), 3);
//!
//! let ok = ContactFormData::new("Ana Pérez", "ana@x.com", "Hola, quiero contactarte");
//! assert!(validate(&ok).is_empty());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_REQUIRED: &str = "El nombre es obligatorio";
pub const NAME_TOO_SHORT: &str = "El nombre debe tener al menos 2 caracteres";
pub const NAME_INVALID_CHARS: &str = "El nombre solo puede contener letras y espacios";
pub const EMAIL_INVALID: &str = "Por favor, introduce un email válido";
pub const MESSAGE_TOO_SHORT: &str = "El mensaje debe tener al menos 10 caracteres";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").expect("invalid name pattern")
});

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern"));

/// Contact form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// The `name` attribute of the form control
    pub fn control_name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn from_control_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.control_name() == name)
    }

    /// Check one value against this field's rule.
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        let value = value.trim();
        let message = match self {
            Field::Name => check_name(value),
            Field::Email => check_email(value),
            Field::Message => check_message(value),
        };
        match message {
            Some(message) => Err(FieldError {
                field: *self,
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn check_name(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some(NAME_REQUIRED)
    } else if value.chars().count() < NAME_MIN_CHARS {
        Some(NAME_TOO_SHORT)
    } else if !NAME_PATTERN.is_match(value) {
        Some(NAME_INVALID_CHARS)
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<&'static str> {
    (!EMAIL_PATTERN.is_match(value)).then_some(EMAIL_INVALID)
}

fn check_message(value: &str) -> Option<&'static str> {
    (value.chars().count() < MESSAGE_MIN_CHARS).then_some(MESSAGE_TOO_SHORT)
}

/// One submission attempt's worth of form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormData {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ContactFormData {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }
}

/// A broken rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Ordered list of broken rules; empty when the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Messages in display order
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

/// Validate the whole form.
pub fn validate(data: &ContactFormData) -> ValidationErrors {
    ValidationErrors(
        Field::ALL
            .into_iter()
            .filter_map(|field| field.check(data.value(field)).err())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_submission() {
        let data = ContactFormData::new("Ana Pérez", "ana@x.com", "Hola, quiero contactarte");
        assert!(validate(&data).is_empty());
    }

    #[test]
    fn test_three_errors_in_field_order() {
        let data = ContactFormData::new("A1", "bad", "short");
        let errors = validate(&data);
        assert_eq!(
            errors.messages(),
            vec![NAME_INVALID_CHARS, EMAIL_INVALID, MESSAGE_TOO_SHORT]
        );
        assert_eq!(errors.for_field(Field::Email).unwrap().message, EMAIL_INVALID);
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(Field::Name.check("").unwrap_err().message, NAME_REQUIRED);
        assert_eq!(Field::Name.check("   ").unwrap_err().message, NAME_REQUIRED);
        assert_eq!(Field::Name.check("A").unwrap_err().message, NAME_TOO_SHORT);
        assert_eq!(Field::Name.check("R2D2").unwrap_err().message, NAME_INVALID_CHARS);
        assert!(Field::Name.check("Núñez Ibáñez").is_ok());
        assert!(Field::Name.check("ÁNGEL").is_ok());
        assert!(Field::Name.check("Jo").is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(Field::Email.check("a@b.co").is_ok());
        assert!(Field::Email.check("a@b").is_err());
        assert!(Field::Email.check("a").is_err());
        assert!(Field::Email.check("a b@c.de").is_err());
        assert!(Field::Email.check("@c.de").is_err());
        assert!(Field::Email.check("  ana@x.com  ").is_ok());
    }

    #[test]
    fn test_message_length_boundary() {
        assert!(Field::Message.check("0123456789").is_ok());
        assert_eq!(
            Field::Message.check("012345678").unwrap_err().message,
            MESSAGE_TOO_SHORT
        );
        // Characters, not bytes
        assert!(Field::Message.check("ñññññññññ").is_err());
        assert!(Field::Message.check("ññññññññññ").is_ok());
    }

    #[test]
    fn test_control_names() {
        for field in Field::ALL {
            assert_eq!(Field::from_control_name(field.control_name()), Some(field));
        }
        assert_eq!(Field::from_control_name("phone"), None);
    }

    proptest! {
        #[test]
        fn prop_latin_names_pass(name in "[a-zA-ZáéíóúÁÉÍÓÚñÑ][a-zA-ZáéíóúÁÉÍÓÚñÑ ]{0,30}[a-zA-ZáéíóúÁÉÍÓÚñÑ]") {
            prop_assert!(Field::Name.check(&name).is_ok());
        }

        #[test]
        fn prop_names_with_digits_fail(prefix in "[a-zA-Z]{1,10}", digit in "[0-9]", suffix in "[a-zA-Z]{0,10}") {
            let name = format!("{prefix}{digit}{suffix}");
            prop_assert!(Field::Name.check(&name).is_err());
        }

        #[test]
        fn prop_emails_without_at_fail(email in "[a-z.]{0,20}") {
            prop_assert_eq!(Field::Email.check(&email).unwrap_err().message, EMAIL_INVALID);
        }

        #[test]
        fn prop_emails_without_dot_after_at_fail(local in "[a-z]{1,10}", domain in "[a-z]{1,10}") {
            let email = format!("{local}@{domain}");
            prop_assert!(Field::Email.check(&email).is_err());
        }

        #[test]
        fn prop_short_messages_fail(message in "[a-z]{0,9}") {
            prop_assert!(Field::Message.check(&message).is_err());
        }

        #[test]
        fn prop_long_messages_pass(message in "[a-z]{10,200}") {
            prop_assert!(Field::Message.check(&message).is_ok());
        }
    }
}
