use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::{Error, Field, Result};

/// Rendered in place of any attribute the submitter left out.
pub const PLACEHOLDER: &str = "—";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Validate)]
struct EmailAddress {
    #[validate(regex(path = *EMAIL_PATTERN))]
    value: String,
}

pub fn is_valid_email(value: &str) -> bool {
    EmailAddress {
        value: value.to_owned(),
    }
    .validate()
    .is_ok()
}

/// A ticket or order as posted by the browser form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub product: Option<String>,
    pub payment_method: Option<String>,
    pub ticket_type: Option<String>,
}

impl Submission {
    /// Parses a request body. Anything that is not a JSON object is read as
    /// an empty submission. Numbers and booleans are kept as text, other
    /// values count as absent.
    pub fn from_json(body: &[u8]) -> Self {
        let Ok(Value::Object(attributes)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let attribute = |field: Field| match attributes.get(field.as_ref()) {
            Some(Value::String(value)) => Some(value.to_owned()),
            Some(Value::Number(value)) => Some(value.to_string()),
            Some(Value::Bool(value)) => Some(value.to_string()),
            _ => None,
        };

        Self {
            full_name: attribute(Field::FullName),
            email: attribute(Field::Email),
            mobile: attribute(Field::Mobile),
            product: attribute(Field::Product),
            payment_method: attribute(Field::PaymentMethod),
            ticket_type: attribute(Field::TicketType),
        }
    }

    fn raw(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Mobile => &self.mobile,
            Field::Product => &self.product,
            Field::PaymentMethod => &self.payment_method,
            Field::TicketType => &self.ticket_type,
        };

        value.as_deref()
    }

    /// The trimmed value of an attribute, `None` when absent or blank.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.raw(field).map(str::trim).filter(|v| !v.is_empty())
    }

    /// The value exactly as submitted, or [`PLACEHOLDER`] when blank.
    pub fn display(&self, field: Field) -> &str {
        match self.get(field) {
            Some(_) => self.raw(field).unwrap_or(PLACEHOLDER),
            None => PLACEHOLDER,
        }
    }

    /// Checks required attributes first, then the email syntax.
    pub fn validate(&self, required: &[Field]) -> Result<()> {
        let missing = required
            .iter()
            .copied()
            .filter(|field| self.get(*field).is_none())
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(Error::MissingFields(missing));
        }

        if let Some(email) = self.get(Field::Email) {
            EmailAddress {
                value: email.to_owned(),
            }
            .validate()?;
        }

        Ok(())
    }
}
