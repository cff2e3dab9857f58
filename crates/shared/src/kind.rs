use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// The flavour of a submission. Each kind is served on its own endpoint and
/// carries its own required fields, notification styling and email subject.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Ticket,
    Order,
}

impl SubmissionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ticket => "Ticket",
            Self::Order => "Order",
        }
    }

    pub fn required_fields(&self) -> &'static [Field] {
        match self {
            Self::Ticket => &[Field::FullName, Field::Email],
            Self::Order => &[Field::FullName, Field::Email, Field::Product],
        }
    }

    /// Attributes shown, in order, in the notification and the confirmation email.
    pub fn displayed_fields(&self) -> &'static [Field] {
        match self {
            Self::Ticket => &[
                Field::FullName,
                Field::Email,
                Field::Mobile,
                Field::Product,
                Field::PaymentMethod,
                Field::TicketType,
            ],
            Self::Order => &[
                Field::FullName,
                Field::Email,
                Field::Mobile,
                Field::Product,
                Field::PaymentMethod,
            ],
        }
    }

    /// Key of the client-side cooldown marker.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Ticket => "lastTicketSubmit",
            Self::Order => "lastOrderSubmit",
        }
    }

    pub fn success_message(&self) -> String {
        format!("{} created & email sent", self.label())
    }
}

#[derive(EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Mobile,
    Product,
    PaymentMethod,
    TicketType,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Mobile => "Mobile",
            Self::Product => "Product",
            Self::PaymentMethod => "Payment Method",
            Self::TicketType => "Ticket Type",
        }
    }
}

/// Everything that differs between two submission kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct KindProfile {
    pub kind: SubmissionKind,
    pub path: String,
    pub title: String,
    pub color: u32,
    pub subject: String,
}

impl From<SubmissionKind> for KindProfile {
    fn from(kind: SubmissionKind) -> Self {
        match kind {
            SubmissionKind::Ticket => Self {
                kind,
                path: "/api/ticket".to_owned(),
                title: "🎫 New Support Ticket".to_owned(),
                color: 5814783,
                subject: "We received your support ticket".to_owned(),
            },
            SubmissionKind::Order => Self {
                kind,
                path: "/api/order".to_owned(),
                title: "🛒 New Order".to_owned(),
                color: 5763719,
                subject: "We received your order".to_owned(),
            },
        }
    }
}
