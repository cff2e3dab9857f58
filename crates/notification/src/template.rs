use askama::Template;
use relaydesk_shared::{Field, KindProfile, Submission, SubmissionKind};
use serde::Serialize;

use crate::EmailConfig;

#[derive(Clone)]
pub(crate) struct Row {
    pub label: &'static str,
    pub value: String,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; color: #1f2937;">
  <h2 style="color: #111827;">Thank you, {{ full_name }}!</h2>
  <p>We received your {{ noun }} and our team will get back to you shortly. Here is a summary of what you sent us:</p>
  <table style="width: 100%; border-collapse: collapse;">
    {% for row in rows %}<tr>
      <td style="padding: 8px; border-bottom: 1px solid #e5e7eb;"><strong>{{ row.label }}</strong></td>
      <td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{{ row.value }}</td>
    </tr>
    {% endfor %}
  </table>
  <p style="margin-top: 24px;">
    <a href="{{ site_url }}" style="background: #2563eb; color: #ffffff; padding: 10px 16px; border-radius: 6px; text-decoration: none;">Visit our website</a>
    <a href="{{ support_url }}" style="margin-left: 12px; color: #2563eb;">Contact support</a>
  </p>
</div>"#
)]
pub(crate) struct ConfirmationHtmlTemplate<'a> {
    pub full_name: &'a str,
    pub noun: &'a str,
    pub rows: Vec<Row>,
    pub site_url: &'a str,
    pub support_url: &'a str,
}

#[derive(Template)]
#[template(
    ext = "txt",
    source = "Thank you, {{ full_name }}!

We received your {{ noun }} and our team will get back to you shortly.

{% for row in rows %}{{ row.label }}: {{ row.value }}
{% endfor %}
Visit our website: {{ site_url }}
Contact support: {{ support_url }}
"
)]
pub(crate) struct ConfirmationPlainTemplate<'a> {
    pub full_name: &'a str,
    pub noun: &'a str,
    pub rows: Vec<Row>,
    pub site_url: &'a str,
    pub support_url: &'a str,
}

/// Confirmation message for the submitter, in the provider's wire format.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConfirmationEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    #[serde(skip)]
    pub text: String,
}

impl ConfirmationEmail {
    pub fn render(
        config: &EmailConfig,
        profile: &KindProfile,
        submission: &Submission,
    ) -> Result<Self, askama::Error> {
        let rows = profile
            .kind
            .displayed_fields()
            .iter()
            .map(|field| Row {
                label: field.label(),
                value: submission.display(*field).to_owned(),
            })
            .collect::<Vec<_>>();

        let noun = match profile.kind {
            SubmissionKind::Ticket => "support ticket",
            SubmissionKind::Order => "order",
        };
        let full_name = submission.display(Field::FullName);

        let html = ConfirmationHtmlTemplate {
            full_name,
            noun,
            rows: rows.clone(),
            site_url: &config.site_url,
            support_url: &config.support_url,
        }
        .render()?;

        let text = ConfirmationPlainTemplate {
            full_name,
            noun,
            rows,
            site_url: &config.site_url,
            support_url: &config.support_url,
        }
        .render()?;

        Ok(Self {
            from: config.from_address.to_owned(),
            to: submission.get(Field::Email).unwrap_or_default().to_owned(),
            subject: profile.subject.to_owned(),
            html,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use relaydesk_shared::PLACEHOLDER;

    use super::*;

    fn jane() -> Submission {
        Submission {
            full_name: Some("Jane Doe".to_owned()),
            email: Some("jane@example.com".to_owned()),
            mobile: Some("555-1234".to_owned()),
            product: Some("Premium Plan".to_owned()),
            payment_method: None,
            ticket_type: None,
        }
    }

    #[test]
    fn test_render_addresses_the_submitter() {
        let config = EmailConfig::default();
        let email = ConfirmationEmail::render(
            &config,
            &KindProfile::from(SubmissionKind::Order),
            &jane(),
        )
        .unwrap();

        assert_eq!(email.to, "jane@example.com");
        assert_eq!(email.from, config.from_address);
        assert_eq!(email.subject, "We received your order");
    }

    #[test]
    fn test_html_summarises_fields_with_placeholder() {
        let email = ConfirmationEmail::render(
            &EmailConfig::default(),
            &KindProfile::from(SubmissionKind::Order),
            &jane(),
        )
        .unwrap();

        for value in ["Jane Doe", "jane@example.com", "555-1234", "Premium Plan"] {
            assert!(email.html.contains(value), "{value}");
            assert!(email.text.contains(value), "{value}");
        }
        assert!(email.html.contains(PLACEHOLDER));
        assert!(email.text.contains(&format!("Payment Method: {PLACEHOLDER}")));
        assert!(!email.html.contains("None"));
    }

    #[test]
    fn test_html_has_two_action_links() {
        let config = EmailConfig {
            site_url: "https://shop.example".to_owned(),
            support_url: "https://shop.example/support".to_owned(),
            ..Default::default()
        };
        let email = ConfirmationEmail::render(
            &config,
            &KindProfile::from(SubmissionKind::Ticket),
            &jane(),
        )
        .unwrap();

        assert_eq!(email.html.matches("<a href=").count(), 2);
        assert!(email.html.contains(r#"href="https://shop.example""#));
        assert!(email.html.contains(r#"href="https://shop.example/support""#));
    }

    #[test]
    fn test_submitted_markup_is_escaped() {
        let submission = Submission {
            full_name: Some("<script>alert(1)</script>".to_owned()),
            ..jane()
        };
        let email = ConfirmationEmail::render(
            &EmailConfig::default(),
            &KindProfile::from(SubmissionKind::Ticket),
            &submission,
        )
        .unwrap();

        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&#60;script&#62;") || email.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_wire_format_omits_plain_text() {
        let email = ConfirmationEmail::render(
            &EmailConfig::default(),
            &KindProfile::from(SubmissionKind::Ticket),
            &jane(),
        )
        .unwrap();

        let json = serde_json::to_value(&email).unwrap();
        let mut keys = json.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, ["from", "html", "subject", "to"]);
    }
}
