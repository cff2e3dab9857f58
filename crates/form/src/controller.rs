use std::time::Duration;

use relaydesk_shared::{Field, SubmissionKind, is_valid_email};

use crate::{Cooldown, CooldownStore, FormStatus, FormView, Transport, wait_message};

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Still inside the cooldown window; nothing was sent.
    CoolingDown(Duration),
    /// The decoy field was filled in. Dropped without feedback.
    Dropped,
    HumanCheckRequired,
    InvalidEmail,
    Accepted(String),
    Failed(String),
}

pub struct FormController<S, T> {
    kind: SubmissionKind,
    cooldown: Cooldown,
    store: S,
    transport: T,
    check_email: bool,
}

impl<S: CooldownStore, T: Transport> FormController<S, T> {
    pub fn new(kind: SubmissionKind, cooldown: Cooldown, store: S, transport: T) -> Self {
        Self {
            kind,
            cooldown,
            store,
            transport,
            check_email: true,
        }
    }

    /// Skips the client-side email syntax check and leaves it to the server.
    pub fn without_email_check(mut self) -> Self {
        self.check_email = false;
        self
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    /// Disables the form and shows the remaining wait while the cooldown
    /// runs. Call when the form is loaded.
    pub fn check_cooldown(&self, view: &mut impl FormView, now_ms: i64) -> Option<Duration> {
        let remaining = self.remaining(now_ms)?;

        view.set_enabled(false);
        view.set_status(FormStatus::CoolingDown(wait_message(remaining)));

        Some(remaining)
    }

    fn remaining(&self, now_ms: i64) -> Option<Duration> {
        let last = match self.store.last_submitted(self.kind) {
            Ok(last) => last,
            Err(err) => {
                tracing::warn!(kind = %self.kind, error = %err, "Ignoring unreadable cooldown state");
                None
            }
        };

        last.and_then(|last| self.cooldown.remaining(last, now_ms))
    }

    #[tracing::instrument(skip_all, fields(kind = %self.kind))]
    pub async fn submit(&self, view: &mut impl FormView, now_ms: i64) -> SubmitOutcome {
        if let Some(remaining) = self.check_cooldown(view, now_ms) {
            return SubmitOutcome::CoolingDown(remaining);
        }

        if !view.honeypot().trim().is_empty() {
            tracing::debug!("Honeypot filled, dropping submission");
            return SubmitOutcome::Dropped;
        }

        if !view.human_confirmed() {
            view.set_status(FormStatus::Error(
                "Please confirm that you are not a robot.".to_owned(),
            ));
            return SubmitOutcome::HumanCheckRequired;
        }

        let values = view.values();

        if self.check_email {
            let email = values
                .get(Field::Email.as_ref())
                .map(|v| v.trim())
                .unwrap_or_default();

            if !is_valid_email(email) {
                view.set_status(FormStatus::Error(
                    "Please enter a valid email address.".to_owned(),
                ));
                return SubmitOutcome::InvalidEmail;
            }
        }

        view.set_submit_enabled(false);
        view.set_status(FormStatus::Submitting);

        match self.transport.post(&values).await {
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| {
                    format!(
                        "Thank you! Your {} has been submitted.",
                        self.kind.label().to_lowercase()
                    )
                });

                view.set_status(FormStatus::Success(message.clone()));
                view.reset();

                if let Err(err) = self.store.record(self.kind, now_ms) {
                    tracing::warn!(error = %err, "Failed to persist cooldown marker");
                }
                // The success message stays visible while the form locks.
                if self.remaining(now_ms).is_some() {
                    view.set_enabled(false);
                }

                SubmitOutcome::Accepted(message)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Submission failed");

                let message = err.user_message();
                view.set_status(FormStatus::Error(message.clone()));
                view.set_submit_enabled(true);

                SubmitOutcome::Failed(message)
            }
        }
    }
}
