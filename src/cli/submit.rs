use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use clap::Args;
use relaydesk_form::{
    Cooldown, FileCooldownStore, FormController, FormStatus, FormView, HttpTransport,
    SubmitOutcome,
};
use relaydesk_shared::{Field, SubmissionKind};
use time::OffsetDateTime;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Kind of submission (ticket or order)
    pub kind: SubmissionKind,

    /// Submission endpoint, e.g. http://127.0.0.1:3000/api/ticket
    #[arg(long)]
    pub endpoint: String,

    #[arg(long)]
    pub full_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub mobile: Option<String>,

    #[arg(long)]
    pub product: Option<String>,

    #[arg(long)]
    pub payment_method: Option<String>,

    #[arg(long)]
    pub ticket_type: Option<String>,

    /// Confirm that a human is submitting
    #[arg(long)]
    pub human: bool,

    /// Decoy field, anything here drops the submission
    #[arg(long, hide = true, default_value = "")]
    pub website: String,

    /// File remembering the last successful submission of each kind
    #[arg(long, default_value = ".relaydesk/cooldown.json")]
    pub state_file: PathBuf,

    #[arg(long, default_value_t = Cooldown::DEFAULT_WINDOW.as_secs())]
    pub cooldown_secs: u64,

    /// Skip the local email syntax check
    #[arg(long)]
    pub no_email_check: bool,
}

/// Form backed by command-line arguments, feedback goes to the terminal.
struct TerminalForm {
    values: BTreeMap<String, String>,
    honeypot: String,
    human: bool,
}

impl From<&SubmitArgs> for TerminalForm {
    fn from(args: &SubmitArgs) -> Self {
        let fields = [
            (Field::FullName, Some(&args.full_name)),
            (Field::Email, Some(&args.email)),
            (Field::Mobile, args.mobile.as_ref()),
            (Field::Product, args.product.as_ref()),
            (Field::PaymentMethod, args.payment_method.as_ref()),
            (Field::TicketType, args.ticket_type.as_ref()),
        ];

        Self {
            values: fields
                .into_iter()
                .filter_map(|(field, value)| Some((field.as_ref().to_owned(), value?.to_owned())))
                .collect(),
            honeypot: args.website.to_owned(),
            human: args.human,
        }
    }
}

impl FormView for TerminalForm {
    fn values(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }

    fn honeypot(&self) -> String {
        self.honeypot.clone()
    }

    fn human_confirmed(&self) -> bool {
        self.human
    }

    fn set_enabled(&mut self, enabled: bool) {
        tracing::debug!(enabled, "Form controls toggled");
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        tracing::debug!(enabled, "Submit button toggled");
    }

    fn set_status(&mut self, status: FormStatus) {
        match status {
            FormStatus::Submitting => println!("Submitting…"),
            FormStatus::Success(message) => println!("{message}"),
            FormStatus::Error(message) | FormStatus::CoolingDown(message) => {
                eprintln!("{message}")
            }
        }
    }

    fn reset(&mut self) {
        self.values.clear();
        self.human = false;
    }
}

pub async fn submit(args: SubmitArgs, timeout: Duration) -> anyhow::Result<()> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let mut controller = FormController::new(
        args.kind,
        Cooldown::new(Duration::from_secs(args.cooldown_secs)),
        FileCooldownStore::new(&args.state_file),
        HttpTransport::new(client, &args.endpoint),
    );
    if args.no_email_check {
        controller = controller.without_email_check();
    }

    let mut form = TerminalForm::from(&args);
    let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;

    match controller.submit(&mut form, now_ms).await {
        SubmitOutcome::Accepted(_) | SubmitOutcome::Dropped => Ok(()),
        SubmitOutcome::CoolingDown(remaining) => {
            anyhow::bail!("{} is cooling down for {remaining:?}", args.kind)
        }
        SubmitOutcome::HumanCheckRequired => anyhow::bail!("pass --human to confirm"),
        SubmitOutcome::InvalidEmail => anyhow::bail!("invalid email address: {}", args.email),
        SubmitOutcome::Failed(message) => anyhow::bail!(message),
    }
}
