use std::collections::BTreeMap;

/// Feedback line shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Submitting,
    Success(String),
    Error(String),
    CoolingDown(String),
}

/// The rendered form the controller drives.
pub trait FormView {
    /// Named values of the visible inputs, decoys excluded.
    fn values(&self) -> BTreeMap<String, String>;

    /// Value of the hidden decoy input humans never see.
    fn honeypot(&self) -> String;

    /// Whether the "I am not a robot" box is ticked.
    fn human_confirmed(&self) -> bool;

    /// Enables or disables every control of the form.
    fn set_enabled(&mut self, enabled: bool);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_status(&mut self, status: FormStatus);

    fn reset(&mut self);
}
