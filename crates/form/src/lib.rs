//! Browser-side half of a submission: anti-bot checks, a per-kind cooldown
//! that survives restarts, and the POST to the submission endpoint.

mod controller;
mod cooldown;
mod transport;
mod view;

pub use controller::*;
pub use cooldown::*;
pub use transport::*;
pub use view::*;
