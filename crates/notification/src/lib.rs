mod config;
mod error;
mod relay;
mod service;
mod template;
mod webhook;

pub use config::*;
pub use error::*;
pub use relay::*;
pub use service::*;
pub use template::ConfirmationEmail;
pub use webhook::*;
