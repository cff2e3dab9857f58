mod error;
mod kind;
mod reply;
mod submission;

pub use error::*;
pub use kind::*;
pub use reply::*;
pub use submission::*;
