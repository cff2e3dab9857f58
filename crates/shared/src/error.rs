use crate::Field;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required fields")]
    MissingFields(Vec<Field>),

    #[error("Invalid email address")]
    InvalidEmail(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, Error>;
