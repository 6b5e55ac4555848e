use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Nothing but whitespace was supplied.
    #[error("input is blank")]
    Blank,
}
