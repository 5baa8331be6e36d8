use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediatorError {
    #[error("Configuration key missing: {0}")]
    MissingConfigKey(String),

    #[error("Module registry is not bound to a mediator")]
    UnboundRegistry,
}
