/// Errors surfaced by resource reads and appends.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource '{resource}' missing required fields: {fields:?}")]
    MissingFields {
        resource: String,
        fields: Vec<String>,
    },

    #[error("resource '{0}' does not accept writes")]
    NotAppendable(String),

    #[error("record body must be a JSON object")]
    NotAnObject,
}
