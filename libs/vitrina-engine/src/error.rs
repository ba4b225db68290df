use vitrina_api::error::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("resource '{resource}': {source}")]
    Store {
        resource: String,
        source: StoreError,
    },
}
