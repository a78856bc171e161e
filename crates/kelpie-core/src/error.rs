pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed entity id (expected `entity-<index>`): {id}")]
    MalformedEntityId { id: String },
}
