pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("viewport dimensions must be finite and positive: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}
