/// Result alias that carries the custom [`PlayerError`] type.
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// A caller handed the core data it cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The underlying FFT refused to process a block.
    #[error("{0}")]
    Fft(#[from] realfft::FftError),
    /// The catalog payload could not be parsed.
    #[error("malformed catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    /// The moodboard image service returned nothing usable.
    #[error("image generation failed: {0}")]
    ImageGeneration(String),
}

impl PlayerError {
    /// Creates an image-generation error from any printable message.
    pub fn image<T: Into<String>>(msg: T) -> Self {
        Self::ImageGeneration(msg.into())
    }
}
