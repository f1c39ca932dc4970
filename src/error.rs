use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The source image could not be read or decoded.
    #[error("failed to decode image")]
    ImageDecode(#[from] image::ImageError),

    /// The layout configuration cannot produce valid swatches. The inputs have to be fixed before
    /// retrying; nothing is recovered internally.
    #[error("invalid layout configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The reference area is degenerate and cannot hold any swatches.
    #[error("invalid reference area: {reason}")]
    InvalidArea { reason: String },
}
