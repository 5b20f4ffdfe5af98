use std::fmt;

/// All errors produced by the blobnet library.
#[derive(Debug)]
pub enum BlobError {
    /// A configuration value is out of range; caught before any work starts.
    InvalidConfig(String),
    /// A shape invariant was violated (e.g. mismatched matrix dimensions).
    ShapeMismatch {
        /// Human-readable context for the mismatch (e.g. "stage input").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },
    /// A class label does not index into the model's outputs.
    LabelOutOfRange { label: usize, n_classes: usize },
    /// The loss became NaN or infinite during training.
    NonFiniteLoss { epoch: usize, phase: &'static str },
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            Self::LabelOutOfRange { label, n_classes } => {
                write!(f, "label {label} out of range for {n_classes} classes")
            }
            Self::NonFiniteLoss { epoch, phase } => {
                write!(f, "{phase} loss is not finite at epoch {epoch}")
            }
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Image(e) => write!(f, "image error: {e}"),
        }
    }
}

impl std::error::Error for BlobError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BlobError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for BlobError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<image::ImageError> for BlobError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

pub type Result<T> = std::result::Result<T, BlobError>;
