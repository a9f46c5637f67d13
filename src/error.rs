use serde_json::Error as SerdeError;
use std::{error, fmt, io};

/// Error type for the map loader.
#[derive(Debug)]
pub enum MapError {
    /// JSON parse error
    Parse(SerdeError),
    /// File I/O error
    Io(io::Error),
    /// The map JSON did not contain exactly two tile layers
    LayerCount(usize),
    /// A layer's data length does not match width * height, or the map
    /// dimensions are zero
    InvalidLayerSize(usize),
    /// Unsupported file format (non-JSON)
    UnsupportedFormat(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Parse(err) => write!(f, "JSON parse error: {}", err),
            MapError::Io(err) => write!(f, "I/O error: {}", err),
            MapError::LayerCount(n) => {
                write!(f, "Expected exactly 2 tile layers, map JSON has {}", n)
            }
            MapError::InvalidLayerSize(layer) => write!(
                f,
                "Invalid size for layer {}: data length does not match map dimensions",
                layer
            ),
            MapError::UnsupportedFormat(path) => {
                write!(f, "Unsupported file format: {}", path)
            }
        }
    }
}

impl From<SerdeError> for MapError {
    fn from(err: SerdeError) -> Self {
        MapError::Parse(err)
    }
}

impl From<io::Error> for MapError {
    fn from(err: io::Error) -> Self {
        MapError::Io(err)
    }
}

impl error::Error for MapError {}
