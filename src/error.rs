/// Errors returned by coordinate, distance and curve-key operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A coordinate still holding the unset sentinel was passed where a
    /// set coordinate is required
    #[error("Coordinate is not set")]
    UnsetCoordinate,

    #[error("Degrees ({lat}, {lon}) cannot be represented as a fixed-point coordinate")]
    UnrepresentableDegrees { lat: f64, lon: f64 },

    #[error("Invalid fixed-point value {input:?}: {reason}")]
    InvalidFixedPoint { input: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
