//!
//! Crate errors
//!

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InputStringError(&'static str),
    #[error("Missing value for parameter {0}")]
    NoValueParameter(String),
    #[error("Cannot retrieve value for parameter {0}")]
    ParameterValueError(String),
    #[error("Missing projection name")]
    MissingProjectionError,
    #[error("Unrecognized datum")]
    InvalidDatum,
    #[error("Unrecognized ellipsoid")]
    InvalidEllipsoid,
    #[error("{0}")]
    InvalidParameterValue(&'static str),
    #[error("Invalid coordinate dimension")]
    InvalidCoordinateDimension,
    #[error("Latitude out of range")]
    LatitudeOutOfRange,
    #[error("NAD grid not available")]
    NadGridNotAvailable,
    #[error("Parent grid not found")]
    NadGridParentNotFound,
    #[error("Inverse grid shift failed to converge")]
    InverseGridShiftConvError,
    #[error("Point outside of nadgrid shift area")]
    PointOutsideNadShiftArea,
    #[error("Invalid 'towgs84' string")]
    InvalidToWGS84String,
    #[error("Invalid axis specification")]
    InvalidAxis,
    #[error("Unrecognized CRS definition format")]
    UnrecognizedFormat,
    #[error("Latitude or longitude exceeds range")]
    LatOrLongExceedLimit,
    #[error("NaN value for coordinate")]
    NanCoordinateValue,
    #[error("Coordinate out of range")]
    CoordinateOutOfRange,
    #[error("Invalid number of coordinates")]
    InvalidNumberOfCoordinates,
    #[error("Projection not found: {0}")]
    ProjectionNotFound(String),
    #[error("No forward projection defined for destination projection")]
    NoForwardProjectionDefined,
    #[error("No inverse projection defined for source projection")]
    NoInverseProjectionDefined,
    #[error("Standard parallels are equal and of opposite sign")]
    ProjErrConicLatEqual,
    #[error("Tolerance condition not satisfied")]
    ToleranceConditionError,
    #[error("Non convergence of phi2 calculation")]
    NonInvPhi2Convergence,
    #[error("Failed to compute forward projection")]
    ForwardProjectionFailure,
    #[error("Failed to compute inverse projection")]
    InverseProjectionFailure,
    #[error("Invalid UTM zone")]
    InvalidUtmZone,
    #[error("An ellipsoid is required")]
    EllipsoidRequired,
    #[error("Coordinate transform outside projection domain")]
    CoordTransOutsideProjectionDomain,
    #[error("No convergence for inverse meridian distance")]
    InvMeridDistConvError,
    #[error("Numerical argument too large")]
    ArgumentTooLarge,
    #[error("Projection used before it was initialized")]
    UninitializedProjection,

    // -- Parser-facing errors (definition parsing) --
    #[error("Unsupported CRS definition: {0}")]
    Unsupported(String),
    #[error("Malformed CRS definition near: {0}")]
    BadSyntax(String),
    #[error("Unknown EPSG code: {0}")]
    UnknownEpsg(String),
    #[error("Remote EPSG provider unavailable for code: {0}")]
    NetworkUnavailable(String),
    #[error("EPSG code could not be resolved: {0}")]
    EpsgUnresolved(String),

    // -- Pipeline-facing errors --
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),
    #[error("Point outside projection or transform domain: {0}")]
    OutOfDomain(&'static str),
    #[error("Mandatory datum grid missing: {0}")]
    DatumGridMissing(String),

    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("UTF8 error")]
    Utf8Error(#[from] std::str::Utf8Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Collapse any internal non-convergence/domain error into the single
    /// `OutOfDomain` kind surfaced at the transform pipeline boundary: the
    /// pipeline propagates rather than interprets the specific numerical
    /// cause.
    pub(crate) fn into_out_of_domain(self) -> Self {
        match self {
            Self::OutOfDomain(_) => self,
            Self::CoordTransOutsideProjectionDomain => Self::OutOfDomain("domain"),
            Self::ToleranceConditionError => Self::OutOfDomain("tolerance"),
            Self::NonInvPhi2Convergence => Self::OutOfDomain("phi2 non-convergence"),
            Self::InvMeridDistConvError => Self::OutOfDomain("meridian distance non-convergence"),
            Self::InverseGridShiftConvError => Self::OutOfDomain("grid shift non-convergence"),
            Self::ArgumentTooLarge => Self::OutOfDomain("argument out of range"),
            Self::ForwardProjectionFailure => Self::OutOfDomain("forward projection failure"),
            Self::InverseProjectionFailure => Self::OutOfDomain("inverse projection failure"),
            Self::LatitudeOutOfRange | Self::LatOrLongExceedLimit => {
                Self::OutOfDomain("latitude/longitude out of range")
            }
            other => other,
        }
    }
}
