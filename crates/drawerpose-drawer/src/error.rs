use crate::snap_points::SnapPointSpec;

/// A snap or break point declaration that cannot be resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PointError {
    /// String that is neither `"<n>px"` nor a plain fraction.
    Malformed { input: String },
    /// Fraction outside `[0, 1]` or not finite.
    FractionOutOfRange { value: f32 },
    /// Negative or non-finite pixel distance.
    InvalidPixels { value: f32 },
}

impl std::fmt::Display for PointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointError::Malformed { input } => {
                write!(f, "malformed point {input:?}; expected a fraction or \"<n>px\"")
            }
            PointError::FractionOutOfRange { value } => {
                write!(f, "fraction {value} is outside [0, 1]")
            }
            PointError::InvalidPixels { value } => {
                write!(f, "pixel distance {value} must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for PointError {}

/// Drawer configuration mistakes. These indicate a programming error and are
/// reported when the configuration is applied, never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerError {
    Point(PointError),
    BreakPointCount { snap_points: usize, break_points: usize },
    /// Resolved offsets must not increase with the index.
    UnsortedSnapPoints { index: usize, offset: f32, previous: f32 },
    /// Resolved offset outside `[0, size]`, e.g. a pixel point taller than
    /// the drawer.
    SnapPointOutOfRange { index: usize, offset: f32, size: f32 },
    UnknownSnapPoint { point: SnapPointSpec },
    InvalidThreshold { name: &'static str, value: f32 },
}

impl std::fmt::Display for DrawerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawerError::Point(err) => write!(f, "{err}"),
            DrawerError::BreakPointCount {
                snap_points,
                break_points,
            } => write!(
                f,
                "{break_points} break points for {snap_points} snap points; expected {}",
                snap_points.saturating_sub(1)
            ),
            DrawerError::UnsortedSnapPoints {
                index,
                offset,
                previous,
            } => write!(
                f,
                "snap point {index} resolves to offset {offset}, beyond the previous point's {previous}; \
                 snap points must be ordered from most closed to most open"
            ),
            DrawerError::SnapPointOutOfRange {
                index,
                offset,
                size,
            } => write!(
                f,
                "snap point {index} resolves to offset {offset}, outside a {size}px drawer"
            ),
            DrawerError::UnknownSnapPoint { point } => {
                write!(f, "{point} is not one of the configured snap points")
            }
            DrawerError::InvalidThreshold { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for DrawerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawerError::Point(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PointError> for DrawerError {
    fn from(err: PointError) -> Self {
        DrawerError::Point(err)
    }
}
