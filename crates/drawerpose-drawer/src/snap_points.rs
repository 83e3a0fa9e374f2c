//! Snap and break point resolution.
//!
//! Offsets are measured from the fully-open rest position toward the closed
//! edge: `0` is fully open, the drawer size is fully closed. The same
//! convention is used for `translate`, on every side.

use std::fmt;
use std::str::FromStr;

use smallvec::{smallvec, SmallVec};

use crate::error::{DrawerError, PointError};

/// Resolved offsets may exceed their predecessor by this much before the
/// configuration counts as unsorted.
const ORDER_EPSILON: f32 = 0.01;

/// A configured resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPointSpec {
    /// Fraction of the drawer size that is visible: 1 = fully open, 0 = closed.
    Fraction(f32),
    /// Visible pixels measured from the closed edge.
    Pixels(f32),
}

impl SnapPointSpec {
    pub const CLOSED: SnapPointSpec = SnapPointSpec::Fraction(0.0);
    pub const OPEN: SnapPointSpec = SnapPointSpec::Fraction(1.0);

    pub fn fraction(value: f32) -> Result<Self, PointError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(SnapPointSpec::Fraction(value))
        } else {
            Err(PointError::FractionOutOfRange { value })
        }
    }

    pub fn pixels(value: f32) -> Result<Self, PointError> {
        if value.is_finite() && value >= 0.0 {
            Ok(SnapPointSpec::Pixels(value))
        } else {
            Err(PointError::InvalidPixels { value })
        }
    }

    /// Whether both declarations name the same point.
    pub fn same_point(&self, other: &SnapPointSpec) -> bool {
        match (self, other) {
            (SnapPointSpec::Fraction(a), SnapPointSpec::Fraction(b))
            | (SnapPointSpec::Pixels(a), SnapPointSpec::Pixels(b)) => (a - b).abs() <= f32::EPSILON,
            _ => false,
        }
    }
}

impl FromStr for SnapPointSpec {
    type Err = PointError;

    /// Accepts `"<n>px"` for pixels and a bare number for a fraction.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let malformed = || PointError::Malformed {
            input: input.to_string(),
        };
        if let Some(number) = trimmed.strip_suffix("px") {
            let pixels: f32 = number.trim_end().parse().map_err(|_| malformed())?;
            return SnapPointSpec::pixels(pixels);
        }
        let fraction: f32 = trimmed.parse().map_err(|_| malformed())?;
        SnapPointSpec::fraction(fraction)
    }
}

impl TryFrom<f32> for SnapPointSpec {
    type Error = PointError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        SnapPointSpec::fraction(value)
    }
}

impl TryFrom<&str> for SnapPointSpec {
    type Error = PointError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SnapPointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapPointSpec::Fraction(value) => write!(f, "{value}"),
            SnapPointSpec::Pixels(value) => write!(f, "{value}px"),
        }
    }
}

/// Threshold between two adjacent snap points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BreakPointSpec {
    /// Halfway between the two neighbouring snap points.
    #[default]
    Midpoint,
    At(SnapPointSpec),
}

impl FromStr for BreakPointSpec {
    type Err = PointError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().eq_ignore_ascii_case("midpoint") {
            Ok(BreakPointSpec::Midpoint)
        } else {
            input.parse().map(BreakPointSpec::At)
        }
    }
}

impl From<SnapPointSpec> for BreakPointSpec {
    fn from(point: SnapPointSpec) -> Self {
        BreakPointSpec::At(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSnapPoint {
    /// Position in the configured list.
    pub index: usize,
    pub value: SnapPointSpec,
    pub offset: f32,
    /// Threshold toward the next, more open point.
    pub lower_break_point: Option<f32>,
    /// Threshold toward the previous, more closed point.
    pub upper_break_point: Option<f32>,
}

/// Offset of `point` for a drawer of `drawer_size` pixels.
pub fn resolve_point(point: SnapPointSpec, drawer_size: f32) -> f32 {
    match point {
        SnapPointSpec::Fraction(fraction) => drawer_size - fraction * drawer_size,
        SnapPointSpec::Pixels(pixels) => drawer_size - pixels,
    }
}

/// Parses and resolves a textual point in one step.
pub fn resolve_point_str(point: &str, drawer_size: f32) -> Result<f32, PointError> {
    point
        .parse()
        .map(|point| resolve_point(point, drawer_size))
}

/// Resolves a single point without break point information.
pub fn resolve_snap_point(point: SnapPointSpec, drawer_size: f32) -> ResolvedSnapPoint {
    ResolvedSnapPoint {
        index: 0,
        value: point,
        offset: resolve_point(point, drawer_size),
        lower_break_point: None,
        upper_break_point: None,
    }
}

/// Resolves the point at `index`, attaching the break points on either side.
/// `break_offsets[i]` separates snap points `i` and `i + 1`.
pub fn resolve_snap_point_at(
    point: SnapPointSpec,
    drawer_size: f32,
    index: usize,
    break_offsets: &[Option<f32>],
) -> ResolvedSnapPoint {
    ResolvedSnapPoint {
        index,
        lower_break_point: break_offsets.get(index).copied().flatten(),
        upper_break_point: index
            .checked_sub(1)
            .and_then(|previous| break_offsets.get(previous).copied().flatten()),
        ..resolve_snap_point(point, drawer_size)
    }
}

/// Snap points actually used for a configuration: zero or one configured
/// point degenerates to closed plus a single open position.
pub fn effective_snap_points(configured: &[SnapPointSpec]) -> SmallVec<[SnapPointSpec; 4]> {
    match configured {
        [] => smallvec![SnapPointSpec::CLOSED, SnapPointSpec::OPEN],
        [only] if only.same_point(&SnapPointSpec::CLOSED) => {
            smallvec![SnapPointSpec::CLOSED, SnapPointSpec::OPEN]
        }
        [only] => smallvec![SnapPointSpec::CLOSED, *only],
        many => many.iter().copied().collect(),
    }
}

/// Checks break point count against the configured snap points.
pub fn validate_break_points(
    snap_points: &[SnapPointSpec],
    break_points: Option<&[BreakPointSpec]>,
) -> Result<(), DrawerError> {
    let Some(break_points) = break_points else {
        return Ok(());
    };
    let expected = snap_points.len().saturating_sub(1);
    if break_points.len() != expected {
        return Err(DrawerError::BreakPointCount {
            snap_points: snap_points.len(),
            break_points: break_points.len(),
        });
    }
    Ok(())
}

/// Resolves every configured point for `drawer_size`.
///
/// Every offset must land within `[0, drawer_size]`. Break points are ignored
/// when the snap list degenerates.
pub fn resolve_snap_points(
    snap_points: &[SnapPointSpec],
    break_points: Option<&[BreakPointSpec]>,
    drawer_size: f32,
) -> Result<Vec<ResolvedSnapPoint>, DrawerError> {
    validate_break_points(snap_points, break_points)?;

    let degenerate = snap_points.len() < 2;
    let points = effective_snap_points(snap_points);
    let offsets: SmallVec<[f32; 4]> = points
        .iter()
        .map(|point| resolve_point(*point, drawer_size))
        .collect();

    if let Some((index, offset)) = offsets
        .iter()
        .copied()
        .enumerate()
        .find(|(_, offset)| *offset < -ORDER_EPSILON || *offset > drawer_size + ORDER_EPSILON)
    {
        return Err(DrawerError::SnapPointOutOfRange {
            index,
            offset,
            size: drawer_size,
        });
    }

    for (index, pair) in offsets.windows(2).enumerate() {
        if pair[1] > pair[0] + ORDER_EPSILON {
            return Err(DrawerError::UnsortedSnapPoints {
                index: index + 1,
                offset: pair[1],
                previous: pair[0],
            });
        }
    }

    let break_offsets: SmallVec<[Option<f32>; 4]> = match break_points {
        Some(break_points) if !degenerate => break_points
            .iter()
            .enumerate()
            .map(|(index, spec)| match spec {
                BreakPointSpec::Midpoint => Some((offsets[index] + offsets[index + 1]) / 2.0),
                BreakPointSpec::At(point) => Some(resolve_point(*point, drawer_size)),
            })
            .collect(),
        _ => SmallVec::new(),
    };

    Ok(points
        .iter()
        .enumerate()
        .map(|(index, point)| resolve_snap_point_at(*point, drawer_size, index, &break_offsets))
        .collect())
}

/// Picks the snap point a drag released at `offset` should settle on.
///
/// The candidates bracket `offset_with_velocity` when skipping is allowed and
/// plain `offset` otherwise. Between two candidates, a custom break point is
/// a hard threshold; without one the nearest candidate wins, with ties going
/// to the more open point.
pub fn find_closest_snap_point(
    snap_points: &[ResolvedSnapPoint],
    offset: f32,
    offset_with_velocity: f32,
    allow_skipping_snap_points: bool,
) -> Option<&ResolvedSnapPoint> {
    let search_offset = if allow_skipping_snap_points {
        offset_with_velocity
    } else {
        offset
    };

    let upper = snap_points
        .iter()
        .filter(|point| point.offset >= search_offset)
        .min_by(|a, b| a.offset.total_cmp(&b.offset));
    let lower = snap_points
        .iter()
        .filter(|point| point.offset <= search_offset)
        .max_by(|a, b| a.offset.total_cmp(&b.offset));

    match (lower, upper) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only),
        (Some(lower), Some(upper)) if lower.index == upper.index => Some(upper),
        (Some(lower), Some(upper)) => {
            match (upper.lower_break_point, lower.upper_break_point) {
                (Some(threshold), Some(_)) => {
                    if offset_with_velocity < threshold {
                        Some(lower)
                    } else {
                        Some(upper)
                    }
                }
                _ => {
                    let to_upper = (upper.offset - offset_with_velocity).abs();
                    let to_lower = (lower.offset - offset_with_velocity).abs();
                    if to_upper < to_lower {
                        Some(upper)
                    } else {
                        Some(lower)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/snap_points_tests.rs"]
mod tests;
