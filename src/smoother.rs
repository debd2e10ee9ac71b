//! Conversion of a piecewise-linear outline into a chain of quadratic curves.
//!
//! Each curve passes through the midpoints of consecutive outline points, so
//! the filled shape has no visible polygon corners.

use std::fmt::{self, Write as _};

use egui::Pos2;

/// Outlines with fewer points than this have no well-defined shape
pub const MIN_OUTLINE_POINTS: usize = 4;

/// A quadratic curve segment continuing from the previous end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub ctrl: Pos2,
    pub to: Pos2,
}

/// A renderable curve descriptor
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SmoothPath {
    /// Not enough geometry to render
    #[default]
    Empty,
    Curve {
        start: Pos2,
        /// The first segment carries an explicit control point, every later
        /// one reflects the previous control about the previous end point.
        segments: Vec<QuadSegment>,
        closed: bool,
    },
}

fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Smooth an outline into a quadratic curve chain.
///
/// Returns [`SmoothPath::Empty`] when fewer than [`MIN_OUTLINE_POINTS`] points
/// are given. Callers skip rendering in that case.
pub fn smooth_outline(points: &[Pos2], closed: bool) -> SmoothPath {
    let len = points.len();
    if len < MIN_OUTLINE_POINTS {
        return SmoothPath::Empty;
    }

    let mut segments = Vec::with_capacity(len - 2);
    let mut ctrl = points[1];
    let mut end = midpoint(points[1], points[2]);
    segments.push(QuadSegment { ctrl, to: end });

    for pair in points[2..].windows(2) {
        // Reflect the previous control point to keep the tangent continuous
        ctrl = end + (end - ctrl);
        end = midpoint(pair[0], pair[1]);
        segments.push(QuadSegment { ctrl, to: end });
    }

    SmoothPath::Curve {
        start: points[0],
        segments,
        closed,
    }
}

/// Two decimals, ties rounded away from zero
fn write_coord(out: &mut impl fmt::Write, value: f32) -> fmt::Result {
    // Exact in f64: an f32 mantissa times 100 fits in 53 bits
    let value = f64::from(value);
    if !value.is_finite() {
        return write!(out, "{value}");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let hundredths = (value.abs() * 100.0).round() as u64;
    write!(out, "{sign}{}.{:02}", hundredths / 100, hundredths % 100)
}

fn write_point(out: &mut impl fmt::Write, p: Pos2) -> fmt::Result {
    write_coord(out, p.x)?;
    out.write_char(',')?;
    write_coord(out, p.y)
}

impl SmoothPath {
    pub fn is_empty(&self) -> bool {
        matches!(self, SmoothPath::Empty)
    }

    /// Number of curve segments, zero for an empty path
    pub fn segment_count(&self) -> usize {
        match self {
            SmoothPath::Empty => 0,
            SmoothPath::Curve { segments, .. } => segments.len(),
        }
    }

    /// Compact path data (`M`, `Q`, `T`, `Z` commands) with two decimals
    pub fn to_svg_path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SmoothPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SmoothPath::Curve {
            start,
            segments,
            closed,
        } = self
        else {
            return Ok(());
        };

        f.write_char('M')?;
        write_point(f, *start)?;

        let mut rest = segments.iter();
        if let Some(first) = rest.next() {
            f.write_str(" Q")?;
            write_point(f, first.ctrl)?;
            f.write_char(' ')?;
            write_point(f, first.to)?;
            f.write_str(" T")?;
        }
        for segment in rest {
            write_point(f, segment.to)?;
            f.write_char(' ')?;
        }

        if *closed {
            f.write_char('Z')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<Pos2> {
        vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(2.0, 0.0),
            Pos2::new(3.0, 1.0),
            Pos2::new(4.0, 0.0),
        ]
    }

    #[test]
    fn test_too_few_points_is_empty() {
        for n in 0..MIN_OUTLINE_POINTS {
            let points: Vec<Pos2> = (0..n).map(|i| Pos2::new(i as f32, 0.0)).collect();
            let path = smooth_outline(&points, true);
            assert!(path.is_empty());
            assert_eq!(path.to_svg_path_data(), "");
        }
    }

    #[test]
    fn test_zigzag_path_data() {
        let path = smooth_outline(&zigzag(), true);
        assert_eq!(
            path.to_svg_path_data(),
            "M0.00,0.00 Q1.00,1.00 1.50,0.50 T2.50,0.50 3.50,0.50 Z"
        );
    }

    #[test]
    fn test_open_path_has_no_close() {
        let path = smooth_outline(&zigzag(), false);
        assert!(!path.to_svg_path_data().ends_with('Z'));
    }

    #[test]
    fn test_segments_reflect_control_points() {
        let SmoothPath::Curve { start, segments, .. } = smooth_outline(&zigzag(), true) else {
            panic!("expected a curve");
        };
        assert_eq!(start, Pos2::new(0.0, 0.0));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].ctrl, Pos2::new(1.0, 1.0));
        // (1.5, 0.5) mirrored from (1, 1)
        assert_eq!(segments[1].ctrl, Pos2::new(2.0, 0.0));
        assert_eq!(segments[1].to, Pos2::new(2.5, 0.5));
        assert_eq!(segments[2].ctrl, Pos2::new(3.0, 1.0));
    }

    #[test]
    fn test_rounding_only_in_output() {
        let points = [
            Pos2::new(0.004, 0.0),
            Pos2::new(1.0 / 3.0, 2.0 / 3.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(2.0, 0.0),
        ];
        let path = smooth_outline(&points, true);
        let SmoothPath::Curve { start, .. } = &path else {
            panic!("expected a curve");
        };
        assert_eq!(start.x, 0.004);
        assert!(path.to_svg_path_data().starts_with("M0.00,0.00 Q0.33,0.67 "));
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        let points = [
            Pos2::new(0.0, 0.0),
            Pos2::new(0.0, 0.0),
            Pos2::new(0.25, 0.25),
            Pos2::new(1.0, 1.0),
        ];
        assert_eq!(
            smooth_outline(&points, true).to_svg_path_data(),
            "M0.00,0.00 Q0.00,0.00 0.13,0.13 T0.63,0.63 Z"
        );

        let coord = |value: f32| {
            let mut out = String::new();
            write_coord(&mut out, value).unwrap();
            out
        };
        assert_eq!(coord(-0.125), "-0.13");
        assert_eq!(coord(2.375), "2.38");
        assert_eq!(coord(1.005), "1.00");
        assert_eq!(coord(-0.001), "-0.00");
        assert_eq!(coord(123.4), "123.40");
    }

    #[test]
    fn test_deterministic() {
        let points: Vec<Pos2> = (0..50)
            .map(|i| {
                let t = i as f32 * 0.37;
                Pos2::new(t.cos() * 40.0 + 100.0, t.sin() * 25.0 + 80.0)
            })
            .collect();
        let a = smooth_outline(&points, true).to_svg_path_data();
        let b = smooth_outline(&points, true).to_svg_path_data();
        assert_eq!(a, b);
    }
}
