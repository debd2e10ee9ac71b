//! Variable-width outline generation for freehand strokes.
//!
//! Raw samples are first streamlined into evenly spaced stroke points, then
//! offset to the left and right by a pressure dependent radius. The two
//! sides plus the caps form a closed polygon ready for the path smoother.

use egui::{Pos2, Vec2, vec2};

use crate::config::StrokeOptions;
use crate::stroke::Sample;

/// Maps a sequence of samples to the boundary of the inked shape
pub trait OutlineGenerator: Send + Sync {
    /// Returns the closed polygon approximating the stroke, or an empty
    /// vector when there is nothing to draw
    fn outline(&self, samples: &[Sample], brush_size: f32) -> Vec<Pos2>;
}

const RATE_OF_PRESSURE_CHANGE: f32 = 0.275;
const FIXED_PI: f32 = std::f32::consts::PI + 0.0001;
const CORNER_STEPS: usize = 13;
const END_CAP_STEPS: usize = 29;
/// Points this close to the end of the stroke are folded into the end cap
const END_NOISE_LENGTH: f32 = 3.0;

/// A streamlined point along the stroke's spine
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrokePoint {
    point: Pos2,
    pressure: f32,
    /// Unit vector pointing back toward the previous point
    vector: Vec2,
    distance: f32,
    running_length: f32,
}

/// Pressure-aware outline generator for freehand ink
#[derive(Debug, Clone, Default)]
pub struct FreehandOutline {
    options: StrokeOptions,
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0 { v / len } else { Vec2::ZERO }
}

// Perpendicular, rotated a quarter turn clockwise
fn perp(v: Vec2) -> Vec2 {
    vec2(v.y, -v.x)
}

fn rotate_around(p: Pos2, center: Pos2, angle: f32) -> Pos2 {
    let (sin, cos) = angle.sin_cos();
    let d = p - center;
    center + vec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

fn lerp(a: Pos2, b: Pos2, t: f32) -> Pos2 {
    a + (b - a) * t
}

impl FreehandOutline {
    pub fn new(options: StrokeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StrokeOptions {
        &self.options
    }

    fn stroke_radius(&self, size: f32, pressure: f32) -> f32 {
        let thinning = self.options.thinning;
        size * self.options.easing.apply(0.5 - thinning * (0.5 - pressure))
    }

    fn simulated_pressure(&self, previous: f32, distance: f32, size: f32) -> f32 {
        let speed = (distance / size).min(1.0);
        let rest = (1.0 - speed).min(1.0);
        (previous + (rest - previous) * (speed * RATE_OF_PRESSURE_CHANGE)).min(1.0)
    }

    /// Streamline the raw samples into spine points
    fn stroke_points(&self, samples: &[Sample], size: f32) -> Vec<StrokePoint> {
        let Some(first) = samples.first() else {
            return Vec::new();
        };

        let t = 0.15 + (1.0 - self.options.streamline) * 0.85;

        let mut input: Vec<(Pos2, f32)> = samples.iter().map(|s| (s.pos(), s.pressure)).collect();
        if input.len() == 2 {
            let last = input[1];
            input.truncate(1);
            for i in 1..5 {
                let f = i as f32 / 4.0;
                input.push((lerp(input[0].0, last.0, f), first.pressure + (last.1 - first.pressure) * f));
            }
        }
        if input.len() == 1 {
            input.push((input[0].0 + vec2(1.0, 1.0), input[0].1));
        }

        let mut points = vec![StrokePoint {
            point: input[0].0,
            pressure: input[0].1,
            vector: vec2(1.0, 1.0),
            distance: 0.0,
            running_length: 0.0,
        }];

        let max = input.len() - 1;
        let mut has_reached_minimum_length = false;
        let mut running_length = 0.0;
        let mut prev = points[0];

        for (i, &(pos, pressure)) in input.iter().enumerate().skip(1) {
            let point = lerp(prev.point, pos, t);
            if point == prev.point {
                continue;
            }

            let distance = point.distance(prev.point);
            running_length += distance;

            if i < max && !has_reached_minimum_length {
                if running_length < size {
                    continue;
                }
                has_reached_minimum_length = true;
            }

            prev = StrokePoint {
                point,
                pressure,
                vector: unit(prev.point - point),
                distance,
                running_length,
            };
            points.push(prev);
        }

        points[0].vector = points.get(1).map_or(Vec2::ZERO, |p| p.vector);
        points
    }

    /// Offset the spine into a closed polygon
    fn outline_points(&self, points: &[StrokePoint], size: f32) -> Vec<Pos2> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Vec::new();
        };
        let options = &self.options;
        let count = points.len();
        let total_length = last.running_length;
        let taper_start = options.start.taper.max(0.0);
        let taper_end = options.end.taper.max(0.0);
        let min_distance = (size * options.smoothing).powi(2);

        let mut left: Vec<Pos2> = Vec::new();
        let mut right: Vec<Pos2> = Vec::new();

        // Seed the pressure from the first few points so the start isn't blobby
        let mut prev_pressure = points.iter().take(10).fold(first.pressure, |acc, p| {
            let pressure = if options.simulate_pressure {
                self.simulated_pressure(acc, p.distance, size)
            } else {
                p.pressure
            };
            (acc + pressure) / 2.0
        });

        let mut radius = self.stroke_radius(size, last.pressure);
        let mut first_radius: Option<f32> = None;
        let mut prev_vector = first.vector;
        let mut prev_left = first.point;
        let mut prev_right = first.point;
        let mut is_prev_sharp_corner = false;

        for (i, p) in points.iter().enumerate() {
            let is_last = i == count - 1;
            if !is_last && total_length - p.running_length < END_NOISE_LENGTH {
                continue;
            }

            let mut pressure = p.pressure;
            if options.thinning != 0.0 {
                if options.simulate_pressure {
                    pressure = self.simulated_pressure(prev_pressure, p.distance, size);
                }
                radius = self.stroke_radius(size, pressure);
            } else {
                radius = size / 2.0;
            }
            if first_radius.is_none() {
                first_radius = Some(radius);
            }

            let ts = if p.running_length < taper_start {
                options.start.easing.apply(p.running_length / taper_start)
            } else {
                1.0
            };
            let te = if total_length - p.running_length < taper_end {
                options.end.easing.apply((total_length - p.running_length) / taper_end)
            } else {
                1.0
            };
            radius = (radius * ts.min(te)).max(0.01);

            let next_vector = if is_last { p.vector } else { points[i + 1].vector };
            let next_dot = if is_last { 1.0 } else { p.vector.dot(next_vector) };
            let prev_dot = p.vector.dot(prev_vector);

            let is_sharp_corner = prev_dot < 0.0 && !is_prev_sharp_corner;
            let is_next_sharp_corner = next_dot < 0.0;

            if is_sharp_corner || is_next_sharp_corner {
                // Round the corner with a half-circle fan
                let offset = perp(prev_vector) * radius;
                for step in 0..=CORNER_STEPS {
                    let t = step as f32 / CORNER_STEPS as f32;
                    prev_left = rotate_around(p.point - offset, p.point, FIXED_PI * t);
                    left.push(prev_left);
                    prev_right = rotate_around(p.point + offset, p.point, -FIXED_PI * t);
                    right.push(prev_right);
                }
                if is_next_sharp_corner {
                    is_prev_sharp_corner = true;
                }
                continue;
            }
            is_prev_sharp_corner = false;

            if is_last {
                let offset = perp(p.vector) * radius;
                left.push(p.point - offset);
                right.push(p.point + offset);
                continue;
            }

            let direction = next_vector + (p.vector - next_vector) * next_dot;
            let offset = perp(direction) * radius;

            let l = p.point - offset;
            if i <= 1 || prev_left.distance_sq(l) > min_distance {
                left.push(l);
                prev_left = l;
            }
            let r = p.point + offset;
            if i <= 1 || prev_right.distance_sq(r) > min_distance {
                right.push(r);
                prev_right = r;
            }

            prev_pressure = pressure;
            prev_vector = p.vector;
        }

        let first_point = first.point;
        let last_point = if count > 1 { last.point } else { first.point + vec2(1.0, 1.0) };

        let mut start_cap = Vec::new();
        let mut end_cap = Vec::new();

        if count == 1 {
            if taper_start == 0.0 && taper_end == 0.0 {
                let r = first_radius.unwrap_or(radius);
                let start = first_point + unit(perp(first_point - last_point)) * -r;
                return (1..=CORNER_STEPS)
                    .map(|step| {
                        let t = step as f32 / CORNER_STEPS as f32;
                        rotate_around(start, first_point, FIXED_PI * 2.0 * t)
                    })
                    .collect();
            }
        } else {
            if taper_start > 0.0 {
                // Tapered ends meet at a point, no cap needed
            } else if let (Some(&l0), Some(&r0)) = (left.first(), right.first()) {
                if options.start.cap {
                    for step in 1..=CORNER_STEPS {
                        let t = step as f32 / CORNER_STEPS as f32;
                        start_cap.push(rotate_around(r0, first_point, FIXED_PI * t));
                    }
                } else {
                    let corners = l0 - r0;
                    let a = corners * 0.5;
                    let b = corners * 0.51;
                    start_cap.extend([first_point - a, first_point - b, first_point + b, first_point + a]);
                }
            }

            let direction = perp(-last.vector);
            if taper_end > 0.0 {
                end_cap.push(last_point);
            } else if options.end.cap {
                let start = last_point + direction * radius;
                for step in 1..END_CAP_STEPS {
                    let t = step as f32 / END_CAP_STEPS as f32;
                    end_cap.push(rotate_around(start, last_point, FIXED_PI * 3.0 * t));
                }
            } else {
                end_cap.extend([
                    last_point + direction * radius,
                    last_point + direction * (radius * 0.99),
                    last_point - direction * (radius * 0.99),
                    last_point - direction * radius,
                ]);
            }
        }

        right.reverse();
        left.extend(end_cap);
        left.extend(right);
        left.extend(start_cap);
        left
    }
}

impl OutlineGenerator for FreehandOutline {
    fn outline(&self, samples: &[Sample], brush_size: f32) -> Vec<Pos2> {
        if samples.is_empty() || brush_size.is_nan() || brush_size <= 0.0 {
            return Vec::new();
        }
        let points = self.stroke_points(samples, brush_size);
        self.outline_points(&points, brush_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoother::{MIN_OUTLINE_POINTS, smooth_outline};

    fn line_samples(n: usize) -> Vec<Sample> {
        (0..n).map(|i| Sample::new(i as f32 * 5.0, 100.0, 0.5)).collect()
    }

    #[test]
    fn test_empty_input() {
        let generator = FreehandOutline::default();
        assert!(generator.outline(&[], 8.0).is_empty());
    }

    #[test]
    fn test_non_positive_size() {
        let generator = FreehandOutline::default();
        assert!(generator.outline(&line_samples(10), 0.0).is_empty());
        assert!(generator.outline(&line_samples(10), -3.0).is_empty());
    }

    #[test]
    fn test_single_sample_draws_a_dot() {
        let generator = FreehandOutline::default();
        let outline = generator.outline(&[Sample::new(50.0, 50.0, 0.5)], 8.0);
        assert!(outline.len() >= MIN_OUTLINE_POINTS);
        for p in &outline {
            assert!(p.distance(Pos2::new(50.0, 50.0)) < 8.0);
        }
    }

    #[test]
    fn test_line_outline_stays_near_the_line() {
        let generator = FreehandOutline::default();
        let size = 8.0;
        let outline = generator.outline(&line_samples(30), size);
        assert!(outline.len() >= MIN_OUTLINE_POINTS);
        for p in &outline {
            assert!((p.y - 100.0).abs() <= size + 0.01, "{p:?} strays from the line");
        }
        // Both sides of the line are covered
        assert!(outline.iter().any(|p| p.y < 100.0));
        assert!(outline.iter().any(|p| p.y > 100.0));
    }

    #[test]
    fn test_wider_brush_gives_wider_outline() {
        let generator = FreehandOutline::default();
        let spread = |size: f32| {
            generator
                .outline(&line_samples(30), size)
                .iter()
                .map(|p| (p.y - 100.0).abs())
                .fold(0.0_f32, f32::max)
        };
        assert!(spread(20.0) > spread(4.0));
    }

    #[test]
    fn test_outline_is_deterministic_and_smoothable() {
        let generator = FreehandOutline::default();
        let samples: Vec<Sample> = (0..40)
            .map(|i| {
                let t = i as f32 * 0.2;
                Sample::new(t.cos() * 60.0 + 200.0, t.sin() * 60.0 + 200.0, 0.5)
            })
            .collect();
        let a = smooth_outline(&generator.outline(&samples, 8.0), true);
        let b = smooth_outline(&generator.outline(&samples, 8.0), true);
        assert!(!a.is_empty());
        assert_eq!(a.to_svg_path_data(), b.to_svg_path_data());
    }

    #[test]
    fn test_two_samples_are_expanded() {
        let generator = FreehandOutline::default();
        let points = generator.stroke_points(
            &[Sample::new(0.0, 0.0, 0.5), Sample::new(40.0, 0.0, 0.5)],
            8.0,
        );
        assert!(points.len() > 2);
        assert_eq!(points[0].point, Pos2::new(0.0, 0.0));
    }
}
