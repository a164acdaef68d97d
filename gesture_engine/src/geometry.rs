//! Distance and range-mapping helpers shared by the volume and mute stages.

use crate::landmark::Point;

/// Euclidean distance in pixels.
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x as f32 - b.x as f32;
    let dy = a.y as f32 - b.y as f32;
    dx.hypot(dy)
}

/// Map `x` linearly from `from` onto `to`, clamping outside `from`.
///
/// `from` must be increasing; `to` may run either way, so
/// `(20, 250) → (400, 150)` yields a value that shrinks as `x` grows.
pub fn interp_clamped(x: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let (x0, x1) = from;
    let (y0, y1) = to;
    if x <= x0 { return y0; }
    if x >= x1 { return y1; }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I: IntoIterator<Item = f32>>(values: I) -> Option<f32> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0_f32, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_3_4_5() {
        assert_relative_eq!(distance(Point::new(0, 0), Point::new(3, 4)), 5.0);
        assert_relative_eq!(distance(Point::new(3, 4), Point::new(0, 0)), 5.0);
    }

    #[test]
    fn interp_midpoint() {
        assert_relative_eq!(interp_clamped(135.0, (20.0, 250.0), (0.0, 100.0)), 50.0);
    }

    #[test]
    fn interp_clamps_both_edges() {
        assert_eq!(interp_clamped(-10.0, (20.0, 250.0), (0.0, 100.0)), 0.0);
        assert_eq!(interp_clamped(999.0, (20.0, 250.0), (0.0, 100.0)), 100.0);
    }

    #[test]
    fn interp_inverted_range() {
        assert_eq!(interp_clamped(20.0, (20.0, 250.0), (400.0, 150.0)), 400.0);
        assert_eq!(interp_clamped(250.0, (20.0, 250.0), (400.0, 150.0)), 150.0);
        assert_relative_eq!(interp_clamped(135.0, (20.0, 250.0), (400.0, 150.0)), 275.0);
    }

    #[test]
    fn mean_of_nothing() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([2.0, 4.0]), Some(3.0));
    }
}
