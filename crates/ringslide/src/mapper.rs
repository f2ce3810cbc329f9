//! Conversions between progress values, arc angles and pointer positions.
//!
//! All angles are in degrees.

use crate::geometry::Point;

/// Angular extent of the filled arc. A zero `maximum` has no meaningful
/// ratio and maps to an empty sweep.
pub fn progress_sweep(progress: u32, maximum: u32, sweep_angle: i32) -> f64 {
    if maximum == 0 {
        return 0.0;
    }
    f64::from(progress) / f64::from(maximum) * f64::from(sweep_angle)
}

/// Thumb offset from the arc center, taken at `start + sweep + 180°`.
///
/// The extra half turn means a renderer places the thumb at
/// `center - offset`.
pub fn thumb_position(arc_radius: f64, start_angle: i32, progress_sweep: f64) -> Point {
    let angle = (f64::from(start_angle) + progress_sweep + 180.0).to_radians();
    Point::new(arc_radius * angle.cos(), arc_radius * angle.sin())
}

/// Angle travelled from `start_angle` to `point`, in the configured
/// direction.
///
/// The result lies in `[0, 360)` whatever the start, so an arc that
/// crosses 3 o'clock is continuous. It is not clamped to the live arc.
pub fn touch_angle(point: Point, center: Point, start_angle: i32, clockwise: bool) -> f64 {
    let (mut x, y) = (point.x - center.x, point.y - center.y);
    if !clockwise {
        x = -x;
    }

    (y.atan2(x).to_degrees() - f64::from(start_angle)).rem_euclid(360.0)
}

/// Progress value at `angle` along the arc, or `None` when the angle falls
/// outside `0..=maximum` once mapped. Halves round up.
///
/// Angles in the far half of the dead gap after the arc count as lying
/// before the start, so a touch a hair short of the start still rounds
/// to zero.
pub fn angle_to_progress(angle: f64, maximum: u32, sweep_angle: i32) -> Option<u32> {
    if sweep_angle <= 0 {
        return None;
    }

    let sweep = f64::from(sweep_angle);
    let angle = if angle > (sweep + 360.0) / 2.0 {
        angle - 360.0
    } else {
        angle
    };

    let value_per_degree = f64::from(maximum) / sweep;
    let progress = (value_per_degree * angle + 0.5).floor();

    (0.0..=f64::from(maximum))
        .contains(&progress)
        .then_some(progress as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CENTER: Point = Point { x: 100.0, y: 100.0 };

    fn on_circle(degrees: f64, radius: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(CENTER.x + radius * rad.cos(), CENTER.y + radius * rad.sin())
    }

    #[test]
    fn test_progress_sweep() {
        assert_eq!(progress_sweep(25, 50, 180), 90.0);
        assert_eq!(progress_sweep(50, 50, 270), 270.0);
        assert_eq!(progress_sweep(0, 50, 180), 0.0);
        assert_eq!(progress_sweep(1, 3, 360), 1.0 / 3.0 * 360.0);
    }

    #[test]
    fn test_progress_sweep_zero_maximum() {
        assert_eq!(progress_sweep(0, 0, 180), 0.0);
    }

    #[test]
    fn test_thumb_position() {
        // start 0, no progress: half a turn round to 9 o'clock
        let p = thumb_position(10.0, 0, 0.0);
        assert_relative_eq!(p.x, -10.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);

        let p = thumb_position(10.0, 180, 90.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_touch_angle_clockwise() {
        let cases = vec![
            (0.0, 0, 0.0),
            (90.0, 0, 90.0),
            (180.0, 0, 180.0),
            (270.0, 0, 270.0),
            (270.0, 180, 90.0),
            (0.0, 180, 180.0),
            (45.0, 90, 315.0),
            (45.0, 270, 135.0),
            (300.0, 270, 30.0),
        ];

        for (degrees, start, expected) in cases {
            let angle = touch_angle(on_circle(degrees, 50.0), CENTER, start, true);
            assert_relative_eq!(angle, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_touch_angle_counter_clockwise_mirrors() {
        // 3 o'clock mirrored onto 9 o'clock
        let angle = touch_angle(on_circle(0.0, 50.0), CENTER, 0, false);
        assert_relative_eq!(angle, 180.0, epsilon = 1e-9);

        // straight up is on the mirror axis
        let angle = touch_angle(on_circle(270.0, 50.0), CENTER, 180, false);
        assert_relative_eq!(angle, 90.0, epsilon = 1e-9);

        let cw = touch_angle(on_circle(200.0, 50.0), CENTER, 0, true);
        let ccw = touch_angle(on_circle(340.0, 50.0), CENTER, 0, false);
        assert_relative_eq!(cw, ccw, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_to_progress() {
        assert_eq!(angle_to_progress(90.0, 50, 180), Some(25));
        assert_eq!(angle_to_progress(0.0, 50, 180), Some(0));
        assert_eq!(angle_to_progress(180.0, 50, 180), Some(50));
        assert_eq!(angle_to_progress(-10.0, 50, 180), None);
        assert_eq!(angle_to_progress(200.0, 50, 180), None);
    }

    #[test]
    fn test_angle_to_progress_rounds_halves_up() {
        // two units per degree
        assert_eq!(angle_to_progress(0.25, 360, 180), Some(1));
        assert_eq!(angle_to_progress(0.2, 360, 180), Some(0));
        assert_eq!(angle_to_progress(-0.25, 360, 180), Some(0));
        assert_eq!(angle_to_progress(-0.3, 360, 180), None);
        assert_eq!(angle_to_progress(359.75, 360, 180), Some(0));
        assert_eq!(angle_to_progress(359.7, 360, 180), None);
        assert_eq!(angle_to_progress(180.2, 360, 180), Some(360));
        assert_eq!(angle_to_progress(180.25, 360, 180), None);
    }

    #[test]
    fn test_arc_crossing_three_oclock() {
        // default arc: 9 o'clock through 12 to 3 o'clock
        let end = touch_angle(on_circle(0.0, 50.0), CENTER, 180, true);
        assert_eq!(angle_to_progress(end, 50, 180), Some(50));

        // start at 12 o'clock, 45 degrees past 3 o'clock is 135 along
        let past = touch_angle(on_circle(45.0, 50.0), CENTER, 270, true);
        assert_eq!(angle_to_progress(past, 180, 180), Some(135));

        // just short of the start wraps to the top of the range
        let before = touch_angle(on_circle(179.9, 50.0), CENTER, 180, true);
        assert!(before > 359.0);
        assert_eq!(angle_to_progress(before, 50, 180), Some(0));
    }

    #[test]
    fn test_angle_to_progress_degenerate() {
        assert_eq!(angle_to_progress(45.0, 50, 0), None);
        assert_eq!(angle_to_progress(0.0, 0, 180), Some(0));
        assert_eq!(angle_to_progress(90.0, 0, 180), Some(0));
        assert_eq!(angle_to_progress(f64::NAN, 50, 180), None);
    }

    #[test]
    fn test_sweep_then_progress_recovers_value() {
        for (maximum, sweep) in [(50, 180), (7, 360), (1000, 90), (3, 1)] {
            for progress in 0..=maximum {
                let angle = progress_sweep(progress, maximum, sweep);
                let back = angle_to_progress(angle, maximum, sweep).unwrap();
                assert!(back.abs_diff(progress) <= 1, "{progress}/{maximum} over {sweep}");
            }
        }
    }
}
