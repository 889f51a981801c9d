use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn rejects_degenerate_input() {
    assert!(sample_curve(&[Point::new(0.0, 0.0)], 80).is_err());
    assert!(sample_curve(&[Point::ZERO, Point::new(1.0, 1.0)], 0).is_err());
    assert!(sample_curve(&[Point::ZERO, Point::new(f64::NAN, 1.0)], 8).is_err());
}

#[test]
fn produces_segments_plus_one_points_with_exact_endpoints() {
    let ctrl = [
        Point::new(0.0, 100.0),
        Point::new(200.0, 40.0),
        Point::new(420.0, 160.0),
        Point::new(640.0, 80.0),
    ];
    let pts = sample_curve(&ctrl, 80).unwrap();
    assert_eq!(pts.len(), 81);
    assert!(close(pts[0], ctrl[0]));
    assert!(close(pts[80], ctrl[3]));
}

#[test]
fn passes_through_interior_control_points() {
    // With 4 control points and 3 segments per span the knots land on samples 0, 3, 6, 9.
    let ctrl = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 30.0),
        Point::new(50.0, -5.0),
        Point::new(80.0, 20.0),
    ];
    let pts = sample_curve(&ctrl, 9).unwrap();
    assert!(close(pts[3], ctrl[1]));
    assert!(close(pts[6], ctrl[2]));
}

#[test]
fn two_points_sample_a_straight_line() {
    let pts = sample_curve(&[Point::new(0.0, 0.0), Point::new(100.0, 50.0)], 4).unwrap();
    for (i, p) in pts.iter().enumerate() {
        let t = i as f64 / 4.0;
        assert!(close(*p, Point::new(100.0 * t, 50.0 * t)), "sample {i}: {p:?}");
    }
}

#[test]
fn coincident_points_stay_finite() {
    let ctrl = [Point::new(5.0, 5.0), Point::new(5.0, 5.0), Point::new(9.0, 1.0)];
    let pts = sample_curve(&ctrl, 16).unwrap();
    assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn sampling_is_deterministic() {
    let ctrl = [Point::new(1.0, 2.0), Point::new(3.0, 7.0), Point::new(11.0, -4.0)];
    assert_eq!(sample_curve(&ctrl, 80).unwrap(), sample_curve(&ctrl, 80).unwrap());
}

#[test]
fn rejects_unbounded_segment_counts() {
    let ctrl = [Point::ZERO, Point::new(10.0, 10.0)];
    assert_eq!(sample_curve(&ctrl, MAX_CURVE_SEGMENTS).unwrap().len(), MAX_CURVE_SEGMENTS + 1);
    assert!(sample_curve(&ctrl, MAX_CURVE_SEGMENTS + 1).is_err());
    assert!(sample_curve(&ctrl, usize::MAX).is_err());
}
