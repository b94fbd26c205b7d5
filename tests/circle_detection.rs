use hough_shapes::grid::EDGE;
use hough_shapes::io::grid_from_luma;
use hough_shapes::synth::{CircleSpec, DEFAULT_CIRCLES, circles_test_image};
use hough_shapes::{CircleConfig, EdgeGrid, build_circle_space, detect_circles, detect_edges, extract_peaks};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn finds_the_centre_of_a_synthetic_circle() {
    init_logger();
    let img = circles_test_image(500, 400, 255, 3, &[CircleSpec { cx: 330, cy: 200, r: 60 }]);
    let gray = grid_from_luma(&img);
    let (edges, _) = detect_edges(&gray, 50.0);
    assert!(edges.edge_count() > 0);

    let acc = build_circle_space(&edges, 60).expect("valid radius");
    let peaks = extract_peaks(&acc, 1, 50);
    assert_eq!(peaks.len(), 1, "no centre reached 50 votes");

    let (a, b) = (peaks[0].col as i64, peaks[0].row as i64);
    eprintln!("centre ({a}, {b}) votes {}", peaks[0].votes);
    assert!((a - 330).abs() <= 2 && (b - 200).abs() <= 2, "centre ({a}, {b}) too far from (330, 200)");
}

#[test]
fn pipeline_picks_the_matching_radius_among_three_circles() {
    init_logger();
    let img = circles_test_image(500, 400, 255, 3, &DEFAULT_CIRCLES);
    let gray = grid_from_luma(&img);
    let cfg = CircleConfig {
        k: 1,
        ..CircleConfig::with_radius(40)
    };
    let run = detect_circles(&gray, &cfg).expect("detection");
    assert_eq!(run.circles.len(), 1);
    let c = run.circles[0];
    assert!(
        (c.a as i64 - 150).abs() <= 2 && (c.b as i64 - 120).abs() <= 2,
        "centre ({}, {}) too far from (150, 120)",
        c.a,
        c.b
    );
    assert_eq!(run.accumulator.width(), 500);
    assert_eq!(run.accumulator.height(), 400);
}

#[test]
fn interior_edges_cast_every_vote() {
    let mut edges = EdgeGrid::new(100, 100);
    let mut n = 0u64;
    for y in (30..70).step_by(3) {
        for x in (30..70).step_by(5) {
            edges.set(x, y, EDGE);
            n += 1;
        }
    }
    let acc = build_circle_space(&edges, 15).unwrap();
    assert_eq!(acc.total_votes(), n * 360);
}

#[test]
fn peaks_are_ordered_bounded_and_above_the_floor() {
    let img = circles_test_image(200, 160, 255, 3, &[CircleSpec { cx: 90, cy: 80, r: 30 }]);
    let (edges, _) = detect_edges(&grid_from_luma(&img), 50.0);
    let acc = build_circle_space(&edges, 30).unwrap();
    let peaks = extract_peaks(&acc, 10, 20);
    assert!(peaks.len() <= 10);
    assert!(peaks.iter().all(|p| p.votes >= 20));
    assert!(peaks.windows(2).all(|w| w[0].votes >= w[1].votes));
    // No cell is reported twice.
    for (i, p) in peaks.iter().enumerate() {
        assert!(peaks[i + 1..].iter().all(|q| (q.row, q.col) != (p.row, p.col)));
    }
}
