use price_history_chart::domain::chart::{Curve, Point};
use price_history_chart::infrastructure::rendering::{PathCommand, path_commands};

const CENTRIPETAL: Curve = Curve::CatmullRom { alpha: 0.5 };

fn cubic_count(commands: &[PathCommand]) -> usize {
    commands.iter().filter(|c| matches!(c, PathCommand::CubicTo { .. })).count()
}

fn end_point(command: &PathCommand) -> Point {
    match *command {
        PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        PathCommand::CubicTo { to, .. } => to,
    }
}

#[test]
fn short_inputs() {
    assert!(path_commands(&[], CENTRIPETAL).is_empty());

    let single = [Point::new(3.0, 4.0)];
    assert_eq!(path_commands(&single, CENTRIPETAL), vec![PathCommand::MoveTo(single[0])]);

    let pair = [Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
    assert_eq!(path_commands(&pair, CENTRIPETAL), vec![
        PathCommand::MoveTo(pair[0]),
        PathCommand::LineTo(pair[1]),
    ]);
}

#[test]
fn one_cubic_per_gap() {
    let points: Vec<Point> = (0..6).map(|i| Point::new(i as f64 * 10.0, (i * i) as f64)).collect();
    let commands = path_commands(&points, CENTRIPETAL);

    assert_eq!(commands[0], PathCommand::MoveTo(points[0]));
    assert_eq!(cubic_count(&commands), points.len() - 1);
    let ends: Vec<Point> = commands.iter().skip(1).map(end_point).collect();
    assert_eq!(ends, points[1..].to_vec());
}

#[test]
fn collinear_points_stay_on_the_line() {
    let points = [Point::new(0.0, 7.0), Point::new(1.0, 7.0), Point::new(2.0, 7.0), Point::new(3.0, 7.0)];
    for command in path_commands(&points, CENTRIPETAL) {
        if let PathCommand::CubicTo { c1, c2, to } = command {
            for p in [c1, c2, to] {
                assert!((p.y - 7.0).abs() < 1e-12, "{command:?}");
                assert!((0.0..=3.0).contains(&p.x), "{command:?}");
            }
        }
    }
}

#[test]
fn repeated_points_stay_finite() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(5.0, 5.0),
        Point::new(5.0, 5.0),
        Point::new(9.0, 1.0),
    ];
    let commands = path_commands(&points, CENTRIPETAL);
    assert_eq!(cubic_count(&commands), 4);
    for command in commands {
        if let PathCommand::CubicTo { c1, c2, to } = command {
            assert!([c1, c2, to].iter().all(|p| p.x.is_finite() && p.y.is_finite()), "{command:?}");
        }
    }
}

#[test]
fn linear_curve_is_a_polyline() {
    let points = [Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 1.0)];
    let commands = path_commands(&points, Curve::Linear);
    assert_eq!(commands, vec![
        PathCommand::MoveTo(points[0]),
        PathCommand::LineTo(points[1]),
        PathCommand::LineTo(points[2]),
    ]);
}
