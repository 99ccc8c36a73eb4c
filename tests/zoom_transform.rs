use price_history_chart::domain::chart::{LinearScale, Point, TimeScale, ZoomTransform};
use quickcheck_macros::quickcheck;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const START: f64 = 1_700_000_000_000.0;
const HOUR: f64 = 3_600_000.0;

fn transform(k: u16, x: i16, y: i16) -> ZoomTransform {
    ZoomTransform::new(1.0 + (k % 391) as f64 / 10.0, x as f64, y as f64)
}

fn close(a: (f64, f64), b: (f64, f64), span: f64) -> bool {
    let tolerance = span.abs() * 1e-6;
    (a.0 - b.0).abs() <= tolerance && (a.1 - b.1).abs() <= tolerance
}

#[quickcheck]
fn time_domain_round_trips_through_inverse(k: u16, x: i16, y: i16) -> bool {
    let full = TimeScale::new((START, START + HOUR), (0.0, WIDTH));
    let t = transform(k, x, y);
    let back = full.rescale_x(&t).rescale_x(&t.inverse());
    close(back.domain(), full.domain(), HOUR)
}

#[quickcheck]
fn value_domain_round_trips_through_inverse(k: u16, x: i16, y: i16) -> bool {
    let full = LinearScale::new((147.13, 147.61), (HEIGHT, 0.0));
    let t = transform(k, x, y);
    let back = full.rescale_y(&t).rescale_y(&t.inverse());
    close(back.domain(), full.domain(), 0.48)
}

#[quickcheck]
fn zoom_by_k_divides_the_span(k: u16, x: i16) -> bool {
    let full = TimeScale::new((START, START + HOUR), (0.0, WIDTH));
    let t = transform(k, x, 0);
    let (d0, d1) = full.rescale_x(&t).domain();
    ((d1 - d0) * t.k - HOUR).abs() <= HOUR * 1e-6
}

#[test]
fn identity_keeps_the_full_domain() {
    let full = LinearScale::new((10.0, 20.0), (HEIGHT, 0.0));
    assert_eq!(full.rescale_y(&ZoomTransform::IDENTITY).domain(), (10.0, 20.0));
}

#[test]
fn anchored_transform_keeps_the_grabbed_point_under_the_pointer() {
    let base = ZoomTransform::new(2.0, -100.0, -40.0);
    let screen = Point::new(300.0, 120.0);
    let grabbed = base.invert(screen);
    let next = base.scaled(4.0).anchored(screen, grabbed);
    let landed = next.apply(grabbed);
    assert!((landed.x - screen.x).abs() < 1e-9);
    assert!((landed.y - screen.y).abs() < 1e-9);
    assert_eq!(next.k, 4.0);
}
