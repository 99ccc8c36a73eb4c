use price_history_chart::application::{
    DELTA_LINE, DELTA_PIXEL, Gesture, InteractionController, ZoomState,
};
use price_history_chart::domain::chart::{
    Chart, ChartLayout, Margins, Point, ScaleExtent, Viewport, ZoomTransform,
};
use price_history_chart::domain::market_data::DataValidationService;

const HISTORY: &str = r#"[
    {"timestamp": "2024-03-05 10:00:00", "open": 100, "high": 101, "low": 99, "close": 100.5,
     "ma10": 100, "bb_upper": 110, "bb_lower": 90},
    {"timestamp": "2024-03-05 11:00:00", "open": 100.5, "high": 102, "low": 100, "close": 101,
     "ma10": 100.5, "bb_upper": 110, "bb_lower": 90}
]"#;

fn chart() -> Chart {
    let series = DataValidationService::new().parse_document(HISTORY).unwrap();
    Chart::new(series, ChartLayout::with_content(800.0, 500.0, Margins::default(), 10.0))
}

fn wheel(at: Point, delta_y: f64) -> Gesture {
    Gesture::Wheel { at, delta_y, delta_mode: DELTA_PIXEL, ctrl: false }
}

fn data_under(chart: &Chart, viewport: &Viewport, at: Point) -> (f64, f64) {
    let (time, value) = chart.scales_for(viewport);
    (time.invert(at.x), value.invert(at.y))
}

#[test]
fn wheel_zooms_around_the_pointer() {
    let chart = chart();
    let controller = InteractionController::default();
    let at = Point::new(200.0, 125.0);
    let before = data_under(&chart, &chart.initial_viewport(), at);

    let update = controller.apply_gesture(&chart, &ZoomState::default(), wheel(at, -500.0));
    assert_eq!(update.state.transform.k, 2.0);
    let viewport = update.viewport.unwrap();
    let after = data_under(&chart, &viewport, at);

    assert!((after.0 - before.0).abs() < 1e-2, "{before:?} vs {after:?}");
    assert!((after.1 - before.1).abs() < 1e-9, "{before:?} vs {after:?}");
}

#[test]
fn time_and_value_zoom_together() {
    let chart = chart();
    let full = chart.initial_viewport();
    let update = InteractionController::default().apply_gesture(
        &chart,
        &ZoomState::default(),
        Gesture::Wheel { at: Point::new(400.0, 250.0), delta_y: -40.0, delta_mode: DELTA_LINE, ctrl: false },
    );
    let viewport = update.viewport.unwrap();
    assert_eq!(update.state.transform.k, 4.0);
    assert!((viewport.time_span() * 4.0 - full.time_span()).abs() < 1e-2);
    assert!((viewport.value_span() * 4.0 - full.value_span()).abs() < 1e-9);
}

#[test]
fn zoom_is_clamped_to_the_extent() {
    let chart = chart();
    let controller = InteractionController::new(ScaleExtent { min: 1.0, max: 40.0 }, 3);
    let at = Point::new(400.0, 250.0);

    let maxed = ZoomState::new(ZoomTransform::new(40.0, -15_600.0, -9_750.0));
    let update = controller.apply_gesture(&chart, &maxed, wheel(at, -500.0));
    assert_eq!(update.state, maxed);
    assert_eq!(update.viewport, None);

    let update = controller.apply_gesture(&chart, &ZoomState::default(), wheel(at, 500.0));
    assert_eq!(update.state.transform, ZoomTransform::IDENTITY);
    assert_eq!(update.viewport, None);

    let near_max = ZoomState::new(ZoomTransform::new(30.0, 0.0, 0.0));
    let update = controller.apply_gesture(&chart, &near_max, wheel(at, -5_000.0));
    assert_eq!(update.state.transform.k, 40.0);
    assert!(update.viewport.is_some());
}

#[test]
fn drag_pans_without_zooming() {
    let chart = chart();
    let controller = InteractionController::default();
    let full = chart.initial_viewport();

    let grabbed = controller.apply_gesture(&chart, &ZoomState::default(), Gesture::DragStart {
        at: Point::new(100.0, 100.0),
    });
    assert!(grabbed.state.is_dragging());
    assert_eq!(grabbed.viewport, None);

    let moved = controller.apply_gesture(&chart, &grabbed.state, Gesture::DragMove {
        at: Point::new(180.0, 100.0),
    });
    assert_eq!(moved.state.transform, ZoomTransform::new(1.0, 80.0, 0.0));
    let viewport = moved.viewport.unwrap();
    let shift = full.time_span() * 80.0 / 800.0;
    assert!((full.time_domain.0 - viewport.time_domain.0 - shift).abs() < 1e-2);
    assert_eq!(viewport.value_domain, full.value_domain);

    let released = controller.apply_gesture(&chart, &moved.state, Gesture::DragEnd);
    assert!(!released.state.is_dragging());
    assert_eq!(released.viewport, None);
}

#[test]
fn drag_move_without_a_grab_does_nothing() {
    let chart = chart();
    let state = ZoomState::new(ZoomTransform::new(2.0, -10.0, -20.0));
    let update = InteractionController::default().apply_gesture(&chart, &state, Gesture::DragMove {
        at: Point::new(300.0, 300.0),
    });
    assert_eq!(update.state, state);
    assert_eq!(update.viewport, None);
}

#[test]
fn double_click_zooms_in_and_shift_zooms_out() {
    let chart = chart();
    let controller = InteractionController::default();
    let at = Point::new(400.0, 250.0);

    let zoomed = controller.apply_gesture(&chart, &ZoomState::default(), Gesture::DoubleClick {
        at,
        zoom_out: false,
    });
    assert_eq!(zoomed.state.transform, ZoomTransform::new(2.0, -400.0, -250.0));
    assert!(zoomed.viewport.is_some());

    let back = controller.apply_gesture(&chart, &zoomed.state, Gesture::DoubleClick { at, zoom_out: true });
    assert_eq!(back.state.transform, ZoomTransform::IDENTITY);
    assert_eq!(back.viewport, Some(chart.initial_viewport()));

    let floor = controller.apply_gesture(&chart, &back.state, Gesture::DoubleClick { at, zoom_out: true });
    assert_eq!(floor.viewport, None);
}
