use futures::executor::block_on;
use price_history_chart::application::{
    ChartRenderingService, Gesture, InteractionController, LoadPriceHistoryUseCase, OverlayState,
    ZoomState,
};
use price_history_chart::domain::chart::{
    ChartLayout, EMPTY_TIME_DOMAIN, EMPTY_VALUE_DOMAIN, LayerKind, Margins, Point, ShapeClass,
};
use price_history_chart::domain::market_data::InMemoryPriceHistory;

fn empty_chart() -> price_history_chart::domain::chart::Chart {
    let use_case = LoadPriceHistoryUseCase::new(InMemoryPriceHistory::new("[]"));
    block_on(use_case.open_chart(ChartLayout::with_content(300.0, 200.0, Margins::default(), 10.0)))
        .unwrap()
}

#[test]
fn empty_history_falls_back_to_default_domains() {
    let chart = empty_chart();
    assert!(!chart.has_data());
    let viewport = chart.initial_viewport();
    assert_eq!(viewport.time_domain, EMPTY_TIME_DOMAIN);
    assert_eq!(viewport.value_domain, EMPTY_VALUE_DOMAIN);
    assert_eq!(chart.latest_close(), None);
}

#[test]
fn empty_history_draws_axes_only() {
    let chart = empty_chart();
    let scene = ChartRenderingService::default().build_scene(
        &chart,
        &chart.initial_viewport(),
        &OverlayState::default(),
    );

    assert!(scene.layer(LayerKind::Data).shapes.is_empty());
    assert_eq!(scene.count(ShapeClass::AxisDomain), 2);
    assert!(scene.count(ShapeClass::AxisLabel) > 0);
    assert_eq!(scene.count(ShapeClass::CurrentPriceLine), 0);
    assert_eq!(scene.count(ShapeClass::CurrentPriceText), 0);
}

#[test]
fn gestures_on_an_empty_chart_stay_finite() {
    let chart = empty_chart();
    let update = InteractionController::default().apply_gesture(
        &chart,
        &ZoomState::default(),
        Gesture::Wheel { at: Point::new(150.0, 100.0), delta_y: -100.0, delta_mode: 0, ctrl: false },
    );
    let viewport = update.viewport.unwrap();
    assert!(viewport.time_span() > 0.0 && viewport.time_span().is_finite());
    assert!(viewport.value_span() > 0.0 && viewport.value_span().is_finite());
}
