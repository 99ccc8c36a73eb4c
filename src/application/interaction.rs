//! Interaction Controller: zoom/pan gestures and the hover readout.
//!
//! Both modes are pure functions from (previous state, event) to a new
//! state. The caller owns the state and decides when to redraw.

use crate::domain::{
    chart::{Chart, ChartLayout, Point, ScaleExtent, Size, Viewport, ZoomTransform},
    logging::LogComponent,
};
use crate::time_utils::format_clock;
use crate::{log_debug, log_trace};

/// Price readout box pinned to the right edge of the content box.
pub const PRICE_BOX: Size = Size { width: 60.0, height: 16.0 };
/// Time readout box under the bottom edge of the content box.
pub const TIME_BOX: Size = Size { width: 90.0, height: 16.0 };

/// Wheel delta unit reported by `WheelEvent.deltaMode`.
pub const DELTA_PIXEL: u32 = 0;
pub const DELTA_LINE: u32 = 1;
pub const DELTA_PAGE: u32 = 2;

/// Pointer gestures in content-box coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Wheel { at: Point, delta_y: f64, delta_mode: u32, ctrl: bool },
    DragStart { at: Point },
    DragMove { at: Point },
    DragEnd,
    DoubleClick { at: Point, zoom_out: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    /// Data-space point (pre-transform) that stays under the pointer.
    grabbed: Point,
}

/// Zoom state threaded through every gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomState {
    pub transform: ZoomTransform,
    drag: Option<DragAnchor>,
}

impl ZoomState {
    pub fn new(transform: ZoomTransform) -> Self {
        Self { transform, drag: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

/// Result of one gesture. `viewport` is set only when the transform changed
/// and the chart needs a redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomUpdate {
    pub state: ZoomState,
    pub viewport: Option<Viewport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverMode {
    #[default]
    Idle,
    Hovering,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverEvent {
    Enter,
    Leave,
    Move(Point),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub visible: bool,
    pub text: String,
    /// Top-left corner of the box.
    pub origin: Point,
}

/// Crosshair and tooltips drawn on top of the chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    pub mode: HoverMode,
    pub crosshair_visible: bool,
    /// Last pointer position seen while hovering.
    pub pointer: Option<Point>,
    pub price_tooltip: Tooltip,
    pub time_tooltip: Tooltip,
}

/// What the surface reports about the pointer, in content-box coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Moved(Point),
    /// The pointer left the drawing surface altogether.
    Left,
}

/// Events one pointer report turns into, in the order they must be applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerEvents {
    pub gesture: Option<Gesture>,
    pub hover: Vec<HoverEvent>,
}

/// Route a pointer report. Crossing into the content box enters hover mode
/// before the first move, crossing out leaves it, and leaving the surface
/// also releases any drag in progress.
pub fn pointer_events(
    layout: &ChartLayout,
    zoom: &ZoomState,
    overlay: &OverlayState,
    input: PointerInput,
) -> PointerEvents {
    let hovering = overlay.mode == HoverMode::Hovering;
    match input {
        PointerInput::Moved(at) => {
            let hover = match (layout.contains(at), hovering) {
                (true, false) => vec![HoverEvent::Enter, HoverEvent::Move(at)],
                (true, true) => vec![HoverEvent::Move(at)],
                (false, true) => vec![HoverEvent::Leave],
                (false, false) => Vec::new(),
            };
            PointerEvents { gesture: zoom.is_dragging().then_some(Gesture::DragMove { at }), hover }
        }
        PointerInput::Left => PointerEvents {
            gesture: zoom.is_dragging().then_some(Gesture::DragEnd),
            hover: if hovering { vec![HoverEvent::Leave] } else { Vec::new() },
        },
    }
}

/// Stateless controller; configuration only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionController {
    extent: ScaleExtent,
    price_decimals: usize,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ScaleExtent::default(), 3)
    }
}

/// Exponent applied to 2 for one wheel event.
fn wheel_delta(delta_y: f64, delta_mode: u32, ctrl: bool) -> f64 {
    let unit = match delta_mode {
        DELTA_PIXEL => 0.002,
        DELTA_LINE => 0.05,
        _ => 1.0,
    };
    -delta_y * unit * if ctrl { 10.0 } else { 1.0 }
}

impl InteractionController {
    pub fn new(extent: ScaleExtent, price_decimals: usize) -> Self {
        Self { extent, price_decimals }
    }

    pub fn extent(&self) -> ScaleExtent {
        self.extent
    }

    /// Apply one zoom/pan gesture. Both full scales are rescaled by the
    /// same transform, so zooming scales time and value together.
    pub fn apply_gesture(&self, chart: &Chart, state: &ZoomState, gesture: Gesture) -> ZoomUpdate {
        let current = state.transform;
        let next = match gesture {
            Gesture::Wheel { at, delta_y, delta_mode, ctrl } => {
                let k = self.extent.clamp(current.k * 2f64.powf(wheel_delta(delta_y, delta_mode, ctrl)));
                if k == current.k {
                    return ZoomUpdate { state: *state, viewport: None };
                }
                ZoomState { transform: current.scaled(k).anchored(at, current.invert(at)), ..*state }
            }
            Gesture::DragStart { at } => {
                ZoomState { drag: Some(DragAnchor { grabbed: current.invert(at) }), ..*state }
            }
            Gesture::DragMove { at } => match state.drag {
                Some(anchor) => ZoomState { transform: current.anchored(at, anchor.grabbed), ..*state },
                None => *state,
            },
            Gesture::DragEnd => ZoomState { drag: None, ..*state },
            Gesture::DoubleClick { at, zoom_out } => {
                let factor = if zoom_out { 0.5 } else { 2.0 };
                let k = self.extent.clamp(current.k * factor);
                ZoomState { transform: current.scaled(k).anchored(at, current.invert(at)), ..*state }
            }
        };

        if next.transform == current {
            return ZoomUpdate { state: next, viewport: None };
        }
        let viewport = chart.viewport_for(&next.transform);
        log_trace!(
            LogComponent::Application("Interaction"),
            "{:?} -> k={:.3} x={:.1} y={:.1}",
            gesture,
            next.transform.k,
            next.transform.x,
            next.transform.y
        );
        ZoomUpdate { state: next, viewport: Some(viewport) }
    }

    /// Advance the hover state machine. `viewport` is the window currently
    /// on screen; the readout inverts its scales at the pointer.
    pub fn hover(
        &self,
        chart: &Chart,
        viewport: &Viewport,
        overlay: &OverlayState,
        event: HoverEvent,
    ) -> OverlayState {
        match event {
            HoverEvent::Enter => {
                log_debug!(LogComponent::Application("Interaction"), "pointer entered plot");
                OverlayState {
                    mode: HoverMode::Hovering,
                    crosshair_visible: true,
                    pointer: overlay.pointer,
                    price_tooltip: Tooltip { visible: true, ..overlay.price_tooltip.clone() },
                    time_tooltip: Tooltip { visible: true, ..overlay.time_tooltip.clone() },
                }
            }
            // The time readout stays on screen after the pointer leaves.
            HoverEvent::Leave => OverlayState {
                mode: HoverMode::Idle,
                crosshair_visible: false,
                pointer: overlay.pointer,
                price_tooltip: Tooltip { visible: false, ..overlay.price_tooltip.clone() },
                time_tooltip: overlay.time_tooltip.clone(),
            },
            HoverEvent::Move(_) if overlay.mode == HoverMode::Idle => overlay.clone(),
            HoverEvent::Move(at) => {
                let layout = chart.layout();
                let (time, value) = chart.scales_for(viewport);
                let price = value.invert(at.y);
                let instant = time.invert(at.x);
                OverlayState {
                    pointer: Some(at),
                    price_tooltip: Tooltip {
                        visible: overlay.price_tooltip.visible,
                        text: format!("{:.*}", self.price_decimals, price),
                        origin: Point::new(layout.width, at.y - PRICE_BOX.height / 2.0),
                    },
                    time_tooltip: Tooltip {
                        visible: overlay.time_tooltip.visible,
                        text: format_clock(instant),
                        origin: Point::new(at.x - TIME_BOX.width / 2.0, layout.height),
                    },
                    ..overlay.clone()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_delta_units() {
        assert_eq!(wheel_delta(-500.0, DELTA_PIXEL, false), 1.0);
        assert_eq!(wheel_delta(20.0, DELTA_LINE, false), -1.0);
        assert_eq!(wheel_delta(1.0, DELTA_PAGE, false), -1.0);
        assert_eq!(wheel_delta(-50.0, DELTA_PIXEL, true), 1.0);
    }

    #[test]
    fn drag_anchor_marks_dragging() {
        let state = ZoomState::default();
        assert!(!state.is_dragging());
        let anchored = ZoomState { drag: Some(DragAnchor { grabbed: Point::new(1.0, 2.0) }), ..state };
        assert!(anchored.is_dragging());
    }

    fn hovering() -> OverlayState {
        OverlayState { mode: HoverMode::Hovering, crosshair_visible: true, ..OverlayState::default() }
    }

    fn dragging() -> ZoomState {
        ZoomState { drag: Some(DragAnchor { grabbed: Point::new(0.0, 0.0) }), ..ZoomState::default() }
    }

    #[test]
    fn pointer_entering_the_plot_enters_then_moves() {
        let layout = ChartLayout::with_content(300.0, 200.0, Default::default(), 10.0);
        let at = Point::new(150.0, 100.0);
        let events =
            pointer_events(&layout, &ZoomState::default(), &OverlayState::default(), PointerInput::Moved(at));
        assert_eq!(events.hover, vec![HoverEvent::Enter, HoverEvent::Move(at)]);
        assert_eq!(events.gesture, None);
    }

    #[test]
    fn pointer_inside_the_plot_only_moves() {
        let layout = ChartLayout::with_content(300.0, 200.0, Default::default(), 10.0);
        let at = Point::new(300.0, 0.0);
        let events = pointer_events(&layout, &ZoomState::default(), &hovering(), PointerInput::Moved(at));
        assert_eq!(events.hover, vec![HoverEvent::Move(at)]);
    }

    #[test]
    fn pointer_crossing_out_leaves_once() {
        let layout = ChartLayout::with_content(300.0, 200.0, Default::default(), 10.0);
        let outside = PointerInput::Moved(Point::new(-5.0, 100.0));

        let events = pointer_events(&layout, &ZoomState::default(), &hovering(), outside);
        assert_eq!(events.hover, vec![HoverEvent::Leave]);

        let events = pointer_events(&layout, &ZoomState::default(), &OverlayState::default(), outside);
        assert!(events.hover.is_empty());
    }

    #[test]
    fn pointer_re_entering_enters_again() {
        let layout = ChartLayout::with_content(300.0, 200.0, Default::default(), 10.0);
        let (inside, outside) = (Point::new(10.0, 10.0), Point::new(10.0, 250.0));

        let mut mode = HoverMode::Idle;
        let mut seen = Vec::new();
        for at in [inside, outside, inside] {
            let overlay = OverlayState { mode, ..OverlayState::default() };
            for event in pointer_events(&layout, &ZoomState::default(), &overlay, PointerInput::Moved(at)).hover {
                mode = match event {
                    HoverEvent::Enter => HoverMode::Hovering,
                    HoverEvent::Leave => HoverMode::Idle,
                    HoverEvent::Move(_) => mode,
                };
                seen.push(event);
            }
        }

        assert_eq!(
            seen,
            vec![
                HoverEvent::Enter,
                HoverEvent::Move(inside),
                HoverEvent::Leave,
                HoverEvent::Enter,
                HoverEvent::Move(inside),
            ]
        );
    }

    #[test]
    fn drag_follows_the_pointer_even_outside_the_plot() {
        let layout = ChartLayout::with_content(300.0, 200.0, Default::default(), 10.0);
        let at = Point::new(400.0, -20.0);
        let events = pointer_events(&layout, &dragging(), &OverlayState::default(), PointerInput::Moved(at));
        assert_eq!(events.gesture, Some(Gesture::DragMove { at }));
        assert!(events.hover.is_empty());
    }

    #[test]
    fn leaving_the_surface_ends_drag_and_hover() {
        let layout = ChartLayout::with_content(300.0, 200.0, Default::default(), 10.0);

        let events = pointer_events(&layout, &dragging(), &hovering(), PointerInput::Left);
        assert_eq!(events.gesture, Some(Gesture::DragEnd));
        assert_eq!(events.hover, vec![HoverEvent::Leave]);

        let events =
            pointer_events(&layout, &ZoomState::default(), &OverlayState::default(), PointerInput::Left);
        assert_eq!(events, PointerEvents::default());
    }
}
