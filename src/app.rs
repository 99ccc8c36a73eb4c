use leptos::html::Canvas;
use leptos::*;

use crate::{
    application::{
        ChartRenderingService, Gesture, HoverEvent, InteractionController, LoadPriceHistoryUseCase,
        OverlayState, PointerInput, ZoomState, pointer_events,
    },
    domain::{
        chart::{Chart, ChartLayout, Point, Size, Viewport},
        config::ChartConfig,
        logging::LogComponent,
    },
    infrastructure::{HttpPriceHistory, rendering::CanvasRenderer},
    log_error,
};

/// Window size at load; the chart is never resized afterwards.
fn window_size() -> Size {
    let window = gloo::utils::window();
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size::new(read(window.inner_width()), read(window.inner_height()))
}

/// 🦀 Root component: one full-window price history chart
#[component]
pub fn App(config: ChartConfig) -> impl IntoView {
    view! {
        <style>
            {r#"
            html, body {
                margin: 0;
                background: #1a1a1a;
                overflow: hidden;
            }

            .price-history-chart canvas {
                display: block;
                cursor: crosshair;
            }
            "#}
        </style>
        <div class="price-history-chart">
            <ChartView config=config />
        </div>
    }
}

/// 🎨 Canvas surface wired to the interaction controller
#[component]
fn ChartView(config: ChartConfig) -> impl IntoView {
    let layout = ChartLayout::from_surface(window_size(), config.margins, config.padding);
    let controller = InteractionController::new(config.scale_extent, config.price_decimals);
    let service = store_value(ChartRenderingService::new(&config));
    let data_url = config.data_url.clone();

    let chart = create_rw_signal::<Option<Chart>>(None);
    let load_error = create_rw_signal::<Option<String>>(None);
    let zoom = create_rw_signal(ZoomState::default());
    let viewport = create_rw_signal::<Option<Viewport>>(None);
    let overlay = create_rw_signal(OverlayState::default());

    let canvas_ref = create_node_ref::<Canvas>();

    // One fetch per session; a failure is terminal.
    spawn_local(async move {
        let use_case = LoadPriceHistoryUseCase::new(HttpPriceHistory::new(data_url));
        match use_case.open_chart(layout).await {
            Ok(loaded) => {
                viewport.set(Some(loaded.initial_viewport()));
                chart.set(Some(loaded));
            }
            Err(e) => load_error.set(Some(e.to_string())),
        }
    });

    // Total redraw whenever data, window or overlay changes.
    create_effect(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let element: web_sys::HtmlCanvasElement = (*canvas).clone();

        let scene = service.with_value(|service| {
            if let Some(reason) = load_error.get() {
                return service.build_message_scene(&layout, &format!("Data unavailable: {}", reason));
            }
            chart.with(|loaded| match loaded {
                Some(loaded) => {
                    let window = viewport.get().unwrap_or_else(|| loaded.initial_viewport());
                    overlay.with(|overlay| service.build_scene(loaded, &window, overlay))
                }
                None => service.build_message_scene(&layout, "Loading price history..."),
            })
        });

        let painted = CanvasRenderer::new(element).and_then(|mut renderer| renderer.render(&scene));
        if let Err(e) = painted {
            log_error!(LogComponent::Presentation("ChartView"), "❌ {}", e);
        }
    });

    let apply_gesture = move |gesture: Gesture| {
        chart.with_untracked(|loaded| {
            if let Some(loaded) = loaded {
                let update = controller.apply_gesture(loaded, &zoom.get_untracked(), gesture);
                zoom.set(update.state);
                if let Some(next) = update.viewport {
                    viewport.set(Some(next));
                }
            }
        });
    };

    let apply_hover = move |event: HoverEvent| {
        chart.with_untracked(|loaded| {
            if let Some(loaded) = loaded {
                let window = viewport.get_untracked().unwrap_or_else(|| loaded.initial_viewport());
                let next = overlay.with_untracked(|current| controller.hover(loaded, &window, current, event));
                overlay.set(next);
            }
        });
    };

    let pointer = move |event: &web_sys::MouseEvent| {
        layout.to_content(Point::new(event.offset_x() as f64, event.offset_y() as f64))
    };

    let route_pointer = move |input: PointerInput| {
        let events = zoom.with_untracked(|state| {
            overlay.with_untracked(|current| pointer_events(&layout, state, current, input))
        });
        if let Some(gesture) = events.gesture {
            apply_gesture(gesture);
        }
        for event in events.hover {
            apply_hover(event);
        }
    };

    let on_mouse_move = move |event: web_sys::MouseEvent| route_pointer(PointerInput::Moved(pointer(&event)));

    let on_mouse_leave = move |_event: web_sys::MouseEvent| route_pointer(PointerInput::Left);

    let on_mouse_down = move |event: web_sys::MouseEvent| {
        if event.button() == 0 {
            apply_gesture(Gesture::DragStart { at: pointer(&event) });
        }
    };

    let on_mouse_up = move |_event: web_sys::MouseEvent| apply_gesture(Gesture::DragEnd);

    let on_wheel = move |event: web_sys::WheelEvent| {
        event.prevent_default();
        apply_gesture(Gesture::Wheel {
            at: pointer(&*event),
            delta_y: event.delta_y(),
            delta_mode: event.delta_mode(),
            ctrl: event.ctrl_key(),
        });
    };

    let on_double_click = move |event: web_sys::MouseEvent| {
        apply_gesture(Gesture::DoubleClick { at: pointer(&event), zoom_out: event.shift_key() });
    };

    let surface = layout.surface_size();
    view! {
        <canvas
            id="chart-canvas"
            node_ref=canvas_ref
            width={(surface.width as u32).to_string()}
            height={(surface.height as u32).to_string()}
            on:mousemove=on_mouse_move
            on:mouseleave=on_mouse_leave
            on:mousedown=on_mouse_down
            on:mouseup=on_mouse_up
            on:wheel:undelegated=on_wheel
            on:dblclick=on_double_click
        />
    }
}
