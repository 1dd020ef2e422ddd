//! Particle Background
//!
//! Full-screen canvas behind the page with the rotating particle field.
//! Shown in dark mode only.

use gloo_timers::callback::{Interval, Timeout};
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use phishscan::effects::{ParticleField, Pointer};

use crate::components::loading::{now_ms, FRAME_MS};
use crate::state::global::GlobalState;

const PARTICLE_COUNT: usize = 350;
const WIREFRAME_RINGS: usize = 8;

const WIREFRAME_COLOR: &str = "rgba(99, 102, 241, 0.25)";

/// Decorative particle background
///
/// The scene is rebuilt whenever the theme or the animations preference
/// changes. With animations disabled a single still frame is drawn and no
/// frame loop runs.
#[component]
pub fn ParticleBackground() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    let pointer = Rc::new(Cell::new(Pointer::default()));
    let running: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

    let pointer_for_move = Rc::clone(&pointer);
    let mouse = window_event_listener(ev::mousemove, move |ev| {
        let (width, height) = viewport_size();
        pointer_for_move.set(Pointer::from_client(
            ev.client_x() as f64,
            ev.client_y() as f64,
            width,
            height,
        ));
    });

    let visible = state.particles_visible;
    let animations = state.animations_enabled;
    let running_for_effect = Rc::clone(&running);
    create_effect(move |_| {
        let show = visible.get();
        let enabled = animations.get();

        // Stop the previous scene before building a new one
        running_for_effect.borrow_mut().take();

        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let canvas: HtmlCanvasElement = (*canvas).clone();

        if !show {
            clear(&canvas);
            return;
        }

        *running_for_effect.borrow_mut() = start_scene(
            canvas,
            PARTICLE_COUNT,
            enabled,
            Rc::clone(&pointer),
            fit_to_viewport,
        );
    });

    on_cleanup(move || {
        running.borrow_mut().take();
        mouse.remove();
    });

    view! {
        <canvas
            node_ref=canvas_ref
            class="particle-background"
            style=move || if visible.get() { "opacity: 1" } else { "opacity: 0" }
            aria-hidden="true"
        />
    }
}

/// Particle scene filling its own box, in either theme
///
/// Used behind the landing hero. Runs until the component is unmounted.
#[component]
pub fn ParticleScene(
    /// Number of particles
    count: usize,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let running: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

    let animations = state.animations_enabled;
    let running_for_effect = Rc::clone(&running);
    create_effect(move |_| {
        let enabled = animations.get();
        running_for_effect.borrow_mut().take();

        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let canvas: HtmlCanvasElement = (*canvas).clone();
        *running_for_effect.borrow_mut() = start_scene(
            canvas,
            count,
            enabled,
            Rc::new(Cell::new(Pointer::default())),
            fit_to_box,
        );
    });

    on_cleanup(move || {
        running.borrow_mut().take();
    });

    view! {
        <canvas node_ref=canvas_ref class=format!("particle-scene {}", class) aria-hidden="true" />
    }
}

/// Build a fresh field on `canvas`, resized with `fit` before every frame
///
/// With animations disabled one still frame is drawn and `None` returned;
/// otherwise the returned interval drives the scene until dropped.
pub fn start_scene(
    canvas: HtmlCanvasElement,
    count: usize,
    animations_enabled: bool,
    pointer: Rc<Cell<Pointer>>,
    fit: fn(&HtmlCanvasElement),
) -> Option<Interval> {
    let mut field = ParticleField::new(count);
    if !field.start(animations_enabled) {
        // The canvas may not be laid out yet
        Timeout::new(0, move || {
            fit(&canvas);
            draw_scene(&canvas, &field);
        })
        .forget();
        return None;
    }

    let field = RefCell::new(field);
    let started = now_ms();
    Some(Interval::new(FRAME_MS, move || {
        let mut field = field.borrow_mut();
        field.step((now_ms() - started) / 1000.0, pointer.get());
        fit(&canvas);
        draw_scene(&canvas, &field);
    }))
}

/// Match the canvas's pixel size to its laid-out box
pub fn fit_to_box(canvas: &HtmlCanvasElement) {
    let width = canvas.client_width().max(0) as u32;
    let height = canvas.client_height().max(0) as u32;
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }
}

/// Match the canvas's pixel size to the viewport
pub fn fit_to_viewport(canvas: &HtmlCanvasElement) {
    let (width, height) = viewport_size();
    let (width, height) = (width as u32, height as u32);
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }
}

fn viewport_size() -> (f64, f64) {
    let window = window();
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn clear(canvas: &HtmlCanvasElement) {
    if let Some(ctx) = context(canvas) {
        ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }
}

/// Draw one frame of the scene
pub fn draw_scene(canvas: &HtmlCanvasElement, field: &ParticleField) {
    let Some(ctx) = context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    // Wireframe sphere
    ctx.set_stroke_style(&WIREFRAME_COLOR.into());
    ctx.set_line_width(1.0);
    for line in field.sphere_wireframe(width, height, WIREFRAME_RINGS) {
        let mut points = line.into_iter();
        if let Some((x, y)) = points.next() {
            ctx.begin_path();
            ctx.move_to(x, y);
            for (x, y) in points {
                ctx.line_to(x, y);
            }
            ctx.stroke();
        }
    }

    // Particles, dimmer and smaller further away
    for point in field.project(width, height) {
        ctx.set_fill_style(&format!("rgba(129, 140, 248, {:.3})", point.alpha).into());
        ctx.begin_path();
        let _ = ctx.arc(point.x, point.y, point.size, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }
}
