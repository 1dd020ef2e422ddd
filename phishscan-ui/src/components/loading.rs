//! Loading Components
//!
//! The first-visit loading overlay with its particle scene, and inline
//! spinners.

use gloo_timers::callback::{Interval, Timeout};
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use phishscan::effects::{loading_caption, LoadingFrame, LoadingSequence, ParticleField, Pointer};

use crate::components::particles::{draw_scene, fit_to_viewport};
use crate::state::global::GlobalState;

/// Frame interval for canvas and overlay animations (~60 fps)
pub const FRAME_MS: u32 = 16;

/// Milliseconds since page load, falling back to wall-clock time
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Scene behind the loading progress
const LOADING_PARTICLES: usize = 250;

/// Full-screen loading overlay with the particle scene and a determinate
/// progress bar
///
/// One frame loop advances the progress and repaints the scene. Progress
/// follows elapsed wall-clock time, then the overlay fades out and is
/// removed. Nothing is scheduled when animations are disabled.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    let started = now_ms();
    let enabled = state.animations_enabled.get_untracked();
    let sequence = Rc::new(RefCell::new(LoadingSequence::start(started, enabled)));
    let field = Rc::new(RefCell::new(ParticleField::new(LOADING_PARTICLES)));
    field.borrow_mut().start(enabled);

    let frame = create_rw_signal(sequence.borrow_mut().update(started));
    let timer: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

    if frame.get_untracked().visible() {
        let sequence = Rc::clone(&sequence);
        let field = Rc::clone(&field);
        let timer_for_tick = Rc::clone(&timer);
        let interval = Interval::new(FRAME_MS, move || {
            let now = now_ms();
            let next = sequence.borrow_mut().update(now);
            frame.set(next);

            if let Some(canvas) = canvas_ref.get_untracked() {
                let mut field = field.borrow_mut();
                field.step((now - started) / 1000.0, Pointer::default());
                fit_to_viewport(&canvas);
                draw_scene(&canvas, &field);
            }

            if !next.visible() {
                field.borrow_mut().stop();
                // Cancel outside the interval's own callback
                let timer = Rc::clone(&timer_for_tick);
                Timeout::new(0, move || {
                    timer.borrow_mut().take();
                })
                .forget();
            }
        });
        *timer.borrow_mut() = Some(interval);
    }

    on_cleanup(move || {
        sequence.borrow_mut().stop();
        field.borrow_mut().stop();
        timer.borrow_mut().take();
    });

    let visible = create_memo(move |_| frame.get().visible());

    view! {
        <Show when=move || visible.get()>
            <LoadingOverlay frame=frame canvas_ref=canvas_ref />
        </Show>
    }
}

#[component]
fn LoadingOverlay(
    frame: RwSignal<LoadingFrame>,
    canvas_ref: NodeRef<html::Canvas>,
) -> impl IntoView {
    view! {
        <div
            class="loading-screen"
            style=move || format!("opacity: {:.3}", frame.get().opacity)
        >
            <canvas node_ref=canvas_ref class="loading-scene" aria-hidden="true" />
            <div class="loading-content">
                <div class="loading-logo">"🛡️ PhishScan"</div>
                <div class="loading-bar">
                    <div
                        class="loading-bar-fill"
                        style=move || format!("width: {}%", frame.get().percent())
                    />
                </div>
                <div class="loading-caption">
                    {move || loading_caption(frame.get().progress)}
                    " "
                    {move || format!("{}%", frame.get().percent())}
                </div>
            </div>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
