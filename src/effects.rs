//! Background visual effects
//!
//! Decorative scenes for the landing page and the loading screen: a rotating
//! particle field around a pulsing wireframe sphere. The frame loop itself
//! lives in the UI; this module owns the scene state and the
//! `Idle -> Running -> Fading -> Done` lifecycle so a loop knows when to stop.

use std::f64::consts::PI;

/// Lifecycle of one visual effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectPhase {
    #[default]
    Idle,
    Running,
    Fading,
    Done,
}

impl EffectPhase {
    /// Whether frames still need to be scheduled
    pub fn is_active(&self) -> bool {
        matches!(self, EffectPhase::Running | EffectPhase::Fading)
    }
}

/// State machine shared by every effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectLifecycle {
    phase: EffectPhase,
}

impl EffectLifecycle {
    pub fn phase(&self) -> EffectPhase {
        self.phase
    }

    /// Leave `Idle`. With animations disabled the effect is skipped and goes
    /// straight to `Done`. Returns whether a frame loop should be started.
    pub fn start(&mut self, animations_enabled: bool) -> bool {
        if self.phase != EffectPhase::Idle {
            return self.phase.is_active();
        }
        self.phase = if animations_enabled {
            EffectPhase::Running
        } else {
            EffectPhase::Done
        };
        self.phase.is_active()
    }

    pub fn begin_fade(&mut self) {
        if self.phase == EffectPhase::Running {
            self.phase = EffectPhase::Fading;
        }
    }

    pub fn finish(&mut self) {
        if self.phase == EffectPhase::Fading {
            self.phase = EffectPhase::Done;
        }
    }

    /// Tear down from any phase
    pub fn stop(&mut self) {
        self.phase = EffectPhase::Done;
    }
}

/// Pointer position normalized to `[-1, 1]` on both axes, origin at center
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Normalize client coordinates against the viewport
    pub fn from_client(x: f64, y: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        Self {
            x: ((x / width) * 2.0 - 1.0).clamp(-1.0, 1.0),
            y: -((y / height) * 2.0 - 1.0).clamp(-1.0, 1.0),
        }
    }
}

const ROTATION_STEP_X: f64 = 0.0008;
const ROTATION_STEP_Y: f64 = 0.0015;
const SPHERE_ROTATION_STEP: f64 = 0.003;
const PULSE_AMPLITUDE: f64 = 0.05;
const PULSE_SPEED: f64 = 1.5;
const WAVE_AMPLITUDE: f64 = 0.08;
const POINTER_BIAS: f64 = 0.25;
const FIELD_RADIUS: f64 = 2.2;
const SPHERE_RADIUS: f64 = 1.0;
const CAMERA_DISTANCE: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
struct Particle {
    base: [f64; 3],
    pos: [f64; 3],
    offset: f64,
}

/// A particle projected onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Radius in pixels, larger when closer to the camera
    pub size: f64,
    /// `[0, 1]`, dimmer when further away
    pub alpha: f64,
}

/// Particle field around a wireframe sphere
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    rotation_x: f64,
    rotation_y: f64,
    sphere_rotation: f64,
    sphere_scale: f64,
    lifecycle: EffectLifecycle,
}

impl ParticleField {
    /// Lay out `count` particles evenly on a sphere shell (Fibonacci lattice)
    pub fn new(count: usize) -> Self {
        let golden_angle = PI * (3.0 - 5f64.sqrt());
        let particles = (0..count)
            .map(|i| {
                let y = if count > 1 {
                    1.0 - (i as f64 / (count - 1) as f64) * 2.0
                } else {
                    0.0
                };
                let r = (1.0 - y * y).sqrt();
                let theta = golden_angle * i as f64;
                // Alternate shells so the field has some depth
                let shell = FIELD_RADIUS * (0.75 + 0.25 * ((i % 4) as f64 / 3.0));
                let base = [theta.cos() * r * shell, y * shell, theta.sin() * r * shell];
                Particle {
                    base,
                    pos: base,
                    offset: i as f64 * 0.37,
                }
            })
            .collect();

        Self {
            particles,
            rotation_x: 0.0,
            rotation_y: 0.0,
            sphere_rotation: 0.0,
            sphere_scale: 1.0,
            lifecycle: EffectLifecycle::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn phase(&self) -> EffectPhase {
        self.lifecycle.phase()
    }

    /// See [`EffectLifecycle::start`]
    pub fn start(&mut self, animations_enabled: bool) -> bool {
        self.lifecycle.start(animations_enabled)
    }

    pub fn stop(&mut self) {
        self.lifecycle.stop();
    }

    pub fn rotation(&self) -> (f64, f64) {
        (self.rotation_x, self.rotation_y)
    }

    pub fn sphere_scale(&self) -> f64 {
        self.sphere_scale
    }

    /// Advance one frame; a no-op unless the effect is running
    pub fn step(&mut self, elapsed_secs: f64, pointer: Pointer) {
        if !self.lifecycle.phase().is_active() {
            return;
        }

        self.rotation_x += ROTATION_STEP_X;
        self.rotation_y += ROTATION_STEP_Y;
        self.sphere_rotation += SPHERE_ROTATION_STEP;
        self.sphere_scale = 1.0 + PULSE_AMPLITUDE * (elapsed_secs * PULSE_SPEED).sin();

        let (rx, ry) = (self.rotation_x, self.rotation_y);
        for p in &mut self.particles {
            let [x, y, z] = rotate(p.base, rx, ry);
            let t = elapsed_secs + p.offset;
            p.pos = [
                x + WAVE_AMPLITUDE * t.sin() + pointer.x * POINTER_BIAS,
                y + WAVE_AMPLITUDE * (t * 0.8).cos() + pointer.y * POINTER_BIAS,
                z,
            ];
        }
    }

    /// Particle positions on a `width` x `height` canvas
    pub fn project(&self, width: f64, height: f64) -> Vec<ScreenPoint> {
        self.particles
            .iter()
            .filter_map(|p| project_point(p.pos, width, height))
            .map(|(x, y, depth)| ScreenPoint {
                x,
                y,
                size: 1.0 + 1.5 * depth,
                alpha: 0.25 + 0.75 * depth,
            })
            .collect()
    }

    /// Latitude and longitude rings of the wireframe sphere, projected
    pub fn sphere_wireframe(&self, width: f64, height: f64, rings: usize) -> Vec<Vec<(f64, f64)>> {
        let segments = 32;
        let radius = SPHERE_RADIUS * self.sphere_scale;
        let mut lines = Vec::with_capacity(rings * 2);

        for ring in 1..rings {
            let lat = PI * ring as f64 / rings as f64 - PI / 2.0;
            let line = (0..=segments)
                .filter_map(|s| {
                    let lon = 2.0 * PI * s as f64 / segments as f64;
                    let point = [
                        radius * lat.cos() * lon.cos(),
                        radius * lat.sin(),
                        radius * lat.cos() * lon.sin(),
                    ];
                    let point = rotate(point, self.rotation_x, self.sphere_rotation);
                    project_point(point, width, height).map(|(x, y, _)| (x, y))
                })
                .collect();
            lines.push(line);
        }

        for meridian in 0..rings {
            let lon = PI * meridian as f64 / rings as f64;
            let line = (0..=segments)
                .filter_map(|s| {
                    let lat = 2.0 * PI * s as f64 / segments as f64;
                    let point = [
                        radius * lat.cos() * lon.cos(),
                        radius * lat.sin(),
                        radius * lat.cos() * lon.sin(),
                    ];
                    let point = rotate(point, self.rotation_x, self.sphere_rotation);
                    project_point(point, width, height).map(|(x, y, _)| (x, y))
                })
                .collect();
            lines.push(line);
        }

        lines
    }
}

fn rotate([x, y, z]: [f64; 3], rx: f64, ry: f64) -> [f64; 3] {
    // around Y, then around X
    let (sy, cy) = ry.sin_cos();
    let x1 = x * cy + z * sy;
    let z1 = -x * sy + z * cy;

    let (sx, cx) = rx.sin_cos();
    let y2 = y * cx - z1 * sx;
    let z2 = y * sx + z1 * cx;

    [x1, y2, z2]
}

/// Perspective projection; returns `(x, y, depth)` with depth in `[0, 1]`
/// (1 = nearest), or `None` behind the camera.
fn project_point([x, y, z]: [f64; 3], width: f64, height: f64) -> Option<(f64, f64, f64)> {
    let distance = CAMERA_DISTANCE - z;
    if distance <= 0.1 {
        return None;
    }
    let scale = CAMERA_DISTANCE / distance;
    let half = width.min(height) / 2.0 / (FIELD_RADIUS + 0.5);
    let depth = ((z + FIELD_RADIUS) / (2.0 * FIELD_RADIUS)).clamp(0.0, 1.0);
    Some((width / 2.0 + x * scale * half, height / 2.0 - y * scale * half, depth))
}

/// Duration of the determinate loading progress
pub const LOADING_DURATION_MS: f64 = 5000.0;

/// Fade-out after the progress completes
pub const LOADING_FADE_MS: f64 = 600.0;

/// What the loading screen shows on one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingFrame {
    /// `[0, 1]`
    pub progress: f64,
    /// Overlay opacity, `[0, 1]`
    pub opacity: f64,
    pub phase: EffectPhase,
}

impl LoadingFrame {
    pub fn percent(&self) -> u32 {
        (self.progress * 100.0).round() as u32
    }

    pub fn visible(&self) -> bool {
        self.phase != EffectPhase::Done
    }
}

/// Loading screen timeline, driven by wall-clock time rather than frames
#[derive(Debug, Clone, Copy)]
pub struct LoadingSequence {
    started_at_ms: f64,
    lifecycle: EffectLifecycle,
}

impl LoadingSequence {
    /// Start at `now_ms`; skipped entirely when animations are disabled
    pub fn start(now_ms: f64, animations_enabled: bool) -> Self {
        let mut lifecycle = EffectLifecycle::default();
        lifecycle.start(animations_enabled);
        Self {
            started_at_ms: now_ms,
            lifecycle,
        }
    }

    pub fn phase(&self) -> EffectPhase {
        self.lifecycle.phase()
    }

    pub fn stop(&mut self) {
        self.lifecycle.stop();
    }

    /// Advance the timeline to `now_ms`
    pub fn update(&mut self, now_ms: f64) -> LoadingFrame {
        let elapsed = (now_ms - self.started_at_ms).max(0.0);

        if self.lifecycle.phase() == EffectPhase::Running && elapsed >= LOADING_DURATION_MS {
            self.lifecycle.begin_fade();
        }
        if self.lifecycle.phase() == EffectPhase::Fading
            && elapsed >= LOADING_DURATION_MS + LOADING_FADE_MS
        {
            self.lifecycle.finish();
        }

        match self.lifecycle.phase() {
            EffectPhase::Idle => LoadingFrame {
                progress: 0.0,
                opacity: 1.0,
                phase: EffectPhase::Idle,
            },
            EffectPhase::Running => LoadingFrame {
                progress: (elapsed / LOADING_DURATION_MS).min(1.0),
                opacity: 1.0,
                phase: EffectPhase::Running,
            },
            EffectPhase::Fading => LoadingFrame {
                progress: 1.0,
                opacity: (1.0 - (elapsed - LOADING_DURATION_MS) / LOADING_FADE_MS).clamp(0.0, 1.0),
                phase: EffectPhase::Fading,
            },
            EffectPhase::Done => LoadingFrame {
                progress: 1.0,
                opacity: 0.0,
                phase: EffectPhase::Done,
            },
        }
    }
}

/// Caption under the loading bar
pub fn loading_caption(progress: f64) -> &'static str {
    match progress {
        p if p < 0.25 => "Initializing scanner...",
        p if p < 0.5 => "Loading threat intelligence...",
        p if p < 0.75 => "Preparing analysis engine...",
        p if p < 1.0 => "Almost ready...",
        _ => "Ready",
    }
}
