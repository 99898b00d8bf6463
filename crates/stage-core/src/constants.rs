//! Backdrop, burst and sequencing tuning constants.
//!
//! These express intended behavior (smoothing rates, lifetimes, field sizes)
//! and keep magic numbers out of the update code.

// Per-second smoothing rates used by the render loop
pub const WARP_EASE_RATE: f32 = 3.0;
pub const STAR_SPEED_EASE_RATE: f32 = 2.2;
pub const STAR_OPACITY_EASE_RATE: f32 = 2.0;
pub const TINT_EASE_RATE: f32 = 2.4;
pub const GLOW_COLOR_EASE_RATE: f32 = 4.0;

// Bloom is eased per frame, not per second
pub const BLOOM_EASE_PER_FRAME: f32 = 0.08;

// Star field layout (world units)
pub const STAR_COUNT: usize = 1650;
pub const STAR_FIELD_SIZE: f32 = 160.0; // x/y spread, centered on the camera axis
pub const STAR_FIELD_DEPTH: f32 = 260.0; // far plane where stars are recycled to
pub const STAR_SPAWN_NEAR_Z: f32 = 10.0; // nearest depth used at initial scatter
pub const STAR_NEAR_PLANE_Z: f32 = 14.0; // stars crossing this are recycled
pub const STAR_SPEED_SCALE: f32 = 12.0;
pub const STAR_DRIFT_SCALE: f32 = 3.0;
pub const STAR_DRIFT_MIN: f32 = 0.3;
pub const STAR_DRIFT_SPAN: f32 = 0.5;

// Glow objects
pub const PRIMARY_PULSE_AMPLITUDE: f32 = 0.06;
pub const SECONDARY_PULSE_AMPLITUDE: f32 = 0.04;
pub const PRIMARY_SPIN: [f32; 2] = [0.11, 0.22]; // radians/sec around x, y
pub const SECONDARY_SPIN: [f32; 2] = [0.09, 0.18];

// Bursts
pub const BURST_LIFETIME_SECS: f64 = 3.2;
pub const BURST_PARTICLES_PER_INTENSITY: f32 = 80.0;
pub const BURST_PARTICLE_LIFE_SECS: f32 = 3.0;
pub const BURST_SPEED_MIN: f32 = 8.0; // screen percent per second
pub const BURST_SPEED_MAX: f32 = 25.0;
pub const BURST_GRAVITY: f32 = 5.0; // screen percent per second^2, +y is down
pub const BURST_SIZE_MIN: f32 = 4.0; // css px
pub const BURST_SIZE_MAX: f32 = 14.0;
pub const BURST_SIZE_FLOOR: f32 = 1.0;
pub const BURST_SIZE_DECAY: f32 = 3.0; // px per second
pub const BURST_OPACITY_DECAY: f32 = 0.9; // per second
pub const BURST_SPIN_DEG_PER_SEC: f32 = 20.0;
pub const BURST_PALETTE: [u32; 6] = [0xff6b8a, 0xffb3c6, 0xff8fa3, 0xffd6e0, 0xe8b86d, 0xffffff];

// Sequencer flourishes
pub const TRANSITION_BURST_INTENSITY: f32 = 1.0;
pub const RESTART_BURST_INTENSITY: f32 = 1.5;
pub const SCREEN_CENTER: [f32; 2] = [50.0, 50.0];

// Stage timing
pub const TOAST_SECS: f64 = 2.4;
pub const SCENE_EXIT_SECS: f64 = 0.8;

// Tolerance when comparing the stage clock against deadlines
pub const CLOCK_EPSILON: f64 = 1e-9;
