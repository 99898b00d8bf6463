/// Front-end rendering and interaction constants.
///
/// Backdrop behaviour (smoothing rates, lifetimes, field size) lives in
/// `stage_core::constants`; these only shape how the frame is drawn.

// Camera
pub const CAMERA_Z: f32 = 11.0;
pub const CAMERA_FOV_DEG: f32 = 55.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 400.0; // past the far end of the star field

// Stars are world-space quads so they shrink with distance
pub const STAR_SIZE: f32 = 0.28;

// Glow objects: sphere radius per slot before the model scale
pub const PRIMARY_GLOW_RADIUS: f32 = 1.0;
pub const SECONDARY_GLOW_RADIUS: f32 = 1.3;

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.3;
pub const BLOOM_RADIUS: f32 = 0.4;
pub const CLEAR_COLOR: [f64; 3] = [0.012, 0.006, 0.02];

// Frame loop
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // a backgrounded tab resumes with one short step

// Instance buffers start at this many entries and double on demand
pub const MIN_INSTANCE_CAPACITY: usize = 64;

// Overlay element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const PANEL_ID: &str = "scene-panel";
pub const SPRITES_ID: &str = "sprite-layer";
pub const TOAST_ID: &str = "toast";
pub const DOTS_ID: &str = "progress-dots";
pub const HELP_ID: &str = "help-overlay";
