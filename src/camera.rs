use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z};
use glam::{Mat4, Vec3};

#[inline]
pub fn eye() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_Z)
}

/// Fixed camera on the +z axis looking at the origin; the star field flies
/// toward it.
pub fn view_proj(width: u32, height: u32) -> Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    let proj = Mat4::perspective_rh(CAMERA_FOV_DEG.to_radians(), aspect, CAMERA_NEAR, CAMERA_FAR);
    let view = Mat4::look_at_rh(eye(), Vec3::ZERO, Vec3::Y);
    proj * view
}
