//! Orbit camera controls with inertial damping.
//!
//! Input handlers only accumulate pending deltas; [`OrbitControls::update`]
//! applies them to the camera once per frame. With damping enabled each update
//! applies `damping_factor` of what is pending and keeps the rest, so motion
//! eases out and converges on the requested orientation without overshoot.

use crate::camera::PerspectiveCamera;
use glam::Vec3;
use std::f32::consts::PI;

const EPS: f32 = 1e-6;

/// Spherical coordinates around the orbit target, Y up.
/// `theta` is the azimuth from +Z toward +X, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Height of the drawable area in logical pixels; drag distances are
    /// measured against it.
    viewport_height: f32,
    pending_theta: f32,
    pending_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            viewport_height: 1.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = factor;
        self
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Rotation (azimuth, polar) still waiting to be applied, in radians.
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.pending_theta, self.pending_phi)
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.pending_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.pending_phi -= angle;
    }

    /// Drag with the rotate button held: a drag across the full viewport
    /// height turns the camera one full revolution.
    pub fn rotate_drag(&mut self, dx: f32, dy: f32) {
        let k = 2.0 * PI * self.rotate_speed / self.viewport_height;
        self.rotate_left(dx * k);
        self.rotate_up(dy * k);
    }

    /// Drag with the pan button held: moves the target in the screen plane
    /// so the point under the cursor follows it.
    pub fn pan_drag(&mut self, camera: &PerspectiveCamera, dx: f32, dy: f32) {
        let distance = (camera.position - self.target).length();
        let target_distance = distance * (camera.fov().to_radians() / 2.0).tan();
        let k = 2.0 * target_distance * self.pan_speed / self.viewport_height;
        self.pan_offset += camera.right() * (-dx * k);
        self.pan_offset += camera.screen_up() * (dy * k);
    }

    /// Wheel input. Positive notches move toward the target.
    pub fn zoom(&mut self, notches: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        self.scale *= step.powf(notches);
    }

    /// Apply pending motion to the camera. Returns whether it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let mut s = Spherical::from_offset(camera.position - self.target);

        if self.enable_damping {
            s.theta += self.pending_theta * self.damping_factor;
            s.phi += self.pending_phi * self.damping_factor;
            self.target += self.pan_offset * self.damping_factor;
        } else {
            s.theta += self.pending_theta;
            s.phi += self.pending_phi;
            self.target += self.pan_offset;
        }
        s.phi = s.phi.clamp(EPS, PI - EPS);
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + s.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.pending_theta *= keep;
            self.pending_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(before) > EPS
    }
}
