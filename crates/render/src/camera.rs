use glam::{Mat4, Vec3};

/// Perspective camera with look-at orientation.
///
/// The projection matrix is cached and only recomputed by
/// [`PerspectiveCamera::update_projection_matrix`], which every setter that
/// touches projection parameters calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    pub position: Vec3,
    pub up: Vec3,
    target: Vec3,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32) -> Self {
        let mut cam = Self {
            fov: fov_degrees,
            aspect,
            near: 0.1,
            far: 2000.0,
            position: Vec3::ZERO,
            up: Vec3::Y,
            target: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees;
        self.update_projection_matrix();
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    /// Orient the camera toward a world-space point.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn right(&self) -> Vec3 {
        self.forward()
            .cross(self.up)
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    /// Up vector in screen space (orthogonal to forward and right).
    pub fn screen_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
        assert_eq!(cam.near(), 0.1);
        assert_eq!(cam.far(), 2000.0);
    }

    #[test]
    fn set_aspect_recomputes_projection() {
        let mut cam = PerspectiveCamera::new(55.0, 1.0);
        let before = cam.projection_matrix();
        cam.set_aspect(1920.0 / 1080.0);
        assert_eq!(cam.aspect(), 1920.0 / 1080.0);
        assert_ne!(cam.projection_matrix(), before);
        let expected = Mat4::perspective_rh(55.0_f32.to_radians(), 1920.0 / 1080.0, 0.1, 2000.0);
        assert!(cam.projection_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn look_at_target_is_centered() {
        let mut cam = PerspectiveCamera::new(55.0, 800.0 / 600.0);
        cam.position = Vec3::new(0.0, 0.0, 6.0);
        cam.look_at(Vec3::ZERO);
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(3.0, 2.0, 5.0);
        cam.look_at(Vec3::ZERO);
        let (f, r, u) = (cam.forward(), cam.right(), cam.screen_up());
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
    }
}
