//! Per-stage camera poses and the spring that eases between them.
//!
//! These types avoid platform APIs; the web renderer turns the current rig
//! pose into view/projection matrices every frame.

use crate::constants::*;
use crate::stage::Stage;
use glam::{Mat4, Vec3};

/// Camera position at startup, just below the stage 0 pose.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(-9.1, 8.35, 9.53);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Target pose for a stage.
pub fn stage_pose(stage: Stage) -> CameraPose {
    match stage.index() {
        // wide view of the studio
        0 => CameraPose {
            position: Vec3::new(-9.1, 8.55, 9.53),
            look_at: Vec3::new(2.0, 4.5, -2.5),
        },
        // slightly closer, still high
        1 => CameraPose {
            position: Vec3::new(-4.0, 7.0, 2.5),
            look_at: Vec3::new(3.0, 4.0, -2.0),
        },
        // closer to the monitor, still above
        2 => CameraPose {
            position: Vec3::new(3.5, 5.5, 2.5),
            look_at: Vec3::new(3.5, 7.0, -3.5),
        },
        _ => CameraPose {
            position: Vec3::new(2.5, 8.5, -1.5),
            look_at: Vec3::new(4.5, 8.0, -4.6),
        },
    }
}

/// Damped spring on a 3D value, integrated in fixed sub-steps so the result
/// does not depend on the frame rate.
#[derive(Clone, Copy, Debug)]
pub struct SpringVec3 {
    pub value: Vec3,
    pub velocity: Vec3,
    mass: f32,
    tension: f32,
    friction: f32,
}

impl SpringVec3 {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            velocity: Vec3::ZERO,
            mass: CAMERA_SPRING_MASS,
            tension: CAMERA_SPRING_TENSION,
            friction: CAMERA_SPRING_FRICTION,
        }
    }

    pub fn with_params(value: Vec3, mass: f32, tension: f32, friction: f32) -> Self {
        Self {
            value,
            velocity: Vec3::ZERO,
            mass: mass.max(1e-3),
            tension,
            friction,
        }
    }

    /// Damping ratio; values ≥ 1 approach the target without oscillating.
    pub fn damping_ratio(&self) -> f32 {
        self.friction / (2.0 * (self.tension * self.mass).sqrt())
    }

    pub fn step(&mut self, target: Vec3, dt_sec: f32) {
        let mut remaining = dt_sec.clamp(0.0, CAMERA_MAX_FRAME_SEC);
        while remaining > 0.0 {
            let h = remaining.min(CAMERA_SPRING_SUBSTEP_SEC);
            let force = (target - self.value) * self.tension - self.velocity * self.friction;
            self.velocity += force / self.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    position: SpringVec3,
    look_at: SpringVec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        let start = stage_pose(Stage::START);
        Self {
            position: SpringVec3::new(INITIAL_CAMERA_POSITION),
            look_at: SpringVec3::new(start.look_at),
        }
    }

    pub fn update(&mut self, stage: Stage, dt_sec: f32) {
        let target = stage_pose(stage);
        self.position.step(target.position, dt_sec);
        self.look_at.step(target.look_at, dt_sec);
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position.value,
            look_at: self.look_at.value,
        }
    }

    /// Distance between the current and target eye positions.
    pub fn error(&self, stage: Stage) -> f32 {
        (stage_pose(stage).position - self.position.value).length()
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_pose(pose: CameraPose, aspect: f32) -> Self {
        Self {
            eye: pose.position,
            target: pose.look_at,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
