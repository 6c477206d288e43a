//! Studio room asset, the one-time room preparation pass and the edge lines
//! the renderer draws.

use crate::constants::{ROOM_OFFSET_Y, ROOM_SCALE};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Unlit; ignores every light in the scene.
    Basic {
        color: Vec3,
        textured: bool,
        vertex_colors: bool,
    },
    /// Diffuse, shaded by the light rig.
    Lambert {
        color: Vec3,
        textured: bool,
        vertex_colors: bool,
    },
}

impl Material {
    pub fn color(&self) -> Vec3 {
        match *self {
            Material::Basic { color, .. } | Material::Lambert { color, .. } => color,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Lambert { .. })
    }
}

/// Axis-aligned box in asset space.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: &'static str,
    pub min: Vec3,
    pub max: Vec3,
    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point { range: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneAsset {
    pub meshes: Vec<Mesh>,
    pub lights: Vec<Light>,
    pub transform: Mat4,
}

pub fn room_transform() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, ROOM_OFFSET_Y, 0.0)) * Mat4::from_scale(Vec3::splat(ROOM_SCALE))
}

/// Lights every unlit material, silences baked lights and places the room.
pub fn prepare_room(mut asset: SceneAsset) -> SceneAsset {
    for mesh in asset.meshes.iter_mut() {
        if let Material::Basic { color, textured, vertex_colors } = mesh.material {
            mesh.material = Material::Lambert { color, textured, vertex_colors };
        }
    }
    for light in asset.lights.iter_mut() {
        light.intensity = 0.0;
    }
    asset.transform = room_transform() * asset.transform;
    asset
}

fn hex(rgb: u32) -> Vec3 {
    Vec3::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

fn basic(rgb: u32) -> Material {
    Material::Basic { color: hex(rgb), textured: false, vertex_colors: false }
}

fn boxed(name: &'static str, min: [f32; 3], max: [f32; 3], material: Material) -> Mesh {
    Mesh { name, min: Vec3::from(min), max: Vec3::from(max), material }
}

/// The low-poly studio room in asset units (floor at y = -66.7, so the room
/// transform lands it on y = 0).
pub fn studio_room() -> SceneAsset {
    let floor_y = -ROOM_OFFSET_Y / ROOM_SCALE;
    SceneAsset {
        meshes: vec![
            boxed("floor", [-400.0, floor_y - 4.0, -400.0], [400.0, floor_y, 400.0], basic(0x2b2b33)),
            boxed("back_wall", [-400.0, floor_y, -410.0], [400.0, 733.0, -400.0], basic(0x3a3a48)),
            boxed("left_wall", [-410.0, floor_y, -400.0], [-400.0, 733.0, 400.0], basic(0x34344a)),
            boxed("desk", [133.0, floor_y, -400.0], [466.0, 333.0, -233.0], basic(0x5a3b22)),
            boxed("monitor", [200.0, 353.0, -347.0], [400.0, 567.0, -327.0], basic(0x101418)),
            boxed("monitor_screen", [212.0, 365.0, -327.0], [388.0, 555.0, -325.0], Material::Basic {
                color: hex(0x00ff41),
                textured: true,
                vertex_colors: false,
            }),
            boxed("monitor_stand", [285.0, 333.0, -345.0], [315.0, 353.0, -335.0], basic(0x202020)),
            boxed("keyboard", [230.0, 333.0, -300.0], [370.0, 340.0, -260.0], basic(0x2a2a2a)),
            boxed("shelf", [-333.0, 400.0, -387.0], [-67.0, 420.0, -320.0], basic(0x6b4a2c)),
            boxed("chair", [240.0, floor_y, -180.0], [360.0, 200.0, -80.0], Material::Lambert {
                color: hex(0x1c1c1c),
                textured: false,
                vertex_colors: true,
            }),
        ],
        lights: vec![
            Light {
                kind: LightKind::Point { range: 200.0 },
                position: Vec3::new(300.0, 600.0, -200.0),
                color: hex(0xffffff),
                intensity: 3.0,
            },
            Light {
                kind: LightKind::Directional,
                position: Vec3::new(0.0, 700.0, 400.0),
                color: hex(0xfff4e0),
                intensity: 1.5,
            },
        ],
        transform: Mat4::IDENTITY,
    }
}

/// The dramatic rig lighting the prepared room (world space).
pub fn studio_light_rig() -> Vec<Light> {
    let dir = |p: [f32; 3], rgb, intensity| Light {
        kind: LightKind::Directional,
        position: Vec3::from(p),
        color: hex(rgb),
        intensity,
    };
    let point = |p: [f32; 3], rgb, intensity, range| Light {
        kind: LightKind::Point { range },
        position: Vec3::from(p),
        color: hex(rgb),
        intensity,
    };
    vec![
        Light {
            kind: LightKind::Ambient,
            position: Vec3::ZERO,
            color: hex(0x2a2a3a),
            intensity: 0.01,
        },
        dir([8.0, 10.0, 6.0], 0xf0f0ff, 0.6),
        dir([-5.0, 3.0, -3.0], 0x6699ff, 0.25),
        point([0.4, 1.2, 0.6], 0xff3366, 0.8, 2.5),
        point([0.2, 1.45, -0.4], 0x3388ff, 1.8, 1.8),
        point([-0.6, 1.0, 0.2], 0xffaa33, 1.2, 1.5),
        point([1.2, 0.8, -0.8], 0xff6600, 0.6, 2.0),
        point([-0.8, 1.8, 0.8], 0x9933ff, 0.9, 2.2),
        point([4.5, 8.0, -3.5], 0x00ff41, 1.0, 4.0),
    ]
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

fn light_at(light: &Light, p: Vec3) -> Vec3 {
    let weight = match light.kind {
        LightKind::Ambient => 1.0,
        // edges have no normal, so directional light counts at half strength
        LightKind::Directional => 0.5,
        LightKind::Point { range } => {
            let d = light.position.distance(p);
            if range > 0.0 && d >= range {
                0.0
            } else {
                1.0 / (1.0 + d * d)
            }
        }
    };
    light.color * light.intensity * weight
}

fn shade(material: &Material, p: Vec3, lights: &[Light]) -> Vec3 {
    match material {
        Material::Basic { color, .. } => *color,
        Material::Lambert { color, .. } => {
            let incoming = lights.iter().fold(Vec3::ZERO, |acc, l| acc + light_at(l, p));
            *color * incoming
        }
    }
}

const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Coloured line list (two vertices per segment) in world space. Asset
/// lights take part in shading, so baked ones must be zeroed first.
pub fn edge_lines(asset: &SceneAsset, rig: &[Light]) -> Vec<LineVertex> {
    let mut lights: Vec<Light> = rig.to_vec();
    lights.extend(asset.lights.iter().map(|l| Light {
        position: asset.transform.transform_point3(l.position),
        ..*l
    }));

    let mut out = Vec::with_capacity(asset.meshes.len() * BOX_EDGES.len() * 2);
    for mesh in &asset.meshes {
        let corners: [Vec3; 8] = std::array::from_fn(|i| {
            let local = Vec3::new(
                if i & 1 == 0 { mesh.min.x } else { mesh.max.x },
                if i & 2 == 0 { mesh.min.y } else { mesh.max.y },
                if i & 4 == 0 { mesh.min.z } else { mesh.max.z },
            );
            asset.transform.transform_point3(local)
        });
        for (a, b) in BOX_EDGES {
            for p in [corners[a], corners[b]] {
                let c = shade(&mesh.material, p, &lights);
                out.push(LineVertex {
                    position: p.to_array(),
                    color: [c.x, c.y, c.z, 1.0],
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_lights_basic_materials_and_keeps_flags() {
        let prepared = prepare_room(studio_room());
        assert!(prepared.meshes.iter().all(|m| m.material.is_lit()));
        let screen = prepared.meshes.iter().find(|m| m.name == "monitor_screen");
        assert!(matches!(
            screen.map(|m| m.material),
            Some(Material::Lambert { textured: true, .. })
        ));
        assert!(prepared.lights.iter().all(|l| l.intensity == 0.0));
    }

    #[test]
    fn scaled_floor_sits_at_zero() {
        let prepared = prepare_room(studio_room());
        let floor = &prepared.meshes[0];
        let top = prepared.transform.transform_point3(floor.max);
        assert!(top.y.abs() < 1e-4);
    }
}
