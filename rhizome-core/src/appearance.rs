use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hue cycling speed in degrees per frame.
pub const HUE_CYCLE_RATE: f32 = 0.5;

/// Node size when the host does not set one.
pub const DEFAULT_NODE_SIZE: f32 = 8.0;

/// Primitive drawn for a node. Closed set; the renderer decides what each looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Sphere,
    Cube,
    Torus,
    Cone,
    Cylinder,
    Ellipsoid,
    Plane,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Torus,
        ShapeKind::Cone,
        ShapeKind::Cylinder,
        ShapeKind::Ellipsoid,
        ShapeKind::Plane,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Normal,
    Specular,
}

/// Cosmetic attributes. The simulation never reads these; they ride along for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub base_hue: f32,
    pub shape: ShapeKind,
    pub material: Material,
    pub size: f32,
    pub rotation_phase: f32,
}

impl Appearance {
    /// Draws a hue in [140, 220) and one of the first `shape_variety` shapes.
    /// `size` is a single host-wide setting, so every node shares it.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, shape_variety: usize, size: f32) -> Self {
        let variety = shape_variety.clamp(1, ShapeKind::ALL.len());
        Self {
            base_hue: rng.gen_range(140.0..220.0),
            shape: ShapeKind::ALL[rng.gen_range(0..variety)],
            material: if rng.gen_bool(0.5) {
                Material::Specular
            } else {
                Material::Normal
            },
            size,
            rotation_phase: rng.gen_range(0.0..std::f32::consts::TAU),
        }
    }

    /// Colour-cycled hue in degrees for the given frame.
    pub fn hue_at(&self, frame: u64) -> f32 {
        (self.base_hue + frame as f32 * HUE_CYCLE_RATE).rem_euclid(360.0)
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            base_hue: 180.0,
            shape: ShapeKind::Sphere,
            material: Material::Normal,
            size: DEFAULT_NODE_SIZE,
            rotation_phase: 0.0,
        }
    }
}
