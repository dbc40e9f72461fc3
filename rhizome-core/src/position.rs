use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A point in the simulation space. Planar scenes keep `z` at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    #[inline]
    pub fn axis_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// Spatial axis, used to address per-axis state such as noise offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Dimensionality of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// 2D canvas, motion on x and y only.
    Planar,
    /// 3D volume, motion on all three axes.
    #[default]
    Volumetric,
}

impl Space {
    /// Axes integrated each frame.
    pub fn axes(self) -> &'static [Axis] {
        match self {
            Space::Planar => &[Axis::X, Axis::Y],
            Space::Volumetric => &[Axis::X, Axis::Y, Axis::Z],
        }
    }
}

/// Axis-aligned bounding volume. Positions are clamped into it, never wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    /// Callers must pass finite, ordered corners; see [`try_new`](Self::try_new).
    pub fn new(min: Position, max: Position) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Returns `None` unless every coordinate is finite and `min <= max` per axis.
    pub fn try_new(min: Position, max: Position) -> Option<Self> {
        let (lo, hi) = (Vec3::from(min), Vec3::from(max));
        if lo.is_finite() && hi.is_finite() && lo.cmple(hi).all() {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Centred bounds for `space` from host-supplied extents, e.g. a resized
    /// window. Planar scenes ignore `depth`. Returns `None` for non-finite or
    /// non-positive extents.
    pub fn from_extents(space: Space, width: f32, height: f32, depth: f32) -> Option<Self> {
        let depth = match space {
            Space::Planar => 0.0,
            Space::Volumetric => depth,
        };
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) || !(space == Space::Planar || positive(depth)) {
            return None;
        }
        Self::try_new(
            Position::new(-width / 2.0, -height / 2.0, -depth / 2.0),
            Position::new(width / 2.0, height / 2.0, depth / 2.0),
        )
    }

    /// Rectangle centred on the origin with `z` pinned to zero.
    pub fn planar(width: f32, height: f32) -> Self {
        Self::new(
            Position::planar(-width / 2.0, -height / 2.0),
            Position::planar(width / 2.0, height / 2.0),
        )
    }

    /// Box centred on the origin.
    pub fn volumetric(width: f32, height: f32, depth: f32) -> Self {
        Self::new(
            Position::new(-width / 2.0, -height / 2.0, -depth / 2.0),
            Position::new(width / 2.0, height / 2.0, depth / 2.0),
        )
    }

    /// Inclusive on both ends, so clamped positions are always contained.
    #[inline]
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    #[inline]
    pub fn clamp(&self, p: Position) -> Position {
        Vec3::from(p).clamp(self.min.into(), self.max.into()).into()
    }

    /// Uniformly sample a point inside the volume.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let mut p = self.min;
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            *p.axis_mut(axis) = self.sample_axis(axis, rng);
        }
        p
    }

    /// Uniform coordinate along one axis; degenerate axes return their only value.
    pub fn sample_axis<R: Rng + ?Sized>(&self, axis: Axis, rng: &mut R) -> f32 {
        let (lo, hi) = (self.min.axis(axis), self.max.axis(axis));
        if lo < hi {
            rng.gen_range(lo..hi)
        } else {
            lo
        }
    }
}
