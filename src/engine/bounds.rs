use nalgebra::{Rotation3, Vector3};

/// Axis-aligned bounding box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn from_center_size(center: Vector3<f32>, size: Vector3<f32>) -> Self {
        let half = size / 2.0;
        Aabb { min: center - half, max: center + half }
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    pub fn translated(&self, offset: Vector3<f32>) -> Aabb {
        Aabb { min: self.min + offset, max: self.max + offset }
    }

    /// Bounds of this box after rotating it about the +z axis through the origin.
    pub fn rotated_z(&self, angle: f32) -> Aabb {
        if angle == 0.0 {
            return *self;
        }
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);
        let center = rot * self.center();
        let half = self.size() / 2.0;
        let m = rot.matrix().abs();
        Aabb::from_center_size(center, (m * half) * 2.0)
    }

    /// Closed-interval overlap test: boxes that only touch still intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }
}

/// One box of a rigid model, in the model's local frame.
#[derive(Clone, Copy, Debug)]
pub struct BoxPart {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

impl BoxPart {
    pub const fn new(center: [f32; 3], size: [f32; 3]) -> Self {
        BoxPart { center, size }
    }

    fn local_bounds(&self) -> Aabb {
        Aabb::from_center_size(Vector3::from(self.center), Vector3::from(self.size))
    }
}

/// World bounds of a group of parts yawed by `yaw` about +z and moved to `offset`.
pub fn hull(parts: &[BoxPart], yaw: f32, offset: Vector3<f32>) -> Option<Aabb> {
    parts
        .iter()
        .map(|p| p.local_bounds().rotated_z(yaw).translated(offset))
        .reduce(|acc, b| acc.union(&b))
}
