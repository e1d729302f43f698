//! Primitive geometry and surface materials.

/// Linear RGBA colour, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

/// Surface description attached to anything that has geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Color,
}

impl Material {
    pub fn new(name: &str, diffuse: Color) -> Self {
        Self {
            name: name.to_string(),
            diffuse,
        }
    }

    pub fn from_color(diffuse: Color) -> Self {
        Self::new("diffuse", diffuse)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default", Color::WHITE)
    }
}

/// Built-in shapes. All sizes are in scene units (metres in AR sessions).
///
/// A `Plane` lies in its local XY plane with its normal along +Z, so it faces
/// the viewer until rotated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Plane { width: f32, height: f32 },
    Sphere { radius: f32 },
    Box {
        width: f32,
        height: f32,
        length: f32,
        chamfer_radius: f32,
    },
}

impl Geometry {
    pub fn plane(width: f32, height: f32) -> Self {
        Geometry::Plane { width, height }
    }

    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere { radius }
    }

    pub fn cube(side: f32) -> Self {
        Geometry::Box {
            width: side,
            height: side,
            length: side,
            chamfer_radius: 0.0,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Plane { .. } => GeometryKind::Plane,
            Geometry::Sphere { .. } => GeometryKind::Sphere,
            Geometry::Box { .. } => GeometryKind::Box,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryKind {
    Plane,
    Sphere,
    Box,
}
