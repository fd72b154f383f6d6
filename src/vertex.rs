use glam::Vec4;

/// Lit vertex in clip space, as it leaves the vertex stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub clip: Vec4,
    pub color: Vec4,
}

impl Vertex {
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            clip: self.clip.lerp(other.clip, t),
            color: self.color.lerp(other.color, t),
        }
    }
}

/// Vertex after the perspective divide and viewport transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub screen_position: [f32; 2],
    /// Window depth in 0..1
    pub depth: f32,
    pub color: Vec4,
}
