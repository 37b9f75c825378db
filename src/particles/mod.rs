pub mod ambient;
pub mod burst;

/// One particle resolved to a position inside the drawing area, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: [u8; 3],
    pub alpha: f32,
}
