/// Capability to apply a scale-only transform to a renderable element.
///
/// The scale is independent of any positional animation the substrate already
/// runs on the same element; implementations must compose the two rather than
/// letting one overwrite the other.
pub trait ScaleTarget {
    fn set_scale(&mut self, scale: f32);
}

/// A fixed-size 2D drawing surface.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);
}

/// Minimal element handle that just remembers its current scale. Useful for
/// headless hosts and tests; a real UI backend supplies its own handles.
#[derive(Debug, Clone, Default)]
pub struct ScaledElement {
    scale: f32,
}

impl ScaledElement {
    pub fn new() -> Self {
        Self { scale: 1.0 }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl ScaleTarget for ScaledElement {
    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}

/// One rectangle recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

/// Software surface that records every draw call instead of rasterising.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    rects: Vec<Rect>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            rects: Vec::new(),
        }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_cleared(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.rects.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.rects.push(Rect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }
}
