use crate::foundation::core::Canvas;

/// Fixed-size raster target holding premultiplied RGBA8 pixels.
///
/// A surface starts fully transparent and counts how many composites have completed on it, so
/// export can tell a finished image from an untouched buffer.
#[derive(Clone, Debug)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
    composites: u64,
}

impl Surface {
    /// Allocate a transparent surface of the given size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.rgba8_len()],
            composites: 0,
        }
    }

    /// Allocate a surface at the fixed output resolution.
    pub fn output() -> Self {
        Self::new(Canvas::OUTPUT)
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Fill every pixel with `rgba_premul`.
    pub fn clear(&mut self, rgba_premul: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba_premul);
        }
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.canvas.width || y >= self.canvas.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Number of completed composites.
    pub fn composites(&self) -> u64 {
        self.composites
    }

    /// Whether at least one composite has completed.
    pub fn has_composite(&self) -> bool {
        self.composites > 0
    }

    pub(crate) fn mark_composited(&mut self) {
        self.composites += 1;
    }
}
