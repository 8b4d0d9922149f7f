use crate::core::KanaError;

/// Side length of the square grid the classifier consumes.
pub const INPUT_SIZE: usize = 64;

/// An RGBA drawing as captured from the canvas. Unpainted pixels are fully
/// transparent and read as white paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl DrawingSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height * 4] }
    }

    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, KanaError> {
        if width == 0 || height == 0 {
            return Err(KanaError::InvalidInput(format!(
                "drawing surface must not be empty ({}x{})",
                width, height
            )));
        }
        if pixels.len() != width * height * 4 {
            return Err(KanaError::InvalidInput(format!(
                "expected {} RGBA bytes for a {}x{} surface, got {}",
                width * height * 4,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Paint a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, rgba: [u8; 4]) {
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        for py in y.min(self.height)..y_end {
            for px in x.min(self.width)..x_end {
                let i = (py * self.width + px) * 4;
                self.pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }

    /// Luminance (0..=255) of a pixel composited over a white background.
    fn luminance_on_white(&self, x: usize, y: usize) -> f32 {
        let i = (y * self.width + x) * 4;
        let [r, g, b, a] = [
            self.pixels[i] as f32,
            self.pixels[i + 1] as f32,
            self.pixels[i + 2] as f32,
            self.pixels[i + 3] as f32 / 255.0,
        ];
        let luminance = 0.299 * r + 0.587 * g + 0.114 * b;
        luminance * a + 255.0 * (1.0 - a)
    }

    /// Resample to a `size`x`size` single-channel grid where ink is close to 1.0
    /// and paper is close to 0.0. Row-major.
    pub fn intensity_grid(&self, size: usize) -> Vec<f32> {
        let mut grid = Vec::with_capacity(size * size);
        if self.width == 0 || self.height == 0 {
            grid.resize(size * size, 0.0);
            return grid;
        }

        for ty in 0..size {
            let y0 = ty * self.height / size;
            let y1 = ((ty + 1) * self.height / size).max(y0 + 1).min(self.height);
            for tx in 0..size {
                let x0 = tx * self.width / size;
                let x1 = ((tx + 1) * self.width / size).max(x0 + 1).min(self.width);

                let mut sum = 0.0;
                for y in y0..y1 {
                    for x in x0..x1 {
                        sum += self.luminance_on_white(x, y);
                    }
                }
                let mean = sum / ((y1 - y0) * (x1 - x0)) as f32;
                grid.push((1.0 - mean / 255.0).clamp(0.0, 1.0));
            }
        }

        grid
    }
}
