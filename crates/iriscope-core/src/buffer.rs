//! RGBA pixel buffer
//!
//! The raster type shared by every stage of the pipeline. Data is a flat
//! byte sequence of interleaved R, G, B, A samples, one byte each.

/// A single RGBA pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque gray value
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v, 255)
    }
}

/// Owned RGBA8 raster with dimensions
///
/// Invariant: `data.len() == width * height * 4`. Constructors enforce it
/// and no method breaks it. Tone operations leave the alpha bytes alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled (transparent black) buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Create a buffer filled with a single pixel value
    pub fn solid(width: u32, height: u32, pixel: Rgba) -> Self {
        let mut buffer = Self::new(width, height);
        for chunk in buffer.data.chunks_exact_mut(4) {
            chunk[0] = pixel.r;
            chunk[1] = pixel.g;
            chunk[2] = pixel.b;
            chunk[3] = pixel.a;
        }
        buffer
    }

    /// Wrap an existing RGBA byte sequence
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(format!(
                "RGBA data length {} does not match {}x{} ({} bytes expected)",
                data.len(),
                width,
                height,
                expected
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of the pixel at (x, y); caller must have checked bounds
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), String> {
        if x >= self.width || y >= self.height {
            return Err(format!(
                "pixel access out of bounds: ({}, {}) in {}x{} buffer",
                x, y, self.width, self.height
            ));
        }
        Ok(())
    }

    /// Read the pixel at (x, y); out-of-bounds access is an error, never a clamp
    pub fn get(&self, x: u32, y: u32) -> Result<Rgba, String> {
        self.check_bounds(x, y)?;
        let i = self.offset(x, y);
        Ok(Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Write the pixel at (x, y); out-of-bounds access is an error
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) -> Result<(), String> {
        self.check_bounds(x, y)?;
        let i = self.offset(x, y);
        self.data[i] = pixel.r;
        self.data[i + 1] = pixel.g;
        self.data[i + 2] = pixel.b;
        self.data[i + 3] = pixel.a;
        Ok(())
    }
}
