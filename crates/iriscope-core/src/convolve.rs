//! Kernel convolution and the sharpening filter
//!
//! Convolution uses zero-padding at the borders: neighbors outside the
//! buffer contribute nothing, so border pixels come out systematically
//! darker or lighter than the interior for kernels with nonzero off-center
//! weights. That edge policy is part of the contract; do not replace it
//! with clamp-to-edge sampling. The sharpening path convolves the alpha
//! channel with the same kernel as the color channels.

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::parallel::PARALLEL_THRESHOLD;

/// Saturating cast of a convolution sum to a channel byte
#[inline]
fn clamp_channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Convolve a buffer with a square kernel of odd side length
///
/// All four channels are kernel-weighted. Output channels are clamped to
/// 0-255, never wrapped.
pub fn convolve(buffer: &PixelBuffer, kernel: &[f32]) -> Result<PixelBuffer, String> {
    let side = (kernel.len() as f64).sqrt().round() as usize;
    if side * side != kernel.len() || side % 2 == 0 {
        return Err(format!(
            "kernel length {} is not an odd-sided square",
            kernel.len()
        ));
    }

    if buffer.pixel_count() == 0 {
        return Ok(buffer.clone());
    }

    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let half = (side / 2) as isize;
    let src = buffer.data();

    let mut out = vec![0u8; src.len()];
    let row_bytes = width * 4;

    let convolve_row = |y: usize, row: &mut [u8]| {
        for x in 0..width {
            let mut r = 0.0f32;
            let mut g = 0.0f32;
            let mut b = 0.0f32;
            let mut a = 0.0f32;

            for cy in 0..side {
                for cx in 0..side {
                    let sy = y as isize + cy as isize - half;
                    let sx = x as isize + cx as isize - half;
                    if sy >= 0 && sy < height as isize && sx >= 0 && sx < width as isize {
                        let offset = (sy as usize * width + sx as usize) * 4;
                        let wt = kernel[cy * side + cx];
                        r += src[offset] as f32 * wt;
                        g += src[offset + 1] as f32 * wt;
                        b += src[offset + 2] as f32 * wt;
                        a += src[offset + 3] as f32 * wt;
                    }
                }
            }

            let offset = x * 4;
            row[offset] = clamp_channel(r);
            row[offset + 1] = clamp_channel(g);
            row[offset + 2] = clamp_channel(b);
            row[offset + 3] = clamp_channel(a);
        }
    };

    if buffer.pixel_count() >= PARALLEL_THRESHOLD {
        out.par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| convolve_row(y, row));
    } else {
        for (y, row) in out.chunks_exact_mut(row_bytes).enumerate() {
            convolve_row(y, row);
        }
    }

    PixelBuffer::from_rgba(buffer.width(), buffer.height(), out)
}

/// Laplacian-sharpen kernel for an adjustment amount in -100..100
///
/// The center weight keeps the identity contribution plus the amplified
/// edge term; a negative amount flips the off-center weights positive and
/// drops the center below 1, producing a mild blur.
pub fn sharpen_kernel(amount: f32) -> [f32; 9] {
    let strength = amount / 100.0;
    [
        0.0,
        -strength,
        0.0,
        -strength,
        4.0 * strength + 1.0,
        -strength,
        0.0,
        -strength,
        0.0,
    ]
}

/// Apply the sharpening filter; zero amount returns an untouched copy
pub fn apply_sharpness(buffer: &PixelBuffer, amount: f32) -> Result<PixelBuffer, String> {
    if amount == 0.0 {
        return Ok(buffer.clone());
    }
    convolve(buffer, &sharpen_kernel(amount))
}
