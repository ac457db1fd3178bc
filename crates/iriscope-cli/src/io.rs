//! PNG decoding and encoding
//!
//! The core never touches files; the CLI decodes source images into RGBA8
//! buffers here and writes rendered buffers back out.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use iriscope_core::PixelBuffer;

/// Decode a PNG file into an RGBA8 pixel buffer
pub fn decode_png_rgba<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, String> {
    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;

    let width = frame_info.width;
    let height = frame_info.height;
    let bytes = &buf[..frame_info.buffer_size()];

    let data = match (frame_info.color_type, frame_info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => bytes.to_vec(),
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            let mut data = Vec::with_capacity(bytes.len() / 3 * 4);
            for pixel in bytes.chunks_exact(3) {
                data.extend_from_slice(pixel);
                data.push(255);
            }
            data
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let mut data = Vec::with_capacity(bytes.len() * 4);
            for &v in bytes {
                data.extend_from_slice(&[v, v, v, 255]);
            }
            data
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let mut data = Vec::with_capacity(bytes.len() * 2);
            for pixel in bytes.chunks_exact(2) {
                data.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
            }
            data
        }
        (color_type, bit_depth) => {
            return Err(format!(
                "Unsupported PNG format: {:?} at {:?} bit depth (8-bit grayscale, RGB, or RGBA expected)",
                color_type, bit_depth
            ));
        }
    };

    PixelBuffer::from_rgba(width, height, data)
}

/// Write an RGBA8 pixel buffer as a PNG file
pub fn export_png<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<(), String> {
    let file =
        File::create(path.as_ref()).map_err(|e| format!("Failed to create PNG file: {}", e))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width(), buffer.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    png_writer
        .write_image_data(buffer.data())
        .map_err(|e| format!("Failed to write PNG data: {}", e))?;

    Ok(())
}
