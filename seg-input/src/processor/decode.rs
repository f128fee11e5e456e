//! PNG decoding into 16-bit sample arrays.

use crate::common::*;

/// Decode PNG bytes into a `[height, width, channels]` array.
///
/// The channel count follows the file. 8-bit samples are widened to 16 bits
/// without rescaling, so a mask value of 255 stays 255.
pub fn decode_png(bytes: &[u8]) -> Result<Array3<u16>> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;

    let array = match image {
        DynamicImage::ImageLuma8(buffer) => buffer_to_array(&buffer)?,
        DynamicImage::ImageLumaA8(buffer) => buffer_to_array(&buffer)?,
        DynamicImage::ImageRgb8(buffer) => buffer_to_array(&buffer)?,
        DynamicImage::ImageRgba8(buffer) => buffer_to_array(&buffer)?,
        DynamicImage::ImageLuma16(buffer) => buffer_to_array(&buffer)?,
        DynamicImage::ImageLumaA16(buffer) => buffer_to_array(&buffer)?,
        DynamicImage::ImageRgb16(buffer) => buffer_to_array(&buffer)?,
        DynamicImage::ImageRgba16(buffer) => buffer_to_array(&buffer)?,
        other => bail!("unsupported PNG color type {:?}", other.color()),
    };

    Ok(array)
}

/// Read and decode a PNG file.
pub fn load_png(path: impl AsRef<Path>) -> Result<Array3<u16>> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("failed to read file '{}'", path.display()))?;
    let array =
        decode_png(&bytes).with_context(|| format!("failed to decode '{}'", path.display()))?;
    Ok(array)
}

fn buffer_to_array<P>(buffer: &ImageBuffer<P, Vec<P::Subpixel>>) -> Result<Array3<u16>>
where
    P: Pixel,
    P::Subpixel: Into<u16>,
{
    let (width, height) = buffer.dimensions();
    let channels = P::CHANNEL_COUNT as usize;
    let samples: Vec<u16> = buffer.as_raw().iter().map(|&sample| sample.into()).collect();
    let array = Array3::from_shape_vec((height as usize, width as usize, channels), samples)?;
    Ok(array)
}
