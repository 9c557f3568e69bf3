use image::{imageops, RgbImage};

/// Turns a bottom-up RGB readback (OpenGL row order) into a top-down image.
/// `None` if the buffer length doesn't match `width * height * 3`.
pub fn image_from_readback(width: u32, height: u32, pixels: Vec<u8>) -> Option<RgbImage> {
    RgbImage::from_raw(width, height, pixels)
        .map(|image| imageops::flip_vertical(&image))
}

/// Mean RGB of every pixel that isn't pure black, in 0..=255 per channel.
/// `None` when the buffer holds nothing but black.
pub fn mean_non_black(pixels: &[u8]) -> Option<[f32; 3]> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for pixel in pixels.chunks_exact(3) {
        if pixel.iter().all(|channel| *channel == 0) {
            continue
        }
        for (total, channel) in sum.iter_mut().zip(pixel) {
            *total += u64::from(*channel);
        }
        count += 1;
    }

    if count == 0 {
        return None
    }

    Some([
        sum[0] as f32 / count as f32,
        sum[1] as f32 / count as f32,
        sum[2] as f32 / count as f32
    ])
}
