use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::{gaussian_blur_f32, median_filter};
use imageproc::morphology::{dilate, erode};

/// Convert frame to grayscale
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Apply Gaussian blur to reduce noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Median filter with a square window of side `2 * radius + 1`
pub fn apply_median(img: &GrayImage, radius: u32) -> GrayImage {
    median_filter(img, radius, radius)
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Erode with a 3x3 square kernel applied `iterations` times
pub fn erode_square(img: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return img.clone();
    }
    // Repeated 3x3 passes equal one pass at chessboard radius `iterations`.
    erode(img, Norm::LInf, iterations)
}

/// Dilate with a 3x3 square kernel applied `iterations` times
pub fn dilate_square(img: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return img.clone();
    }
    dilate(img, Norm::LInf, iterations)
}

/// BT.601 luma/chroma triple `(Y, Cr, Cb)` for one RGB pixel
pub fn rgb_to_ycrcb(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cr = (r - y) * 0.713 + 128.0;
    let cb = (b - y) * 0.564 + 128.0;
    (clamp_u8(y), clamp_u8(cr), clamp_u8(cb))
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Binary mask of pixels whose chroma lies inside both inclusive ranges
pub fn chroma_in_range(img: &RgbImage, cr_range: (u8, u8), cb_range: (u8, u8)) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        let (_, cr, cb) = rgb_to_ycrcb(p[0], p[1], p[2]);
        let inside = (cr_range.0..=cr_range.1).contains(&cr) && (cb_range.0..=cb_range.1).contains(&cb);
        Luma([if inside { 255 } else { 0 }])
    })
}
