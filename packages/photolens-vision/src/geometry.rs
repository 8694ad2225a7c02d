use crate::input::ImageSize;
use crate::observation::NormalizedRect;

/// Rectangle in image pixels, same origin and axis direction as the
/// normalized rectangle it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn denormalize(rect: &NormalizedRect, size: ImageSize) -> PixelRect {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    PixelRect {
        x: rect.x * w,
        y: rect.y * h,
        width: rect.width * w,
        height: rect.height * h,
    }
}

pub fn format_rect(rect: &NormalizedRect, size: ImageSize) -> String {
    let px = denormalize(rect, size);
    format!(
        "X: {:.2}, Y: {:.2}, Width: {:.2}, Height: {:.2}",
        px.x, px.y, px.width, px.height
    )
}
