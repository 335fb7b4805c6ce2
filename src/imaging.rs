//! Pure image operations used by the capture workflow.
//!
//! Every operation returns a new buffer; inputs are never modified except by
//! the explicit in-place drawing helpers.

use crate::{
    constants::{INDEX_TIP, THUMB_TIP},
    landmarks::HandLandmarks,
};
use image::{imageops, Pixel, Rgb, RgbImage};

/// Outline color on the photo
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

/// Outline color on the live frame
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// Padding color
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Axis-aligned pixel rectangle covering `[x1, x2) × [y1, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl CropRect {
    /// Create a rectangle; `None` unless `x1 < x2` and `y1 < y2`
    #[must_use]
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Option<Self> {
        (x1 < x2 && y1 < y2).then_some(Self { x1, y1, x2, y2 })
    }

    /// Bounding rectangle of the index and thumb tips of exactly two hands
    #[must_use]
    pub fn from_hands(hands: &[HandLandmarks], width: u32, height: u32) -> Option<Self> {
        if hands.len() != 2 {
            return None;
        }

        let corners: Vec<(u32, u32)> = hands
            .iter()
            .flat_map(|hand| [hand.point(INDEX_TIP), hand.point(THUMB_TIP)])
            .map(|p| p.to_pixel(width, height))
            .collect();

        let x1 = corners.iter().map(|c| c.0).min()?;
        let y1 = corners.iter().map(|c| c.1).min()?;
        let x2 = corners.iter().map(|c| c.0).max()?;
        let y2 = corners.iter().map(|c| c.1).max()?;

        Self::new(x1, y1, x2, y2)
    }

    /// Left edge
    #[must_use]
    pub const fn x1(&self) -> u32 {
        self.x1
    }

    /// Top edge
    #[must_use]
    pub const fn y1(&self) -> u32 {
        self.y1
    }

    /// Right edge, exclusive
    #[must_use]
    pub const fn x2(&self) -> u32 {
        self.x2
    }

    /// Bottom edge, exclusive
    #[must_use]
    pub const fn y2(&self) -> u32 {
        self.y2
    }

    /// Width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    /// Height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Whether a pixel lies inside
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Intersection with an image of the given size
    #[must_use]
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        Self::new(self.x1.min(width), self.y1.min(height), self.x2.min(width), self.y2.min(height))
    }
}

/// Copy the part of `image` inside `rect`; `None` if it lies outside the image
#[must_use]
pub fn crop(image: &RgbImage, rect: &CropRect) -> Option<RgbImage> {
    let rect = rect.clamp_to(image.width(), image.height())?;
    Some(imageops::crop_imm(image, rect.x1, rect.y1, rect.width(), rect.height()).to_image())
}

/// Wrap an angle in degrees into `[0, 360)`
#[must_use]
pub const fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Rotate by a multiple of 90 degrees; positive angles turn counter-clockwise.
///
/// Angles that are not a multiple of 90 snap to the nearest quarter turn.
#[must_use]
pub fn rotate_quarter_turns(image: &RgbImage, angle: i32) -> RgbImage {
    match ((normalize_angle(angle) + 45) / 90) % 4 {
        1 => imageops::rotate270(image),
        2 => imageops::rotate180(image),
        3 => imageops::rotate90(image),
        _ => image.clone(),
    }
}

fn gray(pixel: &Rgb<u8>) -> Rgb<u8> {
    let luma = pixel.to_luma().0[0];
    Rgb([luma, luma, luma])
}

/// Grayscale copy, kept as three channels
#[must_use]
pub fn desaturate(image: &RgbImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| gray(image.get_pixel(x, y)))
}

/// Keep color inside `rect` and desaturate everything else.
///
/// With a rectangle, its outline is drawn in green; without one the whole
/// image is desaturated.
#[must_use]
pub fn highlight_region(image: &RgbImage, rect: Option<&CropRect>, thickness: u32) -> RgbImage {
    let Some(rect) = rect else {
        return desaturate(image);
    };

    let mut out = RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        if rect.contains(x, y) {
            *pixel
        } else {
            gray(pixel)
        }
    });
    draw_outline(&mut out, rect, GREEN, thickness);
    out
}

/// Draw a rectangle border of `thickness` pixels just inside `rect`
pub fn draw_outline(image: &mut RgbImage, rect: &CropRect, color: Rgb<u8>, thickness: u32) {
    let Some(rect) = rect.clamp_to(image.width(), image.height()) else {
        return;
    };
    let t = thickness.max(1);

    for y in rect.y1..rect.y2 {
        for x in rect.x1..rect.x2 {
            let on_border = x < rect.x1 + t || x + t >= rect.x2 || y < rect.y1 + t || y + t >= rect.y2;
            if on_border {
                image.put_pixel(x, y, color);
            }
        }
    }
}

/// Place two images next to each other.
///
/// The shorter one is padded with black, split evenly above and below, so
/// both share the same height.
#[must_use]
pub fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::from_pixel(left.width() + right.width(), height, BLACK);

    let left_top = (height - left.height()) / 2;
    let right_top = (height - right.height()) / 2;
    imageops::overlay(&mut canvas, left, 0, i64::from(left_top));
    imageops::overlay(&mut canvas, right, i64::from(left.width()), i64::from(right_top));
    canvas
}
