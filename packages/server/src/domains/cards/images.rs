//! Front/back card merge.

use anyhow::{Context, Result};
use image::{imageops, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::path::Path;

/// Stack `front` above `back` on a white canvas and write a PNG to `output`.
///
/// The canvas is as wide as the wider image; the narrower one is left-aligned.
pub fn stack_vertically(front: &Path, back: &Path, output: &Path) -> Result<()> {
    let top = load_rgba(front)?;
    let bottom = load_rgba(back)?;

    let width = top.width().max(bottom.width());
    let height = top.height() + bottom.height();

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &top, 0, 0);
    imageops::overlay(&mut canvas, &bottom, 0, i64::from(top.height()));

    canvas
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("Failed to write merged image {}", output.display()))
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to sniff {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(path: &Path, width: u32, height: u32, color: [u8; 4]) {
        RgbaImage::from_pixel(width, height, Rgba(color))
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn stacks_front_over_back() {
        let dir = tempfile::tempdir().unwrap();
        let front = dir.path().join("front.png");
        let back = dir.path().join("back.png");
        let merged = dir.path().join("merged.png");
        solid(&front, 4, 2, [255, 0, 0, 255]);
        solid(&back, 2, 3, [0, 0, 255, 255]);

        stack_vertically(&front, &back, &merged).unwrap();

        let out = image::open(&merged).unwrap().to_rgba8();
        assert_eq!(out.dimensions(), (4, 5));
        assert_eq!(out.get_pixel(3, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(1, 4), &Rgba([0, 0, 255, 255]));
        assert_eq!(out.get_pixel(3, 4), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let front = dir.path().join("front.jpg");
        std::fs::write(&front, b"not an image").unwrap();

        let result = stack_vertically(&front, &front, &dir.path().join("out.png"));

        assert!(result.is_err());
    }
}
