//! Software rasterizer for the scene draw list.
//!
//! [`Canvas`] paints a [`Planet`]'s background and sprites into an RGBA image.
//! It backs the headless mode of the binary and is what the integration tests
//! inspect. Rectangles that hang off the surface are clipped, so a particle
//! that is half outside the window still draws its visible half.

use crate::config::Rgb;
use crate::coords::PixelRect;
use crate::error::RenderError;
use crate::planet::Planet;
use crate::Eruptor;
use glam::UVec2;
use image::{Rgba, RgbaImage};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

/// An owned RGBA frame buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a black canvas of `size` pixels.
    pub fn new(size: UVec2) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.x, size.y, Rgba([0, 0, 0, 255])),
        }
    }

    /// Canvas matching the planet's surface size.
    pub fn for_planet<E: Eruptor>(planet: &Planet<E>) -> Self {
        Self::new(planet.mapper().surface_size())
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.image.width(), self.image.height())
    }

    /// Fill the whole canvas with one color.
    pub fn clear(&mut self, color: Rgb) {
        let color = rgba(color);
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Fill the part of `rect` that lies on the canvas.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        let (width, height) = (self.image.width() as i64, self.image.height() as i64);
        let x0 = rect.left.clamp(0, width);
        let x1 = rect.right().clamp(0, width);
        let y0 = rect.top.clamp(0, height);
        let y1 = rect.bottom().clamp(0, height);

        let color = rgba(color);
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Paint the background, the planet and every particle.
    pub fn draw<E: Eruptor>(&mut self, planet: &Planet<E>) {
        self.clear(planet.background());
        for sprite in planet.sprites() {
            self.fill_rect(sprite.rect, sprite.color);
        }
    }

    /// Color at a pixel, or `None` off the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.image.width() && y < self.image.height() {
            let Rgba([r, g, b, _]) = *self.image.get_pixel(x, y);
            Some([r, g, b])
        } else {
            None
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Writes every `every`-th frame into a directory as numbered PNGs.
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    dir: PathBuf,
    every: u64,
}

impl FrameRecorder {
    /// Create the recorder, making `dir` if it does not exist.
    ///
    /// An interval of zero is treated as one.
    pub fn new(dir: impl Into<PathBuf>, every: u64) -> Result<Self, RenderError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            every: every.max(1),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for `frame`.
    pub fn path_for(&self, frame: u64) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", frame))
    }

    /// Save `canvas` if `frame` falls on the interval. Returns the written
    /// path, if any.
    pub fn record(&self, frame: u64, canvas: &Canvas) -> Result<Option<PathBuf>, RenderError> {
        if frame % self.every != 0 {
            return Ok(None);
        }
        let path = self.path_for(frame);
        canvas.save_png(&path)?;
        info!("wrote {}", path.display());
        Ok(Some(path))
    }
}
