//! Finished image and its serialization.
//!
//! The text format is plain PPM (`P3`): a three line header followed by
//! one `r g b` line per pixel, top row first.

use crate::RenderResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A rendered image: quantized RGB rows, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rows: Vec<Vec<[u8; 3]>>,
}

impl Frame {
    /// Wrap assembled rows. Each row must hold `width` pixels.
    pub fn new(width: u32, height: u32, rows: Vec<Vec<[u8; 3]>>) -> Self {
        debug_assert_eq!(rows.len(), height as usize);
        debug_assert!(rows.iter().all(|row| row.len() == width as usize));
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.rows[y as usize][x as usize]
    }

    /// Rows in output order.
    pub fn rows(&self) -> &[Vec<[u8; 3]>] {
        &self.rows
    }

    /// The `P3` header, including its trailing newline.
    pub fn header(&self) -> String {
        format!("P3\n{} {}\n255\n", self.width, self.height)
    }

    /// Stream the frame as PPM text.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.header().as_bytes())?;
        for [r, g, b] in self.rows.iter().flatten() {
            writeln!(out, "{r} {g} {b}")?;
        }
        out.flush()
    }

    /// The whole frame as PPM text.
    pub fn to_ppm(&self) -> String {
        let mut text = self.header();
        for [r, g, b] in self.rows.iter().flatten() {
            text.push_str(&format!("{r} {g} {b}\n"));
        }
        text
    }

    /// Save to disk. `.ppm` writes PPM text; any other extension is encoded
    /// by the `image` crate.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let mut writer = BufWriter::new(File::create(path)?);
            self.write_ppm(&mut writer)?;
        } else {
            self.to_image().save(path)?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Convert to an `image` buffer.
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(self.pixel(x, y)))
    }
}
