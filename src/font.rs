//! Status line text rendering using ab_glyph.
//! The font is optional: it is loaded from the path named in the config.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported font file {0}")]
    Invalid(PathBuf),
}

pub struct FontRenderer {
    font: FontVec,
    size: f32,
}

impl FontRenderer {
    pub fn load(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid(path.to_path_buf()))?;

        Ok(Self { font, size })
    }

    /// Line height including 20% spacing.
    pub fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(PxScale::from(self.size));
        (scaled.height() * 1.2).ceil() as u32
    }

    /// Draws `text` with its top-left corner at (`x`, `y`), blending glyph
    /// coverage over what is already in the frame.
    pub fn draw_text(&self, frame: &mut [u8], frame_width: u32, text: &str, x: u32, y: u32, color: [u8; 3]) {
        let scaled = self.font.as_scaled(PxScale::from(self.size));
        let frame_height = frame.len() as u32 / (frame_width.max(1) * 4);
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;

        for ch in text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(PxScale::from(self.size), point(caret, baseline));
            caret += scaled.h_advance(glyph_id);

            if caret > frame_width as f32 {
                break;
            }

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();

            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px as u32 >= frame_width || py as u32 >= frame_height {
                    return;
                }

                let idx = ((py as u32 * frame_width + px as u32) * 4) as usize;
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0) as u16;
                if alpha == 0 || idx + 3 >= frame.len() {
                    return;
                }
                let inv_alpha = 255 - alpha;
                for channel in 0..3 {
                    let blended = (frame[idx + channel] as u16 * inv_alpha + color[channel] as u16 * alpha) / 255;
                    frame[idx + channel] = blended as u8;
                }
                frame[idx + 3] = 255;
            });
        }
    }
}
