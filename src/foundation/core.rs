use crate::foundation::error::{StoreshotsError, StoreshotsResult};
use crate::foundation::math::mul_div255_u8;

/// Opaque RGB color, serialized as a `[r, g, b]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    /// Construct from individual channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Red channel.
    pub fn r(self) -> u8 {
        self.0[0]
    }

    /// Green channel.
    pub fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue channel.
    pub fn b(self) -> u8 {
        self.0[2]
    }

    /// Same color with a straight (non-premultiplied) alpha.
    pub fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 {
            r: self.r(),
            g: self.g(),
            b: self.b(),
            a,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Construct from individual channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplied byte representation.
    pub fn premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

/// Premultiplied RGBA8 pixel buffer in row-major order.
///
/// Every raster in the pipeline (canvas, glow band, device frame, text overlay) is a
/// `Surface`; compositing happens between surfaces with [`crate::over_at`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> StoreshotsResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Surface where every pixel is the given premultiplied value.
    pub fn filled(width: u32, height: u32, premul: [u8; 4]) -> StoreshotsResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = vec![0u8; len];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap already-premultiplied bytes.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> StoreshotsResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(StoreshotsError::validation(format!(
                "surface byte len {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a straight-alpha `image` buffer into a premultiplied surface.
    pub fn from_rgba_image(img: &image::RgbaImage) -> StoreshotsResult<Self> {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_bytes(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`; `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Mutable row `y` as premultiplied bytes.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = (self.width as usize) * 4;
        let start = (y as usize) * stride;
        &mut self.data[start..start + stride]
    }
}

fn byte_len(width: u32, height: u32) -> StoreshotsResult<usize> {
    if width == 0 || height == 0 {
        return Err(StoreshotsError::validation(format!(
            "surface dimensions must be > 0 (got {width}x{height})"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| StoreshotsError::validation("surface size overflow"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
