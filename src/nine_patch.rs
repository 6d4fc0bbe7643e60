//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
//! Frame-scaled image borders.
//!
//! The source texture is split into a 3x3 grid by a frame ratio. Corners keep their pixel size times a
//! scale factor; edges and the center either stretch or repeat whole tiles followed by one partial tile.
use super::*;

#[derive(Copy, Clone, Debug, PartialEq)]
/// Relative widths `(left, center, right)` and heights `(bottom, center, top)` of the texture grid.
pub struct FrameRatio {
    /// Horizontal split.
    pub x: [Real; 3],
    /// Vertical split.
    pub y: [Real; 3],
}

impl FrameRatio {
    /// Creates a ratio from its horizontal and vertical splits.
    pub fn new(x: [Real; 3], y: [Real; 3]) -> Self { Self { x, y } }
}

#[derive(Copy, Clone, Debug)]
/// Textured quad generated by a [`NinePatch`].
pub struct TexturedQuad {
    /// Corner positions.
    pub pos: [Vec2f; 4],
    /// Corner texture coordinates.
    pub uv: [Vec2f; 4],
}

#[derive(Copy, Clone, Debug)]
struct Segment {
    start: Real,
    end: Real,
    t0: Real,
    t1: Real,
}

#[derive(Clone, Debug)]
/// 9-patch decomposition settings.
pub struct NinePatch {
    ratio: FrameRatio,
    scale: Real,
    repeat_edge: bool,
    repeat_center: bool,
}

fn fractions(parts: [Real; 3]) -> [Real; 4] {
    let p = parts.map(|v| v.max(0.0));
    let total = p[0] + p[1] + p[2];
    if total <= 0.0 {
        return [0.0, 0.0, 1.0, 1.0];
    }
    [0.0, p[0] / total, (p[0] + p[1]) / total, 1.0]
}

impl NinePatch {
    /// Creates the decomposition. Tiling requires strictly positive ratio components on both axes.
    pub fn new(ratio: FrameRatio, scale: Real, repeat_edge: bool, repeat_center: bool) -> Result<Self> {
        if repeat_edge || repeat_center {
            if ratio.x.iter().any(|v| *v <= 0.0) {
                return Err(GuiError::NonPositiveFrameRatio { axis: "x" });
            }
            if ratio.y.iter().any(|v| *v <= 0.0) {
                return Err(GuiError::NonPositiveFrameRatio { axis: "y" });
            }
        }
        Ok(Self { ratio, scale, repeat_edge, repeat_center })
    }

    /// Screen size of the corners for a texture of `pixel_size`: `(left, right, bottom, top)`.
    pub fn corner_sizes(&self, pixel_size: Vec2f) -> Edges {
        let fx = fractions(self.ratio.x);
        let fy = fractions(self.ratio.y);
        Edges {
            left: (fx[1] - fx[0]) * pixel_size.x * self.scale,
            right: (fx[3] - fx[2]) * pixel_size.x * self.scale,
            bottom: (fy[1] - fy[0]) * pixel_size.y * self.scale,
            top: (fy[3] - fy[2]) * pixel_size.y * self.scale,
        }
    }

    fn middle(start: Real, end: Real, t0: Real, t1: Real, tile: Real, repeat: bool) -> Vec<Segment> {
        if !repeat || tile <= 0.0 {
            return vec![Segment { start, end, t0, t1 }];
        }
        let len = (end - start).max(0.0);
        let whole = (len / tile).floor() as usize;
        let mut out = Vec::with_capacity(whole + 1);
        let mut x = start;
        for _ in 0..whole {
            out.push(Segment { start: x, end: x + tile, t0, t1 });
            x += tile;
        }
        let rem = end - x;
        if rem > 1e-4 {
            out.push(Segment { start: x, end, t0, t1: t0 + (t1 - t0) * rem / tile });
        }
        out
    }

    fn axis(&self, lo: Real, hi: Real, near: Real, far: Real, fr: [Real; 4], tile: Real, repeat: bool) -> [Vec<Segment>; 3] {
        [
            vec![Segment { start: lo, end: lo + near, t0: fr[0], t1: fr[1] }],
            Self::middle(lo + near, hi - far, fr[1], fr[2], tile, repeat),
            vec![Segment { start: hi - far, end: hi, t0: fr[2], t1: fr[3] }],
        ]
    }

    /// Generates the quads covering `rect` with `texture`.
    pub fn generate(&self, rect: Frame, texture: &TextureRegion) -> Result<Vec<TexturedQuad>> {
        let c = self.corner_sizes(texture.pixel_size);
        if c.left + c.right > rect.size.x || c.bottom + c.top > rect.size.y {
            return Err(GuiError::ScaleTooLarge { needed: (c.left + c.right, c.bottom + c.top), available: (rect.size.x, rect.size.y) });
        }
        let fx = fractions(self.ratio.x);
        let fy = fractions(self.ratio.y);
        let tile_x = (fx[2] - fx[1]) * texture.pixel_size.x * self.scale;
        let tile_y = (fy[2] - fy[1]) * texture.pixel_size.y * self.scale;

        let mut quads = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                let center_x = col == 1;
                let center_y = row == 1;
                let repeat = if center_x && center_y { self.repeat_center } else { self.repeat_edge };
                let xs = self.axis(rect.left(), rect.right(), c.left, c.right, fx, tile_x, repeat);
                let ys = self.axis(rect.bottom(), rect.top(), c.bottom, c.top, fy, tile_y, repeat);
                for sy in &ys[row] {
                    for sx in &xs[col] {
                        let f = Frame::new(vec2f(sx.start, sy.start), vec2f(sx.end - sx.start, sy.end - sy.start));
                        quads.push(TexturedQuad { pos: f.corners(), uv: texture.sub_quad(sx.t0, sy.t0, sx.t1, sy.t1) });
                    }
                }
            }
        }
        Ok(quads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture() -> TextureRegion { TextureRegion { target: TEXTURE_2D, id: 1, uv: [0.0, 0.0, 1.0, 1.0], pixel_size: vec2f(30.0, 30.0) } }

    fn ratio() -> FrameRatio { FrameRatio::new([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]) }

    #[test]
    fn stretched_patch_has_nine_quads() {
        let patch = NinePatch::new(ratio(), 1.0, false, false).unwrap();
        let quads = patch.generate(Frame::from_size(100.0, 50.0), &texture()).unwrap();
        assert_eq!(quads.len(), 9);
        // corners keep their pixel size
        assert!((quads[0].pos[2].x - 10.0).abs() < 1e-4);
        assert!((quads[8].pos[0].x - 90.0).abs() < 1e-4);
        assert!((quads[8].pos[0].y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn tiling_adds_a_partial_tile() {
        let patch = NinePatch::new(ratio(), 1.0, true, false).unwrap();
        // middle span is 35 wide: three whole tiles of 10 and one of 5
        let quads = patch.generate(Frame::from_size(55.0, 30.0), &texture()).unwrap();
        let bottom_edge: Vec<&TexturedQuad> = quads.iter().filter(|q| q.pos[0].y == 0.0 && q.pos[0].x >= 10.0 && q.pos[1].x <= 45.0).collect();
        assert_eq!(bottom_edge.len(), 4);
        let last = bottom_edge[3];
        assert!((last.pos[1].x - last.pos[0].x - 5.0).abs() < 1e-4);
        let du = last.uv[1].x - last.uv[0].x;
        assert!((du - 1.0 / 6.0).abs() < 1e-5);
    }

    #[test]
    fn tiling_needs_positive_ratio() {
        let bad = FrameRatio::new([1.0, 0.0, 1.0], [1.0, 1.0, 1.0]);
        assert_eq!(NinePatch::new(bad, 1.0, false, true).err(), Some(GuiError::NonPositiveFrameRatio { axis: "x" }));
        let bad = FrameRatio::new([1.0, 1.0, 1.0], [1.0, -1.0, 1.0]);
        assert_eq!(NinePatch::new(bad, 1.0, true, false).err(), Some(GuiError::NonPositiveFrameRatio { axis: "y" }));
        assert!(NinePatch::new(bad, 1.0, false, false).is_ok());
    }

    #[test]
    fn oversized_corners_are_rejected() {
        let patch = NinePatch::new(ratio(), 4.0, false, false).unwrap();
        let err = patch.generate(Frame::from_size(50.0, 50.0), &texture()).unwrap_err();
        assert_eq!(err, GuiError::ScaleTooLarge { needed: (80.0, 80.0), available: (50.0, 50.0) });
    }
}
