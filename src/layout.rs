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
//! Grid layout and the lazily evaluated layout cells shared by all layouts.
use super::*;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Horizontal anchor of a cell or label.
pub enum AnchorX {
    #[default]
    /// Align to the left edge.
    Left,
    /// Center horizontally.
    Center,
    /// Align to the right edge.
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Vertical anchor of a cell or label.
pub enum AnchorY {
    #[default]
    /// Align to the bottom edge.
    Bottom,
    /// Center vertically.
    Center,
    /// Align to the top edge.
    Top,
}

impl FromStr for AnchorX {
    type Err = GuiError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(GuiError::InvalidAnchor { axis: "x", value: s.to_string() }),
        }
    }
}

impl FromStr for AnchorY {
    type Err = GuiError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bottom" => Ok(Self::Bottom),
            "center" => Ok(Self::Center),
            "top" => Ok(Self::Top),
            _ => Err(GuiError::InvalidAnchor { axis: "y", value: s.to_string() }),
        }
    }
}

impl AnchorX {
    /// Left edge of a box of width `size` placed in the span `[start, start + len]`.
    fn place(self, start: Real, len: Real, size: Real, inset: Real) -> Real {
        match self {
            Self::Left => start + inset * 0.5,
            Self::Center => start + (len - size) * 0.5,
            Self::Right => start + len - size - inset * 0.5,
        }
    }
}

impl AnchorY {
    /// Bottom edge of a box of height `size` placed in the span `[start, start + len]`.
    fn place(self, start: Real, len: Real, size: Real, inset: Real) -> Real {
        match self {
            Self::Bottom => start + inset * 0.5,
            Self::Center => start + (len - size) * 0.5,
            Self::Top => start + len - size - inset * 0.5,
        }
    }
}

/// Source of a lazily evaluated rectangle.
pub trait CellSource {
    /// Computes the absolute rectangle of the cell inside the frame the owner is resolved against.
    fn resolve(&self, frame: Frame) -> Result<Frame>;
}

#[derive(Clone)]
/// Rectangular region derived from a layout. Cells are views: resolving one always recomputes it
/// from its layout, which in turn recomputes from its own parent.
pub struct LayoutCell(Rc<dyn CellSource>);

impl LayoutCell {
    /// Wraps a custom cell source.
    pub fn new(source: impl CellSource + 'static) -> Self { Self(Rc::new(source)) }

    /// Resolves the cell against `frame`.
    pub fn resolve(&self, frame: Frame) -> Result<Frame> { self.0.resolve(frame) }
}

#[derive(Clone)]
/// Region a layout subdivides.
pub enum LayoutParent {
    /// The frame the owning widget is resolved against (submenu window or container area).
    Frame,
    /// Another layout cell, for nested layouts.
    Cell(LayoutCell),
}

impl LayoutParent {
    /// Resolves the parent region against `frame`.
    pub fn resolve(&self, frame: Frame) -> Result<Frame> {
        match self {
            Self::Frame => Ok(frame),
            Self::Cell(cell) => cell.resolve(frame),
        }
    }
}

impl From<LayoutCell> for LayoutParent {
    fn from(cell: LayoutCell) -> Self { Self::Cell(cell) }
}

struct GridState {
    parent: LayoutParent,
    resolution: (u32, u32),
    border: Vec2f,
}

#[derive(Clone)]
/// Uniform grid over a parent region with a symmetric border between cells.
pub struct GridLayout(Rc<GridState>);

impl GridLayout {
    /// Creates a grid with `resolution` columns and rows. A zero resolution is treated as one.
    pub fn new(parent: LayoutParent, resolution: (u32, u32), border: Vec2f) -> Self {
        let resolution = (resolution.0.max(1), resolution.1.max(1));
        Self(Rc::new(GridState { parent, resolution, border }))
    }

    /// Columns and rows.
    pub fn resolution(&self) -> (u32, u32) { self.0.resolution }

    /// Border between cells.
    pub fn border(&self) -> Vec2f { self.0.border }

    /// Size of a single cell for the given frame. Recomputed on every call.
    pub fn cell_size(&self, frame: Frame) -> Result<Vec2f> {
        let parent = self.0.parent.resolve(frame)?;
        Ok(vec2f(parent.size.x / self.0.resolution.0 as Real, parent.size.y / self.0.resolution.1 as Real))
    }

    /// Returns a cell covering `span` grid units from `pos`, anchored by the named anchors.
    pub fn get_cell(&self, pos: [u32; 2], span: [u32; 2], anchor_x: &str, anchor_y: &str, border_mult: Real) -> Result<LayoutCell> {
        let anchor_x = anchor_x.parse::<AnchorX>()?;
        let anchor_y = anchor_y.parse::<AnchorY>()?;
        Ok(self.cell(pos, span, anchor_x, anchor_y, border_mult))
    }

    /// Typed variant of [`GridLayout::get_cell`].
    pub fn cell(&self, pos: [u32; 2], span: [u32; 2], anchor_x: AnchorX, anchor_y: AnchorY, border_mult: Real) -> LayoutCell {
        LayoutCell::new(GridCell { layout: self.clone(), pos, span, anchor_x, anchor_y, border_mult })
    }
}

struct GridCell {
    layout: GridLayout,
    pos: [u32; 2],
    span: [u32; 2],
    anchor_x: AnchorX,
    anchor_y: AnchorY,
    border_mult: Real,
}

impl CellSource for GridCell {
    fn resolve(&self, frame: Frame) -> Result<Frame> {
        let parent = self.layout.0.parent.resolve(frame)?;
        let cs = self.layout.cell_size(frame)?;
        let inset = vec2f(self.layout.0.border.x * self.border_mult, self.layout.0.border.y * self.border_mult);
        let span = vec2f(self.span[0] as Real * cs.x, self.span[1] as Real * cs.y);
        let size = vec2f((span.x - inset.x).max(0.0), (span.y - inset.y).max(0.0));
        let start = vec2f(parent.pos.x + self.pos[0] as Real * cs.x, parent.pos.y + self.pos[1] as Real * cs.y);
        let x = self.anchor_x.place(start.x, span.x, size.x, inset.x);
        let y = self.anchor_y.place(start.y, span.y, size.y, inset.y);
        Ok(Frame::new(vec2f(x, y), size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridLayout { GridLayout::new(LayoutParent::Frame, (4, 2), vec2f(10.0, 10.0)) }

    #[test]
    fn spanned_cell_subtracts_border_once() {
        let cell = grid().get_cell([1, 0], [2, 1], "left", "bottom", 1.0).unwrap();
        let rect = cell.resolve(Frame::from_size(400.0, 200.0)).unwrap();
        assert_eq!(rect.size.x, 190.0);
        assert_eq!(rect.size.y, 90.0);
        assert_eq!(rect.pos.x, 105.0);
        assert_eq!(rect.pos.y, 5.0);
    }

    #[test]
    fn invalid_anchor_is_rejected() {
        let err = grid().get_cell([0, 0], [1, 1], "middle", "bottom", 1.0).err().unwrap();
        assert_eq!(err, GuiError::InvalidAnchor { axis: "x", value: "middle".into() });
        let err = grid().get_cell([0, 0], [1, 1], "left", "left", 1.0).err().unwrap();
        assert_eq!(err, GuiError::InvalidAnchor { axis: "y", value: "left".into() });
    }

    #[test]
    fn cells_scale_linearly_with_parent() {
        let g = grid();
        let cells: Vec<LayoutCell> = (0..4).map(|i| g.cell([i, 0], [1, 1], AnchorX::Left, AnchorY::Bottom, 0.0)).collect();
        let full = Frame::from_size(400.0, 200.0);
        let half = Frame::from_size(200.0, 200.0);
        for cell in &cells {
            let a = cell.resolve(full).unwrap();
            let b = cell.resolve(half).unwrap();
            assert_eq!(b.size.x * 2.0, a.size.x);
            assert_eq!(b.pos.x * 2.0, a.pos.x);
            assert_eq!(b.size.y, a.size.y);
        }
    }

    #[test]
    fn random_parents_keep_cell_ratios() {
        use rand::{Rng, SeedableRng, rngs::StdRng};
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let g = GridLayout::new(LayoutParent::Frame, (6, 3), vec2f(0.0, 0.0));
        for _ in 0..200 {
            let w: Real = rng.random_range(1.0..2000.0);
            let h: Real = rng.random_range(1.0..2000.0);
            let col = rng.random_range(0..6u32);
            let span = rng.random_range(1..=6 - col);
            let full = g.cell([col, 0], [span, 1], AnchorX::Left, AnchorY::Bottom, 0.0).resolve(Frame::from_size(w, h)).unwrap();
            let half = g.cell([col, 0], [span, 1], AnchorX::Left, AnchorY::Bottom, 0.0).resolve(Frame::from_size(w * 0.5, h)).unwrap();
            assert!((full.size.x - 2.0 * half.size.x).abs() < 1e-2);
            assert!((full.pos.x - 2.0 * half.pos.x).abs() < 1e-2);
            assert!((full.size.x / w - span as Real / 6.0).abs() < 1e-4);
            assert_eq!(full.size.y, half.size.y);
        }
    }

    #[test]
    fn anchors_differ_when_border_exceeds_span() {
        let g = GridLayout::new(LayoutParent::Frame, (4, 2), vec2f(300.0, 300.0));
        let frame = Frame::from_size(400.0, 200.0);
        let left = g.cell([0, 0], [1, 1], AnchorX::Left, AnchorY::Bottom, 1.0).resolve(frame).unwrap();
        let center = g.cell([0, 0], [1, 1], AnchorX::Center, AnchorY::Center, 1.0).resolve(frame).unwrap();
        let right = g.cell([0, 0], [1, 1], AnchorX::Right, AnchorY::Top, 1.0).resolve(frame).unwrap();
        assert_eq!(left.size.x, 0.0);
        assert_eq!(left.pos.x, 150.0);
        assert_eq!(center.pos.x, 50.0);
        assert_eq!(right.pos.x, -50.0);
    }

    #[test]
    fn nested_layouts_subdivide_cells() {
        let outer = grid();
        let cell = outer.cell([2, 0], [2, 2], AnchorX::Left, AnchorY::Bottom, 0.0);
        let inner = GridLayout::new(LayoutParent::Cell(cell), (2, 2), vec2f(0.0, 0.0));
        let rect = inner.cell([1, 1], [1, 1], AnchorX::Left, AnchorY::Bottom, 0.0).resolve(Frame::from_size(400.0, 200.0)).unwrap();
        assert_eq!(rect, Frame::new(vec2f(300.0, 100.0), vec2f(100.0, 100.0)));
    }

    #[test]
    fn cell_origin_follows_frame() {
        let cell = grid().cell([0, 0], [1, 1], AnchorX::Left, AnchorY::Bottom, 0.0);
        let rect = cell.resolve(Frame::new(vec2f(30.0, 40.0), vec2f(400.0, 200.0))).unwrap();
        assert_eq!(rect.pos.x, 30.0);
        assert_eq!(rect.pos.y, 40.0);
    }
}
