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
//! Dynamic position/size values and their resolution against a parent frame.
//!
//! A widget position or size is either a literal, a function of the parent frame size, or a
//! [`LayoutCell`]. Nothing is cached: every query re-resolves against the frame it is given, so
//! layouts follow parent resizes and scrolling without any bookkeeping.
use super::*;

#[derive(Copy, Clone, Debug, Default)]
/// Axis-aligned rectangle in a y-up coordinate space (`pos` is the bottom-left corner).
pub struct Frame {
    /// Bottom-left corner.
    pub pos: Vec2f,
    /// Width and height.
    pub size: Vec2f,
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.pos.x == other.pos.x && self.pos.y == other.pos.y && self.size.x == other.size.x && self.size.y == other.size.y
    }
}

impl Frame {
    /// Creates a frame from a corner and a size.
    pub fn new(pos: Vec2f, size: Vec2f) -> Self { Self { pos, size } }

    /// Creates a frame at the origin with the given size.
    pub fn from_size(width: Real, height: Real) -> Self { Self::new(vec2f(0.0, 0.0), vec2f(width, height)) }

    /// Left edge.
    pub fn left(&self) -> Real { self.pos.x }
    /// Right edge.
    pub fn right(&self) -> Real { self.pos.x + self.size.x }
    /// Bottom edge.
    pub fn bottom(&self) -> Real { self.pos.y }
    /// Top edge.
    pub fn top(&self) -> Real { self.pos.y + self.size.y }

    /// Returns the center point of the frame.
    pub fn center(&self) -> Vec2f { vec2f(self.pos.x + self.size.x * 0.5, self.pos.y + self.size.y * 0.5) }

    /// Returns `true` if `p` lies inside the frame. All four edges count as inside.
    pub fn contains(&self, p: Vec2f) -> bool { p.x >= self.left() && p.x <= self.right() && p.y >= self.bottom() && p.y <= self.top() }

    /// Returns the frame translated by `delta`.
    pub fn offset(&self, delta: Vec2f) -> Self { Self::new(vec2f(self.pos.x + delta.x, self.pos.y + delta.y), self.size) }

    /// Shrinks the frame by per-edge amounts. The resulting size never goes below zero.
    pub fn inset(&self, left: Real, right: Real, bottom: Real, top: Real) -> Self {
        Self::new(
            vec2f(self.pos.x + left, self.pos.y + bottom),
            vec2f((self.size.x - left - right).max(0.0), (self.size.y - bottom - top).max(0.0)),
        )
    }

    /// Smallest frame enclosing both frames.
    pub fn union(&self, other: &Frame) -> Self {
        let x0 = self.left().min(other.left());
        let y0 = self.bottom().min(other.bottom());
        let x1 = self.right().max(other.right());
        let y1 = self.top().max(other.top());
        Self::new(vec2f(x0, y0), vec2f(x1 - x0, y1 - y0))
    }

    /// Corners in bottom-left, bottom-right, top-right, top-left order.
    pub fn corners(&self) -> [Vec2f; 4] {
        [
            vec2f(self.left(), self.bottom()),
            vec2f(self.right(), self.bottom()),
            vec2f(self.right(), self.top()),
            vec2f(self.left(), self.top()),
        ]
    }

    pub(crate) fn is_finite(&self) -> bool { self.pos.x.is_finite() && self.pos.y.is_finite() && self.size.x.is_finite() && self.size.y.is_finite() }
}

/// Callback computing a geometry value from the parent frame size and the other dimension.
pub type GeometryFn = Rc<dyn Fn(Vec2f, Vec2f) -> Vec2f>;

#[derive(Clone)]
/// Position or size of a widget, resolved on demand against the parent frame.
pub enum Geometry {
    /// Literal value. Positions are relative to the parent frame origin.
    Constant(Vec2f),
    /// Computed as `f(parent_size, other)`: a position callback receives the resolved size, a size
    /// callback receives the resolved position (relative to the parent frame).
    Computed(GeometryFn),
    /// Delegated to a layout cell. A cell used as position dictates the size as well.
    Cell(LayoutCell),
}

impl Geometry {
    /// Literal geometry value.
    pub fn constant(x: Real, y: Real) -> Self { Self::Constant(vec2f(x, y)) }

    /// Geometry computed from the parent frame size and the other dimension.
    pub fn computed(f: impl Fn(Vec2f, Vec2f) -> Vec2f + 'static) -> Self { Self::Computed(Rc::new(f)) }

    /// Position that centers the widget inside its parent frame.
    pub fn centered() -> Self { Self::computed(|parent, size| vec2f((parent.x - size.x) * 0.5, (parent.y - size.y) * 0.5)) }

    /// Size that fills the parent frame.
    pub fn fill() -> Self { Self::computed(|parent, _| parent) }

    /// Returns `true` for layout cell geometry.
    pub fn is_cell(&self) -> bool { matches!(self, Self::Cell(_)) }
}

impl From<Vec2f> for Geometry {
    fn from(v: Vec2f) -> Self { Self::Constant(v) }
}

impl From<(Real, Real)> for Geometry {
    fn from(v: (Real, Real)) -> Self { Self::constant(v.0, v.1) }
}

impl From<LayoutCell> for Geometry {
    fn from(cell: LayoutCell) -> Self { Self::Cell(cell) }
}

fn finite(v: Vec2f) -> bool { v.x.is_finite() && v.y.is_finite() }

fn clamp_size(v: Vec2f) -> Vec2f { vec2f(v.x.max(0.0), v.y.max(0.0)) }

/// Resolves a position/size pair against the parent `frame`. The returned frame is absolute.
///
/// The size is resolved first. A computed size sees the position when that position does not itself
/// depend on the size, otherwise it sees the frame origin (`(0, 0)` relative).
pub fn resolve_geometry(name: &str, pos: &Geometry, size: &Geometry, frame: Frame) -> Result<Frame> {
    if let Geometry::Cell(cell) = pos {
        let rect = cell.resolve(frame)?;
        if !rect.is_finite() {
            return Err(GuiError::InvalidGeometry(name.to_string()));
        }
        return Ok(Frame::new(rect.pos, clamp_size(rect.size)));
    }

    let size = match size {
        Geometry::Constant(s) => *s,
        Geometry::Cell(cell) => cell.resolve(frame)?.size,
        Geometry::Computed(f) => {
            let other = match pos {
                Geometry::Constant(p) => *p,
                _ => vec2f(0.0, 0.0),
            };
            f(frame.size, other)
        }
    };
    if !finite(size) {
        return Err(GuiError::InvalidGeometry(name.to_string()));
    }
    let size = clamp_size(size);

    let rel = match pos {
        Geometry::Constant(p) => *p,
        Geometry::Computed(f) => f(frame.size, size),
        Geometry::Cell(cell) => {
            let p = cell.resolve(frame)?.pos;
            vec2f(p.x - frame.pos.x, p.y - frame.pos.y)
        }
    };
    if !finite(rel) {
        return Err(GuiError::InvalidGeometry(name.to_string()));
    }
    Ok(Frame::new(vec2f(frame.pos.x + rel.x, frame.pos.y + rel.y), size))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum GeometrySlot {
    Pos,
    Size,
}

/// Resolved position or size that writes element-wise assignments back to its widget.
///
/// Every [`GeometryWatch::set`] stores the updated value as a constant and invalidates the widget once.
pub struct GeometryWatch<'a> {
    core: &'a mut WidgetCore,
    slot: GeometrySlot,
    value: Vec2f,
    resolved: Frame,
    frame: Frame,
}

impl<'a> GeometryWatch<'a> {
    pub(crate) fn new(core: &'a mut WidgetCore, slot: GeometrySlot, frame: Frame) -> Result<Self> {
        let resolved = core.rect(frame)?;
        let value = match slot {
            GeometrySlot::Pos => vec2f(resolved.pos.x - frame.pos.x, resolved.pos.y - frame.pos.y),
            GeometrySlot::Size => resolved.size,
        };
        Ok(Self { core, slot, value, resolved, frame })
    }

    /// Current value. Positions are relative to the parent frame.
    pub fn value(&self) -> Vec2f { self.value }

    /// Returns component `index` (0 = x, 1 = y).
    pub fn get(&self, index: usize) -> Real {
        match index {
            0 => self.value.x,
            _ => self.value.y,
        }
    }

    /// Writes component `index` (0 = x, 1 = y). Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, v: Real) {
        match index {
            0 => self.value.x = v,
            1 => self.value.y = v,
            _ => {
                warn!("geometry index {} out of range on `{}`", index, self.core.name());
                return;
            }
        }
        let rel_pos = vec2f(self.resolved.pos.x - self.frame.pos.x, self.resolved.pos.y - self.frame.pos.y);
        match self.slot {
            GeometrySlot::Pos => {
                if self.core.pos.is_cell() {
                    self.core.size = Geometry::Constant(self.resolved.size);
                }
                self.core.pos = Geometry::Constant(self.value);
            }
            GeometrySlot::Size => {
                if self.core.pos.is_cell() {
                    self.core.pos = Geometry::Constant(rel_pos);
                }
                self.core.size = Geometry::Constant(self.value);
            }
        }
        self.core.redraw();
    }
}
