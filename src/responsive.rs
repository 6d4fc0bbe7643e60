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
//! Breakpoint-driven row/column layout.
//!
//! Rows stack vertically inside row groups anchored to the top or bottom of the parent region. Columns
//! inside a row take a number of grid units that depends on the active breakpoint. There is no
//! wrapping: a row whose active spans exceed the unit count fails to resolve.
use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Viewport width classes, from smallest to largest.
pub enum Breakpoint {
    /// Extra small.
    Xs,
    /// Small.
    Sm,
    /// Medium.
    Md,
    /// Large.
    Lg,
    /// Extra large.
    Xl,
    /// Extra extra large.
    Xxl,
}

impl Breakpoint {
    /// All breakpoints in ascending order.
    pub const ALL: [Breakpoint; 6] = [Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl, Self::Xxl];

    fn index(self) -> usize { self as usize }
}

#[derive(Clone, Debug, PartialEq)]
/// Minimum viewport widths of every breakpoint and the number of grid units per row.
pub struct Breakpoints {
    /// Minimum width per breakpoint, indexed in [`Breakpoint::ALL`] order.
    pub min_widths: [Real; 6],
    /// Grid units per row.
    pub units: u32,
}

impl Default for Breakpoints {
    fn default() -> Self { Self { min_widths: [0.0, 576.0, 768.0, 992.0, 1200.0, 1400.0], units: 12 } }
}

impl Breakpoints {
    /// Largest breakpoint whose minimum width is not above `width`.
    pub fn active(&self, width: Real) -> Breakpoint {
        let mut bp = Breakpoint::Xs;
        for b in Breakpoint::ALL {
            if self.min_widths[b.index()] <= width {
                bp = b;
            }
        }
        bp
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Height policy of a responsive row.
pub enum RowHeight {
    /// Fixed height in pixels.
    Fixed(Real),
    /// Shares the height left over by fixed rows equally with the other auto rows.
    Auto,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Edge a row group stacks from.
pub enum GroupAnchor {
    /// Groups stack downwards from the top edge.
    Top,
    /// Groups stack upwards from the bottom edge.
    Bottom,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Per-breakpoint column spans. Undeclared breakpoints inherit from the next smaller declared one.
pub struct ColumnSpans([Option<u32>; 6]);

impl ColumnSpans {
    /// Spans with nothing declared (a full-width column).
    pub fn new() -> Self { Self::default() }

    /// Declares the span for `bp`.
    pub fn at(mut self, bp: Breakpoint, span: u32) -> Self {
        self.0[bp.index()] = Some(span);
        self
    }

    /// Declares the extra-small span.
    pub fn xs(self, span: u32) -> Self { self.at(Breakpoint::Xs, span) }
    /// Declares the small span.
    pub fn sm(self, span: u32) -> Self { self.at(Breakpoint::Sm, span) }
    /// Declares the medium span.
    pub fn md(self, span: u32) -> Self { self.at(Breakpoint::Md, span) }
    /// Declares the large span.
    pub fn lg(self, span: u32) -> Self { self.at(Breakpoint::Lg, span) }
    /// Declares the extra-large span.
    pub fn xl(self, span: u32) -> Self { self.at(Breakpoint::Xl, span) }
    /// Declares the extra-extra-large span.
    pub fn xxl(self, span: u32) -> Self { self.at(Breakpoint::Xxl, span) }

    /// Span in effect at `bp`.
    pub fn active(&self, bp: Breakpoint, units: u32) -> u32 {
        self.0[..=bp.index()].iter().rev().find_map(|s| *s).unwrap_or(units)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Handle of a row group inside a [`ResponsiveLayout`].
pub struct RowGroupId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Handle of a row inside a [`ResponsiveLayout`].
pub struct RowId(usize);

struct Row {
    name: String,
    group: usize,
    height: RowHeight,
    columns: Vec<ColumnSpans>,
}

struct Group {
    name: String,
    anchor: GroupAnchor,
}

struct ResponsiveState {
    parent: LayoutParent,
    breakpoints: Breakpoints,
    groups: Vec<Group>,
    rows: Vec<Row>,
}

#[derive(Clone)]
/// Responsive row/column layout. Rows and columns can be added after cells have been handed out.
pub struct ResponsiveLayout(Rc<RefCell<ResponsiveState>>);

impl ResponsiveLayout {
    /// Creates a layout with a single top-anchored group named `main`.
    pub fn new(parent: LayoutParent, breakpoints: Breakpoints) -> Self {
        let groups = vec![Group { name: "main".into(), anchor: GroupAnchor::Top }];
        Self(Rc::new(RefCell::new(ResponsiveState { parent, breakpoints, groups, rows: Vec::new() })))
    }

    /// The default top-anchored group.
    pub fn main_group(&self) -> RowGroupId { RowGroupId(0) }

    /// Adds a named row group stacked from `anchor`.
    pub fn add_group(&self, name: &str, anchor: GroupAnchor) -> RowGroupId {
        let mut st = self.0.borrow_mut();
        st.groups.push(Group { name: name.to_string(), anchor });
        RowGroupId(st.groups.len() - 1)
    }

    /// Looks up a group by name.
    pub fn group(&self, name: &str) -> Option<RowGroupId> { self.0.borrow().groups.iter().position(|g| g.name == name).map(RowGroupId) }

    /// Appends a row to `group`.
    pub fn add_row(&self, group: RowGroupId, name: &str, height: RowHeight) -> RowId {
        let mut st = self.0.borrow_mut();
        st.rows.push(Row { name: name.to_string(), group: group.0, height, columns: Vec::new() });
        RowId(st.rows.len() - 1)
    }

    /// Appends a column to `row` and returns its cell.
    pub fn add_column(&self, row: RowId, spans: ColumnSpans) -> LayoutCell {
        let column = {
            let mut st = self.0.borrow_mut();
            let r = &mut st.rows[row.0];
            r.columns.push(spans);
            r.columns.len() - 1
        };
        LayoutCell::new(ColumnCell { layout: self.clone(), row: row.0, column })
    }

    /// Cell covering a whole row.
    pub fn row_cell(&self, row: RowId) -> LayoutCell { LayoutCell::new(RowCell { layout: self.clone(), row: row.0 }) }

    /// Breakpoint active for `frame`.
    pub fn active_breakpoint(&self, frame: Frame) -> Result<Breakpoint> {
        let st = self.0.borrow();
        let parent = st.parent.resolve(frame)?;
        Ok(st.breakpoints.active(parent.size.x))
    }

    /// Checks every row for span overflow at the breakpoint active for `frame`.
    pub fn validate(&self, frame: Frame) -> Result<()> {
        let st = self.0.borrow();
        let parent = st.parent.resolve(frame)?;
        let bp = st.breakpoints.active(parent.size.x);
        for row in &st.rows {
            st.row_units(row, bp)?;
        }
        Ok(())
    }
}

impl ResponsiveState {
    fn row_units(&self, row: &Row, bp: Breakpoint) -> Result<u32> {
        let units = self.breakpoints.units;
        let used: u32 = row.columns.iter().map(|c| c.active(bp, units)).sum();
        if used > units {
            return Err(GuiError::ColumnOverflow { row: row.name.clone(), used, units });
        }
        Ok(used)
    }

    fn row_frame(&self, row: usize, frame: Frame) -> Result<Frame> {
        let parent = self.parent.resolve(frame)?;
        let fixed: Real = self
            .rows
            .iter()
            .map(|r| match r.height {
                RowHeight::Fixed(h) => h,
                RowHeight::Auto => 0.0,
            })
            .sum();
        let autos = self.rows.iter().filter(|r| r.height == RowHeight::Auto).count();
        let auto_h = if autos > 0 { (parent.size.y - fixed).max(0.0) / autos as Real } else { 0.0 };
        let height = |r: &Row| match r.height {
            RowHeight::Fixed(h) => h,
            RowHeight::Auto => auto_h,
        };

        let mut top_cursor = parent.top();
        let mut bottom_cursor = parent.bottom();
        for (gi, group) in self.groups.iter().enumerate() {
            let rows = self.rows.iter().enumerate().filter(|(_, r)| r.group == gi);
            let group_h: Real = rows.clone().map(|(_, r)| height(r)).sum();
            let mut y = match group.anchor {
                GroupAnchor::Top => top_cursor,
                GroupAnchor::Bottom => bottom_cursor + group_h,
            };
            for (ri, r) in rows {
                let h = height(r);
                y -= h;
                if ri == row {
                    return Ok(Frame::new(vec2f(parent.pos.x, y), vec2f(parent.size.x, h)));
                }
            }
            match group.anchor {
                GroupAnchor::Top => top_cursor -= group_h,
                GroupAnchor::Bottom => bottom_cursor += group_h,
            }
        }
        Ok(Frame::new(parent.pos, vec2f(parent.size.x, 0.0)))
    }
}

struct RowCell {
    layout: ResponsiveLayout,
    row: usize,
}

impl CellSource for RowCell {
    fn resolve(&self, frame: Frame) -> Result<Frame> { self.layout.0.borrow().row_frame(self.row, frame) }
}

struct ColumnCell {
    layout: ResponsiveLayout,
    row: usize,
    column: usize,
}

impl CellSource for ColumnCell {
    fn resolve(&self, frame: Frame) -> Result<Frame> {
        let st = self.layout.0.borrow();
        let parent = st.parent.resolve(frame)?;
        let bp = st.breakpoints.active(parent.size.x);
        let row = &st.rows[self.row];
        st.row_units(row, bp)?;
        let units = st.breakpoints.units;
        let unit_w = parent.size.x / units.max(1) as Real;
        let before: u32 = row.columns[..self.column].iter().map(|c| c.active(bp, units)).sum();
        let span = row.columns[self.column].active(bp, units);
        let rf = st.row_frame(self.row, frame)?;
        Ok(Frame::new(vec2f(rf.pos.x + before as Real * unit_w, rf.pos.y), vec2f(span as Real * unit_w, rf.size.y)))
    }
}
