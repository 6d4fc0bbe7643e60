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
//! Draw batch interface consumed by the widgets, and an in-memory implementation.
//!
//! The embedding application owns the real vertex buffers. Widgets only allocate primitives by vertex
//! count and topology, write positions/colors/texture coordinates into them, and arrange them in ordered,
//! textured or stencil-clipped groups.
use super::*;
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle of a batch group.
pub struct GroupId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle of an allocated primitive.
pub struct PrimitiveId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle of a text label.
pub struct LabelId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Primitive topology.
pub enum Topology {
    /// Four vertices per quad.
    Quads,
    /// Two vertices per line.
    Lines,
    /// One vertex per point.
    Points,
}

impl Topology {
    /// Vertices consumed by a single element.
    pub fn vertices_per_element(self) -> usize {
        match self {
            Self::Quads => 4,
            Self::Lines => 2,
            Self::Points => 1,
        }
    }
}

#[derive(Copy, Clone, Debug)]
/// State a group applies to everything drawn inside it.
pub enum GroupKind {
    /// Draw-order band. Siblings draw in ascending order, ties in creation order.
    Order(Real),
    /// Binds a texture.
    Texture {
        /// Texture target.
        target: u32,
        /// Texture id.
        id: u32,
    },
    /// Restricts drawing to a rectangle through the stencil buffer.
    Stencil(Frame),
}

/// Draw batch provided by the rendering collaborator.
pub trait Batch {
    /// Creates a group nested in `parent`.
    fn create_group(&mut self, kind: GroupKind, parent: Option<GroupId>) -> GroupId;
    /// Replaces the state applied by `group`.
    fn set_group(&mut self, group: GroupId, kind: GroupKind);
    /// Deletes `group`.
    fn delete_group(&mut self, group: GroupId);

    /// Allocates a primitive of `count` vertices.
    fn allocate(&mut self, count: usize, topology: Topology, group: Option<GroupId>) -> PrimitiveId;
    /// Number of vertices `id` was allocated with.
    fn vertex_count(&self, id: PrimitiveId) -> Option<usize>;
    /// Writes vertex positions. The slice length must equal the allocated vertex count.
    fn set_positions(&mut self, id: PrimitiveId, positions: &[Vec2f]) -> Result<()>;
    /// Writes vertex colors. The slice length must equal the allocated vertex count.
    fn set_colors(&mut self, id: PrimitiveId, colors: &[Color]) -> Result<()>;
    /// Writes texture coordinates. The slice length must equal the allocated vertex count.
    fn set_tex_coords(&mut self, id: PrimitiveId, coords: &[Vec2f]) -> Result<()>;
    /// Releases a primitive.
    fn release(&mut self, id: PrimitiveId);

    /// Creates an empty text label.
    fn create_label(&mut self, group: Option<GroupId>) -> LabelId;
    /// Replaces the content and placement of a label.
    fn update_label(&mut self, id: LabelId, spec: &LabelSpec);
    /// Deletes a label.
    fn delete_label(&mut self, id: LabelId);
    /// Measures `text` as it would be laid out by the text collaborator.
    fn measure_text(&self, text: &str, font: &str, size: Real) -> Vec2f;
}

#[derive(Clone)]
/// Shared handle to a draw batch.
pub struct BatchHandle(Rc<RefCell<dyn Batch>>);

impl BatchHandle {
    /// Wraps a shared batch. The caller may keep its own typed `Rc` to inspect the batch.
    pub fn new<B: Batch + 'static>(batch: Rc<RefCell<B>>) -> Self { Self(batch) }

    /// Returns a mutable borrow of the batch.
    pub fn borrow_mut(&self) -> RefMut<'_, dyn Batch> { self.0.borrow_mut() }

    /// Executes `f` with mutable access to the batch.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn Batch) -> R) -> R { f(&mut *self.0.borrow_mut()) }
}

/// Everything a widget needs while regenerating its primitives.
pub struct DrawCtx<'a> {
    /// Target batch.
    pub batch: &'a mut dyn Batch,
    /// Texture lookup.
    pub resources: &'a dyn Resources,
    /// Visual constants.
    pub theme: &'a Theme,
    /// Palette derived from the owning submenu background.
    pub palette: Palette,
    /// Group new primitives are placed in.
    pub group: Option<GroupId>,
    /// Frame widget geometry resolves against.
    pub frame: Frame,
}

impl<'a> DrawCtx<'a> {
    /// Reborrows the context with a different group and frame, for nested containers and layers.
    pub fn nested(&mut self, group: Option<GroupId>, frame: Frame) -> DrawCtx<'_> {
        DrawCtx { batch: &mut *self.batch, resources: self.resources, theme: self.theme, palette: self.palette, group, frame }
    }
}

/// Quad primitive that reallocates itself when the number of quads changes.
pub(crate) struct QuadPrim {
    id: PrimitiveId,
    quads: usize,
}

impl QuadPrim {
    pub(crate) fn new(batch: &mut dyn Batch, quads: usize, group: Option<GroupId>) -> Self {
        Self { id: batch.allocate(quads * 4, Topology::Quads, group), quads }
    }

    pub(crate) fn id(&self) -> PrimitiveId { self.id }

    pub(crate) fn resize(&mut self, batch: &mut dyn Batch, quads: usize, group: Option<GroupId>) {
        if quads != self.quads {
            batch.release(self.id);
            *self = Self::new(batch, quads, group);
        }
    }

    pub(crate) fn write(&self, batch: &mut dyn Batch, positions: &[Vec2f], colors: &[Color]) -> Result<()> {
        batch.set_positions(self.id, positions)?;
        batch.set_colors(self.id, colors)
    }

    /// Collapses every vertex onto the origin.
    pub(crate) fn hide(&self, batch: &mut dyn Batch) -> Result<()> { batch.set_positions(self.id, &vec![vec2f(0.0, 0.0); self.quads * 4]) }

    pub(crate) fn release(self, batch: &mut dyn Batch) { batch.release(self.id) }
}

pub(crate) fn flatten_colors(quads: &[QuadColors]) -> Vec<Color> { quads.iter().flat_map(|q| q.iter().copied()).collect() }

#[derive(Clone, Debug)]
struct GroupRecord {
    kind: GroupKind,
    parent: Option<GroupId>,
    seq: usize,
}

#[derive(Clone, Debug)]
/// Contents of a primitive held by [`MemoryBatch`].
pub struct PrimitiveData {
    /// Topology the primitive was allocated with.
    pub topology: Topology,
    /// Group the primitive belongs to.
    pub group: Option<GroupId>,
    /// Vertex positions.
    pub positions: Vec<Vec2f>,
    /// Vertex colors.
    pub colors: Vec<Color>,
    /// Texture coordinates.
    pub tex_coords: Vec<Vec2f>,
    seq: usize,
}

#[derive(Default)]
/// Batch that keeps every primitive in memory. Useful for tests and for backends that upload
/// the whole scene each frame.
pub struct MemoryBatch {
    groups: Vec<Option<GroupRecord>>,
    primitives: Vec<Option<PrimitiveData>>,
    labels: Vec<Option<(Option<GroupId>, LabelSpec)>>,
    seq: usize,
}

impl MemoryBatch {
    /// Creates an empty batch.
    pub fn new() -> Self { Self::default() }

    fn next_seq(&mut self) -> usize {
        self.seq += 1;
        self.seq
    }

    /// Returns a live primitive.
    pub fn primitive(&self, id: PrimitiveId) -> Option<&PrimitiveData> { self.primitives.get(id.0).and_then(|p| p.as_ref()) }

    /// Returns the current content of a live label.
    pub fn label(&self, id: LabelId) -> Option<&LabelSpec> { self.labels.get(id.0).and_then(|l| l.as_ref()).map(|(_, s)| s) }

    /// Returns the state of a live group.
    pub fn group(&self, id: GroupId) -> Option<GroupKind> { self.groups.get(id.0).and_then(|g| g.as_ref()).map(|g| g.kind) }

    /// Returns the parent of a live group.
    pub fn group_parent(&self, id: GroupId) -> Option<GroupId> { self.groups.get(id.0).and_then(|g| g.as_ref()).and_then(|g| g.parent) }

    /// Number of live primitives.
    pub fn live_primitives(&self) -> usize { self.primitives.iter().filter(|p| p.is_some()).count() }

    /// Number of live labels.
    pub fn live_labels(&self) -> usize { self.labels.iter().filter(|l| l.is_some()).count() }

    /// Number of live groups.
    pub fn live_groups(&self) -> usize { self.groups.iter().filter(|g| g.is_some()).count() }

    /// Ids of all live primitives in allocation order.
    pub fn primitive_ids(&self) -> Vec<PrimitiveId> {
        self.primitives.iter().enumerate().filter(|(_, p)| p.is_some()).map(|(i, _)| PrimitiveId(i)).collect()
    }

    /// Ids of all live labels in creation order.
    pub fn label_ids(&self) -> Vec<LabelId> { self.labels.iter().enumerate().filter(|(_, l)| l.is_some()).map(|(i, _)| LabelId(i)).collect() }

    /// Innermost stencil rectangle applied to a primitive, if any.
    pub fn clip_of(&self, id: PrimitiveId) -> Option<Frame> {
        let mut group = self.primitive(id)?.group;
        while let Some(g) = group {
            let rec = self.groups.get(g.0)?.as_ref()?;
            if let GroupKind::Stencil(frame) = rec.kind {
                return Some(frame);
            }
            group = rec.parent;
        }
        None
    }

    fn group_path(&self, mut group: Option<GroupId>) -> Vec<(Real, usize)> {
        let mut path = Vec::new();
        while let Some(g) = group {
            match self.groups.get(g.0).and_then(|r| r.as_ref()) {
                Some(rec) => {
                    let order = match rec.kind {
                        GroupKind::Order(o) => o,
                        _ => 0.0,
                    };
                    path.push((order, rec.seq));
                    group = rec.parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Live primitives in the order a renderer draws them: groups by ascending order then creation,
    /// primitives inside a group by allocation.
    pub fn draw_list(&self) -> Vec<PrimitiveId> {
        let mut keyed: Vec<(Vec<(Real, usize)>, usize, PrimitiveId)> = self
            .primitives
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (self.group_path(p.group), p.seq, PrimitiveId(i))))
            .collect();
        keyed.sort_by(|a, b| {
            for (x, y) in a.0.iter().zip(b.0.iter()) {
                let ord = x.0.total_cmp(&y.0).then(x.1.cmp(&y.1));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.0.len().cmp(&b.0.len()).then(a.1.cmp(&b.1))
        });
        keyed.into_iter().map(|(_, _, id)| id).collect()
    }

    fn slot(&mut self, id: PrimitiveId, got: usize) -> Result<&mut PrimitiveData> {
        match self.primitives.get_mut(id.0).and_then(|p| p.as_mut()) {
            Some(p) if p.positions.len() == got => Ok(p),
            Some(p) => Err(GuiError::VertexCountMismatch { expected: p.positions.len(), got }),
            None => Err(GuiError::VertexCountMismatch { expected: 0, got }),
        }
    }
}

impl Batch for MemoryBatch {
    fn create_group(&mut self, kind: GroupKind, parent: Option<GroupId>) -> GroupId {
        let seq = self.next_seq();
        self.groups.push(Some(GroupRecord { kind, parent, seq }));
        GroupId(self.groups.len() - 1)
    }

    fn set_group(&mut self, group: GroupId, kind: GroupKind) {
        if let Some(Some(rec)) = self.groups.get_mut(group.0) {
            rec.kind = kind;
        }
    }

    fn delete_group(&mut self, group: GroupId) {
        if let Some(slot) = self.groups.get_mut(group.0) {
            *slot = None;
        }
    }

    fn allocate(&mut self, count: usize, topology: Topology, group: Option<GroupId>) -> PrimitiveId {
        let seq = self.next_seq();
        self.primitives.push(Some(PrimitiveData {
            topology,
            group,
            positions: vec![vec2f(0.0, 0.0); count],
            colors: vec![Color::WHITE; count],
            tex_coords: vec![vec2f(0.0, 0.0); count],
            seq,
        }));
        PrimitiveId(self.primitives.len() - 1)
    }

    fn vertex_count(&self, id: PrimitiveId) -> Option<usize> { self.primitive(id).map(|p| p.positions.len()) }

    fn set_positions(&mut self, id: PrimitiveId, positions: &[Vec2f]) -> Result<()> {
        self.slot(id, positions.len())?.positions.copy_from_slice(positions);
        Ok(())
    }

    fn set_colors(&mut self, id: PrimitiveId, colors: &[Color]) -> Result<()> {
        self.slot(id, colors.len())?.colors.copy_from_slice(colors);
        Ok(())
    }

    fn set_tex_coords(&mut self, id: PrimitiveId, coords: &[Vec2f]) -> Result<()> {
        self.slot(id, coords.len())?.tex_coords.copy_from_slice(coords);
        Ok(())
    }

    fn release(&mut self, id: PrimitiveId) {
        if let Some(slot) = self.primitives.get_mut(id.0) {
            *slot = None;
        }
    }

    fn create_label(&mut self, group: Option<GroupId>) -> LabelId {
        self.labels.push(Some((group, LabelSpec::default())));
        LabelId(self.labels.len() - 1)
    }

    fn update_label(&mut self, id: LabelId, spec: &LabelSpec) {
        if let Some(Some((_, s))) = self.labels.get_mut(id.0) {
            *s = spec.clone();
        }
    }

    fn delete_label(&mut self, id: LabelId) {
        if let Some(slot) = self.labels.get_mut(id.0) {
            *slot = None;
        }
    }

    // fixed advance of half the font size per character
    fn measure_text(&self, text: &str, _font: &str, size: Real) -> Vec2f { vec2f(text.chars().count() as Real * size * 0.5, size) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_vertex_count_is_rejected() {
        let mut batch = MemoryBatch::new();
        let id = batch.allocate(4, Topology::Quads, None);
        assert_eq!(batch.vertex_count(id), Some(4));
        let err = batch.set_colors(id, &[Color::WHITE; 3]).unwrap_err();
        assert_eq!(err, GuiError::VertexCountMismatch { expected: 4, got: 3 });
        assert!(batch.set_colors(id, &[Color::WHITE; 4]).is_ok());
    }

    #[test]
    fn draw_list_orders_groups() {
        let mut batch = MemoryBatch::new();
        let root = batch.create_group(GroupKind::Order(0.0), None);
        let hi = batch.create_group(GroupKind::Order(2.0), Some(root));
        let lo = batch.create_group(GroupKind::Order(1.0), Some(root));
        let a = batch.allocate(4, Topology::Quads, Some(hi));
        let b = batch.allocate(4, Topology::Quads, Some(lo));
        let c = batch.allocate(4, Topology::Quads, Some(lo));
        assert_eq!(batch.draw_list(), vec![b, c, a]);
    }

    #[test]
    fn clip_is_inherited_from_ancestors() {
        let mut batch = MemoryBatch::new();
        let clip = Frame::from_size(10.0, 10.0);
        let stencil = batch.create_group(GroupKind::Stencil(clip), None);
        let order = batch.create_group(GroupKind::Order(1.0), Some(stencil));
        let id = batch.allocate(2, Topology::Lines, Some(order));
        assert_eq!(batch.clip_of(id), Some(clip));
        let free = batch.allocate(1, Topology::Points, None);
        assert_eq!(batch.clip_of(free), None);
    }

    #[test]
    fn released_primitives_are_not_live() {
        let mut batch = MemoryBatch::new();
        let id = batch.allocate(4, Topology::Quads, None);
        let label = batch.create_label(None);
        batch.release(id);
        batch.delete_label(label);
        assert_eq!(batch.live_primitives(), 0);
        assert_eq!(batch.live_labels(), 0);
        assert!(batch.set_positions(id, &[vec2f(0.0, 0.0); 4]).is_err());
    }
}
