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
//! Widgets composed of independently drawn layers.
//!
//! Every layer lives in its own draw-order group keyed by its z-index, so lower layers draw first and
//! layers with the same z-index draw in insertion order. A layer allocates its primitives on its first
//! redraw and is regenerated either with its widget or on its own after [`LayerEntry::redraw`].
use super::*;
use std::any::Any;

/// Drawable part of a [`LayeredWidget`].
pub trait Layer: Any {
    /// Allocates the primitives.
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()>;
    /// Returns `true` once [`Layer::init`] ran.
    fn is_initialized(&self) -> bool;
    /// Regenerates the primitives for the layer rectangle `input.rect`.
    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()>;
    /// Releases the primitives.
    fn delete(&mut self, batch: &mut dyn Batch);
    /// Downcasting support for [`LayerEntry::layer_mut`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A layer together with its placement inside the widget.
pub struct LayerEntry {
    name: String,
    z: Real,
    offset: Vec2f,
    border: Edges,
    group: Option<GroupId>,
    dirty: bool,
    layer: Box<dyn Layer>,
}

impl LayerEntry {
    /// Layer name.
    pub fn name(&self) -> &str { &self.name }

    /// Z-index.
    pub fn z_index(&self) -> Real { self.z }

    /// Offset from the widget position.
    pub fn offset(&self) -> Vec2f { self.offset }

    /// Moves the layer.
    pub fn set_offset(&mut self, offset: Vec2f) {
        self.offset = offset;
        self.dirty = true;
    }

    /// Insets from the widget rectangle.
    pub fn border(&self) -> Edges { self.border }

    /// Changes the insets.
    pub fn set_border(&mut self, border: Edges) {
        self.border = border;
        self.dirty = true;
    }

    /// Schedules a regeneration of this layer only.
    pub fn redraw(&mut self) { self.dirty = true }

    /// Returns `true` if the layer waits for a regeneration.
    pub fn is_dirty(&self) -> bool { self.dirty }

    /// Typed access to the layer. Marks the layer for redraw.
    pub fn layer_mut<T: Layer>(&mut self) -> Option<&mut T> {
        let layer = self.layer.as_any_mut().downcast_mut::<T>()?;
        self.dirty = true;
        Some(layer)
    }

    fn rect(&self, widget: Frame) -> Frame { self.border.shrink(widget.offset(self.offset)) }

    fn draw(&mut self, ctx: &mut DrawCtx, widget: Frame, base: &PaintInput) -> Result<()> {
        let group = match self.group {
            Some(g) => g,
            None => *self.group.insert(ctx.batch.create_group(GroupKind::Order(self.z), ctx.group)),
        };
        let frame = ctx.frame;
        let mut ctx = ctx.nested(Some(group), frame);
        if !self.layer.is_initialized() {
            self.layer.init(&mut ctx)?;
        }
        let input = PaintInput { rect: self.rect(widget), ..*base };
        self.layer.redraw(&mut ctx, &input)?;
        self.dirty = false;
        Ok(())
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        self.layer.delete(batch);
        if let Some(group) = self.group.take() {
            batch.delete_group(group);
        }
    }
}

/// Widget drawn as a stack of named layers.
pub struct LayeredWidget {
    core: WidgetCore,
    layers: Vec<LayerEntry>,
}

impl LayeredWidget {
    /// Widget without layers.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>) -> Self { Self { core: WidgetCore::new(name, pos, size), layers: Vec::new() } }

    /// Builder form of [`LayeredWidget::add_layer`].
    pub fn with_layer(mut self, name: &str, z: Real, layer: impl Layer) -> Result<Self> {
        self.add_layer(name, z, layer)?;
        Ok(self)
    }

    /// Adds a layer covering the whole widget.
    pub fn add_layer(&mut self, name: &str, z: Real, layer: impl Layer) -> Result<&mut LayerEntry> {
        self.add_layer_at(name, z, vec2f(0.0, 0.0), Edges::default(), layer)
    }

    /// Adds a layer moved by `offset` and shrunk by `border`.
    pub fn add_layer_at(&mut self, name: &str, z: Real, offset: Vec2f, border: Edges, layer: impl Layer) -> Result<&mut LayerEntry> {
        if self.layers.iter().any(|l| l.name == name) {
            return Err(GuiError::DuplicateName(name.to_string()));
        }
        let at = self.layers.partition_point(|l| l.z <= z);
        debug!("layer `{}` of `{}` at z {}", name, self.core.name(), z);
        self.layers.insert(at, LayerEntry { name: name.to_string(), z, offset, border, group: None, dirty: true, layer: Box::new(layer) });
        Ok(&mut self.layers[at])
    }

    /// Layer named `name`.
    pub fn get_layer(&mut self, name: &str) -> Result<&mut LayerEntry> {
        self.layers.iter_mut().find(|l| l.name == name).ok_or_else(|| GuiError::LayerNotFound(name.to_string()))
    }

    /// Typed access to the layer named `name`. A layer of another type is reported as missing.
    pub fn layer_mut<T: Layer>(&mut self, name: &str) -> Result<&mut T> {
        self.get_layer(name)?.layer_mut::<T>().ok_or_else(|| GuiError::LayerNotFound(name.to_string()))
    }

    /// Removes a layer and releases its primitives.
    pub fn remove_layer(&mut self, name: &str, batch: &mut dyn Batch) -> Result<()> {
        let at = self.layers.iter().position(|l| l.name == name).ok_or_else(|| GuiError::LayerNotFound(name.to_string()))?;
        self.layers.remove(at).delete(batch);
        Ok(())
    }

    /// Layer names in draw order.
    pub fn layer_names(&self) -> Vec<&str> { self.layers.iter().map(|l| l.name.as_str()).collect() }

    /// Number of layers.
    pub fn len(&self) -> usize { self.layers.len() }

    /// Returns `true` without layers.
    pub fn is_empty(&self) -> bool { self.layers.is_empty() }
}

impl Widget for LayeredWidget {
    implement_widget_core!();

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let (rect, all) = match self.core.begin_draw(ctx.frame)? {
            Some(rect) => (rect, true),
            None if self.layers.iter().any(|l| l.dirty) => (self.core.rect(ctx.frame)?, false),
            None => return Ok(()),
        };
        let base = self.core.paint_input(rect);
        for layer in self.layers.iter_mut().filter(|l| all || l.dirty) {
            layer.draw(ctx, rect, &base)?;
        }
        Ok(())
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        for layer in &mut self.layers {
            layer.delete(batch);
        }
    }
}

/// Single texture stretched over the layer.
pub struct ImageLayer {
    background: TextureBackground,
}

impl ImageLayer {
    /// Layer showing `texture`.
    pub fn new(texture: TextureRef) -> Self { Self { background: TextureBackground::new(ButtonSkin::single(texture)) } }
}

impl Layer for ImageLayer {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> { self.background.init(ctx) }
    fn is_initialized(&self) -> bool { self.background.is_initialized() }
    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> { self.background.redraw(ctx, input) }
    fn delete(&mut self, batch: &mut dyn Batch) { self.background.delete(batch) }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// Named set of textures of which one is shown at a time.
pub struct DynImageLayer {
    images: Vec<(String, TextureRef)>,
    current: usize,
    background: TextureBackground,
}

impl DynImageLayer {
    /// Layer over `images`, showing the first one.
    pub fn new(images: Vec<(String, TextureRef)>) -> Result<Self> {
        let Some((_, first)) = images.first() else { return Err(GuiError::EmptyImageList) };
        let background = TextureBackground::new(ButtonSkin::single(first.clone()));
        Ok(Self { images, current: 0, background })
    }

    /// Name of the image shown.
    pub fn current(&self) -> &str { &self.images[self.current].0 }

    /// Shows the image registered as `name`.
    pub fn switch_image(&mut self, name: &str) -> Result<()> {
        let at = self.images.iter().position(|(n, _)| n == name).ok_or_else(|| GuiError::TextureNotFound { name: name.to_string(), category: "layer".into() })?;
        self.current = at;
        self.background.set_skin(ButtonSkin::single(self.images[at].1.clone()));
        Ok(())
    }
}

impl Layer for DynImageLayer {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> { self.background.init(ctx) }
    fn is_initialized(&self) -> bool { self.background.is_initialized() }
    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> { self.background.redraw(ctx, input) }
    fn delete(&mut self, batch: &mut dyn Batch) { self.background.delete(batch) }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// Single-line text.
pub struct LabelLayer {
    label: TextLabel,
    ready: bool,
}

impl LabelLayer {
    /// Centered plain text.
    pub fn new(text: impl Into<TextSource>) -> Self { Self { label: TextLabel::new(text), ready: false } }

    /// Text collaborator, for font, color and anchor changes.
    pub fn label_mut(&mut self) -> &mut TextLabel { &mut self.label }
}

impl Layer for LabelLayer {
    fn init(&mut self, _ctx: &mut DrawCtx) -> Result<()> {
        self.ready = true;
        Ok(())
    }
    fn is_initialized(&self) -> bool { self.ready }
    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> { self.label.draw(ctx, input.rect, input.visible) }
    fn delete(&mut self, batch: &mut dyn Batch) {
        self.label.delete(batch);
        self.ready = false;
    }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// Rich text parsed from the markup subset of [`parse_markup`].
pub struct FormattedLabelLayer {
    label: TextLabel,
    ready: bool,
}

impl FormattedLabelLayer {
    /// Formatted text. Literal markup is checked right away.
    pub fn new(text: impl Into<TextSource>) -> Result<Self> {
        let source = text.into();
        if let TextSource::Literal(s) = &source {
            parse_markup(s)?;
        }
        Ok(Self { label: TextLabel::formatted(source), ready: false })
    }

    /// Text collaborator.
    pub fn label_mut(&mut self) -> &mut TextLabel { &mut self.label }
}

impl Layer for FormattedLabelLayer {
    fn init(&mut self, _ctx: &mut DrawCtx) -> Result<()> {
        self.ready = true;
        Ok(())
    }
    fn is_initialized(&self) -> bool { self.ready }
    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> { self.label.draw(ctx, input.rect, input.visible) }
    fn delete(&mut self, batch: &mut dyn Batch) {
        self.label.delete(batch);
        self.ready = false;
    }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// 3x3 border grid colored by a [`BorderStyle`], with independent widths per edge.
pub struct BorderLayer {
    style: BorderStyle,
    edges: Edges,
    change_on_press: bool,
    prim: Option<QuadPrim>,
}

impl BorderLayer {
    /// Border layer. The style is checked against the 9-quad shape.
    pub fn new(style: BorderStyle, edges: Edges, theme: &Theme) -> Result<Self> {
        style.validate(BorderShape::Border9, theme)?;
        Ok(Self { style, edges, change_on_press: true, prim: None })
    }

    /// Whether the pressed state changes the colors.
    pub fn set_change_on_press(&mut self, change_on_press: bool) { self.change_on_press = change_on_press }

    /// Edge widths.
    pub fn edges(&self) -> Edges { self.edges }

    /// Changes the edge widths.
    pub fn set_edges(&mut self, edges: Edges) { self.edges = edges }
}

impl Layer for BorderLayer {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        self.prim = Some(QuadPrim::new(ctx.batch, 9, ctx.group));
        Ok(())
    }

    fn is_initialized(&self) -> bool { self.prim.is_some() }

    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> {
        let Some(prim) = &self.prim else { return Ok(()) };
        if !input.visible {
            return prim.hide(ctx.batch);
        }
        let state = InteractionState::from_flags(input.flags).with_change_on_press(self.change_on_press);
        let colors = self.style.colors(BorderShape::Border9, &ctx.palette, state, ctx.theme)?;
        prim.write(ctx.batch, &border9_positions(input.rect, self.edges), &flatten_colors(&colors))
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        if let Some(prim) = self.prim.take() {
            prim.release(batch);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// Texture drawn as a frame-scaled 9-patch.
pub struct FramedImageLayer {
    texture: TextureRef,
    patch: NinePatch,
    tint: Color,
    group: Option<GroupId>,
    prim: Option<QuadPrim>,
}

impl FramedImageLayer {
    /// 9-patch layer over `texture`.
    pub fn new(texture: TextureRef, patch: NinePatch) -> Self { Self { texture, patch, tint: Color::WHITE, group: None, prim: None } }

    /// Multiplies every texel with `tint`.
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

impl Layer for FramedImageLayer {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let region = ctx.resources.texture(&self.texture.name, &self.texture.category)?;
        let group = ctx.batch.create_group(region.group_kind(), ctx.group);
        self.group = Some(group);
        self.prim = Some(QuadPrim::new(ctx.batch, 9, Some(group)));
        Ok(())
    }

    fn is_initialized(&self) -> bool { self.prim.is_some() }

    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> {
        let (Some(prim), Some(group)) = (&mut self.prim, self.group) else { return Ok(()) };
        if !input.visible {
            return prim.hide(ctx.batch);
        }
        let region = ctx.resources.texture(&self.texture.name, &self.texture.category)?;
        let quads = self.patch.generate(input.rect, &region)?;
        prim.resize(ctx.batch, quads.len(), Some(group));
        let positions: Vec<Vec2f> = quads.iter().flat_map(|q| q.pos).collect();
        let coords: Vec<Vec2f> = quads.iter().flat_map(|q| q.uv).collect();
        prim.write(ctx.batch, &positions, &vec![self.tint; positions.len()])?;
        ctx.batch.set_tex_coords(prim.id(), &coords)
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        if let Some(prim) = self.prim.take() {
            prim.release(batch);
        }
        if let Some(group) = self.group.take() {
            batch.delete_group(group);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn flat_layer(theme: &Theme) -> BorderLayer { BorderLayer::new(StyleRegistry::new().get("flat").unwrap(), Edges::uniform(2.0), theme).unwrap() }

    #[test]
    fn layers_draw_in_ascending_z_order() {
        let mut scene = Scene::new();
        let mut w = LayeredWidget::new("stack", (10.0, 10.0), (100.0, 50.0));
        w.add_layer("two", 2.0, ImageLayer::new(TextureRef::new("pressed", "gui"))).unwrap();
        scene.draw(&mut w);
        w.add_layer("zero", 0.0, ImageLayer::new(TextureRef::new("idle", "gui"))).unwrap();
        w.add_layer("one", 1.0, ImageLayer::new(TextureRef::new("hover", "gui"))).unwrap();
        assert_eq!(w.layer_names(), vec!["zero", "one", "two"]);
        scene.draw(&mut w);

        // allocated as two, zero, one
        let ids = scene.batch.primitive_ids();
        assert_eq!(scene.batch.draw_list(), vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut scene = Scene::new();
        let theme = scene.theme.clone();
        let mut w = LayeredWidget::new("stack", (0.0, 0.0), (100.0, 50.0));
        w.add_layer("b", 1.0, flat_layer(&theme)).unwrap();
        w.add_layer("a", 1.0, flat_layer(&theme)).unwrap();
        w.add_layer("c", 0.5, flat_layer(&theme)).unwrap();
        assert_eq!(w.layer_names(), vec!["c", "b", "a"]);
        scene.draw(&mut w);
        let ids = scene.batch.primitive_ids();
        assert_eq!(scene.batch.draw_list(), vec![ids[0], ids[1], ids[2]]);
        assert!(w.add_layer("a", 3.0, flat_layer(&theme)).is_err());
    }

    #[test]
    fn layer_is_offset_and_inset() {
        let mut scene = Scene::new();
        let mut w = LayeredWidget::new("w", (10.0, 20.0), (100.0, 50.0));
        w.add_layer_at("img", 0.0, vec2f(5.0, 5.0), Edges::uniform(10.0), ImageLayer::new(TextureRef::new("idle", "gui"))).unwrap();
        scene.draw(&mut w);
        let id = scene.batch.primitive_ids()[0];
        let positions = &scene.batch.primitive(id).unwrap().positions;
        assert_eq!((positions[0].x, positions[0].y), (25.0, 35.0));
        assert_eq!((positions[2].x, positions[2].y), (105.0, 65.0));
    }

    #[test]
    fn single_layer_redraws_alone() {
        let mut scene = Scene::new();
        let theme = scene.theme.clone();
        let mut w = LayeredWidget::new("w", (0.0, 0.0), (100.0, 50.0));
        w.add_layer("frame", 0.0, flat_layer(&theme)).unwrap();
        w.add_layer("skin", 1.0, DynImageLayer::new(vec![("idle".into(), TextureRef::new("idle", "gui")), ("hover".into(), TextureRef::new("hover", "gui"))]).unwrap()).unwrap();
        scene.draw(&mut w);
        let skin = scene.batch.primitive_ids()[1];
        let before = scene.batch.primitive(skin).unwrap().tex_coords[0];

        w.layer_mut::<DynImageLayer>("skin").unwrap().switch_image("hover").unwrap();
        assert!(!w.get_layer("frame").unwrap().is_dirty());
        assert!(w.get_layer("skin").unwrap().is_dirty());
        scene.draw(&mut w);
        let after = scene.batch.primitive(skin).unwrap().tex_coords[0];
        assert_ne!((after.x, after.y), (before.x, before.y));
        assert!(!w.get_layer("skin").unwrap().is_dirty());
        assert_eq!(w.layer_mut::<DynImageLayer>("skin").unwrap().current(), "hover");
        assert!(w.layer_mut::<DynImageLayer>("skin").unwrap().switch_image("pressed").is_err());
    }

    #[test]
    fn wrong_layer_type_leaves_layer_clean() {
        let mut scene = Scene::new();
        let mut w = LayeredWidget::new("w", (0.0, 0.0), (100.0, 50.0));
        w.add_layer("img", 0.0, ImageLayer::new(TextureRef::new("idle", "gui"))).unwrap();
        scene.draw(&mut w);
        assert!(w.layer_mut::<LabelLayer>("img").is_err());
        assert!(!w.get_layer("img").unwrap().is_dirty());
        assert!(w.layer_mut::<ImageLayer>("img").is_ok());
        assert!(w.get_layer("img").unwrap().is_dirty());
    }

    #[test]
    fn dynamic_image_layer_needs_an_image() {
        assert_eq!(DynImageLayer::new(Vec::new()).err(), Some(GuiError::EmptyImageList));
    }

    #[test]
    fn missing_layer_is_reported() {
        let mut w = LayeredWidget::new("w", (0.0, 0.0), (10.0, 10.0));
        w.add_layer("text", 0.0, LabelLayer::new("hi")).unwrap();
        assert!(matches!(w.get_layer("nope"), Err(GuiError::LayerNotFound(_))));
        assert!(matches!(w.layer_mut::<ImageLayer>("text"), Err(GuiError::LayerNotFound(_))));
    }

    #[test]
    fn formatted_layer_rejects_bad_markup() {
        assert!(FormattedLabelLayer::new("<b>bold</b> and <i>italic</i>").is_ok());
        assert!(matches!(FormattedLabelLayer::new("<b>open"), Err(GuiError::Markup { .. })));
    }

    #[test]
    fn framed_image_tiles_and_resizes() {
        let mut scene = Scene::new();
        let patch = NinePatch::new(FrameRatio::new([1.0, 2.0, 1.0], [1.0, 2.0, 1.0]), 1.0, true, false).unwrap();
        let mut w = LayeredWidget::new("w", (0.0, 0.0), (40.0, 16.0));
        w.add_layer("frame", 0.0, FramedImageLayer::new(TextureRef::new("idle", "gui"), patch)).unwrap();
        scene.draw(&mut w);
        let id = scene.batch.primitive_ids()[0];
        let quads = scene.batch.primitive(id).unwrap().positions.len() / 4;
        assert!(quads > 9);
    }

    #[test]
    fn delete_releases_every_layer() {
        let mut scene = Scene::new();
        let theme = scene.theme.clone();
        let mut w = LayeredWidget::new("w", (0.0, 0.0), (100.0, 50.0));
        w.add_layer("frame", 0.0, flat_layer(&theme)).unwrap();
        w.add_layer("img", 1.0, ImageLayer::new(TextureRef::new("idle", "gui"))).unwrap();
        w.add_layer("text", 2.0, LabelLayer::new("x")).unwrap();
        scene.draw(&mut w);
        assert_eq!(scene.batch.live_labels(), 1);
        w.delete(&mut scene.batch);
        assert_eq!(scene.batch.live_primitives(), 0);
        assert_eq!(scene.batch.live_labels(), 0);
        assert_eq!(scene.batch.live_groups(), 0);
    }
}
