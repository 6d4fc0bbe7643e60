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
//! Paint strategies for widgets.
//!
//! A widget owns one [`Background`] that allocates its primitives lazily on the first redraw and
//! regenerates vertex positions and colors from the widget state on every later redraw.
use super::*;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
/// Per-edge widths.
pub struct Edges {
    /// Left edge.
    pub left: Real,
    /// Right edge.
    pub right: Real,
    /// Bottom edge.
    pub bottom: Real,
    /// Top edge.
    pub top: Real,
}

impl Edges {
    /// Same width on every edge.
    pub fn uniform(v: Real) -> Self { Self { left: v, right: v, bottom: v, top: v } }

    /// `x` on the left and right edges, `y` on the bottom and top edges.
    pub fn symmetric(x: Real, y: Real) -> Self { Self { left: x, right: x, bottom: y, top: y } }

    /// Shrinks `rect` by these edges.
    pub fn shrink(&self, rect: Frame) -> Frame { rect.inset(self.left, self.right, self.bottom, self.top) }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Direction a bar fills in.
pub enum Orientation {
    #[default]
    /// Fills left to right.
    Horizontal,
    /// Fills top to bottom.
    Vertical,
}

#[derive(Copy, Clone, Debug)]
/// Widget state handed to a background on redraw.
pub struct PaintInput {
    /// Resolved widget rectangle.
    pub rect: Frame,
    /// Interaction flags.
    pub flags: InteractionFlags,
    /// Hidden widgets collapse their primitives.
    pub visible: bool,
    /// Disabled widgets use their disabled skin, if any.
    pub enabled: bool,
    /// Filled fraction for progress bars and sliders, in `[0, 1]`.
    pub fraction: Real,
    /// Slider handle rectangle.
    pub handle: Option<Frame>,
}

impl PaintInput {
    /// Input for a plain widget rectangle.
    pub fn new(rect: Frame, flags: InteractionFlags) -> Self { Self { rect, flags, visible: true, enabled: true, fraction: 0.0, handle: None } }
}

/// Paint strategy of a widget.
pub trait Background {
    /// Allocates the primitives. Called once, before the first redraw.
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()>;
    /// Returns `true` once [`Background::init`] ran.
    fn is_initialized(&self) -> bool;
    /// Regenerates vertex data from `input`.
    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()>;
    /// Colors the background would use in `state`.
    fn colors(&self, _palette: &Palette, _state: InteractionState, _theme: &Theme) -> Result<Vec<QuadColors>> { Ok(Vec::new()) }
    /// Releases the primitives.
    fn delete(&mut self, batch: &mut dyn Batch);
}

#[derive(Default)]
/// Background that draws nothing.
pub struct EmptyBackground {
    initialized: bool,
}

impl Background for EmptyBackground {
    fn init(&mut self, _ctx: &mut DrawCtx) -> Result<()> {
        self.initialized = true;
        Ok(())
    }
    fn is_initialized(&self) -> bool { self.initialized }
    fn redraw(&mut self, _ctx: &mut DrawCtx, _input: &PaintInput) -> Result<()> { Ok(()) }
    fn delete(&mut self, _batch: &mut dyn Batch) {}
}

/// Vertex positions of the five button quads, in [`BorderShape::Button5`] order.
pub fn button5_positions(rect: Frame, border: Vec2f) -> Vec<Vec2f> {
    let inner = rect.inset(border.x, border.x, border.y, border.y);
    let (x0, y0, x3, y3) = (rect.left(), rect.bottom(), rect.right(), rect.top());
    let (x1, y1, x2, y2) = (inner.left(), inner.bottom(), inner.right(), inner.top());
    let mut v = vec![
        // top
        vec2f(x3, y3),
        vec2f(x0, y3),
        vec2f(x1, y2),
        vec2f(x2, y2),
        // right
        vec2f(x3, y0),
        vec2f(x3, y3),
        vec2f(x2, y2),
        vec2f(x2, y1),
        // bottom
        vec2f(x0, y0),
        vec2f(x3, y0),
        vec2f(x2, y1),
        vec2f(x1, y1),
        // left
        vec2f(x0, y3),
        vec2f(x0, y0),
        vec2f(x1, y1),
        vec2f(x1, y2),
    ];
    v.extend_from_slice(&inner.corners());
    v
}

/// Vertex positions of the 3x3 border grid, in [`BorderShape::Border9`] order.
pub fn border9_positions(rect: Frame, edges: Edges) -> Vec<Vec2f> {
    let x1 = (rect.left() + edges.left).min(rect.right());
    let y1 = (rect.bottom() + edges.bottom).min(rect.top());
    let xs = [rect.left(), x1, (rect.right() - edges.right).max(x1), rect.right()];
    let ys = [rect.bottom(), y1, (rect.top() - edges.top).max(y1), rect.top()];
    let mut v = Vec::with_capacity(36);
    for row in 0..3 {
        for col in 0..3 {
            v.push(vec2f(xs[col], ys[row]));
            v.push(vec2f(xs[col + 1], ys[row]));
            v.push(vec2f(xs[col + 1], ys[row + 1]));
            v.push(vec2f(xs[col], ys[row + 1]));
        }
    }
    v
}

/// Vertex positions of the filled and remaining parts of a bar.
pub fn progress_positions(rect: Frame, fraction: Real, orientation: Orientation) -> Vec<Vec2f> {
    let f = fraction.clamp(0.0, 1.0);
    let (filled, rest) = match orientation {
        Orientation::Horizontal => {
            let w = rect.size.x * f;
            (Frame::new(rect.pos, vec2f(w, rect.size.y)), Frame::new(vec2f(rect.left() + w, rect.bottom()), vec2f(rect.size.x - w, rect.size.y)))
        }
        Orientation::Vertical => {
            let h = rect.size.y * f;
            (Frame::new(vec2f(rect.left(), rect.top() - h), vec2f(rect.size.x, h)), Frame::new(rect.pos, vec2f(rect.size.x, rect.size.y - h)))
        }
    };
    let mut v = filled.corners().to_vec();
    v.extend_from_slice(&rest.corners());
    v
}

/// Five-quad bevelled border colored by a [`BorderStyle`].
pub struct ButtonBackground {
    style: BorderStyle,
    border: Option<Vec2f>,
    change_on_press: bool,
    prim: Option<QuadPrim>,
}

impl ButtonBackground {
    /// Creates the background, validating the style against the shape.
    pub fn new(style: BorderStyle, border: Vec2f, theme: &Theme) -> Result<Self> {
        style.validate(BorderShape::Button5, theme)?;
        Ok(Self { style, border: Some(border), change_on_press: true, prim: None })
    }

    /// Background painted with the built-in `oldshadow` style and the border width of the theme it is
    /// drawn with.
    pub fn standard() -> Self { Self { style: BorderStyle::new("oldshadow", oldshadow), border: None, change_on_press: true, prim: None } }

    /// Whether the pressed state changes the colors.
    pub fn set_change_on_press(&mut self, change_on_press: bool) { self.change_on_press = change_on_press }

    /// Border width when drawn with `theme`.
    pub fn border(&self, theme: &Theme) -> Vec2f { self.border.unwrap_or(theme.border) }

    /// Style in use.
    pub fn style(&self) -> &BorderStyle { &self.style }

    pub(crate) fn state(&self, flags: InteractionFlags) -> InteractionState { InteractionState::from_flags(flags).with_change_on_press(self.change_on_press) }

    pub(crate) fn primitive(&self) -> Option<PrimitiveId> { self.prim.as_ref().map(|p| p.id()) }
}

impl Background for ButtonBackground {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        self.prim = Some(QuadPrim::new(ctx.batch, 5, ctx.group));
        Ok(())
    }

    fn is_initialized(&self) -> bool { self.prim.is_some() }

    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> {
        let Some(prim) = &self.prim else { return Ok(()) };
        if !input.visible {
            return prim.hide(ctx.batch);
        }
        let colors = self.colors(&ctx.palette, self.state(input.flags), ctx.theme)?;
        prim.write(ctx.batch, &button5_positions(input.rect, self.border(ctx.theme)), &flatten_colors(&colors))
    }

    fn colors(&self, palette: &Palette, state: InteractionState, theme: &Theme) -> Result<Vec<QuadColors>> {
        self.style.colors(BorderShape::Button5, palette, state, theme)
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        if let Some(prim) = self.prim.take() {
            prim.release(batch);
        }
    }
}

/// Button border plus a check mark quad shown while the widget is pressed.
pub struct CheckboxBackground {
    frame: ButtonBackground,
    check: Option<QuadPrim>,
}

impl CheckboxBackground {
    /// Creates the background, validating the style against the shape.
    pub fn new(style: BorderStyle, border: Vec2f, theme: &Theme) -> Result<Self> {
        let mut frame = ButtonBackground::new(style, border, theme)?;
        frame.set_change_on_press(false);
        Ok(Self { frame, check: None })
    }

    /// Checkbox painted with the built-in `oldshadow` style.
    pub fn standard() -> Self {
        let mut frame = ButtonBackground::standard();
        frame.set_change_on_press(false);
        Self { frame, check: None }
    }

    pub(crate) fn check_primitive(&self) -> Option<PrimitiveId> { self.check.as_ref().map(|p| p.id()) }
}

impl Background for CheckboxBackground {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        self.frame.init(ctx)?;
        self.check = Some(QuadPrim::new(ctx.batch, 1, ctx.group));
        Ok(())
    }

    fn is_initialized(&self) -> bool { self.check.is_some() }

    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> {
        self.frame.redraw(ctx, input)?;
        let Some(check) = &self.check else { return Ok(()) };
        if !input.visible || !input.flags.is_pressed() {
            return check.hide(ctx.batch);
        }
        let b = self.frame.border(ctx.theme);
        let mark = input.rect.inset(b.x * 2.0, b.x * 2.0, b.y * 2.0, b.y * 2.0);
        check.write(ctx.batch, &mark.corners(), &[ctx.palette.shadow; 4])
    }

    fn colors(&self, palette: &Palette, state: InteractionState, theme: &Theme) -> Result<Vec<QuadColors>> { self.frame.colors(palette, state, theme) }

    fn delete(&mut self, batch: &mut dyn Batch) {
        self.frame.delete(batch);
        if let Some(check) = self.check.take() {
            check.release(batch);
        }
    }
}

/// Bar background: a button border around a split filled/remaining quad pair, with an optional
/// slider handle.
pub struct ProgressBackground {
    frame: ButtonBackground,
    orientation: Orientation,
    bar: Option<QuadPrim>,
    handle: Option<QuadPrim>,
    with_handle: bool,
}

impl ProgressBackground {
    /// Creates the background, validating the style against both shapes.
    pub fn new(style: BorderStyle, border: Vec2f, orientation: Orientation, theme: &Theme) -> Result<Self> {
        style.validate(BorderShape::ProgressSplit, theme)?;
        let mut frame = ButtonBackground::new(style, border, theme)?;
        frame.set_change_on_press(false);
        Ok(Self { frame, orientation, bar: None, handle: None, with_handle: false })
    }

    /// Bar painted with the built-in `oldshadow` style.
    pub fn standard(orientation: Orientation) -> Self {
        let mut frame = ButtonBackground::standard();
        frame.set_change_on_press(false);
        Self { frame, orientation, bar: None, handle: None, with_handle: false }
    }

    /// Adds a handle quad drawn at [`PaintInput::handle`].
    pub fn with_handle(mut self) -> Self {
        self.with_handle = true;
        self
    }

    pub(crate) fn bar_primitive(&self) -> Option<PrimitiveId> { self.bar.as_ref().map(|p| p.id()) }
}

impl Background for ProgressBackground {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        self.frame.init(ctx)?;
        self.bar = Some(QuadPrim::new(ctx.batch, 2, ctx.group));
        if self.with_handle {
            self.handle = Some(QuadPrim::new(ctx.batch, 1, ctx.group));
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool { self.bar.is_some() }

    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> {
        self.frame.redraw(ctx, input)?;
        let Some(bar) = &self.bar else { return Ok(()) };
        if !input.visible {
            bar.hide(ctx.batch)?;
            if let Some(handle) = &self.handle {
                handle.hide(ctx.batch)?;
            }
            return Ok(());
        }
        let b = self.frame.border(ctx.theme);
        let inner = input.rect.inset(b.x, b.x, b.y, b.y);
        let state = InteractionState::from_flags(input.flags);
        let colors = self.colors(&ctx.palette, state, ctx.theme)?;
        bar.write(ctx.batch, &progress_positions(inner, input.fraction, self.orientation), &flatten_colors(&colors))?;
        if let (Some(handle), Some(rect)) = (&self.handle, input.handle) {
            let knob = self.frame.colors(&ctx.palette, state, ctx.theme)?;
            handle.write(ctx.batch, &rect.corners(), &knob[4])?;
        }
        Ok(())
    }

    fn colors(&self, palette: &Palette, state: InteractionState, theme: &Theme) -> Result<Vec<QuadColors>> {
        self.frame.style().colors(BorderShape::ProgressSplit, palette, state, theme)
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        self.frame.delete(batch);
        for prim in [self.bar.take(), self.handle.take()].into_iter().flatten() {
            prim.release(batch);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Named texture in a resource category.
pub struct TextureRef {
    /// Texture name.
    pub name: String,
    /// Resource category.
    pub category: String,
}

impl TextureRef {
    /// Creates a texture reference.
    pub fn new(name: &str, category: &str) -> Self { Self { name: name.to_string(), category: category.to_string() } }
}

#[derive(Clone, Debug)]
/// Textures of an image button. Missing states fall back to `idle`.
pub struct ButtonSkin {
    /// Idle texture.
    pub idle: TextureRef,
    /// Hover texture.
    pub hover: Option<TextureRef>,
    /// Pressed texture.
    pub pressed: Option<TextureRef>,
    /// Disabled texture.
    pub disabled: Option<TextureRef>,
}

impl ButtonSkin {
    /// Skin with a single texture for every state.
    pub fn single(texture: TextureRef) -> Self { Self { idle: texture, hover: None, pressed: None, disabled: None } }

    /// Texture for the given widget state.
    pub fn select(&self, flags: InteractionFlags, enabled: bool) -> &TextureRef {
        let pick = if !enabled {
            self.disabled.as_ref()
        } else {
            match InteractionState::from_flags(flags) {
                InteractionState::Pressed => self.pressed.as_ref(),
                InteractionState::Hover => self.hover.as_ref(),
                InteractionState::Idle => None,
            }
        };
        pick.unwrap_or(&self.idle)
    }
}

/// Textured quad background with a per-state skin.
pub struct TextureBackground {
    skin: ButtonSkin,
    group: Option<GroupId>,
    prim: Option<QuadPrim>,
}

impl TextureBackground {
    /// Creates a skinned background.
    pub fn new(skin: ButtonSkin) -> Self { Self { skin, group: None, prim: None } }

    /// Replaces the skin. Takes effect on the next redraw.
    pub fn set_skin(&mut self, skin: ButtonSkin) { self.skin = skin }

    /// Current skin.
    pub fn skin(&self) -> &ButtonSkin { &self.skin }

    pub(crate) fn primitive(&self) -> Option<PrimitiveId> { self.prim.as_ref().map(|p| p.id()) }
}

impl Background for TextureBackground {
    fn init(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let region = ctx.resources.texture(&self.skin.idle.name, &self.skin.idle.category)?;
        let group = ctx.batch.create_group(region.group_kind(), ctx.group);
        self.group = Some(group);
        self.prim = Some(QuadPrim::new(ctx.batch, 1, Some(group)));
        Ok(())
    }

    fn is_initialized(&self) -> bool { self.prim.is_some() }

    fn redraw(&mut self, ctx: &mut DrawCtx, input: &PaintInput) -> Result<()> {
        let (Some(prim), Some(group)) = (&self.prim, self.group) else { return Ok(()) };
        if !input.visible {
            return prim.hide(ctx.batch);
        }
        let tex = self.skin.select(input.flags, input.enabled);
        let region = ctx.resources.texture(&tex.name, &tex.category)?;
        ctx.batch.set_group(group, region.group_kind());
        prim.write(ctx.batch, &input.rect.corners(), &[Color::WHITE; 4])?;
        ctx.batch.set_tex_coords(prim.id(), &region.quad())
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        if let Some(prim) = self.prim.take() {
            prim.release(batch);
        }
        if let Some(group) = self.group.take() {
            batch.delete_group(group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        batch: MemoryBatch,
        atlas: TextureAtlas,
        theme: Theme,
    }

    impl Fixture {
        fn new() -> Self {
            let atlas = TextureAtlas::new();
            let page = atlas.add_page(64, 64);
            atlas.add_texture(page, "idle", "gui", Recti::new(0, 0, 32, 32));
            atlas.add_texture(page, "hover", "gui", Recti::new(32, 0, 32, 32));
            Self { batch: MemoryBatch::new(), atlas, theme: Theme::default() }
        }

        fn draw(&mut self, bg: &mut dyn Background, input: &PaintInput) {
            let palette = Palette::from_background(self.theme.background, &self.theme);
            let mut ctx = DrawCtx { batch: &mut self.batch, resources: &self.atlas, theme: &self.theme, palette, group: None, frame: Frame::from_size(800.0, 600.0) };
            if !bg.is_initialized() {
                bg.init(&mut ctx).unwrap();
            }
            bg.redraw(&mut ctx, input).unwrap();
        }
    }

    fn oldshadow() -> BorderStyle { StyleRegistry::new().get("oldshadow").unwrap() }

    #[test]
    fn button_positions_cover_outer_and_inner_rects() {
        let v = button5_positions(Frame::new(vec2f(0.0, 0.0), vec2f(100.0, 40.0)), vec2f(4.0, 4.0));
        assert_eq!(v.len(), 20);
        // top trapezoid: outer top-right, outer top-left, inner top-left, inner top-right
        assert_eq!((v[0].x, v[0].y), (100.0, 40.0));
        assert_eq!((v[2].x, v[2].y), (4.0, 36.0));
        // center quad
        assert_eq!((v[16].x, v[16].y), (4.0, 4.0));
        assert_eq!((v[18].x, v[18].y), (96.0, 36.0));
    }

    #[test]
    fn border9_supports_asymmetric_edges() {
        let edges = Edges { left: 1.0, right: 2.0, bottom: 3.0, top: 4.0 };
        let v = border9_positions(Frame::from_size(10.0, 20.0), edges);
        assert_eq!(v.len(), 36);
        // center quad bottom-left and top-right
        assert_eq!((v[16].x, v[16].y), (1.0, 3.0));
        assert_eq!((v[18].x, v[18].y), (8.0, 16.0));
    }

    #[test]
    fn progress_split_follows_fraction() {
        let v = progress_positions(Frame::from_size(100.0, 10.0), 0.25, Orientation::Horizontal);
        assert_eq!(v[1].x, 25.0);
        assert_eq!(v[4].x, 25.0);
        let v = progress_positions(Frame::from_size(10.0, 100.0), 0.25, Orientation::Vertical);
        assert_eq!(v[0].y, 75.0);
        assert_eq!(v[6].y, 75.0);
    }

    #[test]
    fn redraw_is_idempotent() {
        let mut fx = Fixture::new();
        let mut bg = ButtonBackground::new(oldshadow(), vec2f(4.0, 4.0), &fx.theme).unwrap();
        let input = PaintInput::new(Frame::new(vec2f(50.0, 50.0), vec2f(100.0, 40.0)), InteractionFlags::HOVERING);
        fx.draw(&mut bg, &input);
        let id = bg.primitive().unwrap();
        let first = fx.batch.primitive(id).cloned().unwrap();
        fx.draw(&mut bg, &input);
        let second = fx.batch.primitive(id).unwrap();
        assert_eq!(first.colors, second.colors);
        let same = first.positions.iter().zip(second.positions.iter()).all(|(a, b)| a.x == b.x && a.y == b.y);
        assert!(same);
    }

    #[test]
    fn pressed_output_depends_on_change_on_press() {
        let mut fx = Fixture::new();
        let rect = Frame::from_size(100.0, 40.0);
        for name in ["flat", "gradient", "oldshadow", "material"] {
            for change in [true, false] {
                let mut bg = ButtonBackground::new(StyleRegistry::new().get(name).unwrap(), vec2f(4.0, 4.0), &fx.theme).unwrap();
                bg.set_change_on_press(change);
                fx.draw(&mut bg, &PaintInput::new(rect, InteractionFlags::NONE));
                let idle = fx.batch.primitive(bg.primitive().unwrap()).unwrap().colors.clone();
                fx.draw(&mut bg, &PaintInput::new(rect, InteractionFlags::PRESSED));
                let pressed = fx.batch.primitive(bg.primitive().unwrap()).unwrap().colors.clone();
                if change && name != "flat" {
                    assert_ne!(idle, pressed, "{}", name);
                } else {
                    assert_eq!(idle, pressed, "{}", name);
                }
            }
        }
    }

    #[test]
    fn checkbox_mark_follows_pressed_state() {
        let mut fx = Fixture::new();
        let mut bg = CheckboxBackground::new(oldshadow(), vec2f(2.0, 2.0), &fx.theme).unwrap();
        let rect = Frame::from_size(20.0, 20.0);
        fx.draw(&mut bg, &PaintInput::new(rect, InteractionFlags::PRESSED));
        let mark = bg.check_primitive().unwrap();
        assert_eq!(fx.batch.primitive(mark).unwrap().positions[2].x, 16.0);
        fx.draw(&mut bg, &PaintInput::new(rect, InteractionFlags::NONE));
        assert_eq!(fx.batch.primitive(mark).unwrap().positions[2].x, 0.0);
    }

    #[test]
    fn skin_switches_texture_with_state() {
        let mut fx = Fixture::new();
        let skin = ButtonSkin { idle: TextureRef::new("idle", "gui"), hover: Some(TextureRef::new("hover", "gui")), pressed: None, disabled: None };
        let mut bg = TextureBackground::new(skin);
        let rect = Frame::from_size(32.0, 32.0);
        fx.draw(&mut bg, &PaintInput::new(rect, InteractionFlags::NONE));
        let id = bg.primitive().unwrap();
        assert_eq!(fx.batch.primitive(id).unwrap().tex_coords[0].x, 0.0);
        fx.draw(&mut bg, &PaintInput::new(rect, InteractionFlags::HOVERING));
        assert_eq!(fx.batch.primitive(id).unwrap().tex_coords[0].x, 0.5);
        bg.delete(&mut fx.batch);
        assert_eq!(fx.batch.live_primitives(), 0);
        assert_eq!(fx.batch.live_groups(), 0);
    }

    #[test]
    fn missing_skin_texture_fails_init() {
        let mut fx = Fixture::new();
        let mut bg = TextureBackground::new(ButtonSkin::single(TextureRef::new("nope", "gui")));
        let palette = Palette::from_background(fx.theme.background, &fx.theme);
        let mut ctx = DrawCtx { batch: &mut fx.batch, resources: &fx.atlas, theme: &fx.theme, palette, group: None, frame: Frame::default() };
        assert!(bg.init(&mut ctx).is_err());
    }
}
