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
//! Passive widgets: text labels and static images.
use super::*;

/// Text-only widget. Dynamic text is looked up again on every regeneration, so a redraw after a
/// language switch re-lays the label out.
pub struct Label {
    core: WidgetCore,
    text: TextLabel,
}

impl Label {
    /// Plain label centered in its rectangle.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, text: impl Into<TextSource>) -> Self {
        Self { core: WidgetCore::new(name, pos, size), text: TextLabel::new(text) }
    }

    /// Label parsed as markup.
    pub fn formatted(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, text: impl Into<TextSource>) -> Self {
        Self { core: WidgetCore::new(name, pos, size), text: TextLabel::formatted(text) }
    }

    /// Sets the alignment.
    pub fn with_anchor(mut self, anchor_x: AnchorX, anchor_y: AnchorY) -> Self {
        self.text = self.text.with_anchor(anchor_x, anchor_y);
        self
    }

    /// Sets the font.
    pub fn with_font(mut self, font: &str, size: Real) -> Self {
        self.text = self.text.with_font(font, size);
        self
    }

    /// Sets the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.text = self.text.with_color(color);
        self
    }

    /// Current text.
    pub fn text(&self) -> String { self.text.text() }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<TextSource>) {
        self.text.set_text(text);
        self.core.redraw();
    }

    /// Size the text collaborator needs for the current text.
    pub fn content_size(&self, batch: &dyn Batch, theme: &Theme) -> Result<Vec2f> { self.text.measure(batch, theme) }
}

impl Widget for Label {
    implement_widget_core!();

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let Some(rect) = self.core.begin_draw(ctx.frame)? else { return Ok(()) };
        self.text.draw(ctx, rect, self.core.visible())
    }

    fn delete(&mut self, batch: &mut dyn Batch) { self.text.delete(batch) }
}

/// Single textured quad.
pub struct ImageWidget {
    core: WidgetCore,
    background: TextureBackground,
}

impl ImageWidget {
    /// Image widget showing `texture`.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, texture: TextureRef) -> Self {
        Self { core: WidgetCore::new(name, pos, size), background: TextureBackground::new(ButtonSkin::single(texture)) }
    }

    /// Texture shown.
    pub fn texture(&self) -> &TextureRef { &self.background.skin().idle }

    /// Shows another texture.
    pub fn set_texture(&mut self, texture: TextureRef) {
        self.background.set_skin(ButtonSkin::single(texture));
        self.core.redraw();
    }
}

impl Widget for ImageWidget {
    implement_widget_core!();

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let Some(rect) = self.core.begin_draw(ctx.frame)? else { return Ok(()) };
        if !self.background.is_initialized() {
            self.background.init(ctx)?;
        }
        self.background.redraw(ctx, &self.core.paint_input(rect))
    }

    fn delete(&mut self, batch: &mut dyn Batch) { self.background.delete(batch) }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn translated_label_updates_after_language_change() {
        let mut scene = Scene::new();
        let lang = Rc::new(RefCell::new("Quit"));
        let l2 = lang.clone();
        let label = Label::new("title", (0.0, 500.0), (200.0, 40.0), TextSource::Dynamic(Rc::new(move || l2.borrow().to_string())));
        let handle = WidgetHandle::new(label);
        let notifier = LanguageNotifier::new();
        handle.redraw_on_language(&notifier);
        scene.draw(&mut *handle.borrow_mut());
        *lang.borrow_mut() = "Beenden";
        scene.draw(&mut *handle.borrow_mut());
        let id = scene.batch.label_ids()[0];
        assert_eq!(scene.batch.label(id).unwrap().text(), "Quit");
        notifier.notify().run();
        scene.draw(&mut *handle.borrow_mut());
        assert_eq!(scene.batch.label(id).unwrap().text(), "Beenden");
    }

    #[test]
    fn label_position_follows_geometry() {
        let mut scene = Scene::new();
        let mut label = Label::new("l", (100.0, 100.0), (50.0, 20.0), "x").with_anchor(AnchorX::Right, AnchorY::Bottom);
        scene.draw(&mut label);
        let id = scene.batch.label_ids()[0];
        assert_eq!(scene.batch.label(id).unwrap().pos.x, 150.0);
        assert_eq!(scene.batch.label(id).unwrap().pos.y, 100.0);
        assert_eq!(label.content_size(&scene.batch, &scene.theme).unwrap().x, 8.0);
    }

    #[test]
    fn image_texture_can_be_swapped() {
        let mut scene = Scene::new();
        let mut img = ImageWidget::new("img", (0.0, 0.0), (16.0, 16.0), TextureRef::new("idle", "gui"));
        scene.draw(&mut img);
        let id = scene.batch.primitive_ids()[0];
        let before = scene.batch.primitive(id).unwrap().tex_coords[0].x;
        img.set_texture(TextureRef::new("pressed", "gui"));
        scene.draw(&mut img);
        assert_ne!(scene.batch.primitive(id).unwrap().tex_coords[0].x, before);
        assert_eq!(img.texture().name, "pressed");
    }

    #[test]
    fn missing_texture_surfaces_on_first_draw() {
        let mut scene = Scene::new();
        let mut img = ImageWidget::new("img", (0.0, 0.0), (16.0, 16.0), TextureRef::new("nope", "gui"));
        let palette = Palette::from_background(scene.theme.background, &scene.theme);
        let mut ctx = DrawCtx { batch: &mut scene.batch, resources: &scene.atlas, theme: &scene.theme, palette, group: None, frame: scene.frame };
        assert!(matches!(img.draw(&mut ctx), Err(GuiError::TextureNotFound { .. })));
    }
}
