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
//! Push buttons, toggles, checkboxes and image buttons.
use super::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// How a button reacts to clicks.
pub enum PressMode {
    #[default]
    /// Pressed only while the primary button is held.
    Momentary,
    /// Each click flips a latched pressed state.
    Toggle,
}

/// Clickable widget painted by a pluggable [`Background`], with an optional centered label.
///
/// Checkboxes and image buttons are buttons with a different paint strategy: see [`Button::checkbox`]
/// and [`Button::image`].
pub struct Button {
    core: WidgetCore,
    background: Box<dyn Background>,
    label: Option<TextLabel>,
    mode: PressMode,
    armed: bool,
}

impl Button {
    /// Momentary button with the standard bevelled border.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>) -> Self {
        Self {
            core: WidgetCore::new(name, pos, size),
            background: Box::new(ButtonBackground::standard()),
            label: None,
            mode: PressMode::Momentary,
            armed: false,
        }
    }

    /// Toggle button painted with a check mark while latched.
    pub fn checkbox(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>) -> Self {
        Self::new(name, pos, size).with_background(CheckboxBackground::standard()).toggle()
    }

    /// Button painted by a per-state texture skin.
    pub fn image(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, skin: ButtonSkin) -> Self {
        Self::new(name, pos, size).with_background(TextureBackground::new(skin))
    }

    /// Adds a plain label.
    pub fn with_label(mut self, text: impl Into<TextSource>) -> Self {
        self.label = Some(TextLabel::new(text));
        self
    }

    /// Adds a label parsed as markup.
    pub fn with_formatted_label(mut self, text: impl Into<TextSource>) -> Self {
        self.label = Some(TextLabel::formatted(text));
        self
    }

    /// Paints the border with `style`, validated against the button shape.
    pub fn with_style(self, style: BorderStyle, theme: &Theme) -> Result<Self> {
        let bg = ButtonBackground::new(style, theme.border, theme)?;
        Ok(self.with_background(bg))
    }

    /// Paints the border with the style registered as `name`.
    pub fn with_style_name(self, registry: &StyleRegistry, name: &str, theme: &Theme) -> Result<Self> { self.with_style(registry.get(name)?, theme) }

    /// Replaces the paint strategy.
    pub fn with_background(mut self, background: impl Background + 'static) -> Self {
        self.background = Box::new(background);
        self
    }

    /// Switches to toggle mode.
    pub fn toggle(mut self) -> Self {
        self.mode = PressMode::Toggle;
        self
    }

    /// Click behavior.
    pub fn mode(&self) -> PressMode { self.mode }

    /// Current label text.
    pub fn label(&self) -> Option<String> { self.label.as_ref().map(|l| l.text()) }

    /// Replaces the label text.
    pub fn set_label(&mut self, text: impl Into<TextSource>) {
        match &mut self.label {
            Some(label) => label.set_text(text),
            None => self.label = Some(TextLabel::new(text)),
        }
        self.core.redraw();
    }

    /// Latched state of a toggle.
    pub fn checked(&self) -> bool { self.core.is_pressed() }

    /// Latches or releases a toggle without firing actions.
    pub fn set_checked(&mut self, checked: bool) { self.core.set_flag(InteractionFlags::PRESSED, checked); }

    /// Paint strategy.
    pub fn background(&self) -> &dyn Background { self.background.as_ref() }
}

impl Widget for Button {
    implement_widget_core!();

    fn on_mouse_press(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        if self.mode == PressMode::Momentary || !button.is_left() {
            let keys = self.core.pointer_press(rect, p, button);
            return Ok(self.core.fire(&keys));
        }
        if !self.core.accepts_pointer() || !rect.contains(p) {
            return Ok(Fired::none());
        }
        self.armed = true;
        Ok(self.core.fire(&[ActionKey::Press]))
    }

    fn on_mouse_release(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        if self.mode == PressMode::Momentary {
            let keys = self.core.pointer_release(rect, p, button);
            return Ok(self.core.fire(&keys));
        }
        if !button.is_left() || !std::mem::take(&mut self.armed) || !self.core.accepts_pointer() || !rect.contains(p) {
            return Ok(Fired::none());
        }
        let latched = !self.core.is_pressed();
        self.core.set_flag(InteractionFlags::PRESSED, latched);
        let edge = if latched { ActionKey::PressDown } else { ActionKey::PressUp };
        Ok(self.core.fire(&[ActionKey::Click, edge]))
    }

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let Some(rect) = self.core.begin_draw(ctx.frame)? else { return Ok(()) };
        if !self.background.is_initialized() {
            self.background.init(ctx)?;
        }
        self.background.redraw(ctx, &self.core.paint_input(rect))?;
        if let Some(label) = &mut self.label {
            label.draw(ctx, rect, self.core.visible())?;
        }
        Ok(())
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        self.background.delete(batch);
        if let Some(label) = &mut self.label {
            label.delete(batch);
        }
    }

    fn self_heals(&self) -> bool { true }
}
