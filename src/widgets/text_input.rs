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
//! Single-line text input with keyboard focus and a blinking cursor.
use super::text_edit::EditBuffer;
use super::*;

const CURSOR_WIDTH: Real = 2.0;

/// Editable text field.
///
/// A click inside focuses the field, a click outside unfocuses it. While focused it consumes text and
/// editing keys. The cursor blinks with a phase anchored at the moment focus was gained.
pub struct TextInput {
    core: WidgetCore,
    background: ButtonBackground,
    buffer: EditBuffer,
    label: TextLabel,
    cursor: Option<QuadPrim>,
    blink: Option<f64>,
    theme_blink: f64,
    now: f64,
    focused_at: f64,
    cursor_on: bool,
}

impl TextInput {
    /// Empty input.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>) -> Self {
        let mut background = ButtonBackground::standard();
        background.set_change_on_press(false);
        Self {
            core: WidgetCore::new(name, pos, size),
            background,
            buffer: EditBuffer::default(),
            label: TextLabel::new("").with_anchor(AnchorX::Left, AnchorY::Center),
            cursor: None,
            blink: None,
            theme_blink: Theme::default().cursor_blink,
            now: 0.0,
            focused_at: 0.0,
            cursor_on: false,
        }
    }

    /// Sets the initial content, cursor at the end.
    pub fn with_text(mut self, text: &str) -> Self {
        self.buffer = EditBuffer::new(text);
        self
    }

    /// Paints the frame with `style`.
    pub fn with_style(mut self, style: BorderStyle, theme: &Theme) -> Result<Self> {
        self.background = ButtonBackground::new(style, theme.border, theme)?;
        self.background.set_change_on_press(false);
        Ok(self)
    }

    /// Cursor blink half-period in seconds, instead of the one of the submenu theme.
    pub fn with_blink(mut self, blink: f64) -> Self {
        self.blink = Some(blink.max(f64::EPSILON));
        self
    }

    /// Current content.
    pub fn text(&self) -> &str { &self.buffer.text }

    /// Replaces the content without firing actions. The cursor moves to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = EditBuffer::new(text);
        self.core.redraw();
    }

    /// Cursor byte offset.
    pub fn cursor(&self) -> usize { self.buffer.cursor }

    /// Returns `true` while the cursor is shown.
    pub fn cursor_visible(&self) -> bool { self.core.is_focused() && self.cursor_on }

    /// Gives the field keyboard focus.
    pub fn focus(&mut self) -> Fired {
        if !self.core.set_flag(InteractionFlags::FOCUSED, true) {
            return Fired::none();
        }
        self.focused_at = self.now;
        self.cursor_on = true;
        self.core.fire(&[ActionKey::Focus])
    }

    /// Removes keyboard focus.
    pub fn unfocus(&mut self) -> Fired {
        if !self.core.set_flag(InteractionFlags::FOCUSED, false) {
            return Fired::none();
        }
        self.core.fire(&[ActionKey::Unfocus])
    }

    fn edited(&mut self, changed: bool, moved: bool) -> Fired {
        if !changed && !moved {
            return Fired::none();
        }
        // typing restarts the blink so the cursor stays visible while editing
        self.focused_at = self.now;
        self.cursor_on = true;
        self.core.redraw();
        if changed { self.core.fire(&[ActionKey::TextChange]) } else { Fired::none() }
    }
}

impl Widget for TextInput {
    implement_widget_core!();

    fn on_mouse_press(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        if !self.core.accepts_pointer() || !button.is_left() {
            let keys = self.core.pointer_press(rect, p, button);
            return Ok(self.core.fire(&keys));
        }
        if !rect.contains(p) {
            return Ok(self.unfocus());
        }
        let keys = self.core.pointer_press(rect, p, button);
        let mut fired = self.core.fire(&keys);
        fired.append(self.focus());
        Ok(fired)
    }

    fn on_text(&mut self, text: &str) -> Result<Fired> {
        if !self.core.is_focused() {
            return Ok(Fired::none());
        }
        let changed = self.buffer.insert(text);
        Ok(self.edited(changed, false))
    }

    fn on_text_motion(&mut self, motion: TextMotion) -> Result<Fired> {
        if !self.core.is_focused() {
            return Ok(Fired::none());
        }
        let b = &mut self.buffer;
        let (changed, moved) = match motion {
            TextMotion::Left => (false, b.move_left()),
            TextMotion::Right => (false, b.move_right()),
            TextMotion::Home => (false, b.home()),
            TextMotion::End => (false, b.end()),
            TextMotion::Backspace => (b.delete_prev(), false),
            TextMotion::Delete => (b.delete_next(), false),
            TextMotion::Submit => return Ok(self.core.fire(&[ActionKey::Enter])),
        };
        Ok(self.edited(changed, moved))
    }

    fn update(&mut self, now: f64) -> Fired {
        self.now = now;
        if self.core.is_focused() {
            let blink = self.blink.unwrap_or(self.theme_blink).max(f64::EPSILON);
            let phase = ((now - self.focused_at).max(0.0) / blink).floor() as u64;
            let on = phase % 2 == 0;
            if on != self.cursor_on {
                self.cursor_on = on;
                self.core.redraw();
            }
        }
        Fired::none()
    }

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        self.theme_blink = ctx.theme.cursor_blink;
        let Some(rect) = self.core.begin_draw(ctx.frame)? else { return Ok(()) };
        if !self.background.is_initialized() {
            self.background.init(ctx)?;
        }
        self.background.redraw(ctx, &self.core.paint_input(rect))?;

        let border = self.background.border(ctx.theme);
        let inner = rect.inset(border.x, border.x, border.y, border.y);
        self.label.set_text(self.buffer.text.as_str());
        self.label.draw(ctx, inner, self.core.visible())?;

        let show = self.core.visible() && self.cursor_visible();
        let cursor = self.cursor.get_or_insert_with(|| QuadPrim::new(ctx.batch, 1, ctx.group));
        if !show {
            return cursor.hide(ctx.batch);
        }
        let before = self.buffer.text.get(..self.buffer.cursor).unwrap_or_default();
        let spec = self.label.spec(ctx.theme, inner, true)?;
        let x = inner.left() + ctx.batch.measure_text(before, &spec.font, spec.font_size).x;
        let caret = Frame::new(vec2f(x, inner.bottom()), vec2f(CURSOR_WIDTH, inner.size.y));
        cursor.write(ctx.batch, &caret.corners(), &[spec.color; 4])
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        self.background.delete(batch);
        self.label.delete(batch);
        if let Some(cursor) = self.cursor.take() {
            cursor.release(batch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn input() -> (TextInput, Rc<RefCell<Vec<&'static str>>>) {
        let mut t = TextInput::new("name", (0.0, 0.0), (200.0, 30.0));
        let log = Rc::new(RefCell::new(Vec::new()));
        for (key, tag) in [(ActionKey::Focus, "focus"), (ActionKey::Unfocus, "unfocus"), (ActionKey::TextChange, "change"), (ActionKey::Enter, "enter")] {
            t.core.add_action(key, recorder(&log, tag));
        }
        (t, log)
    }

    #[test]
    fn click_inside_focuses_and_outside_unfocuses() {
        let (mut t, log) = input();
        let frame = Frame::from_size(800.0, 600.0);
        t.on_mouse_press(frame, vec2f(10.0, 10.0), MouseButton::LEFT).unwrap().run();
        assert!(t.core.is_focused());
        t.on_mouse_press(frame, vec2f(10.0, 10.0), MouseButton::LEFT).unwrap().run();
        t.on_mouse_press(frame, vec2f(500.0, 10.0), MouseButton::LEFT).unwrap().run();
        assert!(!t.core.is_focused());
        assert_eq!(*log.borrow(), vec!["focus", "unfocus"]);
    }

    #[test]
    fn focused_input_consumes_text() {
        let (mut t, log) = input();
        t.on_text("ignored").unwrap().run();
        assert_eq!(t.text(), "");
        t.focus().run();
        t.on_text("hello").unwrap().run();
        t.on_text_motion(TextMotion::Home).unwrap().run();
        t.on_text_motion(TextMotion::Delete).unwrap().run();
        t.on_text_motion(TextMotion::End).unwrap().run();
        t.on_text_motion(TextMotion::Backspace).unwrap().run();
        t.on_text_motion(TextMotion::Submit).unwrap().run();
        assert_eq!(t.text(), "ell");
        assert_eq!(*log.borrow(), vec!["focus", "change", "change", "change", "enter"]);
    }

    #[test]
    fn cursor_blink_is_anchored_at_focus_time() {
        let (mut t, _) = input();
        t.update(1.3).run();
        t.focus().run();
        t.update(1.5).run();
        assert!(t.cursor_visible());
        t.update(1.85).run();
        assert!(!t.cursor_visible());
        t.update(2.35).run();
        assert!(t.cursor_visible());
        t.unfocus().run();
        assert!(!t.cursor_visible());
    }

    #[test]
    fn caret_follows_cursor() {
        let mut scene = Scene::new();
        let (t, _) = input();
        let mut t = t.with_text("ab");
        t.focus().run();
        scene.draw(&mut t);
        // background, caret; the label is not a primitive
        let caret = scene.batch.primitive_ids()[1];
        assert_eq!(scene.batch.primitive(caret).unwrap().positions[0].x, 4.0 + 16.0);
        t.on_text_motion(TextMotion::Left).unwrap().run();
        scene.draw(&mut t);
        assert_eq!(scene.batch.primitive(caret).unwrap().positions[0].x, 4.0 + 8.0);
    }
}
