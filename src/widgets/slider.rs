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
//! Progress bars and draggable sliders.
use super::*;

const MIN_HANDLE: Real = 8.0;

fn fraction_of(n: Real, low: Real, high: Real) -> Real { if high > low { ((n - low) / (high - low)).clamp(0.0, 1.0) } else { 0.0 } }

/// Read-only bar showing `n` inside `[nmin, nmax]`.
pub struct ProgressBar {
    core: WidgetCore,
    background: ProgressBackground,
    label: Option<TextLabel>,
    n: Real,
    nmin: Real,
    nmax: Real,
}

impl ProgressBar {
    /// Horizontal bar starting at `nmin`.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, nmin: Real, nmax: Real) -> Self {
        Self {
            core: WidgetCore::new(name, pos, size),
            background: ProgressBackground::standard(Orientation::Horizontal),
            label: None,
            n: nmin,
            nmin,
            nmax: nmax.max(nmin),
        }
    }

    /// Paints the bar with `style`, validated against the button and split shapes.
    pub fn with_style(mut self, style: BorderStyle, theme: &Theme) -> Result<Self> {
        self.background = ProgressBackground::new(style, theme.border, Orientation::Horizontal, theme)?;
        Ok(self)
    }

    /// Adds a centered label.
    pub fn with_label(mut self, text: impl Into<TextSource>) -> Self {
        self.label = Some(TextLabel::new(text));
        self
    }

    /// Current value.
    pub fn value(&self) -> Real { self.n }

    /// Value range.
    pub fn range(&self) -> (Real, Real) { (self.nmin, self.nmax) }

    /// Filled fraction in `[0, 1]`.
    pub fn fraction(&self) -> Real { fraction_of(self.n, self.nmin, self.nmax) }

    /// Sets the value, clamped to the range. Fires `progressbar_change` when it changes.
    pub fn set_value(&mut self, n: Real) -> Fired {
        let n = n.clamp(self.nmin, self.nmax);
        if n == self.n {
            return Fired::none();
        }
        self.n = n;
        self.core.redraw();
        self.core.fire(&[ActionKey::ProgressChange])
    }

    /// Replaces the range and re-clamps the value.
    pub fn set_range(&mut self, nmin: Real, nmax: Real) -> Fired {
        self.nmin = nmin;
        self.nmax = nmax.max(nmin);
        self.core.redraw();
        self.set_value(self.n)
    }
}

impl Widget for ProgressBar {
    implement_widget_core!();

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let Some(rect) = self.core.begin_draw(ctx.frame)? else { return Ok(()) };
        if !self.background.is_initialized() {
            self.background.init(ctx)?;
        }
        let input = PaintInput { fraction: self.fraction(), ..self.core.paint_input(rect) };
        self.background.redraw(ctx, &input)?;
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
}

/// Bar with a draggable handle. Vertical sliders run from `nmin` at the top to `nmax` at the bottom.
pub struct Slider {
    core: WidgetCore,
    background: ProgressBackground,
    orientation: Orientation,
    n: Real,
    nmin: Real,
    nmax: Real,
    step: Real,
    page: Option<Real>,
    grab: Option<Vec2f>,
}

impl Slider {
    /// Horizontal slider starting at `nmin`.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, nmin: Real, nmax: Real) -> Self {
        Self::with_orientation(name, pos, size, nmin, nmax, Orientation::Horizontal)
    }

    /// Vertical slider starting at `nmin`, handle at the top.
    pub fn vertical(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, nmin: Real, nmax: Real) -> Self {
        Self::with_orientation(name, pos, size, nmin, nmax, Orientation::Vertical)
    }

    fn with_orientation(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>, nmin: Real, nmax: Real, orientation: Orientation) -> Self {
        Self {
            core: WidgetCore::new(name, pos, size),
            background: ProgressBackground::standard(orientation).with_handle(),
            orientation,
            n: nmin,
            nmin,
            nmax: nmax.max(nmin),
            step: 0.0,
            page: None,
            grab: None,
        }
    }

    /// Paints the slider with `style`.
    pub fn with_style(mut self, style: BorderStyle, theme: &Theme) -> Result<Self> {
        self.background = ProgressBackground::new(style, theme.border, self.orientation, theme)?.with_handle();
        Ok(self)
    }

    /// Snaps values to multiples of `step` above `nmin`. Zero disables snapping.
    pub fn with_step(mut self, step: Real) -> Self {
        self.step = step.max(0.0);
        self
    }

    /// Visible span of the value range, which sizes the handle like a scrollbar thumb.
    pub fn set_page(&mut self, page: Real) {
        let page = Some(page.max(0.0));
        if self.page != page {
            self.page = page;
            self.core.redraw();
        }
    }

    /// Track direction.
    pub fn orientation(&self) -> Orientation { self.orientation }

    /// Current value.
    pub fn value(&self) -> Real { self.n }

    /// Value range.
    pub fn range(&self) -> (Real, Real) { (self.nmin, self.nmax) }

    /// Returns `true` while the handle is dragged.
    pub fn is_dragging(&self) -> bool { self.grab.is_some() }

    fn snap(&self, n: Real) -> Real {
        let n = if self.step > 0.0 { self.nmin + ((n - self.nmin) / self.step).round() * self.step } else { n };
        n.clamp(self.nmin, self.nmax)
    }

    /// Sets the value, snapped and clamped. Fires `progressbar_change` when it changes.
    pub fn set_value(&mut self, n: Real) -> Fired {
        let n = self.snap(n);
        if n == self.n {
            return Fired::none();
        }
        self.n = n;
        self.core.redraw();
        self.core.fire(&[ActionKey::ProgressChange])
    }

    /// Replaces the range and re-clamps the value.
    pub fn set_range(&mut self, nmin: Real, nmax: Real) -> Fired {
        if nmin == self.nmin && nmax.max(nmin) == self.nmax {
            return Fired::none();
        }
        self.nmin = nmin;
        self.nmax = nmax.max(nmin);
        self.core.redraw();
        self.set_value(self.n)
    }

    fn handle_len(&self, rect: Frame) -> Real {
        let track = match self.orientation {
            Orientation::Horizontal => rect.size.x,
            Orientation::Vertical => rect.size.y,
        };
        let range = self.nmax - self.nmin;
        let page = self.page.unwrap_or(range / 10.0);
        scrollbar::thumb_len(track, page, range, MIN_HANDLE)
    }

    /// Handle rectangle inside the slider rectangle `rect`.
    pub fn handle_rect(&self, rect: Frame) -> Frame {
        scrollbar::thumb_rect(self.orientation, rect, self.n, self.nmin, self.nmax, self.handle_len(rect))
    }

    fn value_under(&self, rect: Frame, p: Vec2f) -> Real {
        scrollbar::value_at(self.orientation, rect, p, self.nmin, self.nmax, self.handle_len(rect))
    }
}

impl Widget for Slider {
    implement_widget_core!();

    fn on_mouse_press(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        let keys = self.core.pointer_press(rect, p, button);
        let mut fired = self.core.fire(&keys);
        if keys.contains(&ActionKey::Press) {
            let handle = self.handle_rect(rect);
            let grab = if handle.contains(p) { vec2f(p.x - handle.center().x, p.y - handle.center().y) } else { vec2f(0.0, 0.0) };
            self.grab = Some(grab);
            fired.append(self.set_value(self.value_under(rect, vec2f(p.x - grab.x, p.y - grab.y))));
        }
        Ok(fired)
    }

    fn on_mouse_drag(&mut self, frame: Frame, p: Vec2f, _delta: Vec2f, _buttons: MouseButton) -> Result<Fired> {
        let Some(grab) = self.grab else { return self.on_mouse_motion(frame, p) };
        let rect = self.core.rect(frame)?;
        Ok(self.set_value(self.value_under(rect, vec2f(p.x - grab.x, p.y - grab.y))))
    }

    fn on_mouse_release(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        if button.is_left() {
            self.grab = None;
        }
        let rect = self.core.rect(frame)?;
        let keys = self.core.pointer_release(rect, p, button);
        Ok(self.core.fire(&keys))
    }

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let Some(rect) = self.core.begin_draw(ctx.frame)? else { return Ok(()) };
        if !self.background.is_initialized() {
            self.background.init(ctx)?;
        }
        let input = PaintInput { fraction: fraction_of(self.n, self.nmin, self.nmax), handle: Some(self.handle_rect(rect)), ..self.core.paint_input(rect) };
        self.background.redraw(ctx, &input)
    }

    fn delete(&mut self, batch: &mut dyn Batch) { self.background.delete(batch) }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn progress_value_is_clamped_and_fires_on_change() {
        let mut bar = ProgressBar::new("p", (0.0, 0.0), (100.0, 10.0), 0.0, 10.0);
        let log = Rc::new(RefCell::new(Vec::new()));
        bar.core.add_action(ActionKey::ProgressChange, recorder(&log, "change"));
        bar.set_value(25.0).run();
        assert_eq!(bar.value(), 10.0);
        bar.set_value(10.0).run();
        assert_eq!(log.borrow().len(), 1);
        bar.set_range(0.0, 5.0).run();
        assert_eq!(bar.value(), 5.0);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn progress_split_matches_value() {
        let mut scene = Scene::new();
        let mut bar = ProgressBar::new("p", (0.0, 0.0), (108.0, 20.0), 0.0, 4.0);
        bar.set_value(1.0).run();
        scene.draw(&mut bar);
        // border prim first, then the split bar
        let split = scene.batch.primitive_ids()[1];
        let pos = &scene.batch.primitive(split).unwrap().positions;
        // inner width is 100 after the 4px border on both sides
        assert_eq!(pos[1].x - pos[0].x, 25.0);
    }

    #[test]
    fn drag_moves_value_and_snaps() {
        let frame = Frame::from_size(800.0, 600.0);
        let mut s = Slider::new("s", (0.0, 0.0), (110.0, 10.0), 0.0, 100.0).with_step(10.0);
        s.set_page(10.0);
        s.on_mouse_press(frame, vec2f(5.0, 5.0), MouseButton::LEFT).unwrap().run();
        assert!(s.is_dragging());
        s.on_mouse_drag(frame, vec2f(38.0, 5.0), vec2f(33.0, 0.0), MouseButton::LEFT).unwrap().run();
        assert_eq!(s.value(), 30.0);
        s.on_mouse_release(frame, vec2f(38.0, 5.0), MouseButton::LEFT).unwrap().run();
        assert!(!s.is_dragging());
        s.on_mouse_drag(frame, vec2f(90.0, 5.0), vec2f(52.0, 0.0), MouseButton::LEFT).unwrap().run();
        assert_eq!(s.value(), 30.0);
    }

    #[test]
    fn vertical_slider_runs_top_to_bottom() {
        let frame = Frame::from_size(800.0, 600.0);
        let mut s = Slider::vertical("v", (0.0, 0.0), (10.0, 100.0), 0.0, 200.0);
        let rect = s.core.rect(frame).unwrap();
        assert!((s.handle_rect(rect).top() - 100.0).abs() < 1e-4);
        s.on_mouse_press(frame, vec2f(5.0, 0.0), MouseButton::LEFT).unwrap().run();
        assert_eq!(s.value(), 200.0);
        assert!(s.handle_rect(rect).bottom().abs() < 1e-4);
    }

    #[test]
    fn handle_is_drawn_at_handle_rect() {
        let mut scene = Scene::new();
        let mut s = Slider::new("s", (0.0, 0.0), (110.0, 10.0), 0.0, 100.0);
        s.set_page(10.0);
        s.set_value(50.0).run();
        scene.draw(&mut s);
        let handle = scene.batch.primitive_ids()[2];
        let pos = &scene.batch.primitive(handle).unwrap().positions;
        assert_eq!(pos[0].x, 50.0);
        assert_eq!(pos[1].x, 60.0);
    }
}
