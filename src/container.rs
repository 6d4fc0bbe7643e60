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
//! Widgets owning other widgets.
//!
//! A [`Container`] clips its children to its rectangle through a stencil group and resolves their
//! geometry against its own rectangle. A [`ScrollableContainer`] additionally shifts that frame by
//! `(0, -n)`, where `n` is the value of an embedded vertical slider.
//!
//! The scroll offset only changes the frame handed to direct children. A nested container resolves
//! its own rectangle inside that frame, so its children move with it.
use super::*;

const SCROLLBAR_WIDTH: Real = 16.0;

fn outside() -> Vec2f { vec2f(Real::NEG_INFINITY, Real::NEG_INFINITY) }

/// Widget that owns a named [`WidgetSet`] and clips it to its rectangle.
pub struct Container {
    core: WidgetCore,
    children: WidgetSet,
    stencil: Option<GroupId>,
    scroll: Vec2f,
}

impl Container {
    /// Empty container.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>) -> Self {
        let core = WidgetCore::new(name, pos, size);
        let children = WidgetSet::new(core.activity().clone());
        Self { core, children, stencil: None, scroll: vec2f(0.0, 0.0) }
    }

    /// Adds `widget` and returns its typed handle.
    pub fn add_widget<W: Widget + 'static>(&mut self, widget: W) -> Result<WidgetHandle<W>> { self.children.add(widget) }

    /// Adds a widget that may already be shared. Adding the container to itself, directly or through a
    /// nested container, is ignored.
    pub fn add_handle(&mut self, handle: WidgetHandle<dyn Widget>) -> Result<()> {
        let me = self as *const Self as *const ();
        self.insert_checked(handle, me)
    }

    pub(crate) fn insert_checked(&mut self, handle: WidgetHandle<dyn Widget>, me: *const ()) -> Result<()> {
        if contains_widget(&handle, me) {
            warn!("`{}` cannot contain itself, ignoring", self.core.name());
            return Ok(());
        }
        self.children.insert(handle)
    }

    /// Child named `name`.
    pub fn get_widget(&self, name: &str) -> Result<WidgetHandle<dyn Widget>> { self.children.get(name) }

    /// Removes the child named `name` and releases its primitives.
    pub fn del_widget(&mut self, name: &str, batch: &mut dyn Batch) -> Result<()> {
        self.children.remove(name, batch)?;
        Ok(())
    }

    /// Children.
    pub fn widgets(&self) -> &WidgetSet { &self.children }

    /// Frame the children resolve against, for a container at `rect`.
    pub fn content_frame(&self, rect: Frame) -> Frame { rect.offset(self.scroll) }

    pub(crate) fn set_scroll(&mut self, scroll: Vec2f) { self.scroll = scroll }

    fn pointer(&self, rect: Frame, p: Vec2f) -> Vec2f {
        if self.core.visible() && rect.contains(p) { p } else { outside() }
    }

    fn motion(&mut self, rect: Frame, viewport: Frame, p: Vec2f) -> Result<Fired> {
        let keys = self.core.pointer_motion(rect, p);
        let mut fired = self.core.fire(&keys);
        fired.append(self.children.on_mouse_motion(viewport.offset(self.scroll), self.pointer(viewport, p))?);
        Ok(fired)
    }

    fn drag(&mut self, rect: Frame, viewport: Frame, p: Vec2f, delta: Vec2f, buttons: MouseButton) -> Result<Fired> {
        let keys = self.core.pointer_motion(rect, p);
        let mut fired = self.core.fire(&keys);
        // children that grabbed the pointer keep following it outside the viewport
        let q = if self.core.visible() { p } else { outside() };
        fired.append(self.children.on_mouse_drag(viewport.offset(self.scroll), q, delta, buttons)?);
        Ok(fired)
    }

    fn press(&mut self, rect: Frame, viewport: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let keys = self.core.pointer_press(rect, p, button);
        let mut fired = self.core.fire(&keys);
        fired.append(self.children.on_mouse_press(viewport.offset(self.scroll), self.pointer(viewport, p), button)?);
        Ok(fired)
    }

    fn release(&mut self, rect: Frame, viewport: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let keys = self.core.pointer_release(rect, p, button);
        let mut fired = self.core.fire(&keys);
        fired.append(self.children.on_mouse_release(viewport.offset(self.scroll), self.pointer(viewport, p), button)?);
        Ok(fired)
    }

    fn draw_in(&mut self, ctx: &mut DrawCtx, viewport: Frame) -> Result<()> {
        let moved = self.core.begin_draw(ctx.frame)?.is_some();
        let stencil = match self.stencil {
            Some(g) => {
                if moved {
                    ctx.batch.set_group(g, GroupKind::Stencil(self.clip(viewport)));
                }
                g
            }
            None => *self.stencil.insert(ctx.batch.create_group(GroupKind::Stencil(self.clip(viewport)), ctx.group)),
        };
        let mut inner = ctx.nested(Some(stencil), viewport.offset(self.scroll));
        self.children.draw(&mut inner)
    }

    fn clip(&self, viewport: Frame) -> Frame { if self.core.visible() { viewport } else { Frame::new(viewport.pos, vec2f(0.0, 0.0)) } }
}

impl Widget for Container {
    implement_widget_core!();

    fn on_mouse_motion(&mut self, frame: Frame, p: Vec2f) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        self.motion(rect, rect, p)
    }

    fn on_mouse_drag(&mut self, frame: Frame, p: Vec2f, delta: Vec2f, buttons: MouseButton) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        self.drag(rect, rect, p, delta, buttons)
    }

    fn on_mouse_press(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        self.press(rect, rect, p, button)
    }

    fn on_mouse_release(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core.rect(frame)?;
        self.release(rect, rect, p, button)
    }

    fn on_text(&mut self, text: &str) -> Result<Fired> { self.children.on_text(text) }

    fn on_text_motion(&mut self, motion: TextMotion) -> Result<Fired> { self.children.on_text_motion(motion) }

    fn on_resize(&mut self) {
        self.core.redraw();
        self.children.on_resize();
    }

    fn update(&mut self, now: f64) -> Fired { self.children.update(now) }

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        let rect = self.core.rect(ctx.frame)?;
        self.draw_in(ctx, rect)
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        self.children.delete(batch);
        if let Some(g) = self.stencil.take() {
            batch.delete_group(g);
        }
    }

    fn attach(&mut self, activity: ActivityFlag) {
        self.core.attach(activity.clone());
        self.children.set_activity(activity);
    }

    fn children(&self) -> Option<&WidgetSet> { Some(&self.children) }
}

/// Container scrolled vertically by an embedded slider along its right edge.
///
/// The slider ranges over `[0, content_height]`. Unless a height is set explicitly it is the top edge
/// of the highest child, measured from the bottom of the viewport.
pub struct ScrollableContainer {
    inner: Container,
    scrollbar: Slider,
    content_height: Option<Real>,
}

impl ScrollableContainer {
    /// Empty scrollable container.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>) -> Self {
        let scrollbar = Slider::vertical(
            &format!("{}.scrollbar", name),
            Geometry::computed(|parent, size| vec2f(parent.x - size.x, 0.0)),
            Geometry::computed(|parent, _| vec2f(SCROLLBAR_WIDTH.min(parent.x), parent.y)),
            0.0,
            0.0,
        );
        Self { inner: Container::new(name, pos, size), scrollbar, content_height: None }
    }

    /// Fixes the content height, or restores the automatic height with `None`.
    pub fn set_content_height(&mut self, height: Option<Real>) {
        self.content_height = height.map(|h| h.max(0.0));
        self.inner.core.redraw();
    }

    /// Content height in use for a container at `rect`.
    pub fn content_height(&self, rect: Frame) -> Result<Real> {
        if let Some(h) = self.content_height {
            return Ok(h);
        }
        let viewport = self.viewport(rect);
        Ok(self.inner.children.bounds(viewport)?.map_or(0.0, |b| (b.pos.y + b.size.y).max(0.0)))
    }

    /// Current scroll position.
    pub fn scroll(&self) -> Real { self.scrollbar.value() }

    /// Scrolls to `n`, clamped to the slider range. The range is refreshed against `frame` first.
    pub fn set_scroll(&mut self, frame: Frame, n: Real) -> Result<Fired> {
        let mut fired = self.sync(frame)?;
        fired.append(self.scrollbar.set_value(n));
        self.inner.set_scroll(self.scroll_offset());
        Ok(fired)
    }

    /// Offset applied to the children.
    pub fn scroll_offset(&self) -> Vec2f { vec2f(0.0, -self.scrollbar.value()) }

    /// Embedded slider.
    pub fn scrollbar(&self) -> &Slider { &self.scrollbar }

    /// Adds `widget` and returns its typed handle.
    pub fn add_widget<W: Widget + 'static>(&mut self, widget: W) -> Result<WidgetHandle<W>> { self.inner.add_widget(widget) }

    /// Adds a widget that may already be shared. Adding the container to itself is ignored.
    pub fn add_handle(&mut self, handle: WidgetHandle<dyn Widget>) -> Result<()> {
        let me = self as *const Self as *const ();
        self.inner.insert_checked(handle, me)
    }

    /// Child named `name`.
    pub fn get_widget(&self, name: &str) -> Result<WidgetHandle<dyn Widget>> { self.inner.get_widget(name) }

    /// Removes the child named `name`.
    pub fn del_widget(&mut self, name: &str, batch: &mut dyn Batch) -> Result<()> { self.inner.del_widget(name, batch) }

    /// Frame the children resolve against, for a container at `rect`.
    pub fn content_frame(&self, rect: Frame) -> Frame { self.viewport(rect).offset(self.scroll_offset()) }

    fn viewport(&self, rect: Frame) -> Frame { Frame::new(rect.pos, vec2f((rect.size.x - SCROLLBAR_WIDTH).max(0.0), rect.size.y)) }

    fn sync(&mut self, frame: Frame) -> Result<Fired> {
        let rect = self.inner.core.rect(frame)?;
        let h = self.content_height(rect)?;
        self.scrollbar.set_page(rect.size.y.min(h.max(1.0)));
        let fired = self.scrollbar.set_range(0.0, h);
        self.inner.set_scroll(self.scroll_offset());
        Ok(fired)
    }
}

impl Widget for ScrollableContainer {
    fn core(&self) -> &WidgetCore { &self.inner.core }
    fn core_mut(&mut self) -> &mut WidgetCore { &mut self.inner.core }

    fn on_mouse_motion(&mut self, frame: Frame, p: Vec2f) -> Result<Fired> {
        let rect = self.inner.core.rect(frame)?;
        let mut fired = self.scrollbar.on_mouse_motion(rect, p)?;
        fired.append(self.inner.motion(rect, self.viewport(rect), p)?);
        Ok(fired)
    }

    fn on_mouse_drag(&mut self, frame: Frame, p: Vec2f, delta: Vec2f, buttons: MouseButton) -> Result<Fired> {
        let rect = self.inner.core.rect(frame)?;
        let mut fired = self.scrollbar.on_mouse_drag(rect, p, delta, buttons)?;
        self.inner.set_scroll(self.scroll_offset());
        fired.append(self.inner.drag(rect, self.viewport(rect), p, delta, buttons)?);
        Ok(fired)
    }

    fn on_mouse_press(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let mut fired = self.sync(frame)?;
        let rect = self.inner.core.rect(frame)?;
        fired.append(self.scrollbar.on_mouse_press(rect, p, button)?);
        self.inner.set_scroll(self.scroll_offset());
        fired.append(self.inner.press(rect, self.viewport(rect), p, button)?);
        Ok(fired)
    }

    fn on_mouse_release(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.inner.core.rect(frame)?;
        let mut fired = self.scrollbar.on_mouse_release(rect, p, button)?;
        fired.append(self.inner.release(rect, self.viewport(rect), p, button)?);
        Ok(fired)
    }

    fn on_text(&mut self, text: &str) -> Result<Fired> { self.inner.on_text(text) }

    fn on_text_motion(&mut self, motion: TextMotion) -> Result<Fired> { self.inner.on_text_motion(motion) }

    fn on_resize(&mut self) {
        self.inner.on_resize();
        self.scrollbar.on_resize();
    }

    fn update(&mut self, now: f64) -> Fired { self.inner.update(now) }

    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
        // clamping while drawing fires nothing
        drop(self.sync(ctx.frame)?);
        let rect = self.inner.core.rect(ctx.frame)?;
        let viewport = self.viewport(rect);
        self.inner.draw_in(ctx, viewport)?;
        let group = ctx.group;
        self.scrollbar.draw(&mut ctx.nested(group, rect))
    }

    fn delete(&mut self, batch: &mut dyn Batch) {
        self.inner.delete(batch);
        self.scrollbar.delete(batch);
    }

    fn attach(&mut self, activity: ActivityFlag) {
        self.scrollbar.attach(activity.clone());
        self.inner.attach(activity);
    }

    fn children(&self) -> Option<&WidgetSet> { Some(&self.inner.children) }
}

#[cfg(test)]
mod tests {
    use crate::widgets::testing::*;
    use super::*;

    struct Plain {
        core: WidgetCore,
    }

    impl Widget for Plain {
        fn core(&self) -> &WidgetCore { &self.core }
        fn core_mut(&mut self) -> &mut WidgetCore { &mut self.core }
        fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
            self.core.begin_draw(ctx.frame)?;
            Ok(())
        }
        fn delete(&mut self, _batch: &mut dyn Batch) {}
    }

    fn plain(name: &str, pos: (Real, Real), size: (Real, Real)) -> Plain { Plain { core: WidgetCore::new(name, pos, size) } }

    #[test]
    fn scroll_offsets_every_child() {
        let frame = Frame::from_size(800.0, 600.0);
        let mut sc = ScrollableContainer::new("list", (100.0, 100.0), (200.0, 100.0));
        sc.set_content_height(Some(200.0));
        let a = sc.add_widget(plain("a", (10.0, 10.0), (50.0, 20.0))).unwrap();
        let b = sc.add_widget(plain("b", (10.0, 150.0), (50.0, 20.0))).unwrap();
        sc.set_scroll(frame, 50.0).unwrap().run();
        let offset = sc.scroll_offset();
        assert_eq!((offset.x, offset.y), (0.0, -50.0));

        let content = sc.content_frame(sc.core().rect(frame).unwrap());
        let pa = a.borrow().core().rect(content).unwrap().pos;
        assert_eq!((pa.x, pa.y), (110.0, 60.0));
        let pb = b.borrow().core().rect(content).unwrap().pos;
        assert_eq!((pb.x, pb.y), (110.0, 200.0));
    }

    #[test]
    fn scroll_is_clamped_to_content_height() {
        let frame = Frame::from_size(800.0, 600.0);
        let mut sc = ScrollableContainer::new("list", (0.0, 0.0), (200.0, 100.0));
        sc.set_content_height(Some(200.0));
        sc.set_scroll(frame, 500.0).unwrap().run();
        assert_eq!(sc.scroll(), 200.0);
        sc.set_content_height(Some(80.0));
        sc.set_scroll(frame, 90.0).unwrap().run();
        assert_eq!(sc.scroll(), 80.0);
    }

    #[test]
    fn content_height_follows_children_by_default() {
        let frame = Frame::from_size(800.0, 600.0);
        let mut sc = ScrollableContainer::new("list", (0.0, 0.0), (200.0, 100.0));
        sc.add_widget(plain("a", (0.0, 0.0), (50.0, 20.0))).unwrap();
        sc.add_widget(plain("b", (0.0, 280.0), (50.0, 20.0))).unwrap();
        let rect = sc.core().rect(frame).unwrap();
        assert_eq!(sc.content_height(rect).unwrap(), 300.0);
        sc.set_content_height(Some(120.0));
        assert_eq!(sc.content_height(rect).unwrap(), 120.0);
        sc.set_content_height(None);
        assert_eq!(sc.content_height(rect).unwrap(), 300.0);
    }

    #[test]
    fn raised_child_can_be_scrolled_into_view() {
        let frame = Frame::from_size(800.0, 600.0);
        let mut sc = ScrollableContainer::new("list", (0.0, 0.0), (200.0, 100.0));
        let child = sc.add_widget(plain("late", (0.0, 150.0), (50.0, 50.0))).unwrap();
        let rect = sc.core().rect(frame).unwrap();
        assert_eq!(sc.content_height(rect).unwrap(), 200.0);
        sc.set_scroll(frame, 1000.0).unwrap().run();
        assert_eq!(sc.scroll(), 200.0);
        sc.set_scroll(frame, 100.0).unwrap().run();
        let r = child.borrow().core().rect(sc.content_frame(rect)).unwrap();
        assert!(r.pos.y >= 0.0 && r.pos.y + r.size.y <= 100.0);
    }

    #[test]
    fn container_cannot_contain_itself() {
        let outer = WidgetHandle::new(Container::new("outer", (0.0, 0.0), (100.0, 100.0)));
        outer.borrow_mut().add_handle(outer.erase()).unwrap();
        assert_eq!(outer.borrow().widgets().len(), 0);

        let inner = WidgetHandle::new(Container::new("inner", (0.0, 0.0), (50.0, 50.0)));
        outer.borrow_mut().add_handle(inner.erase()).unwrap();
        inner.borrow_mut().add_handle(outer.erase()).unwrap();
        assert_eq!(inner.borrow().widgets().len(), 0);
        assert_eq!(outer.borrow().widgets().len(), 1);

        let sc = WidgetHandle::new(ScrollableContainer::new("sc", (0.0, 0.0), (50.0, 50.0)));
        sc.borrow_mut().add_handle(sc.erase()).unwrap();
        assert!(sc.borrow().children().unwrap().is_empty());
    }

    #[test]
    fn clicks_outside_the_container_do_not_reach_children() {
        let frame = Frame::from_size(800.0, 600.0);
        let mut c = Container::new("box", (0.0, 0.0), (100.0, 100.0));
        // child sticks out of the container
        let b = c.add_widget(Button::new("b", (50.0, 50.0), (100.0, 40.0))).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        b.add_action(ActionKey::Press, recorder(&log, "press"));

        c.on_mouse_press(frame, vec2f(120.0, 60.0), MouseButton::LEFT).unwrap().run();
        assert!(log.borrow().is_empty());
        c.on_mouse_press(frame, vec2f(60.0, 60.0), MouseButton::LEFT).unwrap().run();
        assert_eq!(*log.borrow(), vec!["press"]);
        c.on_mouse_release(frame, vec2f(120.0, 60.0), MouseButton::LEFT).unwrap().run();
        assert!(!b.borrow().core().is_pressed());
    }

    #[test]
    fn children_are_drawn_inside_a_stencil() {
        let mut scene = Scene::new();
        let mut c = Container::new("box", (10.0, 10.0), (100.0, 100.0));
        c.add_widget(Button::new("b", (0.0, 0.0), (40.0, 20.0))).unwrap();
        scene.draw(&mut c);
        let id = scene.batch.primitive_ids()[0];
        assert_eq!(scene.batch.clip_of(id), Some(Frame::new(vec2f(10.0, 10.0), vec2f(100.0, 100.0))));
        let corner = scene.batch.primitive(id).unwrap().positions[16];
        assert_eq!((corner.x, corner.y), (14.0, 14.0));
    }

    #[test]
    fn attaching_propagates_to_children() {
        let mut c = Container::new("box", (0.0, 0.0), (100.0, 100.0));
        let b = c.add_widget(Button::new("b", (0.0, 0.0), (40.0, 20.0))).unwrap();
        let flag = ActivityFlag::new();
        c.attach(flag.clone());
        assert!(!b.borrow().core().clickable());
        flag.set(true);
        assert!(b.borrow().core().clickable());
    }
}
