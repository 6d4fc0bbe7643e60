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
//! Widget core state, the widget trait and named widget sets.
use super::*;

mod button;
mod label;
mod layered;
mod slider;
mod text_edit;
mod text_input;

pub use button::*;
pub use label::*;
pub use layered::*;
pub use slider::*;
pub use text_input::*;

/// State shared by every widget: identity, geometry, interaction flags, actions and invalidation.
pub struct WidgetCore {
    name: String,
    id: Id,
    /// Position geometry, relative to the parent frame.
    pub pos: Geometry,
    /// Size geometry.
    pub size: Geometry,
    flags: InteractionFlags,
    visible: bool,
    enabled: bool,
    activity: ActivityFlag,
    /// Callbacks fired by the widget.
    pub actions: ActionRegistry,
    dirty: bool,
    invalidations: u64,
    last_rect: Option<Frame>,
}

impl WidgetCore {
    /// Creates the core. A widget that is not yet owned by a submenu is clickable.
    pub fn new(name: &str, pos: impl Into<Geometry>, size: impl Into<Geometry>) -> Self {
        let activity = ActivityFlag::new();
        activity.set(true);
        Self {
            name: name.to_string(),
            id: Id::from_str(name),
            pos: pos.into(),
            size: size.into(),
            flags: InteractionFlags::NONE,
            visible: true,
            enabled: true,
            activity,
            actions: ActionRegistry::new(),
            dirty: true,
            invalidations: 0,
            last_rect: None,
        }
    }

    /// Widget name, unique within its owner.
    pub fn name(&self) -> &str { &self.name }

    /// Identifier derived from the name.
    pub fn id(&self) -> Id { self.id }

    /// Interaction flags.
    pub fn flags(&self) -> InteractionFlags { self.flags }

    /// Returns `true` while the pointer is inside the widget.
    pub fn is_hovering(&self) -> bool { self.flags.is_hovering() }

    /// Returns `true` while the widget is pressed or latched.
    pub fn is_pressed(&self) -> bool { self.flags.is_pressed() }

    /// Returns `true` while the widget owns keyboard focus.
    pub fn is_focused(&self) -> bool { self.flags.is_focused() }

    /// Returns `true` if the owning submenu is active.
    pub fn clickable(&self) -> bool { self.activity.is_active() }

    /// Returns `true` if the widget is drawn.
    pub fn visible(&self) -> bool { self.visible }

    /// Shows or hides the widget.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.redraw();
        }
    }

    /// Returns `true` if the widget reacts to input.
    pub fn enabled(&self) -> bool { self.enabled }

    /// Enables or disables input.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.redraw();
        }
    }

    /// Replaces the position geometry.
    pub fn set_pos(&mut self, pos: impl Into<Geometry>) {
        self.pos = pos.into();
        self.redraw();
    }

    /// Replaces the size geometry.
    pub fn set_size(&mut self, size: impl Into<Geometry>) {
        self.size = size.into();
        self.redraw();
    }

    /// Appends a callback for `key`.
    pub fn add_action(&mut self, key: impl Into<ActionKey>, callback: impl Fn() + 'static) { self.actions.add(key, callback) }

    /// Callbacks registered for `keys`.
    pub fn fire(&self, keys: &[ActionKey]) -> Fired { self.actions.collect(keys) }

    pub(crate) fn attach(&mut self, activity: ActivityFlag) { self.activity = activity }

    pub(crate) fn activity(&self) -> &ActivityFlag { &self.activity }

    /// Absolute rectangle inside the parent `frame`, resolved from the current geometry.
    pub fn rect(&self, frame: Frame) -> Result<Frame> { resolve_geometry(&self.name, &self.pos, &self.size, frame) }

    /// Returns `true` if `p` hits the widget.
    pub fn hit(&self, frame: Frame, p: Vec2f) -> Result<bool> { Ok(self.rect(frame)?.contains(p)) }

    /// Resolved position with write-back.
    pub fn pos_watch(&mut self, frame: Frame) -> Result<GeometryWatch<'_>> { GeometryWatch::new(self, GeometrySlot::Pos, frame) }

    /// Resolved size with write-back.
    pub fn size_watch(&mut self, frame: Frame) -> Result<GeometryWatch<'_>> { GeometryWatch::new(self, GeometrySlot::Size, frame) }

    /// Schedules a regeneration on the next draw.
    pub fn redraw(&mut self) {
        self.dirty = true;
        self.invalidations += 1;
    }

    /// Returns `true` if a regeneration is pending.
    pub fn is_dirty(&self) -> bool { self.dirty }

    /// Number of invalidations so far.
    pub fn invalidations(&self) -> u64 { self.invalidations }

    /// Resolves the rectangle and returns it when the primitives must be regenerated, because the widget
    /// was invalidated or its rectangle moved.
    pub fn begin_draw(&mut self, frame: Frame) -> Result<Option<Frame>> {
        let rect = self.rect(frame)?;
        if !self.dirty && self.last_rect == Some(rect) {
            return Ok(None);
        }
        trace!("regenerating `{}` at {:?}", self.name, rect);
        self.dirty = false;
        self.last_rect = Some(rect);
        Ok(Some(rect))
    }

    /// Paint input for the current state.
    pub fn paint_input(&self, rect: Frame) -> PaintInput { PaintInput { visible: self.visible, enabled: self.enabled, ..PaintInput::new(rect, self.flags) } }

    fn accepts_pointer(&self) -> bool { self.clickable() && self.visible && self.enabled }

    pub(crate) fn set_flag(&mut self, flag: InteractionFlags, on: bool) -> bool {
        if self.flags.contains(flag) == on {
            return false;
        }
        self.flags.set(flag, on);
        self.redraw();
        true
    }

    /// Hover transition for a pointer at `p`.
    pub fn pointer_motion(&mut self, rect: Frame, p: Vec2f) -> Vec<ActionKey> {
        if !self.accepts_pointer() {
            return Vec::new();
        }
        let inside = rect.contains(p);
        if !self.set_flag(InteractionFlags::HOVERING, inside) {
            return Vec::new();
        }
        vec![if inside { ActionKey::HoverStart } else { ActionKey::HoverEnd }]
    }

    /// Press transition. The secondary button only fires `context`.
    pub fn pointer_press(&mut self, rect: Frame, p: Vec2f, button: MouseButton) -> Vec<ActionKey> {
        if !self.accepts_pointer() || !rect.contains(p) {
            return Vec::new();
        }
        if button.is_right() {
            return vec![ActionKey::Context];
        }
        if !button.is_left() {
            return Vec::new();
        }
        self.set_flag(InteractionFlags::PRESSED, true);
        vec![ActionKey::Press]
    }

    /// Release transition. Clears the pressed state wherever the pointer is; clicks only inside.
    pub fn pointer_release(&mut self, rect: Frame, p: Vec2f, button: MouseButton) -> Vec<ActionKey> {
        if !self.accepts_pointer() || !button.is_left() || !self.set_flag(InteractionFlags::PRESSED, false) {
            return Vec::new();
        }
        if rect.contains(p) { vec![ActionKey::Click] } else { Vec::new() }
    }
}

/// Editing key forwarded to the focused text input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextMotion {
    /// Cursor one character left.
    Left,
    /// Cursor one character right.
    Right,
    /// Cursor to the start.
    Home,
    /// Cursor to the end.
    End,
    /// Delete before the cursor.
    Backspace,
    /// Delete after the cursor.
    Delete,
    /// Submit the content.
    Submit,
}

/// Retained widget.
///
/// Event handlers receive the parent frame the widget resolves against and return the callbacks they
/// fired. The caller runs them once every widget borrow is released.
pub trait Widget {
    /// Shared state.
    fn core(&self) -> &WidgetCore;
    /// Shared state.
    fn core_mut(&mut self) -> &mut WidgetCore;

    /// Pointer moved without buttons.
    fn on_mouse_motion(&mut self, frame: Frame, p: Vec2f) -> Result<Fired> {
        let rect = self.core().rect(frame)?;
        let keys = self.core_mut().pointer_motion(rect, p);
        Ok(self.core().fire(&keys))
    }

    /// Pointer moved with buttons held.
    fn on_mouse_drag(&mut self, frame: Frame, p: Vec2f, _delta: Vec2f, _buttons: MouseButton) -> Result<Fired> { self.on_mouse_motion(frame, p) }

    /// Button pressed.
    fn on_mouse_press(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core().rect(frame)?;
        let keys = self.core_mut().pointer_press(rect, p, button);
        Ok(self.core().fire(&keys))
    }

    /// Button released.
    fn on_mouse_release(&mut self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> {
        let rect = self.core().rect(frame)?;
        let keys = self.core_mut().pointer_release(rect, p, button);
        Ok(self.core().fire(&keys))
    }

    /// Text entered while the widget may own focus.
    fn on_text(&mut self, _text: &str) -> Result<Fired> { Ok(Fired::none()) }

    /// Editing key while the widget may own focus.
    fn on_text_motion(&mut self, _motion: TextMotion) -> Result<Fired> { Ok(Fired::none()) }

    /// Window or parent resized.
    fn on_resize(&mut self) { self.core_mut().redraw() }

    /// Clock tick, in seconds.
    fn update(&mut self, _now: f64) -> Fired { Fired::none() }

    /// Regenerates the primitives if needed.
    fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()>;

    /// Releases every primitive.
    fn delete(&mut self, batch: &mut dyn Batch);

    /// Links the widget to the activity flag of its owner.
    fn attach(&mut self, activity: ActivityFlag) { self.core_mut().attach(activity) }

    /// Child widgets, for containers.
    fn children(&self) -> Option<&WidgetSet> { None }

    /// Returns `true` if the widget is redrawn every [`Theme::button_heal`] seconds by its submenu.
    fn self_heals(&self) -> bool { false }
}

/// Non-owning widget handle.
pub struct WeakWidgetHandle<W: ?Sized>(Weak<RefCell<W>>);

impl<W: ?Sized> Clone for WeakWidgetHandle<W> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<W: ?Sized> WeakWidgetHandle<W> {
    /// Strong handle, while the widget is alive.
    pub fn upgrade(&self) -> Option<WidgetHandle<W>> { self.0.upgrade().map(WidgetHandle::from_rc) }
}

impl<W: ?Sized> WidgetHandle<W> {
    /// Non-owning handle to the same widget.
    pub fn downgrade(&self) -> WeakWidgetHandle<W> { WeakWidgetHandle(Rc::downgrade(self.rc())) }
}

impl<W: Widget + ?Sized + 'static> WidgetHandle<W> {
    /// Subscribes a redraw of this widget to language changes.
    pub fn redraw_on_language(&self, notifier: &LanguageNotifier) -> Subscription {
        let weak = self.downgrade();
        notifier.subscribe(move || {
            if let Some(handle) = weak.upgrade() {
                if let Ok(mut w) = handle.try_borrow_mut() {
                    w.core_mut().redraw();
                }
            }
        })
    }
}

/// Returns `true` if `handle`, or any widget below it, is the widget stored at `target`.
pub(crate) fn contains_widget(handle: &WidgetHandle<dyn Widget>, target: *const ()) -> bool {
    if std::ptr::addr_eq(handle.value_ptr(), target) {
        return true;
    }
    let Ok(w) = handle.try_borrow() else { return false };
    w.children().is_some_and(|set| set.iter().any(|(_, child)| contains_widget(child, target)))
}

/// Invalidates every self-healing widget at or below `handle`. Widgets borrowed elsewhere are skipped.
pub(crate) fn heal_subtree(handle: &WidgetHandle<dyn Widget>) {
    let children: Vec<WidgetHandle<dyn Widget>> = {
        let Ok(mut w) = handle.try_borrow_mut() else { return };
        if w.self_heals() {
            w.core_mut().redraw();
        }
        w.children().map(|set| set.iter().map(|(_, c)| c.clone()).collect()).unwrap_or_default()
    };
    for child in &children {
        heal_subtree(child);
    }
}

#[derive(Default)]
/// Named widgets owned by a submenu or container, in insertion order.
pub struct WidgetSet {
    widgets: Vec<(String, WidgetHandle<dyn Widget>)>,
    activity: ActivityFlag,
}

impl WidgetSet {
    /// Creates an empty set whose widgets follow `activity`.
    pub fn new(activity: ActivityFlag) -> Self { Self { widgets: Vec::new(), activity } }

    /// Activity flag handed to new widgets.
    pub fn activity(&self) -> &ActivityFlag { &self.activity }

    pub(crate) fn set_activity(&mut self, activity: ActivityFlag) {
        for (_, w) in &self.widgets {
            w.borrow_mut().attach(activity.clone());
        }
        self.activity = activity;
    }

    /// Adds an existing widget. Names must be unique.
    pub fn insert(&mut self, handle: WidgetHandle<dyn Widget>) -> Result<()> {
        let name = handle.borrow().core().name().to_string();
        if self.contains(&name) {
            return Err(GuiError::DuplicateName(name));
        }
        handle.borrow_mut().attach(self.activity.clone());
        debug!("widget `{}` added", name);
        self.widgets.push((name, handle));
        Ok(())
    }

    /// Adds `widget` and returns its typed handle.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) -> Result<WidgetHandle<W>> {
        let handle = WidgetHandle::new(widget);
        self.insert(handle.erase())?;
        Ok(handle)
    }

    /// Widget named `name`.
    pub fn get(&self, name: &str) -> Result<WidgetHandle<dyn Widget>> {
        self.widgets.iter().find(|(n, _)| n == name).map(|(_, w)| w.clone()).ok_or_else(|| GuiError::WidgetNotFound(name.to_string()))
    }

    /// Returns `true` if a widget named `name` exists.
    pub fn contains(&self, name: &str) -> bool { self.widgets.iter().any(|(n, _)| n == name) }

    /// Removes the widget named `name` and releases its primitives.
    pub fn remove(&mut self, name: &str, batch: &mut dyn Batch) -> Result<WidgetHandle<dyn Widget>> {
        let idx = self.widgets.iter().position(|(n, _)| n == name).ok_or_else(|| GuiError::WidgetNotFound(name.to_string()))?;
        let (_, handle) = self.widgets.remove(idx);
        handle.borrow_mut().delete(batch);
        Ok(handle)
    }

    /// Widgets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, WidgetHandle<dyn Widget>)> { self.widgets.iter() }

    /// Number of widgets.
    pub fn len(&self) -> usize { self.widgets.len() }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool { self.widgets.is_empty() }

    fn each(&self, mut f: impl FnMut(&mut dyn Widget) -> Result<Fired>) -> Result<Fired> {
        let mut fired = Fired::none();
        for (_, w) in &self.widgets {
            fired.append(f(&mut *w.borrow_mut())?);
        }
        Ok(fired)
    }

    /// Forwards a pointer motion to every widget.
    pub fn on_mouse_motion(&self, frame: Frame, p: Vec2f) -> Result<Fired> { self.each(|w| w.on_mouse_motion(frame, p)) }

    /// Forwards a drag to every widget.
    pub fn on_mouse_drag(&self, frame: Frame, p: Vec2f, delta: Vec2f, buttons: MouseButton) -> Result<Fired> { self.each(|w| w.on_mouse_drag(frame, p, delta, buttons)) }

    /// Forwards a press to every widget.
    pub fn on_mouse_press(&self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> { self.each(|w| w.on_mouse_press(frame, p, button)) }

    /// Forwards a release to every widget.
    pub fn on_mouse_release(&self, frame: Frame, p: Vec2f, button: MouseButton) -> Result<Fired> { self.each(|w| w.on_mouse_release(frame, p, button)) }

    /// Forwards entered text to every widget.
    pub fn on_text(&self, text: &str) -> Result<Fired> { self.each(|w| w.on_text(text)) }

    /// Forwards an editing key to every widget.
    pub fn on_text_motion(&self, motion: TextMotion) -> Result<Fired> { self.each(|w| w.on_text_motion(motion)) }

    /// Invalidates every widget.
    pub fn on_resize(&self) {
        for (_, w) in &self.widgets {
            w.borrow_mut().on_resize();
        }
    }

    /// Clock tick for every widget.
    pub fn update(&self, now: f64) -> Fired {
        let mut fired = Fired::none();
        for (_, w) in &self.widgets {
            fired.append(w.borrow_mut().update(now));
        }
        fired
    }

    /// Draws every widget in insertion order.
    pub fn draw(&self, ctx: &mut DrawCtx) -> Result<()> {
        for (_, w) in &self.widgets {
            w.borrow_mut().draw(ctx)?;
        }
        Ok(())
    }

    /// Releases every widget.
    pub fn delete(&mut self, batch: &mut dyn Batch) {
        for (_, w) in self.widgets.drain(..) {
            w.borrow_mut().delete(batch);
        }
    }

    /// Union of the child rectangles, relative to `frame`'s origin.
    pub fn bounds(&self, frame: Frame) -> Result<Option<Frame>> {
        let mut out: Option<Frame> = None;
        for (_, w) in &self.widgets {
            let r = w.borrow().core().rect(frame)?;
            out = Some(match out {
                Some(acc) => acc.union(&r),
                None => r,
            });
        }
        Ok(out.map(|r| r.offset(vec2f(-frame.pos.x, -frame.pos.y))))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Batch, atlas and theme for widget tests.
    pub(crate) struct Scene {
        pub batch: MemoryBatch,
        pub atlas: TextureAtlas,
        pub theme: Theme,
        pub frame: Frame,
    }

    impl Scene {
        pub fn new() -> Self {
            let atlas = TextureAtlas::new();
            let page = atlas.add_page(64, 64);
            for (i, name) in ["idle", "hover", "pressed", "disabled"].iter().enumerate() {
                atlas.add_texture(page, name, "gui", Recti::new(i as i32 * 16, 0, 16, 16));
            }
            Self { batch: MemoryBatch::new(), atlas, theme: Theme::default(), frame: Frame::from_size(800.0, 600.0) }
        }

        pub fn draw(&mut self, w: &mut dyn Widget) {
            let palette = Palette::from_background(self.theme.background, &self.theme);
            let mut ctx = DrawCtx { batch: &mut self.batch, resources: &self.atlas, theme: &self.theme, palette, group: None, frame: self.frame };
            w.draw(&mut ctx).unwrap();
        }
    }

    pub(crate) fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> impl Fn() + 'static {
        let log = log.clone();
        move || log.borrow_mut().push(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    struct Plain {
        core: WidgetCore,
    }

    impl Widget for Plain {
        implement_widget_core!();
        fn draw(&mut self, ctx: &mut DrawCtx) -> Result<()> {
            self.core.begin_draw(ctx.frame)?;
            Ok(())
        }
        fn delete(&mut self, _batch: &mut dyn Batch) {}
    }

    fn plain(name: &str) -> Plain { Plain { core: WidgetCore::new(name, (50.0, 50.0), (100.0, 40.0)) } }

    #[test]
    fn each_transition_invalidates_once() {
        let mut w = plain("w");
        let frame = Frame::from_size(800.0, 600.0);
        let start = w.core.invalidations();
        w.on_mouse_motion(frame, vec2f(60.0, 60.0)).unwrap().run();
        w.on_mouse_motion(frame, vec2f(61.0, 60.0)).unwrap().run();
        assert_eq!(w.core.invalidations(), start + 1);
        w.on_mouse_press(frame, vec2f(60.0, 60.0), MouseButton::LEFT).unwrap().run();
        assert_eq!(w.core.invalidations(), start + 2);
        w.on_mouse_release(frame, vec2f(60.0, 60.0), MouseButton::LEFT).unwrap().run();
        assert_eq!(w.core.invalidations(), start + 3);
        w.on_mouse_motion(frame, vec2f(0.0, 0.0)).unwrap().run();
        assert_eq!(w.core.invalidations(), start + 4);
    }

    #[test]
    fn hit_test_is_inclusive() {
        let w = plain("w");
        let frame = Frame::from_size(800.0, 600.0);
        assert!(w.core.hit(frame, vec2f(50.0, 50.0)).unwrap());
        assert!(w.core.hit(frame, vec2f(150.0, 90.0)).unwrap());
        assert!(!w.core.hit(frame, vec2f(150.1, 90.0)).unwrap());
    }

    #[test]
    fn hit_test_follows_moved_widget() {
        let mut w = plain("w");
        let frame = Frame::from_size(800.0, 600.0);
        w.on_mouse_press(frame, vec2f(60.0, 60.0), MouseButton::LEFT).unwrap().run();
        w.core.set_pos((300.0, 300.0));
        let log = Rc::new(RefCell::new(Vec::new()));
        w.core.add_action(ActionKey::Click, recorder(&log, "click"));
        w.on_mouse_release(frame, vec2f(60.0, 60.0), MouseButton::LEFT).unwrap().run();
        assert!(log.borrow().is_empty());
        assert!(!w.core.is_pressed());
    }

    #[test]
    fn right_press_fires_context_only() {
        let mut w = plain("w");
        let frame = Frame::from_size(800.0, 600.0);
        let log = Rc::new(RefCell::new(Vec::new()));
        w.core.add_action(ActionKey::Context, recorder(&log, "context"));
        w.core.add_action(ActionKey::Press, recorder(&log, "press"));
        w.on_mouse_press(frame, vec2f(60.0, 60.0), MouseButton::RIGHT).unwrap().run();
        assert_eq!(*log.borrow(), vec!["context"]);
        assert!(!w.core.is_pressed());
    }

    #[test]
    fn inactive_owner_blocks_pointer_events() {
        let mut set = WidgetSet::new(ActivityFlag::new());
        let h = set.add(plain("w")).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        h.borrow_mut().core.add_action(ActionKey::Press, recorder(&log, "press"));
        let frame = Frame::from_size(800.0, 600.0);
        set.on_mouse_press(frame, vec2f(60.0, 60.0), MouseButton::LEFT).unwrap().run();
        set.on_mouse_motion(frame, vec2f(60.0, 60.0)).unwrap().run();
        assert!(!h.borrow().core.clickable());
        assert_eq!(h.borrow().core.flags(), InteractionFlags::NONE);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn begin_draw_skips_clean_widgets() {
        let mut w = plain("w");
        let frame = Frame::from_size(800.0, 600.0);
        assert!(w.core.begin_draw(frame).unwrap().is_some());
        assert!(w.core.begin_draw(frame).unwrap().is_none());
        // moving the parent frame regenerates without an explicit invalidation
        assert!(w.core.begin_draw(frame.offset(vec2f(1.0, 0.0))).unwrap().is_some());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut set = WidgetSet::default();
        set.add(plain("a")).unwrap();
        assert_eq!(set.add(plain("a")).err(), Some(GuiError::DuplicateName("a".into())));
        assert!(matches!(set.get("b"), Err(GuiError::WidgetNotFound(_))));
        let mut batch = MemoryBatch::new();
        set.remove("a", &mut batch).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn bounds_cover_every_child() {
        let mut set = WidgetSet::default();
        set.add(plain("a")).unwrap();
        set.add(Plain { core: WidgetCore::new("b", (0.0, 200.0), (10.0, 10.0)) }).unwrap();
        let b = set.bounds(Frame::new(vec2f(5.0, 5.0), vec2f(400.0, 400.0))).unwrap().unwrap();
        assert_eq!(b, Frame::new(vec2f(0.0, 50.0), vec2f(150.0, 160.0)));
    }

    #[test]
    fn language_change_redraws_through_weak_handle() {
        let notifier = LanguageNotifier::new();
        let h = WidgetHandle::new(plain("w"));
        let sub = h.redraw_on_language(&notifier);
        let before = h.borrow().core.invalidations();
        notifier.notify().run();
        assert_eq!(h.borrow().core.invalidations(), before + 1);
        drop(h);
        notifier.notify().run();
        notifier.unsubscribe(sub);
    }
}
