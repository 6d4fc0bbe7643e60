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
//! Submenus, the menu switching between them and modal dialogs.
//!
//! Only the active submenu of a menu receives events, timer ticks and draws. Its widgets are clickable
//! through the shared [`ActivityFlag`]; the widgets of every other submenu ignore the pointer.
use super::*;

/// Named collection of widgets drawn into its own batch.
pub struct Submenu {
    name: String,
    background: Color,
    theme: Rc<Theme>,
    widgets: WidgetSet,
    batch: BatchHandle,
    resources: Rc<dyn Resources>,
    activity: ActivityFlag,
    timers: Timers,
    heal: HashMap<String, TimerId>,
    actions: ActionRegistry,
    frame: Frame,
}

impl Submenu {
    /// Creates an inactive submenu painted with the theme background.
    pub fn new(name: &str, batch: BatchHandle, resources: Rc<dyn Resources>, theme: Rc<Theme>) -> Self {
        let activity = ActivityFlag::new();
        Self {
            name: name.to_string(),
            background: theme.background,
            theme,
            widgets: WidgetSet::new(activity.clone()),
            batch,
            resources,
            activity,
            timers: Timers::new(),
            heal: HashMap::new(),
            actions: ActionRegistry::new(),
            frame: Frame::default(),
        }
    }

    /// Submenu name.
    pub fn name(&self) -> &str { &self.name }

    /// Returns `true` while this is the active submenu of its menu.
    pub fn is_active(&self) -> bool { self.activity.is_active() }

    /// Theme shared with the widgets.
    pub fn theme(&self) -> &Theme { &self.theme }

    /// Background color the palette derives from.
    pub fn background(&self) -> Color { self.background }

    /// Changes the background and repaints every widget.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
        self.widgets.on_resize();
    }

    /// Batch the widgets draw into.
    pub fn batch(&self) -> &BatchHandle { &self.batch }

    /// Window frame the widgets resolve against.
    pub fn frame(&self) -> Frame { self.frame }

    /// Timer service, ticking only while the submenu is active.
    pub fn timers_mut(&mut self) -> &mut Timers { &mut self.timers }

    /// Adds a callback for `enter_submenu`, `exit_submenu` or a custom key.
    pub fn add_action(&mut self, key: impl Into<ActionKey>, callback: impl Fn() + 'static) { self.actions.add(key, callback) }

    /// Adds `widget` and returns its typed handle.
    pub fn add_widget<W: Widget + 'static>(&mut self, widget: W) -> Result<WidgetHandle<W>> {
        let handle = self.widgets.add(widget)?;
        self.schedule_heal(&handle.erase());
        Ok(handle)
    }

    /// Adds a widget that may already be shared.
    pub fn add_handle(&mut self, handle: WidgetHandle<dyn Widget>) -> Result<()> {
        self.widgets.insert(handle.clone())?;
        self.schedule_heal(&handle);
        Ok(())
    }

    /// Widget named `name`.
    pub fn get_widget(&self, name: &str) -> Result<WidgetHandle<dyn Widget>> { self.widgets.get(name) }

    /// Removes the widget named `name`, releases its primitives and stops its heal timer.
    pub fn del_widget(&mut self, name: &str) -> Result<()> {
        let widgets = &mut self.widgets;
        self.batch.with_mut(|b| widgets.remove(name, b))?;
        if let Some(id) = self.heal.remove(name) {
            self.timers.cancel(id);
        }
        Ok(())
    }

    /// Widgets in insertion order.
    pub fn widgets(&self) -> &WidgetSet { &self.widgets }

    // one timer per top-level widget; containers get one too since children may be added later
    fn schedule_heal(&mut self, handle: &WidgetHandle<dyn Widget>) {
        let (name, wanted) = {
            let w = handle.borrow();
            (w.core().name().to_string(), w.self_heals() || w.children().is_some())
        };
        if !wanted {
            return;
        }
        let alive = handle.downgrade();
        let target = handle.downgrade();
        let id = self.timers.schedule_interval_while(
            self.theme.button_heal,
            move || alive.upgrade().is_some(),
            move || {
                if let Some(h) = target.upgrade() {
                    heal_subtree(&h);
                }
            },
        );
        self.heal.insert(name, id);
    }

    pub(crate) fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
        self.widgets.on_resize();
    }

    pub(crate) fn enter(&mut self, now: f64) -> Fired {
        debug!("entering submenu `{}`", self.name);
        self.timers.resume(now);
        self.activity.set(true);
        self.widgets.on_resize();
        self.actions.collect(&[ActionKey::SubmenuEnter])
    }

    pub(crate) fn exit(&mut self) -> Fired {
        debug!("leaving submenu `{}`", self.name);
        self.activity.set(false);
        self.actions.collect(&[ActionKey::SubmenuExit])
    }

    /// Forwards a pointer motion.
    pub fn on_mouse_motion(&self, p: Vec2f) -> Result<Fired> { self.widgets.on_mouse_motion(self.frame, p) }

    /// Forwards a drag.
    pub fn on_mouse_drag(&self, p: Vec2f, delta: Vec2f, buttons: MouseButton) -> Result<Fired> { self.widgets.on_mouse_drag(self.frame, p, delta, buttons) }

    /// Forwards a press.
    pub fn on_mouse_press(&self, p: Vec2f, button: MouseButton) -> Result<Fired> { self.widgets.on_mouse_press(self.frame, p, button) }

    /// Forwards a release.
    pub fn on_mouse_release(&self, p: Vec2f, button: MouseButton) -> Result<Fired> { self.widgets.on_mouse_release(self.frame, p, button) }

    /// Forwards entered text.
    pub fn on_text(&self, text: &str) -> Result<Fired> { self.widgets.on_text(text) }

    /// Forwards an editing key.
    pub fn on_text_motion(&self, motion: TextMotion) -> Result<Fired> { self.widgets.on_text_motion(motion) }

    /// Advances the timers and the widgets to `now`.
    pub fn update(&mut self, now: f64) -> Fired {
        let mut fired = self.timers.update(now);
        fired.append(self.widgets.update(now));
        fired
    }

    /// Regenerates the primitives of invalidated widgets.
    pub fn draw(&mut self) -> Result<()> {
        let palette = Palette::from_background(self.background, &self.theme);
        let mut batch = self.batch.borrow_mut();
        let mut ctx = DrawCtx { batch: &mut *batch, resources: &*self.resources, theme: &*self.theme, palette, group: None, frame: self.frame };
        self.widgets.draw(&mut ctx)
    }

    /// Releases every widget.
    pub fn delete(&mut self) {
        let widgets = &mut self.widgets;
        self.batch.with_mut(|b| widgets.delete(b));
        for (_, id) in self.heal.drain() {
            self.timers.cancel(id);
        }
    }
}

#[derive(Clone, Default)]
/// Deferred submenu switch requests, usable from action callbacks that cannot borrow the menu.
pub struct SubmenuSwitcher(Rc<RefCell<Vec<String>>>);

impl SubmenuSwitcher {
    /// Asks the menu to switch to `name` once the current event is handled.
    pub fn request(&self, name: &str) { self.0.borrow_mut().push(name.to_string()) }

    fn take(&self) -> Vec<String> { std::mem::take(&mut *self.0.borrow_mut()) }
}

const MAX_SWITCH_ROUNDS: usize = 16;

/// Set of submenus of which exactly one is active.
pub struct Menu {
    submenus: Vec<Submenu>,
    active: Option<usize>,
    size: Vec2f,
    now: f64,
    switcher: SubmenuSwitcher,
}

impl Menu {
    /// Empty menu covering a `width` x `height` window.
    pub fn new(width: Real, height: Real) -> Self { Self { submenus: Vec::new(), active: None, size: vec2f(width, height), now: 0.0, switcher: SubmenuSwitcher::default() } }

    /// Window frame.
    pub fn frame(&self) -> Frame { Frame::from_size(self.size.x, self.size.y) }

    /// Handle for switching submenus from callbacks.
    pub fn switcher(&self) -> SubmenuSwitcher { self.switcher.clone() }

    /// Adds a submenu. The first one becomes active.
    pub fn add_submenu(&mut self, mut submenu: Submenu) -> Result<()> {
        if self.submenus.iter().any(|s| s.name == submenu.name) {
            return Err(GuiError::DuplicateName(submenu.name));
        }
        submenu.set_frame(self.frame());
        self.submenus.push(submenu);
        if self.active.is_none() {
            let name = self.submenus[self.submenus.len() - 1].name.clone();
            self.change_submenu(&name)?;
        }
        Ok(())
    }

    fn index(&self, name: &str) -> Result<usize> { self.submenus.iter().position(|s| s.name == name).ok_or_else(|| GuiError::SubmenuNotFound(name.to_string())) }

    /// Submenu named `name`.
    pub fn get_submenu(&self, name: &str) -> Result<&Submenu> { Ok(&self.submenus[self.index(name)?]) }

    /// Submenu named `name`.
    pub fn get_submenu_mut(&mut self, name: &str) -> Result<&mut Submenu> {
        let i = self.index(name)?;
        Ok(&mut self.submenus[i])
    }

    /// Name of the active submenu.
    pub fn active_submenu(&self) -> Option<&str> { self.active.map(|i| self.submenus[i].name.as_str()) }

    /// Batch of the active submenu, for the renderer.
    pub fn batch(&self) -> Option<&BatchHandle> { self.active.map(|i| self.submenus[i].batch()) }

    fn active_mut(&mut self) -> Option<&mut Submenu> {
        match self.active {
            Some(i) => self.submenus.get_mut(i),
            None => None,
        }
    }

    /// Makes `name` the active submenu. Switching to the active submenu does nothing.
    pub fn change_submenu(&mut self, name: &str) -> Result<()> {
        let fired = self.switch(name)?;
        self.finish(fired)
    }

    fn switch(&mut self, name: &str) -> Result<Fired> {
        let next = self.index(name)?;
        if self.active == Some(next) {
            warn!("submenu `{}` is already active", name);
            return Ok(Fired::none());
        }
        let mut fired = match self.active_mut() {
            Some(old) => old.exit(),
            None => Fired::none(),
        };
        self.active = Some(next);
        let now = self.now;
        fired.append(self.submenus[next].enter(now));
        Ok(fired)
    }

    // runs the callbacks, then the switches they requested
    fn finish(&mut self, fired: Fired) -> Result<()> {
        fired.run();
        for _ in 0..MAX_SWITCH_ROUNDS {
            let requests = self.switcher.take();
            if requests.is_empty() {
                return Ok(());
            }
            for name in requests {
                self.switch(&name)?.run();
            }
        }
        warn!("submenu switch requests did not settle");
        Ok(())
    }

    fn dispatch(&mut self, f: impl FnOnce(&mut Submenu) -> Result<Fired>) -> Result<()> {
        let fired = match self.active_mut() {
            Some(s) => f(s)?,
            None => return Ok(()),
        };
        self.finish(fired)
    }

    /// Resizes the window.
    pub fn on_resize(&mut self, width: Real, height: Real) {
        self.size = vec2f(width, height);
        let frame = self.frame();
        for s in &mut self.submenus {
            s.set_frame(frame);
        }
    }

    /// Pointer moved to `(x, y)`.
    pub fn on_mouse_motion(&mut self, x: Real, y: Real) -> Result<()> { self.dispatch(|s| s.on_mouse_motion(vec2f(x, y))) }

    /// Pointer dragged to `(x, y)` by `(dx, dy)`.
    pub fn on_mouse_drag(&mut self, x: Real, y: Real, dx: Real, dy: Real, buttons: MouseButton) -> Result<()> {
        self.dispatch(|s| s.on_mouse_drag(vec2f(x, y), vec2f(dx, dy), buttons))
    }

    /// Button pressed at `(x, y)`.
    pub fn on_mouse_press(&mut self, x: Real, y: Real, button: MouseButton) -> Result<()> { self.dispatch(|s| s.on_mouse_press(vec2f(x, y), button)) }

    /// Button released at `(x, y)`.
    pub fn on_mouse_release(&mut self, x: Real, y: Real, button: MouseButton) -> Result<()> { self.dispatch(|s| s.on_mouse_release(vec2f(x, y), button)) }

    /// Text entered.
    pub fn on_text(&mut self, text: &str) -> Result<()> { self.dispatch(|s| s.on_text(text)) }

    /// Editing key pressed.
    pub fn on_text_motion(&mut self, motion: TextMotion) -> Result<()> { self.dispatch(|s| s.on_text_motion(motion)) }

    /// Clock tick, in seconds.
    pub fn update(&mut self, now: f64) -> Result<()> {
        self.now = self.now.max(now);
        self.dispatch(|s| Ok(s.update(now)))
    }

    /// Regenerates the active submenu.
    pub fn draw(&mut self) -> Result<()> {
        match self.active_mut() {
            Some(s) => s.draw(),
            None => Ok(()),
        }
    }
}

/// Modal submenu entered on top of the current one.
///
/// Entering a dialog that is already shown is a broken call sequence and fails. With a timeout the
/// dialog returns to the previous submenu on its own; entering it again restarts the countdown.
pub struct Dialog {
    name: String,
    timeout: Option<f64>,
    previous: Option<String>,
}

const DIALOG_TIMEOUT: &str = "dialog-timeout";

impl Dialog {
    /// Dialog over the submenu `name` of the menu it is activated on.
    pub fn new(name: &str) -> Self { Self { name: name.to_string(), timeout: None, previous: None } }

    /// Leaves the dialog automatically after `secs`.
    pub fn with_timeout(mut self, secs: f64) -> Self {
        self.timeout = Some(secs);
        self
    }

    /// Submenu name.
    pub fn name(&self) -> &str { &self.name }

    /// Returns `true` while the dialog is the active submenu of `menu`.
    pub fn is_active(&self, menu: &Menu) -> bool { menu.active_submenu() == Some(self.name.as_str()) }

    /// Shows the dialog.
    pub fn activate(&mut self, menu: &mut Menu) -> Result<()> {
        if self.is_active(menu) {
            return Err(GuiError::DoubleActivation(self.name.clone()));
        }
        self.previous = menu.active_submenu().map(str::to_string);
        menu.change_submenu(&self.name)?;
        if let (Some(secs), Some(previous)) = (self.timeout, self.previous.clone()) {
            let switcher = menu.switcher();
            menu.get_submenu_mut(&self.name)?.timers_mut().schedule_once(DIALOG_TIMEOUT, secs, move || switcher.request(&previous));
        }
        Ok(())
    }

    /// Returns to the submenu that was active before the dialog. Does nothing if the dialog is not shown.
    pub fn exit(&mut self, menu: &mut Menu) -> Result<()> {
        if !self.is_active(menu) {
            return Ok(());
        }
        match self.previous.take() {
            Some(previous) => menu.change_submenu(&previous),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::*;

    fn submenu(name: &str) -> Submenu {
        let batch = BatchHandle::new(Rc::new(RefCell::new(MemoryBatch::new())));
        Submenu::new(name, batch, Rc::new(Scene::new().atlas), Rc::new(Theme::default()))
    }

    fn menu() -> Menu {
        let mut m = Menu::new(800.0, 600.0);
        m.add_submenu(submenu("main")).unwrap();
        m.add_submenu(submenu("settings")).unwrap();
        m
    }

    #[test]
    fn only_the_active_submenu_is_clickable() {
        let mut m = menu();
        let log = Rc::new(RefCell::new(Vec::new()));
        let main_btn = m.get_submenu_mut("main").unwrap().add_widget(Button::new("ok", (50.0, 50.0), (100.0, 40.0))).unwrap();
        let set_btn = m.get_submenu_mut("settings").unwrap().add_widget(Button::new("ok", (50.0, 50.0), (100.0, 40.0))).unwrap();
        main_btn.add_action(ActionKey::Click, recorder(&log, "main"));
        set_btn.add_action(ActionKey::Click, recorder(&log, "settings"));
        assert!(main_btn.borrow().core().clickable());
        assert!(!set_btn.borrow().core().clickable());

        // a direct event on a widget of an inactive submenu changes nothing
        let frame = m.frame();
        set_btn.borrow_mut().on_mouse_press(frame, vec2f(60.0, 60.0), MouseButton::LEFT).unwrap().run();
        assert!(!set_btn.borrow().core().is_pressed());

        m.on_mouse_press(60.0, 60.0, MouseButton::LEFT).unwrap();
        m.on_mouse_release(60.0, 60.0, MouseButton::LEFT).unwrap();
        m.change_submenu("settings").unwrap();
        assert!(!main_btn.borrow().core().clickable());
        m.on_mouse_press(60.0, 60.0, MouseButton::LEFT).unwrap();
        m.on_mouse_release(60.0, 60.0, MouseButton::LEFT).unwrap();
        assert_eq!(*log.borrow(), vec!["main", "settings"]);
    }

    #[test]
    fn switching_fires_enter_and_exit_once() {
        let mut m = menu();
        let log = Rc::new(RefCell::new(Vec::new()));
        m.get_submenu_mut("main").unwrap().add_action(ActionKey::SubmenuExit, recorder(&log, "exit main"));
        m.get_submenu_mut("settings").unwrap().add_action(ActionKey::SubmenuEnter, recorder(&log, "enter settings"));
        m.change_submenu("settings").unwrap();
        m.change_submenu("settings").unwrap();
        assert_eq!(*log.borrow(), vec!["exit main", "enter settings"]);
        assert!(matches!(m.change_submenu("nope"), Err(GuiError::SubmenuNotFound(_))));
        assert!(matches!(m.add_submenu(submenu("main")), Err(GuiError::DuplicateName(_))));
    }

    #[test]
    fn callbacks_switch_through_the_switcher() {
        let mut m = menu();
        let switcher = m.switcher();
        let btn = m.get_submenu_mut("main").unwrap().add_widget(Button::new("go", (0.0, 0.0), (100.0, 40.0))).unwrap();
        btn.add_action(ActionKey::Click, move || switcher.request("settings"));
        m.on_mouse_press(10.0, 10.0, MouseButton::LEFT).unwrap();
        m.on_mouse_release(10.0, 10.0, MouseButton::LEFT).unwrap();
        assert_eq!(m.active_submenu(), Some("settings"));
    }

    #[test]
    fn buttons_heal_periodically() {
        let mut m = menu();
        let btn = m.get_submenu_mut("main").unwrap().add_widget(Button::new("b", (0.0, 0.0), (100.0, 40.0))).unwrap();
        m.draw().unwrap();
        assert!(!btn.borrow().core().is_dirty());
        m.update(1.0).unwrap();
        assert!(!btn.borrow().core().is_dirty());
        m.update(2.5).unwrap();
        assert!(btn.borrow().core().is_dirty());
    }

    #[test]
    fn deleted_widgets_stop_healing() {
        let mut s = submenu("s");
        for _ in 0..3 {
            s.add_widget(Button::new("ok", (0.0, 0.0), (100.0, 40.0))).unwrap();
            s.del_widget("ok").unwrap();
        }
        assert_eq!(s.timers_mut().len(), 0);
        s.add_widget(Label::new("text", (0.0, 0.0), (100.0, 40.0), "hi")).unwrap();
        assert_eq!(s.timers_mut().len(), 0);
    }

    #[test]
    fn buttons_added_to_a_container_later_still_heal() {
        let mut m = menu();
        let c = m.get_submenu_mut("main").unwrap().add_widget(Container::new("box", (0.0, 0.0), (400.0, 300.0))).unwrap();
        let btn = c.borrow_mut().add_widget(Button::new("late", (10.0, 10.0), (100.0, 40.0))).unwrap();
        m.draw().unwrap();
        assert!(!btn.borrow().core().is_dirty());
        m.update(2.5).unwrap();
        assert!(btn.borrow().core().is_dirty());
    }

    #[test]
    fn dialog_refuses_double_entry_and_returns() {
        let mut m = menu();
        let mut d = Dialog::new("settings");
        d.activate(&mut m).unwrap();
        assert_eq!(m.active_submenu(), Some("settings"));
        assert!(matches!(d.activate(&mut m), Err(GuiError::DoubleActivation(_))));
        d.exit(&mut m).unwrap();
        assert_eq!(m.active_submenu(), Some("main"));
        d.exit(&mut m).unwrap();
        assert_eq!(m.active_submenu(), Some("main"));
    }

    #[test]
    fn dialog_timeout_is_superseded_by_new_activation() {
        let mut m = menu();
        let mut d = Dialog::new("settings").with_timeout(5.0);
        m.update(1.0).unwrap();
        d.activate(&mut m).unwrap();
        m.update(2.0).unwrap();
        d.exit(&mut m).unwrap();
        m.update(4.0).unwrap();
        d.activate(&mut m).unwrap();
        m.update(8.5).unwrap();
        assert_eq!(m.active_submenu(), Some("settings"));
        m.update(9.5).unwrap();
        assert_eq!(m.active_submenu(), Some("main"));
    }

    #[test]
    fn removed_widget_releases_primitives() {
        let batch = Rc::new(RefCell::new(MemoryBatch::new()));
        let mut s = Submenu::new("s", BatchHandle::new(batch.clone()), Rc::new(Scene::new().atlas), Rc::new(Theme::default()));
        s.set_frame(Frame::from_size(800.0, 600.0));
        s.add_widget(Button::new("b", (0.0, 0.0), (100.0, 40.0))).unwrap();
        s.draw().unwrap();
        assert_eq!(batch.borrow().live_primitives(), 1);
        s.del_widget("b").unwrap();
        assert_eq!(batch.borrow().live_primitives(), 0);
        assert!(matches!(s.get_widget("b"), Err(GuiError::WidgetNotFound(_))));
    }
}
