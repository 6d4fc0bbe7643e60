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
//! Action keys and callback registries.
use super::*;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Event a widget or submenu can fire.
pub enum ActionKey {
    /// Primary button released inside a pressed widget.
    Click,
    /// Primary button pressed inside the widget.
    Press,
    /// Toggle latched down.
    PressDown,
    /// Toggle released.
    PressUp,
    /// Pointer entered the widget.
    HoverStart,
    /// Pointer left the widget.
    HoverEnd,
    /// Secondary button pressed inside the widget.
    Context,
    /// Progress bar or slider value changed.
    ProgressChange,
    /// Text input content changed.
    TextChange,
    /// Text input submitted.
    Enter,
    /// Text input gained focus.
    Focus,
    /// Text input lost focus.
    Unfocus,
    /// Submenu became active.
    SubmenuEnter,
    /// Submenu became inactive.
    SubmenuExit,
    /// Application-defined action.
    Custom(String),
}

impl ActionKey {
    /// Canonical action name.
    pub fn name(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::Press => "press",
            Self::PressDown => "press_down",
            Self::PressUp => "press_up",
            Self::HoverStart => "hover_start",
            Self::HoverEnd => "hover_end",
            Self::Context => "context",
            Self::ProgressChange => "progressbar_change",
            Self::TextChange => "textchange",
            Self::Enter => "enter",
            Self::Focus => "focus",
            Self::Unfocus => "unfocus",
            Self::SubmenuEnter => "enter_submenu",
            Self::SubmenuExit => "exit_submenu",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for ActionKey {
    fn from(name: &str) -> Self {
        match name {
            "click" => Self::Click,
            "press" => Self::Press,
            "press_down" => Self::PressDown,
            "press_up" => Self::PressUp,
            "hover_start" => Self::HoverStart,
            "hover_end" => Self::HoverEnd,
            "context" => Self::Context,
            "progressbar_change" => Self::ProgressChange,
            "textchange" => Self::TextChange,
            "enter" => Self::Enter,
            "focus" => Self::Focus,
            "unfocus" => Self::Unfocus,
            "enter_submenu" => Self::SubmenuEnter,
            "exit_submenu" => Self::SubmenuExit,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Action callback. Bound arguments are captured by the closure.
pub type Callback = Rc<dyn Fn()>;

#[derive(Clone, Default)]
/// Ordered callback lists keyed by action.
pub struct ActionRegistry {
    actions: HashMap<ActionKey, Vec<Callback>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self { Self::default() }

    /// Appends `callback` to the list of `key`.
    pub fn add(&mut self, key: impl Into<ActionKey>, callback: impl Fn() + 'static) { self.actions.entry(key.into()).or_default().push(Rc::new(callback)) }

    /// Callbacks registered for `key`, in registration order.
    pub fn callbacks(&self, key: &ActionKey) -> Vec<Callback> { self.actions.get(key).cloned().unwrap_or_default() }

    /// Callbacks of several keys, keys in the given order.
    pub fn collect(&self, keys: &[ActionKey]) -> Fired {
        let mut fired = Fired::none();
        for key in keys {
            fired.0.extend(self.callbacks(key));
        }
        fired
    }

    /// Number of callbacks registered for `key`.
    pub fn count(&self, key: &ActionKey) -> usize { self.actions.get(key).map_or(0, |v| v.len()) }

    /// Removes every callback of `key`.
    pub fn clear(&mut self, key: &ActionKey) { self.actions.remove(key); }
}

#[derive(Clone, Default)]
#[must_use = "fired callbacks only run when `run` is called"]
/// Callbacks selected by an event, to be invoked once no widget is borrowed.
pub struct Fired(Vec<Callback>);

impl Fired {
    /// Nothing fired.
    pub fn none() -> Self { Self::default() }

    /// Appends the callbacks of `other`.
    pub fn append(&mut self, other: Fired) { self.0.extend(other.0) }

    pub(crate) fn push(&mut self, cb: Callback) { self.0.push(cb) }

    /// Number of pending callbacks.
    pub fn len(&self) -> usize { self.0.len() }

    /// Returns `true` if nothing fired.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Invokes every callback in order.
    pub fn run(self) {
        for cb in self.0 {
            cb();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reg = ActionRegistry::new();
        for i in 0..3 {
            let log = log.clone();
            reg.add("click", move || log.borrow_mut().push(i));
        }
        assert_eq!(reg.count(&ActionKey::Click), 3);
        reg.collect(&[ActionKey::Click, ActionKey::Press]).run();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn names_round_trip() {
        for key in [ActionKey::Click, ActionKey::ProgressChange, ActionKey::TextChange, ActionKey::Custom("spin".into())] {
            assert_eq!(ActionKey::from(key.name()), key);
        }
    }

    #[test]
    fn cleared_action_fires_nothing() {
        let mut reg = ActionRegistry::new();
        reg.add(ActionKey::Context, || {});
        reg.clear(&ActionKey::Context);
        assert!(reg.collect(&[ActionKey::Context]).is_empty());
    }
}
