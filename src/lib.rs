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
#![deny(missing_docs)]
//! `strata-gui` is a retained-mode GUI layout and paint engine.
//! Widgets resolve their position and size on demand from constants, callbacks or layout cells, generate
//! their vertex/color data through a pluggable border style engine, and hand the results to a draw batch
//! supplied by the embedding application. Windowing, texture upload and text shaping stay outside the crate.

use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    collections::HashMap,
    rc::{Rc, Weak},
};

use log::{debug, trace, warn};

macro_rules! implement_widget_core {
    () => {
        fn core(&self) -> &WidgetCore { &self.core }
        fn core_mut(&mut self) -> &mut WidgetCore { &mut self.core }
    };
}

mod actions;
mod atlas;
mod background;
mod batch;
mod container;
mod error;
mod geometry;
mod layout;
mod menu;
mod nine_patch;
mod responsive;
mod scrollbar;
mod style;
mod text;
mod timer;
mod widgets;

pub use actions::*;
pub use atlas::*;
pub use background::*;
pub use batch::*;
pub use container::*;
pub use error::{GuiError, Result};
pub use geometry::*;
pub use layout::*;
pub use menu::*;
pub use nine_patch::*;
pub use responsive::*;
pub use rs_math3d::*;
pub use style::*;
pub use text::*;
pub use timer::*;
pub use widgets::*;

use bitflags::*;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Numeric identifier value.
pub struct Id(usize);

impl Id {
    /// Creates an ID from a caller-supplied numeric value.
    pub fn new(value: u64) -> Self { Self(value as usize) }

    /// Creates a stable ID from a string label using FNV-1a hashing.
    pub fn from_str(label: &str) -> Self {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;
        let mut hash = FNV_OFFSET_BASIS;
        for byte in label.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self::new(hash)
    }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> usize { self.0 }
}

/// Floating-point type used by geometry and layout calculations.
pub type Real = f32;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white, the neutral tint for textured quads.
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    /// Adds `delta` to every color channel, clamping to `[0, 255]`. Alpha is preserved.
    pub fn shade(self, delta: i32) -> Self {
        let ch = |c: u8| (c as i32 + delta).clamp(0, 255) as u8;
        Self { r: ch(self.r), g: ch(self.g), b: ch(self.b), a: self.a }
    }
}

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Convenience constructor for [`Vec2f`].
pub fn vec2f(x: Real, y: Real) -> Vec2f { Vec2f::new(x, y) }

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the windowing collaborator.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }

    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    /// Pointer/keyboard interaction bits tracked per widget.
    pub struct InteractionFlags : u32 {
        /// Text input owns keyboard focus.
        const FOCUSED = 4;
        /// Primary button is held (or a toggle is latched).
        const PRESSED = 2;
        /// Pointer is inside the widget bounds.
        const HOVERING = 1;
        /// Idle.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

impl InteractionFlags {
    /// Returns `true` while the pointer is inside the widget.
    pub fn is_hovering(&self) -> bool { self.intersects(Self::HOVERING) }
    /// Returns `true` while the widget is pressed.
    pub fn is_pressed(&self) -> bool { self.intersects(Self::PRESSED) }
    /// Returns `true` while the widget has keyboard focus.
    pub fn is_focused(&self) -> bool { self.intersects(Self::FOCUSED) }
}

#[derive(Clone, Debug)]
/// Collection of visual constants and timing parameters that drive widget appearance.
pub struct Theme {
    /// Background color used by submenus that do not override it.
    pub background: Color,
    /// Brightness delta from the background to the inner palette color.
    pub inner_delta: i32,
    /// Brightness delta from the background to the shadow palette color.
    pub shadow_delta: i32,
    /// Brightness delta from the background to the highlight palette color.
    pub highlight_delta: i32,
    /// Brightening applied by hover-sensitive styles.
    pub hover_delta: i32,
    /// Darkening of the material style center while hovered.
    pub material_hover_delta: i32,
    /// Darkening of the material style center while pressed.
    pub material_press_delta: i32,
    /// Default border width of button-like backgrounds.
    pub border: Vec2f,
    /// Interval of the periodic self-healing redraw of buttons, in seconds.
    pub button_heal: f64,
    /// Blink half-period of the text input cursor, in seconds.
    pub cursor_blink: f64,
    /// Default size of text labels, in points.
    pub font_size: Real,
    /// Default font name handed to the text collaborator.
    pub font: String,
    /// Default label color.
    pub font_color: Color,
    /// Breakpoint table and unit count used by responsive layouts.
    pub breakpoints: Breakpoints,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color { r: 242, g: 241, b: 240, a: 255 },
            inner_delta: 8,
            shadow_delta: -40,
            highlight_delta: 12,
            hover_delta: 6,
            material_hover_delta: -10,
            material_press_delta: -20,
            border: Vec2f::new(4.0, 4.0),
            button_heal: 2.0,
            cursor_blink: 0.5,
            font_size: 16.0,
            font: String::from("Arial"),
            font_color: Color { r: 62, g: 67, b: 73, a: 255 },
            breakpoints: Breakpoints::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Shared on/off switch linking a submenu to the widgets it owns.
/// A widget is clickable exactly while the flag of its owning submenu is set.
pub struct ActivityFlag(Rc<Cell<bool>>);

impl ActivityFlag {
    /// Creates an inactive flag.
    pub fn new() -> Self { Self::default() }

    /// Returns `true` while the owning submenu is the active one.
    pub fn is_active(&self) -> bool { self.0.get() }

    pub(crate) fn set(&self, active: bool) { self.0.set(active) }
}

/// Shared handle to a widget, used to reach widgets from action callbacks.
pub struct WidgetHandle<W: ?Sized>(Rc<RefCell<W>>);

// derive(Clone) would require `W: Clone`
impl<W: ?Sized> Clone for WidgetHandle<W> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<W: Widget + 'static> WidgetHandle<W> {
    /// Wraps a widget that is not owned by any set yet.
    pub fn new(widget: W) -> Self { Self(Rc::new(RefCell::new(widget))) }

    /// Erases the concrete widget type so the handle can be stored in a [`WidgetSet`].
    pub fn erase(&self) -> WidgetHandle<dyn Widget> { WidgetHandle(self.0.clone()) }
}

impl<W: ?Sized> WidgetHandle<W> {
    pub(crate) fn from_rc(rc: Rc<RefCell<W>>) -> Self { Self(rc) }

    pub(crate) fn rc(&self) -> &Rc<RefCell<W>> { &self.0 }

    /// Address of the widget value, used for identity checks.
    pub(crate) fn value_ptr(&self) -> *const W { self.0.as_ptr() }

    /// Returns an immutable borrow of the widget.
    pub fn borrow(&self) -> Ref<'_, W> { self.0.borrow() }

    /// Returns a mutable borrow of the widget.
    pub fn borrow_mut(&self) -> RefMut<'_, W> { self.0.borrow_mut() }

    /// Immutable borrow, unless the widget is mutably borrowed.
    pub fn try_borrow(&self) -> std::result::Result<Ref<'_, W>, std::cell::BorrowError> { self.0.try_borrow() }

    /// Mutable borrow, unless the widget is already borrowed.
    pub fn try_borrow_mut(&self) -> std::result::Result<RefMut<'_, W>, std::cell::BorrowMutError> { self.0.try_borrow_mut() }

    /// Executes `f` with a read-only view of the widget.
    pub fn with<R>(&self, f: impl FnOnce(&W) -> R) -> R { f(&self.0.borrow()) }

    /// Executes `f` with a mutable view of the widget.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut W) -> R) -> R { f(&mut self.0.borrow_mut()) }

    /// Returns `true` if both handles point at the same widget.
    pub fn ptr_eq<V: ?Sized>(&self, other: &WidgetHandle<V>) -> bool { std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0)) }
}

impl<W: Widget + ?Sized> WidgetHandle<W> {
    /// Fires every callback registered for `action`, in registration order.
    /// The callbacks run after the widget borrow is released so they may borrow the widget again.
    pub fn do_action(&self, action: &ActionKey) {
        let fired = self.0.borrow().core().fire(std::slice::from_ref(action));
        fired.run();
    }

    /// Adds a callback for `key`.
    pub fn add_action(&self, key: impl Into<ActionKey>, callback: impl Fn() + 'static) { self.0.borrow_mut().core_mut().add_action(key, callback) }
}
