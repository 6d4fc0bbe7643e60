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
//! Border style engine.
//!
//! A style maps the five palette colors and an interaction state to one color per vertex of every quad
//! of a border shape. Quad vertices are always listed bottom-left, bottom-right, top-right, top-left for
//! grid quads, and outer edge first then inner edge for the trapezoids of [`BorderShape::Button5`].
use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Five colors derived from a submenu background.
pub struct Palette {
    /// Background color.
    pub bg: Color,
    /// Outer border color.
    pub outer: Color,
    /// Inner fill color.
    pub inner: Color,
    /// Shadow color.
    pub shadow: Color,
    /// Highlight color.
    pub highlight: Color,
}

impl Palette {
    /// Derives the palette from `bg` using the theme deltas.
    pub fn from_background(bg: Color, theme: &Theme) -> Self {
        Self {
            bg,
            outer: bg,
            inner: bg.shade(theme.inner_delta),
            shadow: bg.shade(theme.shadow_delta),
            highlight: bg.shade(theme.highlight_delta),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Interaction state a style is evaluated for.
pub enum InteractionState {
    /// Neither hovered nor pressed.
    Idle,
    /// Pointer inside.
    Hover,
    /// Pressed or latched.
    Pressed,
}

impl InteractionState {
    /// Derives the state from widget flags. Pressed wins over hover.
    pub fn from_flags(flags: InteractionFlags) -> Self {
        if flags.is_pressed() {
            Self::Pressed
        } else if flags.is_hovering() {
            Self::Hover
        } else {
            Self::Idle
        }
    }

    /// Applies the `change_on_press` switch: when disabled, pressed renders like idle.
    pub fn with_change_on_press(self, change_on_press: bool) -> Self {
        match self {
            Self::Pressed if !change_on_press => Self::Idle,
            s => s,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Quad decomposition a style is evaluated for.
pub enum BorderShape {
    /// Top, right, bottom and left trapezoids of a button border, then the center quad.
    Button5,
    /// 3x3 border grid in row-major order from the bottom-left corner; quad 4 is the center.
    Border9,
    /// Filled and remaining part of a progress bar.
    ProgressSplit,
}

impl BorderShape {
    /// Number of quads in the shape.
    pub fn quad_count(self) -> usize {
        match self {
            Self::Button5 => 5,
            Self::Border9 => 9,
            Self::ProgressSplit => 2,
        }
    }
}

/// Colors of the four vertices of a quad.
pub type QuadColors = [Color; 4];

/// Arguments of a style function.
pub struct StyleInput<'a> {
    /// Shape being colored.
    pub shape: BorderShape,
    /// Palette of the owning submenu.
    pub palette: &'a Palette,
    /// Interaction state, already adjusted for `change_on_press`.
    pub state: InteractionState,
    /// Theme supplying the hover/press deltas.
    pub theme: &'a Theme,
}

/// Style function.
pub type StyleFn = Rc<dyn Fn(&StyleInput) -> Vec<QuadColors>>;

#[derive(Clone)]
/// Named style resolved from a [`StyleRegistry`].
pub struct BorderStyle {
    name: String,
    func: StyleFn,
}

impl BorderStyle {
    /// Wraps a style function.
    pub fn new(name: &str, func: impl Fn(&StyleInput) -> Vec<QuadColors> + 'static) -> Self { Self { name: name.to_string(), func: Rc::new(func) } }

    /// Style name.
    pub fn name(&self) -> &str { &self.name }

    /// Evaluates the style and checks the quad count against the shape.
    pub fn colors(&self, shape: BorderShape, palette: &Palette, state: InteractionState, theme: &Theme) -> Result<Vec<QuadColors>> {
        let colors = (self.func)(&StyleInput { shape, palette, state, theme });
        if colors.len() != shape.quad_count() {
            return Err(GuiError::ColorCountMismatch { style: self.name.clone(), expected: shape.quad_count(), got: colors.len() });
        }
        Ok(colors)
    }

    /// Evaluates the style for every state of `shape` so mismatches surface at construction time.
    pub fn validate(&self, shape: BorderShape, theme: &Theme) -> Result<()> {
        let palette = Palette::from_background(theme.background, theme);
        for state in [InteractionState::Idle, InteractionState::Hover, InteractionState::Pressed] {
            self.colors(shape, &palette, state, theme)?;
        }
        Ok(())
    }
}

/// Table of named styles. Widgets resolve their style once, at construction.
pub struct StyleRegistry {
    styles: HashMap<String, BorderStyle>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        let mut reg = Self { styles: HashMap::new() };
        reg.register("flat", flat);
        reg.register("gradient", gradient);
        reg.register("oldshadow", oldshadow);
        reg.register("material", material);
        reg
    }
}

impl StyleRegistry {
    /// Registry holding the four built-in styles.
    pub fn new() -> Self { Self::default() }

    /// Registers (or replaces) a named style.
    pub fn register(&mut self, name: &str, func: impl Fn(&StyleInput) -> Vec<QuadColors> + 'static) {
        if self.styles.insert(name.to_string(), BorderStyle::new(name, func)).is_some() {
            debug!("border style `{}` replaced", name);
        }
    }

    /// Resolves a style by name.
    pub fn get(&self, name: &str) -> Result<BorderStyle> { self.styles.get(name).cloned().ok_or_else(|| GuiError::UnknownStyle(name.to_string())) }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool { self.styles.contains_key(name) }
}

const TRAPEZOID_TOP: usize = 0;
const TRAPEZOID_RIGHT: usize = 1;
const TRAPEZOID_BOTTOM: usize = 2;
const TRAPEZOID_LEFT: usize = 3;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Side {
    Light,
    Dark,
    Neutral,
}

/// Side of the light source a border quad faces. Light comes from the top-left.
fn button_side(quad: usize) -> Side {
    match quad {
        TRAPEZOID_TOP | TRAPEZOID_LEFT => Side::Light,
        TRAPEZOID_RIGHT | TRAPEZOID_BOTTOM => Side::Dark,
        _ => Side::Neutral,
    }
}

fn grid_side(row: usize, col: usize) -> Side {
    if (row == 2 && col != 2) || (col == 0 && row != 0) {
        Side::Light
    } else if (row == 0 && col != 0) || (col == 2 && row != 2) {
        Side::Dark
    } else {
        Side::Neutral
    }
}

/// Which vertices of a border quad lie on the inner rectangle.
fn inner_mask(shape: BorderShape, quad: usize) -> [bool; 4] {
    match shape {
        BorderShape::Button5 if quad == 4 => [true; 4],
        BorderShape::Button5 => [false, false, true, true],
        BorderShape::Border9 => {
            let (row, col) = (quad / 3, quad % 3);
            let corners = [(col, row), (col + 1, row), (col + 1, row + 1), (col, row + 1)];
            corners.map(|(x, y)| (1..=2).contains(&x) && (1..=2).contains(&y))
        }
        BorderShape::ProgressSplit => [true; 4],
    }
}

fn side_of(shape: BorderShape, quad: usize) -> Side {
    match shape {
        BorderShape::Button5 => button_side(quad),
        BorderShape::Border9 if quad == 4 => Side::Neutral,
        BorderShape::Border9 => grid_side(quad / 3, quad % 3),
        BorderShape::ProgressSplit => Side::Neutral,
    }
}

fn is_center(shape: BorderShape, quad: usize) -> bool {
    match shape {
        BorderShape::Button5 | BorderShape::Border9 => quad == 4,
        BorderShape::ProgressSplit => quad == 1,
    }
}

fn map_quads(shape: BorderShape, f: impl Fn(usize) -> QuadColors) -> Vec<QuadColors> { (0..shape.quad_count()).map(f).collect() }

fn gradient_quad(mask: [bool; 4], outer: Color, inner: Color) -> QuadColors { mask.map(|m| if m { inner } else { outer }) }

/// Every quad uses the inner color. The filled part of a progress bar uses the shadow color.
pub fn flat(input: &StyleInput) -> Vec<QuadColors> {
    let p = input.palette;
    map_quads(input.shape, |q| match input.shape {
        BorderShape::ProgressSplit if q == 0 => [p.shadow; 4],
        _ => [p.inner; 4],
    })
}

/// Borders blend from the outer color to the inner color. Hover lightens the inner color, pressed
/// replaces it with the shadow color.
pub fn gradient(input: &StyleInput) -> Vec<QuadColors> {
    let p = input.palette;
    let inner = match input.state {
        InteractionState::Idle => p.inner,
        InteractionState::Hover => p.inner.shade(input.theme.hover_delta),
        InteractionState::Pressed => p.shadow,
    };
    map_quads(input.shape, |q| match input.shape {
        BorderShape::ProgressSplit if q == 0 => [p.shadow, p.shadow, p.outer, p.outer],
        shape if is_center(shape, q) => [inner; 4],
        shape => gradient_quad(inner_mask(shape, q), p.outer, inner),
    })
}

/// Bevel lit from the top-left. Pressed swaps highlight and shadow; hover lightens inner and shadow.
pub fn oldshadow(input: &StyleInput) -> Vec<QuadColors> {
    let p = input.palette;
    let (inner, shadow) = match input.state {
        InteractionState::Hover => (p.inner.shade(input.theme.hover_delta), p.shadow.shade(input.theme.hover_delta)),
        _ => (p.inner, p.shadow),
    };
    let (light, dark) = match input.state {
        InteractionState::Pressed => (shadow, p.highlight),
        _ => (p.highlight, shadow),
    };
    map_quads(input.shape, |q| match input.shape {
        BorderShape::ProgressSplit if q == 0 => [shadow, shadow, p.highlight, p.highlight],
        shape => match side_of(shape, q) {
            Side::Light => [light; 4],
            Side::Dark => [dark; 4],
            Side::Neutral if is_center(shape, q) => [inner; 4],
            Side::Neutral => [p.outer; 4],
        },
    })
}

/// Flat surface with a drop shadow along the bottom and right edges. Hover and pressed darken the
/// center from the background color.
pub fn material(input: &StyleInput) -> Vec<QuadColors> {
    let p = input.palette;
    let center = match input.state {
        InteractionState::Idle => p.bg,
        InteractionState::Hover => p.bg.shade(input.theme.material_hover_delta),
        InteractionState::Pressed => p.bg.shade(input.theme.material_press_delta),
    };
    map_quads(input.shape, |q| match input.shape {
        BorderShape::ProgressSplit if q == 0 => [p.shadow; 4],
        shape if is_center(shape, q) => [center; 4],
        shape => match side_of(shape, q) {
            Side::Dark => inner_mask(shape, q).map(|m| if m { p.outer } else { p.shadow }),
            _ => [p.outer; 4],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: [&str; 4] = ["flat", "gradient", "oldshadow", "material"];
    const STATE_SENSITIVE: [&str; 3] = ["gradient", "oldshadow", "material"];

    fn eval(name: &str, shape: BorderShape, state: InteractionState) -> Vec<QuadColors> {
        let theme = Theme::default();
        let palette = Palette::from_background(theme.background, &theme);
        StyleRegistry::new().get(name).unwrap().colors(shape, &palette, state, &theme).unwrap()
    }

    #[test]
    fn palette_deltas_are_clamped() {
        let theme = Theme::default();
        let p = Palette::from_background(color(250, 20, 128, 255), &theme);
        assert_eq!(p.inner, color(255, 28, 136, 255));
        assert_eq!(p.shadow, color(210, 0, 88, 255));
        assert_eq!(p.highlight, color(255, 32, 140, 255));
        assert_eq!(p.outer, p.bg);
    }

    #[test]
    fn builtins_match_every_shape() {
        let theme = Theme::default();
        let reg = StyleRegistry::new();
        for name in STYLES {
            for shape in [BorderShape::Button5, BorderShape::Border9, BorderShape::ProgressSplit] {
                assert!(reg.get(name).unwrap().validate(shape, &theme).is_ok(), "{} {:?}", name, shape);
            }
        }
    }

    #[test]
    fn unknown_style_is_reported() {
        assert_eq!(StyleRegistry::new().get("glossy").err(), Some(GuiError::UnknownStyle("glossy".into())));
    }

    #[test]
    fn custom_style_with_wrong_count_fails_validation() {
        let mut reg = StyleRegistry::new();
        reg.register("broken", |input| vec![[input.palette.bg; 4]; 3]);
        let err = reg.get("broken").unwrap().validate(BorderShape::Button5, &Theme::default()).unwrap_err();
        assert_eq!(err, GuiError::ColorCountMismatch { style: "broken".into(), expected: 5, got: 3 });
    }

    #[test]
    fn flat_ignores_state() {
        for shape in [BorderShape::Button5, BorderShape::Border9] {
            assert_eq!(eval("flat", shape, InteractionState::Idle), eval("flat", shape, InteractionState::Pressed));
            assert_eq!(eval("flat", shape, InteractionState::Idle), eval("flat", shape, InteractionState::Hover));
        }
    }

    #[test]
    fn pressed_differs_from_idle_for_state_sensitive_styles() {
        for name in STATE_SENSITIVE {
            for shape in [BorderShape::Button5, BorderShape::Border9] {
                assert_ne!(eval(name, shape, InteractionState::Idle), eval(name, shape, InteractionState::Pressed), "{}", name);
            }
        }
    }

    #[test]
    fn disabled_change_on_press_renders_idle() {
        for name in STYLES {
            let state = InteractionState::Pressed.with_change_on_press(false);
            assert_eq!(eval(name, BorderShape::Button5, state), eval(name, BorderShape::Button5, InteractionState::Idle));
        }
        assert_eq!(InteractionState::Hover.with_change_on_press(false), InteractionState::Hover);
    }

    #[test]
    fn oldshadow_press_swaps_highlight_and_shadow() {
        let theme = Theme::default();
        let p = Palette::from_background(theme.background, &theme);
        let idle = eval("oldshadow", BorderShape::Button5, InteractionState::Idle);
        let pressed = eval("oldshadow", BorderShape::Button5, InteractionState::Pressed);
        let lit_before: Vec<usize> = (0..5).filter(|&q| idle[q][0] == p.highlight).collect();
        let dark_before: Vec<usize> = (0..5).filter(|&q| idle[q][0] == p.shadow).collect();
        let lit_after: Vec<usize> = (0..5).filter(|&q| pressed[q][0] == p.highlight).collect();
        let dark_after: Vec<usize> = (0..5).filter(|&q| pressed[q][0] == p.shadow).collect();
        assert_eq!(lit_before, vec![TRAPEZOID_TOP, TRAPEZOID_LEFT]);
        assert_eq!(lit_before, dark_after);
        assert_eq!(dark_before, lit_after);
    }

    #[test]
    fn gradient_blends_outer_to_inner() {
        let theme = Theme::default();
        let p = Palette::from_background(theme.background, &theme);
        let idle = eval("gradient", BorderShape::Border9, InteractionState::Idle);
        // bottom-left corner: only the top-right vertex touches the inner rectangle
        assert_eq!(idle[0], [p.outer, p.outer, p.inner, p.outer]);
        assert_eq!(idle[4], [p.inner; 4]);
        let hover = eval("gradient", BorderShape::Button5, InteractionState::Hover);
        assert_eq!(hover[4], [p.inner.shade(6); 4]);
    }

    #[test]
    fn material_darkens_center_from_background() {
        let theme = Theme::default();
        let p = Palette::from_background(theme.background, &theme);
        assert_eq!(eval("material", BorderShape::Button5, InteractionState::Hover)[4], [p.bg.shade(-10); 4]);
        assert_eq!(eval("material", BorderShape::Button5, InteractionState::Pressed)[4], [p.bg.shade(-20); 4]);
    }
}
