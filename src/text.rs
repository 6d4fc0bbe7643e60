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
//! Text labels handed to the text collaborator, the rich-text markup subset and language notifications.
use super::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Vertical placement of a span.
pub enum Script {
    #[default]
    /// Baseline text.
    Normal,
    /// Raised text.
    Superscript,
    /// Lowered text.
    Subscript,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Run of text sharing one set of attributes.
pub struct TextSpan {
    /// Content.
    pub text: String,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Baseline shift.
    pub script: Script,
    /// Color override. `None` uses the label color.
    pub color: Option<Color>,
}

impl TextSpan {
    /// Plain span.
    pub fn plain(text: &str) -> Self { Self { text: text.to_string(), ..Self::default() } }
}

#[derive(Clone, Debug)]
/// Complete state of one label primitive.
pub struct LabelSpec {
    /// Styled runs, in reading order.
    pub spans: Vec<TextSpan>,
    /// Font name.
    pub font: String,
    /// Font size in points.
    pub font_size: Real,
    /// Base color.
    pub color: Color,
    /// Anchor point.
    pub pos: Vec2f,
    /// Horizontal alignment around `pos`.
    pub anchor_x: AnchorX,
    /// Vertical alignment around `pos`.
    pub anchor_y: AnchorY,
    /// Hidden labels are kept but not rendered.
    pub visible: bool,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            spans: Vec::new(),
            font: String::new(),
            font_size: 0.0,
            color: Color::WHITE,
            pos: vec2f(0.0, 0.0),
            anchor_x: AnchorX::Center,
            anchor_y: AnchorY::Center,
            visible: true,
        }
    }
}

impl LabelSpec {
    /// Concatenated content of every span.
    pub fn text(&self) -> String { self.spans.iter().map(|s| s.text.as_str()).collect() }
}

#[derive(Clone, Debug, PartialEq)]
enum Tag {
    Bold,
    Italic,
    Sup,
    Sub,
    Color(Color),
}

impl Tag {
    fn name(&self) -> &'static str {
        match self {
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Sup => "sup",
            Tag::Sub => "sub",
            Tag::Color(_) => "color",
        }
    }

    fn parse(body: &str, offset: usize) -> Result<Self> {
        match body {
            "b" => Ok(Tag::Bold),
            "i" => Ok(Tag::Italic),
            "sup" => Ok(Tag::Sup),
            "sub" => Ok(Tag::Sub),
            _ => {
                let Some(hex) = body.strip_prefix("color=#") else {
                    return Err(GuiError::Markup { offset, reason: format!("unknown tag <{}>", body) });
                };
                parse_hex_color(hex).ok_or_else(|| GuiError::Markup { offset, reason: format!("bad color #{}", hex) }).map(Tag::Color)
            }
        }
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let ch = |i: usize| hex.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
    let a = if hex.len() == 8 { ch(6)? } else { 255 };
    Some(color(ch(0)?, ch(2)?, ch(4)?, a))
}

fn style_of(stack: &[Tag]) -> TextSpan {
    let mut span = TextSpan::default();
    for tag in stack {
        match tag {
            Tag::Bold => span.bold = true,
            Tag::Italic => span.italic = true,
            Tag::Sup => span.script = Script::Superscript,
            Tag::Sub => span.script = Script::Subscript,
            Tag::Color(c) => span.color = Some(*c),
        }
    }
    span
}

fn flush(out: &mut Vec<TextSpan>, text: &mut String, stack: &[Tag]) {
    if text.is_empty() {
        return;
    }
    out.push(TextSpan { text: std::mem::take(text), ..style_of(stack) });
}

/// Parses the label markup subset: `<b>`, `<i>`, `<sup>`, `<sub>` and `<color=#rrggbb[aa]>`, each closed by
/// its matching `</tag>`. `&lt;`, `&gt;` and `&amp;` escape the markup characters.
pub fn parse_markup(src: &str) -> Result<Vec<TextSpan>> {
    let mut out = Vec::new();
    let mut stack: Vec<Tag> = Vec::new();
    let mut text = String::new();
    let mut i = 0;
    while i < src.len() {
        let rest = &src[i..];
        if rest.starts_with('&') {
            let (lit, len) = if rest.starts_with("&lt;") {
                ('<', 4)
            } else if rest.starts_with("&gt;") {
                ('>', 4)
            } else if rest.starts_with("&amp;") {
                ('&', 5)
            } else {
                ('&', 1)
            };
            text.push(lit);
            i += len;
            continue;
        }
        if rest.starts_with('<') {
            let Some(end) = rest.find('>') else {
                return Err(GuiError::Markup { offset: i, reason: "unterminated tag".into() });
            };
            let body = &rest[1..end];
            flush(&mut out, &mut text, &stack);
            if let Some(name) = body.strip_prefix('/') {
                match stack.last() {
                    Some(top) if top.name() == name => {
                        stack.pop();
                    }
                    Some(top) => return Err(GuiError::Markup { offset: i, reason: format!("expected </{}>, found </{}>", top.name(), name) }),
                    None => return Err(GuiError::Markup { offset: i, reason: format!("unmatched </{}>", name) }),
                }
            } else {
                stack.push(Tag::parse(body, i)?);
            }
            i += end + 1;
            continue;
        }
        let Some(ch) = rest.chars().next() else { break };
        text.push(ch);
        i += ch.len_utf8();
    }
    if let Some(open) = stack.last() {
        return Err(GuiError::Markup { offset: src.len(), reason: format!("unclosed <{}>", open.name()) });
    }
    flush(&mut out, &mut text, &stack);
    Ok(out)
}

#[derive(Clone)]
/// Label content: fixed, or looked up on every draw (translated strings).
pub enum TextSource {
    /// Fixed text.
    Literal(String),
    /// Text produced on demand.
    Dynamic(Rc<dyn Fn() -> String>),
}

impl TextSource {
    /// Current text.
    pub fn resolve(&self) -> String {
        match self {
            TextSource::Literal(s) => s.clone(),
            TextSource::Dynamic(f) => f(),
        }
    }
}

impl From<&str> for TextSource {
    fn from(s: &str) -> Self { TextSource::Literal(s.to_string()) }
}

impl From<String> for TextSource {
    fn from(s: String) -> Self { TextSource::Literal(s) }
}

/// Label primitive owned by a widget or layer, anchored inside a rectangle.
pub struct TextLabel {
    source: TextSource,
    formatted: bool,
    font: Option<String>,
    font_size: Option<Real>,
    color: Option<Color>,
    anchor_x: AnchorX,
    anchor_y: AnchorY,
    id: Option<LabelId>,
}

impl TextLabel {
    /// Plain, centered label using the theme font.
    pub fn new(source: impl Into<TextSource>) -> Self {
        Self { source: source.into(), formatted: false, font: None, font_size: None, color: None, anchor_x: AnchorX::Center, anchor_y: AnchorY::Center, id: None }
    }

    /// Label whose text is parsed with [`parse_markup`].
    pub fn formatted(source: impl Into<TextSource>) -> Self { Self { formatted: true, ..Self::new(source) } }

    /// Overrides the font.
    pub fn with_font(mut self, font: &str, size: Real) -> Self {
        self.font = Some(font.to_string());
        self.font_size = Some(size);
        self
    }

    /// Overrides the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the alignment inside the owner rectangle.
    pub fn with_anchor(mut self, anchor_x: AnchorX, anchor_y: AnchorY) -> Self {
        self.anchor_x = anchor_x;
        self.anchor_y = anchor_y;
        self
    }

    /// Current raw text, markup included.
    pub fn text(&self) -> String { self.source.resolve() }

    /// Replaces the content.
    pub fn set_text(&mut self, source: impl Into<TextSource>) { self.source = source.into() }

    /// Label id, once drawn.
    pub fn id(&self) -> Option<LabelId> { self.id }

    fn spans(&self) -> Result<Vec<TextSpan>> {
        let text = self.source.resolve();
        if self.formatted {
            parse_markup(&text)
        } else {
            Ok(vec![TextSpan::plain(&text)])
        }
    }

    /// Builds the label state for `rect`.
    pub fn spec(&self, theme: &Theme, rect: Frame, visible: bool) -> Result<LabelSpec> {
        let x = match self.anchor_x {
            AnchorX::Left => rect.left(),
            AnchorX::Center => rect.center().x,
            AnchorX::Right => rect.right(),
        };
        let y = match self.anchor_y {
            AnchorY::Bottom => rect.bottom(),
            AnchorY::Center => rect.center().y,
            AnchorY::Top => rect.top(),
        };
        Ok(LabelSpec {
            spans: self.spans()?,
            font: self.font.clone().unwrap_or_else(|| theme.font.clone()),
            font_size: self.font_size.unwrap_or(theme.font_size),
            color: self.color.unwrap_or(theme.font_color),
            pos: vec2f(x, y),
            anchor_x: self.anchor_x,
            anchor_y: self.anchor_y,
            visible,
        })
    }

    /// Size of the rendered text as reported by the batch.
    pub fn measure(&self, batch: &dyn Batch, theme: &Theme) -> Result<Vec2f> {
        let spec = self.spec(theme, Frame::default(), true)?;
        Ok(batch.measure_text(&spec.text(), &spec.font, spec.font_size))
    }

    /// Creates the label on first use and pushes the current state.
    pub fn draw(&mut self, ctx: &mut DrawCtx, rect: Frame, visible: bool) -> Result<()> {
        let spec = self.spec(ctx.theme, rect, visible)?;
        let id = match self.id {
            Some(id) => id,
            None => *self.id.insert(ctx.batch.create_label(ctx.group)),
        };
        ctx.batch.update_label(id, &spec);
        Ok(())
    }

    /// Releases the label primitive.
    pub fn delete(&mut self, batch: &mut dyn Batch) {
        if let Some(id) = self.id.take() {
            batch.delete_label(id);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle of a language subscription.
pub struct Subscription(usize);

#[derive(Default)]
struct Subscribers {
    next: usize,
    callbacks: Vec<(Subscription, Callback)>,
}

#[derive(Clone, Default)]
/// "Language changed" notification hub. Clones share subscribers.
pub struct LanguageNotifier(Rc<RefCell<Subscribers>>);

impl LanguageNotifier {
    /// Creates a hub without subscribers.
    pub fn new() -> Self { Self::default() }

    /// Registers `callback`, typically a redraw of a translated label.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let mut subs = self.0.borrow_mut();
        subs.next += 1;
        let id = Subscription(subs.next);
        subs.callbacks.push((id, Rc::new(callback)));
        id
    }

    /// Removes a subscription. Unknown handles are ignored.
    pub fn unsubscribe(&self, id: Subscription) { self.0.borrow_mut().callbacks.retain(|(s, _)| *s != id) }

    /// Number of subscribers.
    pub fn len(&self) -> usize { self.0.borrow().callbacks.len() }

    /// Returns `true` without subscribers.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Callbacks to run for a language switch.
    pub fn notify(&self) -> Fired {
        debug!("language changed: {} subscribers", self.len());
        let mut fired = Fired::none();
        for (_, cb) in self.0.borrow().callbacks.iter() {
            fired.push(cb.clone());
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_produces_styled_spans() {
        let spans = parse_markup("H<sub>2</sub>O is <b>very <i>wet</i></b>").unwrap();
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["H", "2", "O is ", "very ", "wet"]);
        assert_eq!(spans[1].script, Script::Subscript);
        assert!(spans[3].bold && !spans[3].italic);
        assert!(spans[4].bold && spans[4].italic);
    }

    #[test]
    fn color_tag_sets_span_color() {
        let spans = parse_markup("<color=#ff8000>hot</color> &lt;3").unwrap();
        assert_eq!(spans[0].color, Some(color(255, 128, 0, 255)));
        assert_eq!(spans[1].text, " <3");
        assert_eq!(spans[1].color, None);
    }

    #[test]
    fn malformed_markup_is_rejected() {
        assert!(matches!(parse_markup("<b>open"), Err(GuiError::Markup { .. })));
        assert!(matches!(parse_markup("<b><i>x</b></i>"), Err(GuiError::Markup { offset: 7, .. })));
        assert!(matches!(parse_markup("<blink>x</blink>"), Err(GuiError::Markup { offset: 0, .. })));
        assert!(matches!(parse_markup("<color=#zz0000>x</color>"), Err(GuiError::Markup { .. })));
        assert!(matches!(parse_markup("x</b>"), Err(GuiError::Markup { offset: 1, .. })));
    }

    #[test]
    fn label_spec_follows_anchor() {
        let theme = Theme::default();
        let rect = Frame::new(vec2f(10.0, 20.0), vec2f(100.0, 40.0));
        let label = TextLabel::new("ok").with_anchor(AnchorX::Left, AnchorY::Top);
        let spec = label.spec(&theme, rect, true).unwrap();
        assert_eq!(spec.pos.x, 10.0);
        assert_eq!(spec.pos.y, 60.0);
        assert_eq!(spec.font, theme.font);
        assert_eq!(spec.text(), "ok");
    }

    #[test]
    fn dynamic_text_is_read_on_every_draw() {
        let lang = Rc::new(RefCell::new(String::from("Start")));
        let l2 = lang.clone();
        let mut label = TextLabel::new(TextSource::Dynamic(Rc::new(move || l2.borrow().clone())));
        let mut batch = MemoryBatch::new();
        let atlas = TextureAtlas::new();
        let theme = Theme::default();
        let palette = Palette::from_background(theme.background, &theme);
        let rect = Frame::from_size(100.0, 20.0);
        let mut ctx = DrawCtx { batch: &mut batch, resources: &atlas, theme: &theme, palette, group: None, frame: rect };
        label.draw(&mut ctx, rect, true).unwrap();
        *lang.borrow_mut() = String::from("Démarrer");
        label.draw(&mut ctx, rect, true).unwrap();
        let id = label.id().unwrap();
        assert_eq!(batch.label(id).unwrap().text(), "Démarrer");
        assert_eq!(batch.live_labels(), 1);
    }

    #[test]
    fn notifier_collects_subscribers() {
        let hits = Rc::new(Cell::new(0));
        let notifier = LanguageNotifier::new();
        let h = hits.clone();
        let sub = notifier.subscribe(move || h.set(h.get() + 1));
        notifier.notify().run();
        notifier.unsubscribe(sub);
        notifier.notify().run();
        assert_eq!(hits.get(), 1);
        assert!(notifier.is_empty());
    }
}
