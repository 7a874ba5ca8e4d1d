use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::errors::{Error, Result};
use crate::id::FontId;
use crate::math::Dimensions;

/// Measures text the way the drawing backend will lay it out.
///
/// Any `Fn(&str, FontId, u16) -> Dimensions` closure is a measurer, so hosts
/// can wrap their backend's measuring call directly.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: FontId, font_size: u16) -> Dimensions;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, FontId, u16) -> Dimensions,
{
    fn measure(&self, text: &str, font: FontId, font_size: u16) -> Dimensions {
        self(text, font, font_size)
    }
}

/// Backend-free measurer: every glyph advances `advance * font_size` and
/// every line is `line_height * font_size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.0,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, _font: FontId, font_size: u16) -> Dimensions {
        let size = font_size as f32;
        let lines = text.split('\n');
        let (count, widest) = lines.fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });
        Dimensions::new(widest as f32 * self.advance * size, count as f32 * self.line_height * size)
    }
}

const DEFAULT_FONT_NAME: &str = "default";

/// Names fonts once and hands out stable [`FontId`]s for them.
///
/// Owned by the scene; loading the actual font data is the backend's job.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    by_name: FxHashMap<String, FontId>,
    names: Vec<String>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        let mut by_name = FxHashMap::default();
        by_name.insert(DEFAULT_FONT_NAME.to_owned(), FontId::DEFAULT);
        Self {
            by_name,
            names: vec![DEFAULT_FONT_NAME.to_owned()],
        }
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>) -> Result<FontId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(Error::DuplicateFont(name));
        }
        let index = u16::try_from(self.names.len())
            .map_err(|_| Error::InvalidConfig("too many fonts registered".to_owned()))?;
        let id = FontId(index);
        tracing::info!(font = %name, ?id, "registered font");
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<FontId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: FontId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    pub fn contains(&self, id: FontId) -> bool {
        id.index() < self.names.len()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A run of text whose box is sized by its measured content.
#[derive(Debug, Clone)]
pub struct TextObject {
    text: String,
    color: Color,
    font: FontId,
    font_size: u16,
    dirty: bool,
}

impl TextObject {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            font: FontId::DEFAULT,
            font_size: 16,
            dirty: true,
        }
    }

    #[inline]
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    #[inline]
    pub fn font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    #[inline]
    pub fn font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_color(&self) -> Color {
        self.color
    }

    pub fn font_id(&self) -> FontId {
        self.font
    }

    pub fn size(&self) -> u16 {
        self.font_size
    }

    /// True until the next size recomputation after a text or font change.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the text. Unchanged text leaves the cache clean.
    pub(crate) fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        self.dirty = true;
        true
    }

    pub(crate) fn set_font(&mut self, font: Option<FontId>, font_size: Option<u16>) {
        if let Some(font) = font {
            self.font = font;
        }
        if let Some(size) = font_size {
            self.font_size = size;
        }
        self.dirty = true;
    }

    /// Measured content size; clears the dirty flag.
    pub(crate) fn remeasure(&mut self, measurer: &dyn TextMeasurer) -> Dimensions {
        self.dirty = false;
        measurer.measure(&self.text, self.font, self.font_size)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_advance_measure() {
        let m = FixedAdvanceMeasurer::default();
        assert_eq!(m.measure("Hello", FontId::DEFAULT, 10), Dimensions::new(30.0, 10.0));
        assert_eq!(m.measure("ab\nabcd", FontId::DEFAULT, 10), Dimensions::new(24.0, 20.0));
    }

    #[test]
    fn closures_are_measurers() {
        let m = |text: &str, _: FontId, size: u16| Dimensions::new(text.len() as f32, size as f32);
        assert_eq!(m.measure("abc", FontId::DEFAULT, 12), Dimensions::new(3.0, 12.0));
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut fonts = FontRegistry::new();
        let wide = fonts.register("Formula1Wide").unwrap();
        assert_eq!(fonts.get("Formula1Wide"), Some(wide));
        assert_eq!(fonts.name(wide), Some("Formula1Wide"));
        assert_eq!(fonts.register("Formula1Wide"), Err(Error::DuplicateFont("Formula1Wide".to_owned())));
        assert!(fonts.contains(FontId::DEFAULT));
        assert_eq!(fonts.len(), 2);
    }

    #[test]
    fn dirty_tracking() {
        let measurer = FixedAdvanceMeasurer::default();
        let mut text = TextObject::new("P1").font_size(10);
        assert!(text.is_dirty());
        assert_eq!(text.remeasure(&measurer), Dimensions::new(12.0, 10.0));
        assert!(!text.is_dirty());

        assert!(!text.set_text("P1"));
        assert!(!text.is_dirty());
        assert!(text.set_text("P12"));
        assert!(text.is_dirty());

        text.remeasure(&measurer);
        text.set_font(None, Some(20));
        assert!(text.is_dirty());
        assert_eq!(text.remeasure(&measurer), Dimensions::new(36.0, 20.0));
    }
}
