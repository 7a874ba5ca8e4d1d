use macroquad::prelude::*;
use rustc_hash::FxHashMap;

use crate::{
    elements::Asset,
    id::FontId,
    math::{Dimensions, Vector2},
    render_commands::{RenderCommand, RenderCommandConfig},
    stage::{PointerButton, Stage},
    text::TextMeasurer,
};

const PIXELS_PER_POINT: f32 = 2.0;

/// Global TextureManager. Can also be used outside the renderer to manage your own macroquad textures.
pub static TEXTURE_MANAGER: std::sync::LazyLock<std::sync::Mutex<TextureManager>> = std::sync::LazyLock::new(|| std::sync::Mutex::new(TextureManager::new()));

fn texture_manager() -> std::sync::MutexGuard<'static, TextureManager> {
    TEXTURE_MANAGER.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Manages textures, loading and unloading them as needed. No manual management needed.
///
/// You can adjust `max_frames_not_used` to control how many frames a texture can go unused before being unloaded.
pub struct TextureManager {
    textures: FxHashMap<String, TextureData>,
    pub max_frames_not_used: usize,
}

struct TextureData {
    frames_not_used: usize,
    texture: Texture2D,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            textures: FxHashMap::default(),
            max_frames_not_used: 1,
        }
    }

    /// Get the texture for `asset`, loading and caching it on first use.
    /// A file that fails to load is cached as a transparent pixel so it is
    /// reported once, not every frame.
    pub async fn get_or_load(&mut self, asset: Asset) -> &Texture2D {
        let key = asset.name();
        if !self.textures.contains_key(key) {
            let texture = match asset {
                Asset::Path(path) => match load_texture(path).await {
                    Ok(texture) => texture,
                    Err(error) => {
                        tracing::warn!(path, %error, "failed to load texture");
                        Texture2D::from_rgba8(1, 1, &[0, 0, 0, 0])
                    }
                },
                Asset::Bytes { data, .. } => Texture2D::from_file_with_format(data, None),
            };
            self.textures.insert(key.to_owned(), TextureData { frames_not_used: 0, texture });
        }
        self.touch(key)
    }

    fn touch(&mut self, key: &str) -> &Texture2D {
        let entry = self
            .textures
            .entry(key.to_owned())
            .or_insert_with(|| TextureData {
                frames_not_used: 0,
                texture: Texture2D::empty(),
            });
        entry.frames_not_used = 0;
        &entry.texture
    }

    pub fn clean(&mut self) {
        let max = self.max_frames_not_used;
        self.textures.retain(|_, data| data.frames_not_used <= max);

        for data in self.textures.values_mut() {
            data.frames_not_used += 1;
        }
    }

    pub fn size(&self) -> usize {
        self.textures.len()
    }
}

/// Fonts loaded for each registered [`FontId`]. Ids without a font draw
/// with macroquad's built-in one.
#[derive(Clone, Default)]
pub struct FontSet {
    fonts: FxHashMap<FontId, Font>,
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FontId, font: Font) {
        self.fonts.insert(id, font);
    }

    pub fn get(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(&id)
    }
}

/// Measures text with macroquad, using the same fonts the renderer draws with.
#[derive(Clone, Default)]
pub struct MacroquadMeasurer {
    fonts: FontSet,
}

impl MacroquadMeasurer {
    pub fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }
}

impl TextMeasurer for MacroquadMeasurer {
    fn measure(&self, text: &str, font: FontId, font_size: u16) -> Dimensions {
        let measured = measure_text(text, self.fonts.get(font), font_size, 1.0);
        Dimensions::new(measured.width, measured.height)
    }
}

fn to_macroquad_color(color: &crate::color::Color) -> Color {
    let [r, g, b, a] = color.normalized();
    Color { r, g, b, a }
}

fn draw_good_circle(x: f32, y: f32, r: f32, color: Color) {
    let sides = ((2.0 * std::f32::consts::PI * r) / PIXELS_PER_POINT).max(20.0);
    draw_poly(x, y, sides.min(255.0) as u8, r, 0.0, color);
}

fn draw_good_ring(x: f32, y: f32, r: f32, thickness: f32, color: Color) {
    let sides = ((2.0 * std::f32::consts::PI * r) / PIXELS_PER_POINT).max(20.0);
    draw_poly_lines(x, y, sides.min(255.0) as u8, r, 0.0, thickness, color);
}

/// Draws a frame of render commands in order.
pub async fn render(commands: &[RenderCommand], fonts: &FontSet) {
    for command in commands {
        let bb = command.bounding_box;
        match &command.config {
            RenderCommandConfig::Rectangle(config) => {
                draw_rectangle(bb.x, bb.y, bb.width, bb.height, to_macroquad_color(&config.color));
            }
            RenderCommandConfig::RectangleOutline(config) => {
                draw_rectangle_lines(
                    bb.x,
                    bb.y,
                    bb.width,
                    bb.height,
                    config.thickness,
                    to_macroquad_color(&config.color),
                );
            }
            RenderCommandConfig::Polyline(config) => {
                let color = to_macroquad_color(&config.color);
                for segment in config.points.windows(2) {
                    let (a, b) = (segment[0], segment[1]);
                    draw_line(a.x, a.y, b.x, b.y, config.thickness, color);
                }
            }
            RenderCommandConfig::Circle(config) => {
                draw_good_circle(config.center.x, config.center.y, config.radius, to_macroquad_color(&config.color));
            }
            RenderCommandConfig::CircleOutline(config) => {
                draw_good_ring(
                    config.center.x,
                    config.center.y,
                    config.radius,
                    config.thickness,
                    to_macroquad_color(&config.color),
                );
            }
            RenderCommandConfig::Image(image) => {
                let mut manager = texture_manager();
                let texture = manager.get_or_load(image.asset).await;
                draw_texture_ex(
                    texture,
                    bb.x,
                    bb.y,
                    to_macroquad_color(&image.tint),
                    DrawTextureParams {
                        dest_size: Some(Vec2::new(bb.width, bb.height)),
                        ..Default::default()
                    },
                );
            }
            RenderCommandConfig::Text(config) => {
                draw_text_ex(
                    &config.text,
                    config.position.x,
                    config.position.y + bb.height,
                    TextParams {
                        font_size: config.font_size,
                        font: fonts.get(config.font_id),
                        font_scale: 1.0,
                        font_scale_aspect: 1.0,
                        rotation: 0.0,
                        color: to_macroquad_color(&config.color),
                    },
                );
            }
        }
    }
    texture_manager().clean();
}

/// Scroll amounts vary per platform; each wheel event counts as one notch.
fn notch(amount: f32) -> f32 {
    if amount == 0.0 {
        0.0
    } else {
        amount.signum()
    }
}

/// Feeds macroquad's window input into a [`Stage`], once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    window: Option<Dimensions>,
    pointer: Option<Vector2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, stage: &mut Stage) {
        let window = Dimensions::new(screen_width(), screen_height());
        if self.window != Some(window) {
            self.window = Some(window);
            stage.resize(window.width, window.height);
        }

        let (x, y) = mouse_position();
        let (wheel_x, wheel_y) = mouse_wheel();
        if wheel_x != 0.0 || wheel_y != 0.0 {
            let _ = stage.scroll(x, y, notch(wheel_x), notch(wheel_y));
        }

        for (button, pointer) in [
            (MouseButton::Left, PointerButton::Left),
            (MouseButton::Right, PointerButton::Right),
            (MouseButton::Middle, PointerButton::Middle),
        ] {
            if is_mouse_button_pressed(button) {
                stage.pointer_press(pointer);
            }
            if is_mouse_button_released(button) {
                stage.pointer_release(pointer);
            }
        }

        let position = Vector2::new(x, y);
        if let Some(last) = self.pointer {
            let delta = position - last;
            if delta != Vector2::ZERO {
                let _ = stage.pointer_motion(x, y, delta.x, delta.y);
            }
        }
        self.pointer = Some(position);
    }
}
