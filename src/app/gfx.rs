// src/app/gfx.rs
use std::path::Path;

use eframe::egui::{self as eg, ColorImage, TextureHandle};

/// Upload an RGBA image to a GPU texture. (UI thread only)
pub fn upload_rgba(ctx: &eg::Context, w: u32, h: u32, bytes: &[u8], name: &str) -> TextureHandle {
    let img = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], bytes);
    ctx.load_texture(name.to_string(), img, eg::TextureOptions::LINEAR)
}

/// Load a texture from a cached portrait file. (UI thread only)
pub fn load_texture_from_path(
    ctx: &eg::Context,
    path: &Path,
    cache_name: &str,
) -> Result<TextureHandle, String> {
    let (w, h, bytes) = crate::app::cache::load_rgba(path)?;
    Ok(upload_rgba(ctx, w, h, &bytes, cache_name))
}
