//! Image decoding for the texture registry
//!
//! Decodes image files into RGBA pixels and hands them to the renderer,
//! which keeps only the dimensions.

use std::path::Path;
use crate::rasterizer::{Color, RenderError, Renderer, TextureHandle};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Decoded image ready for registration
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

fn to_decoded(img: image::DynamicImage) -> DecodedImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
        .collect();
    DecodedImage { width, height, pixels }
}

/// Decode an image file
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedImage, AssetError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| AssetError::Load {
        path: path.display().to_string(),
        source,
    })?;
    Ok(to_decoded(img))
}

/// Decode raw image bytes (PNG, JPEG or BMP)
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, AssetError> {
    Ok(to_decoded(image::load_from_memory(bytes)?))
}

fn register(renderer: &mut Renderer, img: &DecodedImage) -> Result<TextureHandle, AssetError> {
    Ok(renderer.texture_create(img.width, img.height, &img.pixels)?)
}

/// Load an image file and register it as a texture
pub fn load_texture<P: AsRef<Path>>(renderer: &mut Renderer, path: P) -> Result<TextureHandle, AssetError> {
    let img = decode_file(path)?;
    register(renderer, &img)
}

/// Register a texture from in-memory image bytes
pub fn load_texture_from_bytes(renderer: &mut Renderer, bytes: &[u8]) -> Result<TextureHandle, AssetError> {
    let img = decode_bytes(bytes)?;
    register(renderer, &img)
}

/// Load all PNGs in a directory, in file name order.
/// Undecodable files are logged and skipped; a full registry stops loading.
pub fn load_texture_dir<P: AsRef<Path>>(renderer: &mut Renderer, dir: P) -> Result<Vec<TextureHandle>, AssetError> {
    let dir = dir.as_ref();
    let mut handles = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot read texture dir {}: {}", dir.display(), e);
            return Ok(handles);
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    for path in paths {
        match load_texture(renderer, &path) {
            Ok(handle) => {
                log::info!("loaded texture {} as {}", path.display(), handle.index());
                handles.push(handle);
            }
            Err(AssetError::Render(e)) => return Err(e.into()),
            Err(e) => log::warn!("{}", e),
        }
    }

    Ok(handles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec2i;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_bytes() {
        let img = decode_bytes(&png_bytes(3, 2)).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixels.len(), 6);
        assert_eq!(img.pixels[0], Color::new(10, 20, 30));
    }

    #[test]
    fn test_load_texture_records_size() {
        let mut r = Renderer::new(Vec2i::new(32, 32)).unwrap();
        let h = load_texture_from_bytes(&mut r, &png_bytes(5, 7)).unwrap();
        assert_eq!(h.index(), 1);
        assert_eq!(r.texture_size(h).unwrap(), Vec2i::new(5, 7));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let mut r = Renderer::new(Vec2i::new(32, 32)).unwrap();
        let err = load_texture_from_bytes(&mut r, b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
        assert_eq!(r.textures_len(), 1);
    }

    #[test]
    fn test_load_dir_skips_bad_files() {
        let dir = std::env::temp_dir().join(format!("softline-tex-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.png"), png_bytes(4, 4)).unwrap();
        std::fs::write(dir.join("b.png"), b"broken").unwrap();
        std::fs::write(dir.join("c.txt"), b"ignored").unwrap();
        std::fs::write(dir.join("d.png"), png_bytes(8, 2)).unwrap();

        let mut r = Renderer::new(Vec2i::new(32, 32)).unwrap();
        let handles = load_texture_dir(&mut r, &dir).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(handles.len(), 2);
        assert_eq!(r.texture_size(handles[1]).unwrap(), Vec2i::new(8, 2));
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let mut r = Renderer::new(Vec2i::new(32, 32)).unwrap();
        let handles = load_texture_dir(&mut r, "/nonexistent/textures").unwrap();
        assert!(handles.is_empty());
    }
}
