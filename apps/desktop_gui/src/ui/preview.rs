//! Passport photo thumbnail shown on the documents step.

use egui::TextureHandle;
use image::GenericImageView;

const MAX_THUMBNAIL_EDGE: u32 = 160;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_thumbnail(bytes: &[u8]) -> Result<PreviewImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let (orig_w, orig_h) = decoded.dimensions();
    let resized = if orig_w.max(orig_h) > MAX_THUMBNAIL_EDGE {
        decoded.thumbnail(MAX_THUMBNAIL_EDGE, MAX_THUMBNAIL_EDGE)
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    Ok(PreviewImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

#[derive(Clone)]
enum PhotoPreview {
    Image {
        texture: TextureHandle,
        size: egui::Vec2,
    },
    DecodeFailed,
}

/// Keeps one texture for the currently selected photo.
#[derive(Default)]
pub struct PhotoPreviewCache {
    key: Option<(String, u64)>,
    preview: Option<PhotoPreview>,
}

impl PhotoPreviewCache {
    pub fn show(&mut self, ui: &mut egui::Ui, file_name: &str, bytes: &[u8]) {
        let key = (file_name.to_string(), bytes.len() as u64);
        if self.key.as_ref() != Some(&key) {
            self.preview = Some(match decode_thumbnail(bytes) {
                Ok(image) => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    let texture = ui.ctx().load_texture(
                        format!("passport-photo:{file_name}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    PhotoPreview::Image {
                        texture,
                        size: egui::vec2(image.width as f32, image.height as f32),
                    }
                }
                Err(err) => {
                    tracing::debug!("no preview for '{file_name}': {err}");
                    PhotoPreview::DecodeFailed
                }
            });
            self.key = Some(key);
        }

        match &self.preview {
            Some(PhotoPreview::Image { texture, size }) => {
                ui.add(egui::Image::new((texture.id(), *size)).corner_radius(6.0));
            }
            Some(PhotoPreview::DecodeFailed) => {
                ui.weak("Aperçu indisponible");
            }
            None => {}
        }
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::decode_thumbnail;

    fn png_of(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn large_photo_is_scaled_to_thumbnail_bounds() {
        let preview = decode_thumbnail(&png_of(640, 320)).expect("decodes");
        assert_eq!((preview.width, preview.height), (160, 80));
        assert_eq!(preview.rgba.len(), 160 * 80 * 4);
    }

    #[test]
    fn small_photo_keeps_its_size() {
        let preview = decode_thumbnail(&png_of(40, 60)).expect("decodes");
        assert_eq!((preview.width, preview.height), (40, 60));
    }

    #[test]
    fn undecodable_bytes_report_an_error() {
        assert!(decode_thumbnail(&[0xFF, 0xD8, 0x00]).is_err());
    }
}
