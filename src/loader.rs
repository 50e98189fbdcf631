use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use druid::{ExtEventSink, Selector, Target};
use image::imageops::{self, FilterType};
use thiserror::Error;
use tracing::{info, warn};

use crate::rotation::Face;
use crate::sampler::compute_sample_size;

/// Delivered to the card widget when a background load finishes.
pub const FACE_LOADED: Selector<FaceLoaded> = Selector::new("card3d.face-loaded");

pub struct FaceLoaded {
    pub face: Face,
    pub image: Arc<FaceImage>,
}

/// A decoded, display-sized face texture.
///
/// Pixels are packed RGB8; the faces are opaque, so dropping the alpha
/// channel saves a byte per pixel over RGBA.
pub struct FaceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FaceImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);
        FaceImage {
            width,
            height,
            pixels,
        }
    }

    /// Nearest-texel lookup for unit texture coordinates, clamped to the
    /// image bounds.
    pub fn sample(&self, u: f64, v: f64) -> [u8; 3] {
        let x = (u.clamp(0.0, 1.0) * (self.width - 1) as f64).round() as usize;
        let y = (v.clamp(0.0, 1.0) * (self.height - 1) as f64).round() as usize;
        let offset = (y * self.width as usize + x) * 3;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open or decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {} has no pixels", path.display())]
    Empty { path: PathBuf },
}

/// Decodes a face image and shrinks it to roughly the display size.
///
/// The sample size is computed against the target dimensions and applied as
/// a nearest-neighbor shrink, the decode-time subsampling a bitmap decoder
/// would do.
pub fn load_face(path: &Path, target_width: u32, target_height: u32) -> Result<FaceImage, LoadError> {
    let decoded = image::open(path).map_err(|source| LoadError::Decode {
        path: path.to_owned(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }

    let sample_size = compute_sample_size(width, height, target_width, target_height);
    let rgb = if sample_size > 1 {
        imageops::resize(
            &rgb,
            width / sample_size,
            height / sample_size,
            FilterType::Nearest,
        )
    } else {
        rgb
    };

    info!(
        "loaded {} at {}x{} (sample size {sample_size})",
        path.display(),
        rgb.width(),
        rgb.height(),
    );
    Ok(FaceImage::new(rgb.width(), rgb.height(), rgb.into_raw()))
}

/// Loads a face image off the UI thread and hands the result back through
/// the event sink. Failures are logged and swallowed; the card keeps its
/// placeholder. A result arriving after the window is gone is dropped by the
/// sink, which is fine.
pub fn spawn_load(
    sink: ExtEventSink,
    face: Face,
    path: PathBuf,
    target_width: u32,
    target_height: u32,
) {
    thread::spawn(move || match load_face(&path, target_width, target_height) {
        Ok(image) => {
            let payload = FaceLoaded {
                face,
                image: Arc::new(image),
            };
            if sink.submit_command(FACE_LOADED, payload, Target::Auto).is_err() {
                warn!("window went away before {} finished loading", path.display());
            }
        }
        Err(error) => warn!("leaving the {face:?} face blank: {error}"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_clamps_to_the_image_bounds() {
        let pixels = vec![
            10, 10, 10, /**/ 20, 20, 20, //
            30, 30, 30, /**/ 40, 40, 40, //
        ];
        let image = FaceImage::new(2, 2, pixels);

        assert_eq!(image.sample(0.0, 0.0), [10, 10, 10]);
        assert_eq!(image.sample(1.0, 1.0), [40, 40, 40]);
        // Out-of-range coordinates clamp instead of wrapping or panicking.
        assert_eq!(image.sample(-0.5, 0.0), [10, 10, 10]);
        assert_eq!(image.sample(2.0, 2.0), [40, 40, 40]);
    }

    #[test]
    fn missing_file_reports_a_decode_error() {
        let result = load_face(Path::new("/no/such/face.png"), 400, 400);
        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }
}
