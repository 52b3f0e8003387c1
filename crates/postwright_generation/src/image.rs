//! Image rendering with placeholder fallback.

use chrono::Local;
use image::{ImageFormat, Rgb, RgbImage, imageops::FilterType};
use postwright_core::{GenerateRequest, ImageDimensions};
use postwright_error::{
    ModelsError, ModelsErrorKind, PostwrightResult, StorageError, StorageErrorKind,
};
use postwright_interface::PostwrightDriver;
use postwright_models::ModelMetrics;
use postwright_retry::RetryPolicy;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const PLACEHOLDER_COLOR: Rgb<u8> = Rgb([240, 240, 245]);

/// Renders post images through the image model.
///
/// Failure never reaches the caller as a generation error: once retries are
/// exhausted a blank canvas of the right size is written instead, with a
/// sidecar text file holding the prompt. Only a filesystem failure while
/// writing that placeholder is returned as an error.
pub struct ImageGenerator {
    image: Arc<dyn PostwrightDriver>,
    retry: RetryPolicy,
    temperature: f32,
    output_dir: PathBuf,
}

impl ImageGenerator {
    /// Create a generator writing into `output_dir`.
    pub fn new(
        image: Arc<dyn PostwrightDriver>,
        retry: RetryPolicy,
        temperature: f32,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            image,
            retry,
            temperature,
            output_dir: output_dir.into(),
        }
    }

    /// Directory images are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render an image for `platform` and return the path of the PNG.
    #[instrument(skip(self, prompt), fields(dimensions = %dimensions))]
    pub async fn generate(
        &self,
        prompt: &str,
        platform: &str,
        dimensions: ImageDimensions,
    ) -> PostwrightResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.output_dir.display(),
                e
            )))
        })?;

        info!("Generating image");
        let request = GenerateRequest::prompt(
            enhance_prompt(prompt, platform, dimensions),
            self.temperature,
        );

        let rendered = self
            .retry
            .run("generate_image", || self.render(&request, platform, dimensions))
            .await;

        match rendered {
            Ok(path) => {
                info!(path = %path.display(), "Image saved");
                Ok(path)
            }
            Err(e) => {
                warn!(error = %e, "Image generation failed, writing placeholder");
                ModelMetrics::get().record_placeholder(platform);
                let path = self.write_placeholder(platform, prompt, dimensions)?;
                warn!(path = %path.display(), "Created placeholder image");
                Ok(path)
            }
        }
    }

    async fn render(
        &self,
        request: &GenerateRequest,
        platform: &str,
        dimensions: ImageDimensions,
    ) -> PostwrightResult<PathBuf> {
        let response = self.image.generate(request).await?;
        let bytes = response
            .image()
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::NoImageData))?;

        let path = self.output_dir.join(format!("{}.png", file_stem(platform)));
        save_resized(bytes, dimensions, &path)?;
        Ok(path)
    }

    fn write_placeholder(
        &self,
        platform: &str,
        prompt: &str,
        dimensions: ImageDimensions,
    ) -> Result<PathBuf, StorageError> {
        let stem = format!("{}_placeholder", file_stem(platform));
        let image_path = self.output_dir.join(format!("{}.png", stem));
        let sidecar_path = self.output_dir.join(format!("{}_prompt.txt", stem));

        RgbImage::from_pixel(dimensions.width, dimensions.height, PLACEHOLDER_COLOR)
            .save_with_format(&image_path, ImageFormat::Png)
            .map_err(|e| StorageError::new(StorageErrorKind::ImageEncode(e.to_string())))?;

        let sidecar = format!(
            "Platform: {}\nDimensions: {}\nPrompt: {}\n",
            platform, dimensions, prompt
        );
        std::fs::write(&sidecar_path, sidecar).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                sidecar_path.display(),
                e
            )))
        })?;

        Ok(image_path)
    }
}

/// The prompt sent to the image model: the visual prompt plus size and
/// quality instructions.
fn enhance_prompt(prompt: &str, platform: &str, dimensions: ImageDimensions) -> String {
    format!(
        "{}\n\nImage specifications: {}x{}px, high quality, professional, suitable for {} social media.",
        prompt, dimensions.width, dimensions.height, platform
    )
}

/// `{platform}_{YYYYmmdd_HHMMSS_mmm}_{8 hex}`, unique per call.
fn file_stem(platform: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", platform, timestamp, &suffix[..8])
}

/// Decode, resize to exactly `dimensions` if needed, and save as PNG.
fn save_resized(
    bytes: &[u8],
    dimensions: ImageDimensions,
    path: &Path,
) -> Result<(), StorageError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| StorageError::new(StorageErrorKind::ImageDecode(e.to_string())))?;

    let resized = if decoded.width() != dimensions.width || decoded.height() != dimensions.height {
        debug!(
            from_width = decoded.width(),
            from_height = decoded.height(),
            to = %dimensions,
            "Resizing image"
        );
        decoded.resize_exact(dimensions.width, dimensions.height, FilterType::Lanczos3)
    } else {
        decoded
    };

    resized
        .to_rgba8()
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| StorageError::new(StorageErrorKind::ImageEncode(e.to_string())))
}
