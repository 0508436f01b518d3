//! Composer configuration.
//!
//! Limits, gesture thresholds and progress simulation parameters are loaded from
//! TOML with the following precedence (later sources override earlier):
//! 1. Bundled defaults (`folio.toml` shipped with the library)
//! 2. User config in home directory (`~/.config/folio/folio.toml`)
//! 3. User config in current directory (`./folio.toml`)
//!
//! Every field has a serde default, so partial override files are fine.

use config::{Config, File, FileFormat};
use folio_core::FieldBounds;
use folio_error::{ConfigError, FolioError, FolioResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Size and length ceilings.
///
/// # Example
///
/// ```toml
/// [limits]
/// image_max_mb = 10
/// video_max_mb = 500
/// caption_max_chars = 170
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted image, in MB
    #[serde(default = "default_image_max_mb")]
    pub image_max_mb: u64,
    /// Largest accepted video, in MB
    #[serde(default = "default_video_max_mb")]
    pub video_max_mb: u64,
    /// Largest accepted audio file, in MB
    #[serde(default = "default_audio_max_mb")]
    pub audio_max_mb: u64,
    /// Largest accepted PDF, in MB
    #[serde(default = "default_pdf_max_mb")]
    pub pdf_max_mb: u64,
    /// Largest accepted project cover, in MB
    #[serde(default = "default_cover_max_mb")]
    pub cover_max_mb: u64,
    /// Caption length bound, in characters
    #[serde(default = "default_short_text_chars")]
    pub caption_max_chars: usize,
    /// Text post body length bound, in characters
    #[serde(default = "default_short_text_chars")]
    pub text_max_chars: usize,
    /// Item title length bound, in characters
    #[serde(default = "default_title_chars")]
    pub title_max_chars: usize,
    /// Project title length bound, in characters
    #[serde(default = "default_title_chars")]
    pub project_title_max_chars: usize,
    /// Project description length bound, in characters
    #[serde(default = "default_project_description_chars")]
    pub project_description_max_chars: usize,
}

fn default_image_max_mb() -> u64 {
    10
}

fn default_video_max_mb() -> u64 {
    500
}

fn default_audio_max_mb() -> u64 {
    50
}

fn default_pdf_max_mb() -> u64 {
    50
}

fn default_cover_max_mb() -> u64 {
    5
}

fn default_short_text_chars() -> usize {
    170
}

fn default_title_chars() -> usize {
    100
}

fn default_project_description_chars() -> usize {
    500
}

impl LimitsConfig {
    /// Convert a megabyte ceiling to bytes.
    pub fn bytes(mb: u64) -> u64 {
        mb.saturating_mul(BYTES_PER_MB)
    }

    /// Bounds of the item text fields.
    pub fn field_bounds(&self) -> FieldBounds {
        FieldBounds {
            caption: self.caption_max_chars,
            text_body: self.text_max_chars,
            title: self.title_max_chars,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            image_max_mb: default_image_max_mb(),
            video_max_mb: default_video_max_mb(),
            audio_max_mb: default_audio_max_mb(),
            pdf_max_mb: default_pdf_max_mb(),
            cover_max_mb: default_cover_max_mb(),
            caption_max_chars: default_short_text_chars(),
            text_max_chars: default_short_text_chars(),
            title_max_chars: default_title_chars(),
            project_title_max_chars: default_title_chars(),
            project_description_max_chars: default_project_description_chars(),
        }
    }
}

/// Swipe-to-delete detents, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Offset at which the delete button is fully exposed
    #[serde(default = "default_reveal_width")]
    pub reveal_width: u32,
    /// Release offset above which the row snaps open
    #[serde(default = "default_open_threshold")]
    pub open_threshold: u32,
}

fn default_reveal_width() -> u32 {
    70
}

fn default_open_threshold() -> u32 {
    30
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            reveal_width: default_reveal_width(),
            open_threshold: default_open_threshold(),
        }
    }
}

/// Parameters of the simulated progress signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Time between ticks while a step is pending
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Smallest increment per tick
    #[serde(default = "default_min_step")]
    pub min_step: u8,
    /// Largest increment per tick
    #[serde(default = "default_max_step")]
    pub max_step: u8,
    /// Value the simulation never passes before completion
    #[serde(default = "default_ceiling")]
    pub ceiling: u8,
}

fn default_tick_interval_ms() -> u64 {
    200
}

fn default_min_step() -> u8 {
    2
}

fn default_max_step() -> u8 {
    8
}

fn default_ceiling() -> u8 {
    90
}

impl ProgressConfig {
    /// Tick interval as a duration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            min_step: default_min_step(),
            max_step: default_max_step(),
            ceiling: default_ceiling(),
        }
    }
}

/// Markers used by the text affordances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Bullet glyph that replaces a leading dash
    #[serde(default = "default_bullet")]
    pub bullet: char,
    /// Indent inserted by Tab
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_bullet() -> char {
    '•'
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            bullet: default_bullet(),
            indent: default_indent(),
        }
    }
}

/// Aspect ratios sent with new items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Aspect ratio for file-backed items
    #[serde(default = "default_media_aspect_ratio")]
    pub media_aspect_ratio: String,
    /// Aspect ratio for text items
    #[serde(default = "default_text_aspect_ratio")]
    pub text_aspect_ratio: String,
}

fn default_media_aspect_ratio() -> String {
    "1:1".to_string()
}

fn default_text_aspect_ratio() -> String {
    "4:5".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            media_aspect_ratio: default_media_aspect_ratio(),
            text_aspect_ratio: default_text_aspect_ratio(),
        }
    }
}

/// Submission behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Ask the uploader to discard files uploaded by a failed attempt
    #[serde(default = "default_true")]
    pub discard_orphans: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            discard_orphans: default_true(),
        }
    }
}

/// Top-level composer configuration.
///
/// # Example
///
/// ```no_run
/// use folio_composer::ComposerConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ComposerConfig::load()?;
/// println!("Videos up to {}MB", config.limits.video_max_mb);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Size and length ceilings
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Swipe-to-delete detents
    #[serde(default)]
    pub gesture: GestureConfig,
    /// Simulated progress parameters
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Text affordance markers
    #[serde(default)]
    pub text: TextConfig,
    /// Aspect ratios
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Submission behavior
    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl ComposerConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        debug!("Loading composer configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> FolioResult<Self> {
        debug!("Loading composer configuration with precedence");

        const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("folio").required(false));

        builder
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> FolioResult<Self> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
