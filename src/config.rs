use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use image::RgbaImage;
use serde::Deserialize;

/// Decoded glyph for a navigation control. Cheap to clone.
#[derive(Clone)]
pub struct Icon {
    image: Arc<RgbaImage>,
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

impl Icon {
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("failed to load icon image at {}", path.display()))?
            .to_rgba8();
        Ok(Self::from_image(img))
    }

    pub fn width(&self) -> f32 {
        self.image.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.image.height() as f32
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[derive(Debug, Clone, Default)]
pub struct IconRuntime {
    pub left: Option<Icon>,
    pub right: Option<Icon>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Idle time before the carousel advances on its own.
    #[serde(with = "humantime_serde")]
    pub auto_scroll_interval: Duration,
    /// Image shown on the left control; an invisible hit target when unset.
    pub left_button: Option<PathBuf>,
    /// Image shown on the right control; an invisible hit target when unset.
    pub right_button: Option<PathBuf>,
    /// Overall component height.
    pub height: f32,
    /// Horizontal gap between neighbouring banners.
    pub item_spacing: f32,
    /// Horizontal padding of the control row from the component edges.
    pub control_inset: f32,
    /// Padding around an icon glyph inside its control.
    pub icon_padding: f32,
    /// Duration of the ease-in-out scroll to the active banner.
    #[serde(with = "humantime_serde")]
    pub scroll_animation: Duration,
    #[serde(skip)]
    pub runtime: IconRuntime,
}

impl CarouselConfig {
    pub const DEFAULT_HEIGHT: f32 = 190.0;

    const fn default_auto_scroll_interval() -> Duration {
        Duration::from_secs(3)
    }

    const fn default_scroll_animation() -> Duration {
        Duration::from_millis(350)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants and load any configured icon images.
    pub fn validated(mut self) -> Result<Self> {
        ensure!(
            self.auto_scroll_interval > Duration::ZERO,
            "auto-scroll-interval must be positive"
        );
        ensure!(
            self.height.is_finite() && self.height > 0.0,
            "height must be positive"
        );
        ensure!(
            self.item_spacing.is_finite() && self.item_spacing >= 0.0,
            "item-spacing must be non-negative"
        );
        ensure!(
            self.control_inset.is_finite() && self.control_inset >= 0.0,
            "control-inset must be non-negative"
        );
        ensure!(
            self.icon_padding.is_finite() && self.icon_padding >= 0.0,
            "icon-padding must be non-negative"
        );
        if self.runtime.left.is_none() {
            if let Some(path) = &self.left_button {
                self.runtime.left = Some(Icon::open(path).context("invalid left-button")?);
            }
        }
        if self.runtime.right.is_none() {
            if let Some(path) = &self.right_button {
                self.runtime.right = Some(Icon::open(path).context("invalid right-button")?);
            }
        }
        Ok(self)
    }

    pub fn left_icon(&self) -> Option<&Icon> {
        self.runtime.left.as_ref()
    }

    pub fn right_icon(&self) -> Option<&Icon> {
        self.runtime.right.as_ref()
    }

    pub fn with_auto_scroll_interval(mut self, interval: Duration) -> Self {
        self.auto_scroll_interval = interval;
        self
    }

    pub fn with_left_button(mut self, icon: Icon) -> Self {
        self.runtime.left = Some(icon);
        self
    }

    pub fn with_right_button(mut self, icon: Icon) -> Self {
        self.runtime.right = Some(icon);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_scroll_interval: Self::default_auto_scroll_interval(),
            left_button: None,
            right_button: None,
            height: Self::DEFAULT_HEIGHT,
            item_spacing: 18.0,
            control_inset: 30.0,
            icon_padding: 16.0,
            scroll_animation: Self::default_scroll_animation(),
            runtime: IconRuntime::default(),
        }
    }
}
