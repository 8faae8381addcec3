//! Read-only view of a caller-owned banner list.

use tokio::sync::watch;

/// What the carousel needs to know about a banner to lay it out.
pub trait BannerContent {
    /// Width of this banner when the carousel is `viewport_width` wide and
    /// `height` tall. Defaults to filling the viewport.
    fn preferred_width(&self, viewport_width: f32, height: f32) -> f32 {
        let _ = height;
        viewport_width
    }
}

/// Banner with a title and an optional fixed width. Used by the demo host.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBanner {
    pub title: String,
    pub width: Option<f32>,
}

impl TextBanner {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: None,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

impl BannerContent for TextBanner {
    fn preferred_width(&self, viewport_width: f32, _height: f32) -> f32 {
        self.width.unwrap_or(viewport_width)
    }
}

/// The carousel's handle on a banner list it does not own.
///
/// The caller keeps the [`watch::Sender`] and may replace the list at any
/// time; the carousel only reads its length and items.
#[derive(Debug)]
pub struct BannerBinding<B> {
    rx: watch::Receiver<Vec<B>>,
}

impl<B> Clone for BannerBinding<B> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<B> BannerBinding<B> {
    /// Create a list owned by the returned sender and bound to the carousel.
    pub fn channel(initial: Vec<B>) -> (watch::Sender<Vec<B>>, Self) {
        let (tx, rx) = watch::channel(initial);
        (tx, Self { rx })
    }

    /// Bind to a list that never changes.
    pub fn constant(banners: Vec<B>) -> Self {
        let (_tx, binding) = Self::channel(banners);
        binding
    }

    pub fn len(&self) -> usize {
        self.rx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the current list. Do not hold across an await point.
    pub fn borrow(&self) -> watch::Ref<'_, Vec<B>> {
        self.rx.borrow()
    }

    /// Wait for the owner to replace the list.
    ///
    /// Errors once the owner has dropped its sender; the last list stays
    /// readable.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}
