use headless_chrome;
use headless_chrome::protocol::cdp::Page;
use anyhow;
use thiserror::Error;
use log::debug;
use std::path::Path;
use std::sync::Arc;

#[derive(Error, Debug)]
pub enum ScreenshotError {
    #[error("ChromeError: {0}")]
    ChromeError(#[from] anyhow::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScreenshotError>;

/// Encoding of the captured image, chosen from the output path's
/// extension. Anything unrecognized falls back to PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {

    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg") => Self::Jpeg,
            Some(e) if e.eq_ignore_ascii_case("webp") => Self::Webp,
            _ => Self::Png,
        }
    }

    fn as_cdp(self) -> Page::CaptureScreenshotFormatOption {
        match self {
            Self::Png => Page::CaptureScreenshotFormatOption::Png,
            Self::Jpeg => Page::CaptureScreenshotFormatOption::Jpeg,
            Self::Webp => Page::CaptureScreenshotFormatOption::Webp,
        }
    }
}

pub struct WebPage(Arc<headless_chrome::Tab>);

impl WebPage {

    pub fn from_tab(tab: Arc<headless_chrome::Tab>) -> Self {
        Self(tab)
    }

    // Clipping to the body's margin box captures the whole document
    // height, not just the visible viewport.
    fn full_page_viewport(&self) -> Result<Page::Viewport> {
        let body = self.0.wait_for_element("body")?;
        Ok(body.get_box_model()?.margin_viewport())
    }

    pub fn to_screenshot(&self, path: &Path) -> Result<()> {

        let format = ImageFormat::from_path(path);
        let clip = self.full_page_viewport()?;

        debug!("capturing {:?} screenshot, {}x{}", format, clip.width, clip.height);
        let data = self.0.capture_screenshot(format.as_cdp(), None, Some(clip), true)?;

        std::fs::write(path, data)?;
        Ok(())
    }
}
