use headless_chrome::{self, LaunchOptions};
use anyhow;
use url::{Url, ParseError};
use thiserror::Error;
use log::debug;
use crate::screenshot::{WebPage, ScreenshotError};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("ChromeError: {0}")]
    ChromeError(#[from] anyhow::Error),
    #[error("LaunchError: {0}")]
    LaunchError(String),
    #[error("UrlError, can't parse given URL: {0}")]
    UrlError(#[from] ParseError),
    #[error("ScreenshotError: {0}")]
    ScreenshotError(#[from] ScreenshotError),
}
pub type Result<T> = std::result::Result<T, BrowserError>;

pub struct Browser(headless_chrome::Browser);

impl Browser {

    pub fn new() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![OsStr::new("--disable-setuid-sandbox")])
            .build()
            .map_err(|e| BrowserError::LaunchError(e.to_string()))?;

        debug!("launching headless browser");
        Ok(Self(headless_chrome::Browser::new(options)?))
    }

    fn url_to_tab(&self, url: &str) -> Result<Arc<headless_chrome::Tab>> {

        Url::parse(url)?;
        let tab = self.0.new_tab()?;

        debug!("navigating to {url}");
        tab.navigate_to(url)?.wait_until_navigated()?;

        Ok(tab)
    }

    pub fn open_page(&self, url: &str) -> Result<WebPage> {

        let tab = self.url_to_tab(url)?;

        Ok(WebPage::from_tab(tab))
    }

    pub fn url_to_screenshot(&self, url: &str, output_path: &Path) -> Result<()> {

        let page = self.open_page(url)?;
        page.to_screenshot(output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_url() {
        let Ok(browser) = Browser::new() else {
            eprintln!("skipping: Chrome is not available");
            return;
        };

        match browser.open_page("not a url") {
            Err(e) => assert!(matches!(e, BrowserError::UrlError(_))),
            Ok(_) => panic!("expected a URL parse error"),
        }
    }

    #[test]
    fn captures_local_page() {
        let Ok(browser) = Browser::new() else {
            eprintln!("skipping: Chrome is not available");
            return;
        };

        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let response = tiny_http::Response::from_string(
                    "<html><body><h1>hello</h1></body></html>",
                )
                .with_header("Content-Type: text/html".parse::<tiny_http::Header>().unwrap());
                let _ = request.respond(response);
            }
        });

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("page.png");

        browser
            .url_to_screenshot(&format!("http://127.0.0.1:{port}/"), &out)
            .unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
