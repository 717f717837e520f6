//! QR code for the app link.
//!
//! The code is rendered once into text using half-block characters, two
//! modules per terminal row, so it can be drawn by the TUI overlay or printed
//! straight to stdout.

use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

use crate::error::Result;

/// Where the deployed app lives.
pub const APP_URL: &str = "https://todo-app-ts-ecru.vercel.ap/";

/// A pre-rendered QR code.
#[derive(Debug, Clone)]
pub struct QrImage {
    url: String,
    lines: Vec<String>,
}

impl QrImage {
    /// Encode `url`. Fails only when the payload is too long for a QR code.
    pub fn new(url: &str) -> Result<Self> {
        let code = QrCode::new(url.as_bytes())?;
        // Light modules are drawn as filled blocks; on dark terminals that
        // gives the dark-on-light image scanners expect.
        let rendered = code
            .render::<Dense1x2>()
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .quiet_zone(true)
            .build();

        Ok(QrImage {
            url: url.to_string(),
            lines: rendered.lines().map(str::to_string).collect(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Width in terminal columns.
    pub fn width(&self) -> u16 {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .try_into()
            .unwrap_or(u16::MAX)
    }

    /// Height in terminal rows.
    pub fn height(&self) -> u16 {
        self.lines.len().try_into().unwrap_or(u16::MAX)
    }
}
