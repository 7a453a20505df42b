use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Rgb8, Rgba8};
use crate::foundation::error::{StoreshotsError, StoreshotsResult};
use crate::render::frame::FrameStyle;
use crate::text::engine::TextShadow;
use crate::text::fonts::FontDescriptor;

pub const ACCENT_BLUE: Rgb8 = Rgb8::new(10, 132, 255);
pub const ACCENT_TEAL: Rgb8 = Rgb8::new(48, 209, 188);
pub const ACCENT_GREEN: Rgb8 = Rgb8::new(48, 209, 88);
pub const ACCENT_ORANGE: Rgb8 = Rgb8::new(255, 159, 10);
pub const ACCENT_RED: Rgb8 = Rgb8::new(255, 69, 58);
pub const ACCENT_PURPLE: Rgb8 = Rgb8::new(175, 82, 222);

/// Shared near-black bottom color of every default gradient.
pub const GRADIENT_BOTTOM: Rgb8 = Rgb8::new(12, 12, 14);

/// Content and colors of one output slide.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlideSpec {
    /// File name of the source screenshot inside the source directory.
    pub source: String,
    /// Headline lines, drawn top to bottom.
    pub headline: Vec<String>,
    pub subhead: Vec<String>,
    pub gradient_top: Rgb8,
    pub gradient_bottom: Rgb8,
    /// Glow band and divider color.
    pub accent: Rgb8,
    /// File name of the composed PNG inside the output directory.
    pub output: String,
}

impl SlideSpec {
    /// Build a spec from newline-separated headline and subhead text.
    pub fn new(
        source: &str,
        headline: &str,
        subhead: &str,
        gradient_top: Rgb8,
        accent: Rgb8,
        output: &str,
    ) -> Self {
        Self {
            source: source.to_string(),
            headline: split_lines(headline),
            subhead: split_lines(subhead),
            gradient_top,
            gradient_bottom: GRADIENT_BOTTOM,
            accent,
            output: output.to_string(),
        }
    }

    /// Short human label: the first headline line.
    pub fn label(&self) -> &str {
        self.headline.first().map(String::as_str).unwrap_or("")
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Rounded accent bar drawn below the subhead.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DividerStyle {
    /// Space between the y after the subhead block and the top of the bar.
    pub gap: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            gap: 20.0,
            width: 120.0,
            height: 4.0,
            radius: 2.0,
        }
    }
}

/// Geometry, typography and colors shared by every slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fraction of the canvas width budgeted for the screenshot.
    pub screenshot_scale: f64,
    /// Top edge of the device frame.
    pub screenshot_y: u32,
    /// Minimum space kept below the screenshot.
    pub bottom_margin: u32,
    pub glow_height: u32,
    pub glow_max_alpha: u8,
    pub frame: FrameStyle,
    pub headline_y: f64,
    pub headline_font: FontDescriptor,
    pub headline_advance: f64,
    pub headline_color: Rgba8,
    pub headline_shadow: Option<TextShadow>,
    /// Extra space between the last headline line and the first subhead line.
    pub subhead_gap: f64,
    pub subhead_font: FontDescriptor,
    pub subhead_advance: f64,
    pub subhead_color: Rgba8,
    pub divider: DividerStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1284,
            canvas_height: 2778,
            screenshot_scale: 0.82,
            screenshot_y: 780,
            bottom_margin: 40,
            glow_height: 400,
            glow_max_alpha: 25,
            frame: FrameStyle::default(),
            headline_y: 140.0,
            headline_font: FontDescriptor::bold(96.0),
            headline_advance: 120.0,
            headline_color: Rgba8::new(255, 255, 255, 255),
            headline_shadow: Some(TextShadow {
                offset: 2.0,
                color: Rgba8::new(0, 0, 0, 80),
            }),
            subhead_gap: 20.0,
            subhead_font: FontDescriptor::regular(48.0),
            subhead_advance: 64.0,
            subhead_color: Rgba8::new(174, 174, 178, 255),
            divider: DividerStyle::default(),
        }
    }
}

impl LayoutConfig {
    /// Screenshot width budget: `floor(canvas_width * screenshot_scale)`.
    pub fn screenshot_width_budget(&self) -> u32 {
        (f64::from(self.canvas_width) * self.screenshot_scale).floor() as u32
    }

    /// Tallest screenshot that still leaves `bottom_margin` below it.
    pub fn screenshot_max_height(&self) -> u32 {
        self.canvas_height
            .saturating_sub(self.screenshot_y)
            .saturating_sub(self.bottom_margin)
    }

    pub fn validate(&self) -> StoreshotsResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(StoreshotsError::config("canvas dimensions must be > 0"));
        }
        if self.canvas_width > u32::from(u16::MAX) || self.canvas_height > u32::from(u16::MAX) {
            return Err(StoreshotsError::config(format!(
                "canvas dimensions must fit in u16 (got {}x{})",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.screenshot_scale.is_finite()
            && self.screenshot_scale > 0.0
            && self.screenshot_scale <= 1.0)
        {
            return Err(StoreshotsError::config(
                "screenshot_scale must be in (0, 1]",
            ));
        }
        if self.screenshot_width_budget() == 0 {
            return Err(StoreshotsError::config("screenshot width budget is zero"));
        }
        if self.screenshot_max_height() == 0 {
            return Err(StoreshotsError::config(
                "screenshot_y and bottom_margin leave no room for the screenshot",
            ));
        }
        if self.glow_height == 0 {
            return Err(StoreshotsError::config("glow_height must be > 0"));
        }
        let widest_frame = self
            .frame
            .frame_size(self.screenshot_width_budget(), self.screenshot_max_height());
        if widest_frame.0 > u32::from(u16::MAX) || widest_frame.1 > u32::from(u16::MAX) {
            return Err(StoreshotsError::config("device frame would exceed u16 size"));
        }
        Ok(())
    }
}

/// Ordered slide list plus the shared layout: the pipeline's whole input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    pub slides: Vec<SlideSpec>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            slides: default_slides(),
        }
    }
}

impl JobConfig {
    /// Parse and validate a JSON job file.
    pub fn from_path(path: &Path) -> StoreshotsResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read job config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn from_json_str(s: &str) -> StoreshotsResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| StoreshotsError::config(format!("invalid job config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> StoreshotsResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoreshotsError::config(format!("serialize job config: {e}")))
    }

    pub fn validate(&self) -> StoreshotsResult<()> {
        self.layout.validate()?;
        let mut outputs = HashSet::new();
        for (i, s) in self.slides.iter().enumerate() {
            if s.source.trim().is_empty() {
                return Err(StoreshotsError::config(format!("slide {i} has an empty source")));
            }
            if s.output.trim().is_empty() {
                return Err(StoreshotsError::config(format!("slide {i} has an empty output")));
            }
            if !is_plain_file_name(&s.source) || !is_plain_file_name(&s.output) {
                return Err(StoreshotsError::config(format!(
                    "slide {i}: source and output must be plain file names"
                )));
            }
            if !outputs.insert(s.output.as_str()) {
                return Err(StoreshotsError::config(format!(
                    "duplicate output '{}'",
                    s.output
                )));
            }
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.contains('/') && !name.contains('\\') && name != "." && name != ".."
}

/// The ten App Store slides of the network monitor app.
pub fn default_slides() -> Vec<SlideSpec> {
    vec![
        SlideSpec::new(
            "dashboard.png",
            "Your Network\nat a Glance",
            "Real-time status, WiFi details,\ngateway latency & ISP info",
            Rgb8::new(10, 35, 78),
            ACCENT_BLUE,
            "01-dashboard.png",
        ),
        SlideSpec::new(
            "network-map.png",
            "Discover Every\nDevice",
            "Concurrent TCP probing finds\nevery host on your network",
            Rgb8::new(8, 52, 48),
            ACCENT_TEAL,
            "02-network-map.png",
        ),
        SlideSpec::new(
            "tools-grid.png",
            "10 Pro Tools.\nOne App.",
            "Ping, scan, trace, lookup, wake \u{2014}\neverything you need on the go",
            Rgb8::new(45, 20, 65),
            ACCENT_PURPLE,
            "03-tools.png",
        ),
        SlideSpec::new(
            "ping.png",
            "Live Latency\nMonitoring",
            "Streaming TCP ping with real-time\ngraphs and statistics",
            Rgb8::new(10, 50, 20),
            ACCENT_GREEN,
            "04-ping.png",
        ),
        SlideSpec::new(
            "port-scanner.png",
            "Port Scanner",
            "Fast TCP connect scanning\nwith service identification",
            Rgb8::new(60, 30, 8),
            ACCENT_ORANGE,
            "05-port-scanner.png",
        ),
        SlideSpec::new(
            "dns-lookup.png",
            "DNS Lookup",
            "Query A, AAAA, MX, TXT, CNAME,\nNS, SOA & PTR records",
            Rgb8::new(10, 35, 78),
            ACCENT_BLUE,
            "06-dns-lookup.png",
        ),
        SlideSpec::new(
            "traceroute.png",
            "Trace the Path",
            "Hop-by-hop route visualization\nwith per-hop latency",
            Rgb8::new(50, 10, 10),
            ACCENT_RED,
            "07-traceroute.png",
        ),
        SlideSpec::new(
            "speed-test.png",
            "Speed Test",
            "Measure download & upload\nbandwidth instantly",
            Rgb8::new(8, 52, 48),
            ACCENT_TEAL,
            "08-speed-test.png",
        ),
        SlideSpec::new(
            "bonjour-wol.png",
            "Wake on LAN\n& Bonjour",
            "Magic packets & mDNS discovery\nfor your local network",
            Rgb8::new(45, 20, 65),
            ACCENT_PURPLE,
            "09-bonjour-wol.png",
        ),
        SlideSpec::new(
            "privacy-hero.png",
            "Zero Tracking.\nZero Ads.",
            "100% on-device. No accounts.\nYour network data stays yours.",
            Rgb8::new(10, 35, 78),
            ACCENT_BLUE,
            "10-privacy.png",
        ),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/compose/config.rs"]
mod tests;
