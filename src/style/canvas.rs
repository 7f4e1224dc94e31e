use crate::foundation::error::{FramemodError, FramemodResult};

/// Target platform; decides the canvas size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Platform {
    /// Landscape 1920x1080.
    #[serde(rename = "YouTube")]
    YouTube,
    /// Portrait 1080x1920.
    #[serde(rename = "TikTok")]
    TikTok,
    /// Square 1080x1080; the fallback for unknown tags.
    #[default]
    #[serde(rename = "Square")]
    Square,
}

impl Platform {
    /// Every platform.
    pub const ALL: [Platform; 3] = [Platform::YouTube, Platform::TikTok, Platform::Square];

    /// Canonical tag.
    pub fn tag(self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Square => "Square",
        }
    }

    /// Canvas `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Platform::YouTube => (1920, 1080),
            Platform::TikTok => (1080, 1920),
            Platform::Square => (1080, 1080),
        }
    }

    /// Parse a tag case-insensitively, failing with `UnsupportedPlatformTag`.
    pub fn parse(tag: &str) -> FramemodResult<Self> {
        let t = tag.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.tag().eq_ignore_ascii_case(t))
            .ok_or_else(|| FramemodError::UnsupportedPlatformTag(tag.to_string()))
    }

    /// Parse a tag, falling back to [`Platform::Square`] (with a warning) when unknown.
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to square canvas");
            Platform::Square
        })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Fill technique behind the contain-fit foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundStyle {
    /// Solid black.
    #[default]
    PlainBlack,
    /// Source stretched to the canvas, blurred and dimmed.
    BlurredBackdrop,
    /// Solid fill with the source's representative color.
    DominantColorFrame,
}

impl BackgroundStyle {
    /// Canonical tag.
    pub fn tag(self) -> &'static str {
        match self {
            BackgroundStyle::PlainBlack => "plain-black",
            BackgroundStyle::BlurredBackdrop => "blurred-backdrop",
            BackgroundStyle::DominantColorFrame => "dominant-color-frame",
        }
    }

    /// Parse a style tag. Short UI aliases (`black`, `blur`, `color`) are accepted; anything
    /// unrecognized is plain black.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "plain-black" | "black" => BackgroundStyle::PlainBlack,
            "blurred-backdrop" | "blur" => BackgroundStyle::BlurredBackdrop,
            "dominant-color-frame" | "color" | "dominant" => BackgroundStyle::DominantColorFrame,
            other => {
                tracing::debug!(style = other, "unknown background style; using plain black");
                BackgroundStyle::PlainBlack
            }
        }
    }
}

impl std::fmt::Display for BackgroundStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Output frame size and background treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSpec {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Background treatment.
    pub style: BackgroundStyle,
}

impl CanvasSpec {
    /// Canvas for `platform` with `style`.
    pub fn new(platform: Platform, style: BackgroundStyle) -> Self {
        let (width, height) = platform.dimensions();
        Self {
            width,
            height,
            style,
        }
    }

    /// `true` for portrait and square canvases.
    pub fn is_portrait_or_square(&self) -> bool {
        self.height >= self.width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/canvas.rs"]
mod tests;
