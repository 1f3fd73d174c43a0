use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::outcome::Acquired;
use crate::scene::text::TextMeasure;

/// Directories searched when the configured font is a bare file name.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

/// Fonts tried, in order, when the configured one cannot be loaded.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font bytes used to shape and draw captions.
#[derive(Clone, Debug)]
pub struct CaptionFont {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) source: PathBuf,
}

impl CaptionFont {
    /// Read and validate a font file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ReelError::render(format!("failed to read font '{}': {e}", path.display()))
        })?;
        let font = Self {
            bytes: Arc::new(bytes),
            source: path.to_path_buf(),
        };
        // Registering with Parley is what tells us the bytes are a usable font.
        TextLayoutEngine::new(&font, 1.0)?;
        Ok(font)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Load the configured caption font, falling back to common system fonts.
///
/// `Fallback { value: None, .. }` means no font could be loaded at all; captions are then
/// skipped rather than failing the run.
pub fn load_caption_font(configured: &Path) -> Acquired<Option<CaptionFont>> {
    let mut first_err = None;
    for candidate in configured_candidates(configured) {
        match CaptionFont::from_path(&candidate) {
            Ok(font) => return Acquired::Fetched(Some(font)),
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }
    let reason = first_err.map_or_else(
        || format!("font '{}' not found", configured.display()),
        |e| e.to_string(),
    );

    for candidate in FALLBACK_FONTS {
        if let Ok(font) = CaptionFont::from_path(Path::new(candidate)) {
            tracing::warn!(
                configured = %configured.display(),
                fallback = candidate,
                %reason,
                "caption font unavailable, using fallback font"
            );
            return Acquired::fallback(Some(font), reason);
        }
    }

    tracing::warn!(configured = %configured.display(), %reason, "no usable font found, captions disabled");
    Acquired::fallback(None, reason)
}

fn configured_candidates(configured: &Path) -> Vec<PathBuf> {
    let mut out = vec![configured.to_path_buf()];
    let bare_name = configured.is_relative() && configured.components().count() == 1;
    if bare_name {
        out.extend(FONT_DIRS.iter().map(|dir| Path::new(dir).join(configured)));
    }
    out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Stateful helper for building Parley layouts of single caption lines.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    size_px: f32,
}

impl TextLayoutEngine {
    /// Register `font` in fresh Parley contexts.
    pub(crate) fn new(font: &CaptionFont, size_px: f32) -> ReelResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ReelError::render(format!(
                "no font families registered from '{}'",
                font.source.display()
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            size_px,
        })
    }

    /// Shape one unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str) -> f32 {
        self.layout_line(text, TextBrushRgba8::default()).width()
    }
}
