use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Context as _;

use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::imaging::composite::blend_premul_layer;

/// What to draw and where.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec<'a> {
    /// Text to draw (single run, no wrapping).
    pub text: &'a str,
    /// Font size in pixels.
    pub size_px: f32,
    /// Fill color.
    pub rgb: [u8; 3],
    /// Top-left of the text's ink box; `None` centers on that axis.
    pub x: Option<f64>,
    /// See `x`.
    pub y: Option<f64>,
}

/// A font database plus the family name text should be set in.
#[derive(Clone)]
pub struct FontChoice {
    db: Arc<usvg::fontdb::Database>,
    family: String,
}

impl std::fmt::Debug for FontChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontChoice")
            .field("faces", &self.face_count())
            .field("family", &self.family)
            .finish()
    }
}

impl FontChoice {
    /// System fonts with a generic sans-serif family.
    pub fn system() -> Self {
        Self {
            db: system_fonts(),
            family: "sans-serif".to_string(),
        }
    }

    /// System fonts plus the font file at `path`, selecting that file's first family.
    pub fn from_file(path: &Path) -> FramemodResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let mut db = (*system_fonts()).clone();
        let before = db.len();
        db.load_font_data(bytes);
        let family = db
            .faces()
            .skip(before)
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| {
                FramemodError::validation(format!(
                    "'{}' does not contain a usable font face",
                    path.display()
                ))
            })?;
        Ok(Self {
            db: Arc::new(db),
            family,
        })
    }

    /// Number of faces available for fallback and lookup.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Family name text will be set in.
    pub fn family(&self) -> &str {
        &self.family
    }
}

fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    })
    .clone()
}

/// Draw `spec` onto `image` and return the result (converted to RGB).
///
/// When no installed face can render the text, the image is returned unchanged.
pub fn draw_text(image: Image, spec: &TextSpec<'_>, font: &FontChoice) -> FramemodResult<Image> {
    if spec.text.is_empty() {
        return Ok(image);
    }
    if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
        return Err(FramemodError::validation(
            "text size must be finite and > 0",
        ));
    }

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            r##"<text x="0" y="0" font-family="{family}" font-size="{size}" fill="#{r:02x}{g:02x}{b:02x}">{text}</text>"##,
            "</svg>"
        ),
        w = image.width,
        h = image.height,
        family = escape_xml(&font.family),
        size = spec.size_px,
        r = spec.rgb[0],
        g = spec.rgb[1],
        b = spec.rgb[2],
        text = escape_xml(spec.text),
    );

    let opts = usvg::Options {
        fontdb: font.db.clone(),
        font_resolver: first_face_fallback_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("build text svg")?;
    if !tree.root().has_children() {
        tracing::warn!(
            family = font.family.as_str(),
            faces = font.face_count(),
            "no font face could render text; skipping"
        );
        return Ok(image);
    }

    let ink = tree.root().abs_bounding_box();
    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let (tw, th) = (f64::from(ink.width()), f64::from(ink.height()));
    let pos_x = spec.x.unwrap_or(((iw - tw) / 2.0).floor());
    let pos_y = spec.y.unwrap_or(((ih - th) / 2.0).floor());

    let mut pixmap = resvg::tiny_skia::Pixmap::new(image.width, image.height)
        .ok_or_else(|| FramemodError::validation("failed to allocate text pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_translate(
        (pos_x - f64::from(ink.x())) as f32,
        (pos_y - f64::from(ink.y())) as f32,
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut out = image.into_rgb();
    blend_premul_layer(&mut out, pixmap.data())?;
    Ok(out)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Resolve the requested family, then generic families, then any installed face.
fn first_face_fallback_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/text.rs"]
mod tests;
