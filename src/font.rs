//! Font resolution: caller-supplied bytes or a sans-serif face from the
//! system font database.

use crate::{Error, Result};
use fontdue::{Font, FontSettings};
use std::sync::{Arc, OnceLock};
use usvg::fontdb;

pub(crate) struct FontInfo {
    pub data: Vec<u8>,
    pub family_name: String,
}

static SYSTEM_FONTS: OnceLock<fontdb::Database> = OnceLock::new();

fn system_fonts() -> &'static fontdb::Database {
    SYSTEM_FONTS.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        db
    })
}

/// Resolves the font used for both layout and rendering. Explicit bytes win;
/// otherwise the first sans-serif face the system database offers is used.
/// The bytes are parsed once up front so an unusable font fails early.
pub(crate) fn resolve(explicit: Option<Vec<u8>>) -> Result<FontInfo> {
    let data = match explicit {
        Some(d) => d,
        None => default_sans_serif()?,
    };

    let family_name =
        extract_family_name(&data).unwrap_or_else(|| "sans-serif".to_string());

    Font::from_bytes(data.as_slice(), FontSettings::default())
        .map_err(|e| Error::Font(e.to_string()))?;

    Ok(FontInfo { data, family_name })
}

fn default_sans_serif() -> Result<Vec<u8>> {
    let db = system_fonts();
    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    let id = db.query(&query).ok_or_else(|| {
        Error::Font("no sans-serif face in the system font database".into())
    })?;

    db.with_face_data(id, |data, _face_index| data.to_vec())
        .ok_or_else(|| Error::Font("could not read system font data".into()))
}

pub(crate) fn extract_family_name(font_data: &[u8]) -> Option<String> {
    let mut db = fontdb::Database::new();
    db.load_font_source(fontdb::Source::Binary(Arc::new(font_data.to_vec())));
    for face in db.faces() {
        if let Some((name, _)) = face.families.first() {
            return Some(name.clone());
        }
    }
    None
}
