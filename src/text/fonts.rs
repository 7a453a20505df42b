use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Font request: pixel size plus CSS-style weight (400 regular, 700 bold).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontDescriptor {
    pub size_px: f32,
    pub weight: u16,
}

impl FontDescriptor {
    pub const REGULAR: u16 = 400;
    pub const BOLD: u16 = 700;

    pub fn regular(size_px: f32) -> Self {
        Self {
            size_px,
            weight: Self::REGULAR,
        }
    }

    pub fn bold(size_px: f32) -> Self {
        Self {
            size_px,
            weight: Self::BOLD,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

/// Font bytes chosen for a [`FontDescriptor`].
#[derive(Clone)]
pub struct ResolvedFont {
    /// Raw font file bytes (`ttf`, `otf` or `ttc`).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Where the bytes came from; used for logging and registration caching.
    pub origin: String,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Strategy for turning a font request into font bytes.
///
/// Returning `None` lets a caller fall through to the next strategy; a composer with no
/// font at all still lays out every line position but draws no glyphs.
pub trait FontResolver {
    fn resolve(&self, desc: FontDescriptor) -> Option<ResolvedFont>;
}

impl<T: FontResolver + ?Sized> FontResolver for Box<T> {
    fn resolve(&self, desc: FontDescriptor) -> Option<ResolvedFont> {
        (**self).resolve(desc)
    }
}

/// Prioritized list of font files; the first readable candidate wins.
#[derive(Clone, Debug, Default)]
pub struct FileFontResolver {
    regular: Vec<PathBuf>,
    bold: Vec<PathBuf>,
}

impl FileFontResolver {
    pub fn new(regular: Vec<PathBuf>, bold: Vec<PathBuf>) -> Self {
        Self { regular, bold }
    }

    /// Well-known macOS and Linux locations of sans-serif display fonts.
    pub fn platform_defaults() -> Self {
        let regular = [
            "/System/Library/Fonts/SFProDisplay-Regular.otf",
            "/System/Library/Fonts/Helvetica.ttc",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ];
        let bold = [
            "/System/Library/Fonts/SFProDisplay-Bold.otf",
            "/System/Library/Fonts/Helvetica.ttc",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        ];
        Self::new(
            regular.iter().map(PathBuf::from).collect(),
            bold.iter().map(PathBuf::from).collect(),
        )
    }
}

impl FontResolver for FileFontResolver {
    fn resolve(&self, desc: FontDescriptor) -> Option<ResolvedFont> {
        let candidates = if desc.is_bold() {
            &self.bold
        } else {
            &self.regular
        };
        candidates.iter().find_map(|path| read_font_file(path))
    }
}

fn read_font_file(path: &Path) -> Option<ResolvedFont> {
    let bytes = std::fs::read(path).ok()?;
    if bytes.is_empty() {
        return None;
    }
    Some(ResolvedFont {
        bytes: Arc::new(bytes),
        index: 0,
        origin: path.display().to_string(),
    })
}

/// Queries a `fontdb` database for the closest sans-serif face by weight.
pub struct FontDbResolver {
    db: usvg::fontdb::Database,
}

impl FontDbResolver {
    /// Database of every font installed on the system.
    pub fn system() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self { db }
    }

    /// Database of the `ttf`/`otf`/`ttc` files found directly inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        let mut db = usvg::fontdb::Database::new();
        load_fonts_from_dir(&mut db, dir);
        Self { db }
    }

    /// Number of faces known to the database.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl FontResolver for FontDbResolver {
    fn resolve(&self, desc: FontDescriptor) -> Option<ResolvedFont> {
        let families = [usvg::fontdb::Family::SansSerif];
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight(desc.weight),
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id))?;
        let origin = self
            .db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "fontdb".to_string());
        self.db.with_face_data(id, |data, index| ResolvedFont {
            bytes: Arc::new(data.to_vec()),
            index,
            origin,
        })
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Tries each resolver in order and returns the first hit.
#[derive(Default)]
pub struct ChainResolver {
    resolvers: Vec<Box<dyn FontResolver>>,
}

impl ChainResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl FontResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }
}

impl FontResolver for ChainResolver {
    fn resolve(&self, desc: FontDescriptor) -> Option<ResolvedFont> {
        self.resolvers.iter().find_map(|r| r.resolve(desc))
    }
}

/// Resolver that never finds a font; slides render without glyphs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFonts;

impl FontResolver for NoFonts {
    fn resolve(&self, _desc: FontDescriptor) -> Option<ResolvedFont> {
        None
    }
}

/// Platform font paths first, then any system sans-serif face.
pub fn default_resolver() -> ChainResolver {
    ChainResolver::new()
        .with(FileFontResolver::platform_defaults())
        .with(FontDbResolver::system())
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
