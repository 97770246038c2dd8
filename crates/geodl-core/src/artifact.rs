//! Artifact naming: manifest filename to on-disk `.geojson` path.

use std::path::{Path, PathBuf};

/// Extension every stored artifact carries.
pub const GEOJSON_EXT: &str = ".geojson";

const FALLBACK_STEM: &str = "layer";
const NAME_MAX: usize = 255;

/// Resolves the on-disk filename for a manifest filename.
///
/// `.geojson` is appended unless the name already ends with it, compared
/// case-sensitively, so `parcelas` and `parcelas.geojson` resolve to the
/// same artifact while `capas.GEOJSON` gains a second extension. NUL, path
/// separators, and control characters are replaced with `_`; leading and
/// trailing spaces and dots are trimmed. Names that sanitize to nothing
/// fall back to `layer`, and overlong stems are clamped to NAME_MAX bytes
/// at a char boundary.
pub fn artifact_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = sanitized.trim_matches(|c| c == ' ' || c == '.');

    let mut stem = match trimmed.strip_suffix(GEOJSON_EXT) {
        Some(rest) => rest.to_string(),
        None => trimmed.to_string(),
    };
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }

    let max_stem = NAME_MAX - GEOJSON_EXT.len();
    if stem.len() > max_stem {
        let mut take = max_stem;
        while take > 0 && !stem.is_char_boundary(take) {
            take -= 1;
        }
        stem.truncate(take);
    }

    format!("{stem}{GEOJSON_EXT}")
}

/// Full on-disk path for a manifest filename under `output_dir`.
pub fn artifact_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(artifact_filename(name))
}
