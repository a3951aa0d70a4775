//! Handing a saved artwork to the platform: a file on disk, a browser
//! download, or the clipboard. The stored PNG is passed on byte for byte.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::api::Artwork;
use crate::snapshot::data_uri;

/// File name for an exported artwork, safe on every platform.
pub fn file_name(artwork: &Artwork) -> String {
    let stem = sanitize(artwork.display_title());
    let id = sanitize(&artwork.id);
    match (stem.is_empty(), id.is_empty()) {
        (true, true) => "artwork.png".to_owned(),
        (true, false) => format!("artwork-{id}.png"),
        (false, true) => format!("{stem}.png"),
        (false, false) => format!("{stem}-{id}.png"),
    }
}

/// Keeps letters, digits, `-` and `_`; anything else becomes `_`.
fn sanitize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    cleaned.trim_matches('_').to_owned()
}

/// Text handed to a share target.
pub fn share_payload(artwork: &Artwork) -> String {
    data_uri(&artwork.image_data)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn export_to_dir(artwork: &Artwork, dir: &Path) -> crate::error::AppResult<PathBuf> {
    use crate::error::AppError;
    use crate::snapshot::decode_image_data;

    let to_app_error = |path: &Path, err: std::io::Error| match err.kind() {
        std::io::ErrorKind::PermissionDenied => AppError::Permission {
            path: path.to_owned(),
        },
        _ => AppError::Export(format!("{}: {err}", path.display())),
    };

    let png = decode_image_data(&artwork.image_data)?;
    std::fs::create_dir_all(dir).map_err(|err| to_app_error(dir, err))?;
    let path = dir.join(file_name(artwork));
    std::fs::write(&path, png).map_err(|err| to_app_error(&path, err))?;
    log::info!("exported artwork {} to {}", artwork.id, path.display());
    Ok(path)
}

#[cfg(target_arch = "wasm32")]
pub fn download(artwork: &Artwork) -> crate::error::AppResult<()> {
    use crate::error::AppError;
    use eframe::wasm_bindgen::JsCast as _;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| AppError::Export("no browser document".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(|err| AppError::Export(format!("{err:?}")))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|err| AppError::Export(format!("{err:?}")))?;
    anchor.set_href(&share_payload(artwork));
    anchor.set_download(&file_name(artwork));
    anchor.click();
    log::info!("started download of artwork {}", artwork.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn artwork(title: Option<&str>) -> Artwork {
        Artwork {
            id: "a42".to_owned(),
            page_id: "p1".to_owned(),
            image_data: base64::encode(b"\x89PNG fake"),
            title: title.map(str::to_owned),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(file_name(&artwork(Some("My cat: v2"))), "My_cat__v2-a42.png");
        assert_eq!(file_name(&artwork(Some("///"))), "artwork-a42.png");
        assert_eq!(file_name(&artwork(None)), "Untitled-a42.png");
    }

    #[test]
    fn server_ids_cannot_escape_the_export_dir() {
        let mut nested = artwork(Some("Cat"));
        nested.id = "../../etc/a42".to_owned();
        let name = file_name(&nested);

        assert_eq!(name, "Cat-etc_a42.png");
        assert!(!name.contains('/') && !name.contains('\\'));
        assert_eq!(std::path::Path::new(&name).components().count(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn export_writes_the_stored_bytes_unchanged() {
        let dir = std::env::temp_dir().join(format!("coloring-export-{}", uuid::Uuid::new_v4()));
        let path = export_to_dir(&artwork(Some("Cat")), &dir).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");
        std::fs::remove_dir_all(dir).unwrap();
    }
}
