use chrono::{DateTime, Local};
use log::{info, warn};
use uuid::Uuid;

use crate::api::{Artwork, NewArtwork, RemoteStore};
use crate::error::AppResult;
use crate::snapshot::Snapshot;
use crate::command::Command;
use crate::state::EditorState;

/// Lets one save be in flight at a time and remembers which editor session
/// it was taken from.
#[derive(Debug, Default)]
pub struct SaveGate {
    in_flight: Option<Uuid>,
}

impl SaveGate {
    /// Claims the gate for a save from `session`. Returns `false` while
    /// another save is still pending.
    pub fn try_begin(&mut self, session: Uuid) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(session);
        true
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Releases the gate, returning the session the save was taken from.
    pub fn finish(&mut self) -> Option<Uuid> {
        self.in_flight.take()
    }
}

/// Empties the title field after a confirmed save.
///
/// Only the session the snapshot was taken from is touched; a title typed into
/// a page opened in the meantime is kept.
pub fn reset_title_after_save(editor: &mut EditorState, saved_from: Uuid) -> bool {
    if editor.session() != saved_from {
        return false;
    }
    editor.apply(Command::SetTitle(String::new()));
    true
}

/// Title used when the user leaves the title field blank.
pub fn default_title(page_name: &str, now: DateTime<Local>) -> String {
    format!("{page_name} - {}", now.format("%Y-%m-%d %H:%M"))
}

pub fn resolve_title(input: &str, page_name: &str, now: DateTime<Local>) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default_title(page_name, now)
    } else {
        trimmed.to_owned()
    }
}

/// Renders the editor's composition and builds the upload body.
///
/// Runs on the UI thread, so the snapshot reflects exactly what is on screen
/// at the moment the user pressed save.
pub fn prepare_save(editor: &EditorState, now: DateTime<Local>) -> AppResult<NewArtwork> {
    let snapshot = Snapshot::render(editor.document(), editor.canvas())?;
    let page = editor.page();
    Ok(NewArtwork {
        page_id: page.id.clone(),
        image_data: snapshot.encode_base64()?,
        title: resolve_title(editor.title(), &page.name, now),
    })
}

/// Sends one create request. Failures are returned as-is, never retried.
pub async fn submit<S: RemoteStore>(store: &S, artwork: NewArtwork) -> AppResult<Artwork> {
    match store.create_artwork(&artwork).await {
        Ok(saved) => {
            info!("💾 saved artwork {} ({:?})", saved.id, saved.title);
            Ok(saved)
        }
        Err(err) => {
            warn!("saving artwork for page {} failed: {err}", artwork.page_id);
            Err(err.into())
        }
    }
}

/// Renders, encodes and submits in one go.
pub async fn save_artwork<S: RemoteStore>(
    store: &S,
    editor: &EditorState,
    now: DateTime<Local>,
) -> AppResult<Artwork> {
    let artwork = prepare_save(editor, now)?;
    submit(store, artwork).await
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 12, 5, 0).unwrap()
    }

    #[test]
    fn blank_title_falls_back_to_page_name_and_time() {
        assert_eq!(resolve_title("   ", "Owl", noon()), "Owl - 2024-03-09 12:05");
        assert_eq!(resolve_title("", "Owl", noon()), default_title("Owl", noon()));
    }

    #[test]
    fn typed_title_is_trimmed() {
        assert_eq!(resolve_title("  My owl ", "Owl", noon()), "My owl");
    }

    fn editor(page_id: &str) -> EditorState {
        let page = crate::api::Page {
            id: page_id.to_owned(),
            name: "Owl".to_owned(),
            category: None,
            svg: String::new(),
            thumbnail_url: None,
        };
        EditorState::new(
            std::sync::Arc::new(page),
            crate::palette::Brush::default(),
            crate::state::EditorSettings::default(),
        )
    }

    #[test]
    fn gate_admits_one_save_until_it_finishes() {
        let session = Uuid::new_v4();
        let mut gate = SaveGate::default();

        assert!(gate.try_begin(session));
        assert!(gate.is_saving());
        // a second click while the first save is pending
        assert!(!gate.try_begin(session));
        assert!(!gate.try_begin(Uuid::new_v4()));

        assert_eq!(gate.finish(), Some(session));
        assert!(!gate.is_saving());
        assert!(gate.try_begin(session));
    }

    #[test]
    fn title_is_reset_only_in_the_session_that_saved() {
        let saved = editor("owl").handle(Command::SetTitle("First".to_owned()));
        let saved_from = saved.session();

        // the user opened the same page again and typed a new title
        let mut reopened = editor("owl").handle(Command::SetTitle("Second".to_owned()));
        assert!(!reset_title_after_save(&mut reopened, saved_from));
        assert_eq!(reopened.title(), "Second");

        let mut saved = saved;
        assert!(reset_title_after_save(&mut saved, saved_from));
        assert_eq!(saved.title(), "");
    }
}
