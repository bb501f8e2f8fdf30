//! Share-sheet payload composition.

use crate::model::note::Note;

/// Content handed to the host share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    /// `"{title}\n\n{body}"`.
    pub text: String,
    pub image: Option<Vec<u8>>,
}

impl SharePayload {
    /// Builds the payload from a note and the body currently on screen,
    /// unsaved edits included.
    pub fn for_note(note: &Note, body: &str) -> Self {
        Self {
            text: format!("{}\n\n{}", note.title, body),
            image: note.image_data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SharePayload;
    use crate::model::note::Note;

    #[test]
    fn payload_joins_title_and_body_and_carries_photo() {
        let mut note = Note::new();
        note.title = "Groceries".to_string();
        note.image_data = Some(vec![1, 2, 3]);

        let payload = SharePayload::for_note(&note, "Buy milk");
        assert_eq!(payload.text, "Groceries\n\nBuy milk");
        assert_eq!(payload.image, Some(vec![1, 2, 3]));
    }
}
