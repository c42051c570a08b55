use std::collections::BTreeMap;

/// Path-keyed annotations appended to rendered lines.
///
/// Keys are slash-joined paths into the document (`Properties/BucketName`);
/// values are free-text notes the caller wants surfaced next to the change
/// at that position, such as a replacement warning. A missing path simply
/// means no note is appended.
///
/// ```
/// # use stackdiff_core::ChangeNotes;
/// let notes = ChangeNotes::new()
///     .with_note("Properties/BucketName", "WARNING: Causes Replacement!");
/// assert_eq!(
///     notes.get("Properties/BucketName"),
///     Some("WARNING: Causes Replacement!"),
/// );
/// assert_eq!(notes.get("Properties/Other"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeNotes {
    notes: BTreeMap<String, String>,
}

impl ChangeNotes {
    /// Creates an empty note mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a note, returning the extended mapping.
    #[must_use]
    pub fn with_note<P, N>(mut self, path: P, note: N) -> Self
    where
        P: Into<String>,
        N: Into<String>,
    {
        self.insert(path, note);
        self
    }

    /// Adds a note in place.
    pub fn insert<P, N>(&mut self, path: P, note: N)
    where
        P: Into<String>,
        N: Into<String>,
    {
        self.notes.insert(path.into(), note.into());
    }

    /// Looks up the note for a slash-joined path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.notes.get(path).map(String::as_str)
    }

    /// Indicates whether any notes are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl FromIterator<(String, String)> for ChangeNotes {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self { notes: iter.into_iter().collect() }
    }
}
