//! Draft state holder
//!
//! Holds the in-progress copy of the record a modal edits. The draft is
//! keyed by the identity of the record it was seeded from, so reusing one
//! modal for a different target replaces the draft wholesale instead of
//! leaking fields from the previous one.

use puris_model::Record;
use uuid::Uuid;

/// Identity of the record a draft was seeded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftSource {
    /// Fresh record, optionally pre-filled by the caller
    New,
    /// Existing record with a backend identifier
    Existing(Uuid),
    /// Existing record the backend has not assigned an identifier to
    Unidentified,
}

impl DraftSource {
    /// Identity of `record`
    #[must_use]
    pub fn of<T: Record>(record: Option<&T>) -> Self {
        match record {
            None => Self::New,
            Some(r) => r.id().map_or(Self::Unidentified, Self::Existing),
        }
    }
}

/// In-memory copy of the record being created or edited
#[derive(Debug, Clone, PartialEq)]
pub struct DraftState<T: Record> {
    draft: T,
    source: DraftSource,
}

impl<T: Record> DraftState<T> {
    /// Empty draft for a new record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(T::default())
    }

    /// Draft for a new record pre-filled with `defaults`
    #[inline]
    #[must_use]
    pub fn with_defaults(defaults: T) -> Self {
        Self {
            draft: defaults,
            source: DraftSource::New,
        }
    }

    /// Draft seeded from an existing record
    #[inline]
    #[must_use]
    pub fn from_existing(record: &T) -> Self {
        Self {
            draft: record.clone(),
            source: DraftSource::of(Some(record)),
        }
    }

    /// Current draft
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &T {
        &self.draft
    }

    /// Mutable draft, for normalization before submit
    #[inline]
    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    /// Identity the draft was seeded from
    #[inline]
    #[must_use]
    pub fn source(&self) -> DraftSource {
        self.source
    }

    /// Shallow-merge a patch into the draft
    ///
    /// Fields named in the patch are overwritten, including being cleared;
    /// every other field is preserved.
    pub fn update<I>(&mut self, patch: I)
    where
        I: IntoIterator<Item = T::Field>,
    {
        for field in patch {
            tracing::debug!(kind = %T::KIND, ?field, "draft update");
            self.draft.assign(field);
        }
    }

    /// Re-seed when the incoming record's identity differs from the current one
    ///
    /// Returns whether the draft was replaced.
    pub fn sync_target(&mut self, target: Option<&T>) -> bool {
        let incoming = DraftSource::of(target);
        if incoming == self.source && incoming != DraftSource::Unidentified {
            return false;
        }
        *self = match target {
            Some(record) => Self::from_existing(record),
            None => Self::new(),
        };
        true
    }

    /// Consume into the draft record
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.draft
    }
}

impl<T: Record> Default for DraftState<T> {
    fn default() -> Self {
        Self::new()
    }
}
