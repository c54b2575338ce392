//! Holder configuration.

use mdisp_graph::TieBreak;

/// Behavior knobs for a [`Holder`](crate::Holder).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HolderConfig {
    /// How equally specific matches are resolved.
    pub tie_break: TieBreak,

    /// Whether `invoke` rejects return storage whose runtime type cannot
    /// hold the resolved return type. When off, the callable is trusted to
    /// overwrite the storage with whatever it produces.
    pub check_return_slot: bool,
}

impl Default for HolderConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::FirstRegistered,
            check_return_slot: true,
        }
    }
}

impl HolderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub fn with_check_return_slot(mut self, check: bool) -> Self {
        self.check_return_slot = check;
        self
    }
}
