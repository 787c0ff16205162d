use serde::{Deserialize, Serialize};

use reflow_surface::ReloadAnimations;

/// Configuration for a [`Director`](crate::Director).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Log a warning when sibling identities repeat in the new snapshot.
    pub warn_on_duplicate_ids: bool,
    /// When a translated batch has more commands than this, issue a full
    /// reload instead of incremental edits.
    pub full_reload_threshold: Option<usize>,
    /// Animations used by [`reconcile`](crate::Director::reconcile).
    pub animations: ReloadAnimations,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            warn_on_duplicate_ids: true,
            full_reload_threshold: None,
            animations: ReloadAnimations::default(),
        }
    }
}

impl DirectorConfig {
    /// Returns `true` if a batch of `commands` should fall back to a full
    /// reload.
    pub fn prefers_full_reload(&self, commands: usize) -> bool {
        self.full_reload_threshold
            .is_some_and(|threshold| commands > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_never_falls_back() {
        let config = DirectorConfig::default();
        assert!(config.warn_on_duplicate_ids);
        assert!(!config.prefers_full_reload(usize::MAX));
    }

    #[test]
    fn threshold_is_exclusive() {
        let config = DirectorConfig {
            full_reload_threshold: Some(3),
            ..Default::default()
        };
        assert!(!config.prefers_full_reload(3));
        assert!(config.prefers_full_reload(4));
    }
}
