// crates/citydb-core/src/mode.rs

//! # Operating-Mode Gate
//!
//! During an emergency (the upstream forecast feed broke and only the larger
//! settlements are being refreshed by hand) the coordinate resolver must not
//! hand out villages or parish centers, because there is no forecast for
//! them. Operations announce the emergency by creating a marker file; the
//! gate probes it on every call.

use crate::model::AdminType;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default marker announcing the emergency mode.
pub const DEFAULT_EMERGENCY_MARKER: &str = "run_emergency";
/// Default marker announcing that the emergency refresh itself failed.
pub const DEFAULT_EMERGENCY_FAILED_MARKER: &str = "run_emergency_failed";

/// A side-effect-free probe of some external condition.
///
/// Implementations must not block for long and must not fail: an unreadable
/// signal counts as "not active".
pub trait EmergencySignal: Send + Sync {
    fn is_active(&self) -> bool;
}

/// Active while a file exists at `path`.
#[derive(Debug, Clone)]
pub struct MarkerFile {
    path: PathBuf,
}

impl MarkerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EmergencySignal for MarkerFile {
    fn is_active(&self) -> bool {
        match self.path.try_exists() {
            Ok(present) => present,
            Err(e) => {
                tracing::debug!(marker = %self.path.display(), error = %e, "marker probe failed; treating as absent");
                false
            }
        }
    }
}

/// In-process switch, for embedding applications and tests.
#[derive(Debug, Default)]
pub struct Switch(AtomicBool);

impl Switch {
    pub fn new(active: bool) -> Self {
        Self(AtomicBool::new(active))
    }

    pub fn set(&self, active: bool) {
        self.0.store(active, Ordering::SeqCst);
    }
}

impl EmergencySignal for Switch {
    fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Restricts the candidate tier set while the emergency signal is present.
#[derive(Clone)]
pub struct ModeGate {
    emergency: Arc<dyn EmergencySignal>,
    failed: Option<Arc<dyn EmergencySignal>>,
}

impl ModeGate {
    pub fn new(emergency: Arc<dyn EmergencySignal>) -> Self {
        Self {
            emergency,
            failed: None,
        }
    }

    /// Gate that never enters emergency mode.
    pub fn normal() -> Self {
        Self::new(Arc::new(Switch::new(false)))
    }

    /// **Production Gate:** probes `emergency` (and optionally `failed`) marker files.
    pub fn with_markers(emergency: impl Into<PathBuf>, failed: Option<PathBuf>) -> Self {
        Self {
            emergency: Arc::new(MarkerFile::new(emergency)),
            failed: failed.map(|p| Arc::new(MarkerFile::new(p)) as Arc<dyn EmergencySignal>),
        }
    }

    pub fn with_failure_signal(mut self, failed: Arc<dyn EmergencySignal>) -> Self {
        self.failed = Some(failed);
        self
    }

    /// "Is emergency mode active", read fresh.
    pub fn is_emergency(&self) -> bool {
        self.emergency.is_active()
    }

    /// Whether the emergency refresh reported failure. Informational only;
    /// it does not change the tier set.
    pub fn emergency_failed(&self) -> bool {
        self.failed.as_ref().is_some_and(|s| s.is_active())
    }

    /// `activeTierSet`: the administrative types eligible for this call.
    pub fn active_types(&self, force_all: bool) -> &'static [AdminType] {
        if force_all || !self.is_emergency() {
            &AdminType::ALL
        } else {
            &AdminType::PRIORITY
        }
    }
}

impl std::fmt::Debug for ModeGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeGate")
            .field("emergency", &self.is_emergency())
            .field("emergency_failed", &self.emergency_failed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_all_overrides_emergency() {
        let switch = Arc::new(Switch::new(true));
        let gate = ModeGate::new(switch.clone());
        assert_eq!(gate.active_types(true), &AdminType::ALL);
        assert_eq!(gate.active_types(false), &AdminType::PRIORITY);

        switch.set(false);
        assert_eq!(gate.active_types(false), &AdminType::ALL);
    }

    #[test]
    fn marker_file_is_read_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join(DEFAULT_EMERGENCY_MARKER);
        let gate = ModeGate::with_markers(&marker, None);

        assert!(!gate.is_emergency());
        std::fs::write(&marker, "202401011200").unwrap();
        assert!(gate.is_emergency());
        assert_eq!(gate.active_types(false).len(), 3);
        std::fs::remove_file(&marker).unwrap();
        assert!(!gate.is_emergency());
    }

    #[test]
    fn unreadable_marker_counts_as_absent() {
        // A path under a regular file cannot be stat'ed as a directory entry.
        let file = tempfile::NamedTempFile::new().unwrap();
        let gate = ModeGate::with_markers(file.path().join("run_emergency"), None);
        assert!(!gate.is_emergency());
        assert_eq!(gate.active_types(false), &AdminType::ALL);
    }

    #[test]
    fn failure_marker_is_independent_of_tier_set() {
        let gate = ModeGate::normal().with_failure_signal(Arc::new(Switch::new(true)));
        assert!(gate.emergency_failed());
        assert!(!gate.is_emergency());
        assert_eq!(gate.active_types(false), &AdminType::ALL);
    }
}
