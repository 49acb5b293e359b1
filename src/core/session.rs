use crate::core::kv::SnapshotStore;
use crate::core::state::ModelState;
use crate::core::store::ThreatStore;
use crate::core::types::{Category, Phase, Threat};
use crate::core::view::{self, ViewModel};

/// One workbook session: the snapshot store, the threat list and the
/// phase/category state, behind a single context object. No ambient
/// globals; construct once and pass by reference.
pub struct Session {
    kv: Box<dyn SnapshotStore>,
    threats: Vec<Threat>,
    state: ModelState,
    revision: u64,
}

impl Session {
    pub fn new(kv: Box<dyn SnapshotStore>) -> Self {
        let threats = ThreatStore::load(kv.as_ref());
        Self {
            kv,
            threats,
            state: ModelState::new(),
            revision: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn active_category(&self) -> Option<Category> {
        self.state.active_category()
    }

    pub fn threats(&self) -> &[Threat] {
        &self.threats
    }

    /// Monotonic change counter; the presenter redraws when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn view_model(&self) -> ViewModel {
        view::build(&self.threats, &self.state)
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.state.set_phase(phase);
        self.revision += 1;
    }

    pub fn set_active_category(&mut self, category: Option<Category>) {
        self.state.set_active_category(category);
        self.revision += 1;
    }

    /// Flip one threat's mitigation flag and persist the full list.
    /// Returns whether anything actually changed; an unknown id leaves the
    /// session untouched.
    pub fn toggle_mitigation(&mut self, id: &str) -> bool {
        let next = ThreatStore::toggle_mitigation(&self.threats, id);
        if next == self.threats {
            tracing::debug!(id, "toggle matched no threat");
            return false;
        }
        self.threats = next;
        ThreatStore::save(self.kv.as_mut(), &self.threats);
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kv::MemorySnapshots;

    fn fresh() -> Session {
        Session::new(Box::new(MemorySnapshots::new()))
    }

    #[test]
    fn toggle_known_id_bumps_revision() {
        let mut session = fresh();
        let before = session.revision();
        assert!(session.toggle_mitigation("S-1"));
        assert!(session.revision() > before);
    }

    #[test]
    fn toggle_unknown_id_leaves_revision() {
        let mut session = fresh();
        let before = session.revision();
        assert!(!session.toggle_mitigation("nope"));
        assert_eq!(session.revision(), before);
    }

    #[test]
    fn save_failure_keeps_in_memory_state() {
        let mut kv = MemorySnapshots::new();
        kv.reject_writes = true;
        let mut session = Session::new(Box::new(kv));
        assert!(session.toggle_mitigation("S-1"));
        assert!(session
            .threats()
            .iter()
            .find(|t| t.id == "S-1")
            .unwrap()
            .mitigated);
    }
}
