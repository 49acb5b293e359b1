use crate::core::types::{Category, Phase};

/// Phase/category state machine. All four phases are reachable from any
/// other at any time; switching phases always clears the category selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelState {
    phase: Phase,
    active_category: Option<Category>,
}

impl Default for ModelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Definition,
            active_category: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_category(&self) -> Option<Category> {
        self.active_category
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.active_category = None;
    }

    /// Valid in any phase; only the analysis screen displays the selection.
    pub fn set_active_category(&mut self, category: Option<Category>) {
        self.active_category = category;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_definition_with_no_category() {
        let state = ModelState::new();
        assert_eq!(state.phase(), Phase::Definition);
        assert_eq!(state.active_category(), None);
    }

    #[test]
    fn set_phase_always_clears_category() {
        let mut state = ModelState::new();
        state.set_active_category(Some(Category::S));
        state.set_phase(Phase::Reporting);
        assert_eq!(state.phase(), Phase::Reporting);
        assert_eq!(state.active_category(), None);

        // Holds even when "switching" to the current phase.
        state.set_active_category(Some(Category::D));
        state.set_phase(Phase::Reporting);
        assert_eq!(state.active_category(), None);
    }

    #[test]
    fn every_phase_reachable_from_every_other() {
        for from in Phase::ALL {
            for to in Phase::ALL {
                let mut state = ModelState::new();
                state.set_phase(from);
                state.set_phase(to);
                assert_eq!(state.phase(), to);
            }
        }
    }

    #[test]
    fn category_selection_leaves_phase_alone() {
        let mut state = ModelState::new();
        state.set_phase(Phase::Analysis);
        state.set_active_category(Some(Category::I));
        assert_eq!(state.phase(), Phase::Analysis);
        assert_eq!(state.active_category(), Some(Category::I));
    }
}
