use chrono::Local;

use crate::core::session::Session;
use crate::core::types::{Category, Phase};

/// Presenter-side state: the session plus a list cursor and a short
/// status log. All domain mutations go through the session.
pub struct App {
    pub session: Session,
    pub cursor: usize,
    pub logs: Vec<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cursor: 0,
            logs: vec![
                "[SYSTEM] STRIDE-WORKBENCH v1.0 BOOT".to_string(),
                "[SYSTEM] THREAT CATALOG LOADED".to_string(),
                "[SYSTEM] 1-4 PHASE | ARROWS+ENTER SELECT | Q QUIT".to_string(),
            ],
        }
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        self.logs
            .push(format!("[{}] {}", Local::now().format("%H:%M:%S"), msg.into()));
        if self.logs.len() > 10 {
            self.logs.remove(0);
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.session.set_phase(phase);
        self.cursor = 0;
        self.log(format!("Phase: {}", phase.label()));
    }

    pub fn next_phase(&mut self) {
        let current = self.session.phase();
        let idx = Phase::ALL.iter().position(|p| *p == current).unwrap_or(0);
        self.set_phase(Phase::ALL[(idx + 1) % Phase::ALL.len()]);
    }

    /// Length of the list the cursor moves over in the current phase.
    fn cursor_len(&self) -> usize {
        match self.session.phase() {
            Phase::Analysis => Category::ALL.len(),
            Phase::Mitigation => self.session.threats().len(),
            _ => 0,
        }
    }

    pub fn cursor_down(&mut self) {
        let len = self.cursor_len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn cursor_up(&mut self) {
        let len = self.cursor_len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    /// Enter on the current list row: pick a category in analysis, flip a
    /// mitigation in the checklist.
    pub fn activate_cursor(&mut self) {
        match self.session.phase() {
            Phase::Analysis => {
                let category = Category::ALL[self.cursor.min(Category::ALL.len() - 1)];
                self.select_category(category);
            }
            Phase::Mitigation => self.toggle_at_cursor(),
            _ => {}
        }
    }

    pub fn select_category(&mut self, category: Category) {
        self.session.set_active_category(Some(category));
        self.log(format!("Analyzing {} ({})", category, category.name()));
    }

    pub fn toggle_at_cursor(&mut self) {
        let Some(threat) = self.session.threats().get(self.cursor) else {
            return;
        };
        let id = threat.id.clone();
        let title = threat.title.clone();
        if self.session.toggle_mitigation(&id) {
            let applied = self
                .session
                .threats()
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.mitigated)
                .unwrap_or(false);
            if applied {
                self.log(format!("✅ Applied fix: {id} - {title}"));
            } else {
                self.log(format!("↩ Reopened: {id} - {title}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kv::MemorySnapshots;

    fn fresh() -> App {
        App::new(Session::new(Box::new(MemorySnapshots::new())))
    }

    #[test]
    fn cursor_wraps_over_checklist() {
        let mut app = fresh();
        app.set_phase(Phase::Mitigation);
        let len = app.session.threats().len();
        for _ in 0..len {
            app.cursor_down();
        }
        assert_eq!(app.cursor, 0);
        app.cursor_up();
        assert_eq!(app.cursor, len - 1);
    }

    #[test]
    fn enter_in_analysis_selects_category() {
        let mut app = fresh();
        app.set_phase(Phase::Analysis);
        app.cursor_down();
        app.activate_cursor();
        assert_eq!(app.session.active_category(), Some(Category::T));
    }

    #[test]
    fn enter_in_mitigation_toggles_threat() {
        let mut app = fresh();
        app.set_phase(Phase::Mitigation);
        app.activate_cursor();
        assert!(app.session.threats()[0].mitigated);
    }
}
