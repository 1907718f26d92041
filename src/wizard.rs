//! The step-by-step form controller.
//!
//! Five sequential editing steps, each mutating a disjoint slice of the
//! record through whole-record replacement. The wizard owns a step cursor,
//! a progress figure for the UI, and the export in-flight guard that keeps
//! a second export from starting while one is running.

/// The wizard's editing steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Identity, contact details, photo, profile text
    PersonalInfo,
    /// Education entries
    Formations,
    /// Work experience entries
    Experiences,
    /// Skills, languages, certifications, interests, references
    SkillsExtras,
    /// Review and export
    Final,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Step; 5] = [
        Step::PersonalInfo,
        Step::Formations,
        Step::Experiences,
        Step::SkillsExtras,
        Step::Final,
    ];

    /// Step heading shown in the wizard header.
    pub fn title(&self) -> &'static str {
        match self {
            Step::PersonalInfo => "Informations personnelles",
            Step::Formations => "Formations",
            Step::Experiences => "Expériences",
            Step::SkillsExtras => "Compétences & Plus",
            Step::Final => "Finalisation",
        }
    }

    /// One-based position, for "Étape N sur 5" display.
    pub fn number(&self) -> usize {
        Step::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }
}

/// Wizard state: cursor plus the export guard.
#[derive(Debug, Clone)]
pub struct Wizard {
    cursor: usize,
    export_in_flight: bool,
}

impl Wizard {
    /// Start at the first step.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            export_in_flight: false,
        }
    }

    /// The current step.
    pub fn current(&self) -> Step {
        Step::ALL[self.cursor]
    }

    /// Completion fraction for the progress bar, 0.0..=1.0.
    pub fn progress(&self) -> f32 {
        (self.cursor + 1) as f32 / Step::ALL.len() as f32
    }

    /// Whether a later step exists.
    pub fn can_advance(&self) -> bool {
        self.cursor + 1 < Step::ALL.len()
    }

    /// Whether an earlier step exists.
    pub fn can_retreat(&self) -> bool {
        self.cursor > 0
    }

    /// Move to the next step. Saturates at the final step.
    pub fn advance(&mut self) -> Step {
        if self.can_advance() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Move to the previous step. Saturates at the first step.
    pub fn retreat(&mut self) -> Step {
        if self.can_retreat() {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Jump back to the first step (after returning to the gallery).
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Whether an export is currently running. The UI disables the export
    /// trigger while this holds, which is what keeps the non-reentrant
    /// pipeline safe.
    pub fn export_in_flight(&self) -> bool {
        self.export_in_flight
    }

    /// Claim the export guard. Returns false when a run is already in
    /// flight, in which case the caller must not start another.
    pub fn begin_export(&mut self) -> bool {
        if self.export_in_flight {
            return false;
        }
        self.export_in_flight = true;
        true
    }

    /// Release the export guard. Must be called on success and failure
    /// alike so the UI never shows a stuck "exporting" state.
    pub fn finish_export(&mut self) {
        self.export_in_flight = false;
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_personal_info() {
        let wizard = Wizard::new();
        assert_eq!(wizard.current(), Step::PersonalInfo);
        assert!(!wizard.can_retreat());
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_walks_all_steps_in_order() {
        let mut wizard = Wizard::new();
        let mut visited = vec![wizard.current()];
        while wizard.can_advance() {
            visited.push(wizard.advance());
        }
        assert_eq!(visited, Step::ALL);
    }

    #[test]
    fn test_advance_saturates_at_final() {
        let mut wizard = Wizard::new();
        for _ in 0..10 {
            wizard.advance();
        }
        assert_eq!(wizard.current(), Step::Final);
        assert!(!wizard.can_advance());
    }

    #[test]
    fn test_retreat_saturates_at_first() {
        let mut wizard = Wizard::new();
        wizard.retreat();
        assert_eq!(wizard.current(), Step::PersonalInfo);
    }

    #[test]
    fn test_progress_spans_fifths() {
        let mut wizard = Wizard::new();
        assert!((wizard.progress() - 0.2).abs() < 0.001);
        while wizard.can_advance() {
            wizard.advance();
        }
        assert!((wizard.progress() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_step_numbers_and_titles() {
        assert_eq!(Step::PersonalInfo.number(), 1);
        assert_eq!(Step::Final.number(), 5);
        assert_eq!(Step::SkillsExtras.title(), "Compétences & Plus");
    }

    #[test]
    fn test_export_guard_rejects_reentry() {
        let mut wizard = Wizard::new();
        assert!(wizard.begin_export());
        assert!(wizard.export_in_flight());
        assert!(!wizard.begin_export());
        wizard.finish_export();
        assert!(wizard.begin_export());
    }

    #[test]
    fn test_reset_returns_to_first_step() {
        let mut wizard = Wizard::new();
        wizard.advance();
        wizard.advance();
        wizard.reset();
        assert_eq!(wizard.current(), Step::PersonalInfo);
    }
}
