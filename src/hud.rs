//! Score display and session status shown by the frontend.

use thousands::Separable;

use crate::events::SessionObserver;
use crate::systems::components::Difficulty;

/// What the frontend shows around the board.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Menu: choose a difficulty, then start.
    #[default]
    Menu,
    Playing,
    /// Caught; waiting for (or showing) the excuse.
    BudgetCut { excuse: Option<String> },
    Approved,
}

/// Collects session outcomes for display.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionHud {
    pub score: u32,
    pub high_score: u32,
    pub status: SessionStatus,
}

/// Formats a score as a dollar amount, e.g. `$12,300`.
pub fn format_money(amount: u32) -> String {
    format!("${}", amount.separate_with_commas())
}

impl SessionHud {
    pub fn session_started(&mut self) {
        self.score = 0;
        self.status = SessionStatus::Playing;
    }

    /// Shows the excuse once it has been looked up.
    pub fn set_excuse(&mut self, text: &str) {
        if let SessionStatus::BudgetCut { excuse } = &mut self.status {
            *excuse = Some(text.to_string());
        }
    }

    /// A one-line summary, used as the window title.
    pub fn title(&self, difficulty: Difficulty, multiplier: f32) -> String {
        let money = format_money(self.score);
        match &self.status {
            SessionStatus::Menu => format!("Budget Run | {difficulty} | 1-3: difficulty, Enter: start campaign"),
            SessionStatus::Playing if multiplier > 1.0 => format!(
                "Budget Run | {money} | High {} | {multiplier:.1}x SPEED",
                format_money(self.high_score)
            ),
            SessionStatus::Playing => format!("Budget Run | {money} | High {}", format_money(self.high_score)),
            SessionStatus::BudgetCut { excuse: None } => format!("BUDGET CUT | Total spend {money} | ..."),
            SessionStatus::BudgetCut { excuse: Some(excuse) } => {
                format!("BUDGET CUT | Total spend {money} | \"{excuse}\" | R: try again")
            }
            SessionStatus::Approved => format!("APPROVED! | You secured {money} for Q4 | R: next fiscal year"),
        }
    }
}

impl SessionObserver for SessionHud {
    fn on_score_update(&mut self, score: u32) {
        self.score = score;
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.score = final_score;
        self.high_score = self.high_score.max(final_score);
        self.status = SessionStatus::BudgetCut { excuse: None };
    }

    fn on_win(&mut self) {
        self.status = SessionStatus::Approved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(12_300), "$12,300");
        assert_eq!(format_money(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_speed_badge_only_when_faster() {
        let mut hud = SessionHud::default();
        hud.session_started();
        assert!(!hud.title(Difficulty::Normal, 1.0).contains("SPEED"));
        assert!(hud.title(Difficulty::Normal, 1.5).contains("1.5x SPEED"));
    }
}
