use crate::model::{Difficulty, DifficultyTally, QuestionBank};

/// Correct answers for a single tier against the bank's question count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPerformance {
    pub tier: Difficulty,
    pub correct: u32,
    pub total: u32,
}

impl TierPerformance {
    /// `correct / total * 100`, or `None` when the bank has no questions of
    /// this tier.
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        percent(self.correct, self.total)
    }
}

/// Per-tier breakdown derived from a tally and the bank it was earned on.
///
/// Not stored anywhere; compute it again whenever the tally changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    tiers: [TierPerformance; 3],
}

impl PerformanceReport {
    #[must_use]
    pub fn compute(bank: &QuestionBank, tally: &DifficultyTally) -> Self {
        let tiers = Difficulty::ALL.map(|tier| TierPerformance {
            tier,
            correct: tally.get(tier),
            total: bank.count_by_difficulty(tier),
        });
        Self { tiers }
    }

    #[must_use]
    pub fn tiers(&self) -> &[TierPerformance] {
        &self.tiers
    }

    #[must_use]
    pub fn tier(&self, tier: Difficulty) -> TierPerformance {
        self.tiers
            .iter()
            .copied()
            .find(|t| t.tier == tier)
            .unwrap_or(TierPerformance {
                tier,
                correct: 0,
                total: 0,
            })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.tiers.iter().map(|t| t.correct).sum()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.tiers.iter().map(|t| t.total).sum()
    }

    #[must_use]
    pub fn overall_percent(&self) -> Option<f64> {
        percent(self.correct(), self.total())
    }
}

fn percent(correct: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(f64::from(correct) / f64::from(total) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionDraft, QuestionId};

    fn question(id: u64, difficulty: Difficulty) -> Question {
        QuestionDraft {
            text: format!("Q{id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: 0,
            difficulty,
            explanation: String::new(),
        }
        .validate(QuestionId::new(id))
        .unwrap()
    }

    #[test]
    fn computes_percent_per_tier() {
        let bank = QuestionBank::new(vec![
            question(1, Difficulty::Easy),
            question(2, Difficulty::Easy),
            question(3, Difficulty::Medium),
            question(4, Difficulty::Easy),
            question(5, Difficulty::Medium),
        ])
        .unwrap();
        let mut tally = DifficultyTally::new();
        tally.increment(Difficulty::Easy);
        tally.increment(Difficulty::Medium);
        tally.increment(Difficulty::Medium);

        let report = PerformanceReport::compute(&bank, &tally);

        let easy = report.tier(Difficulty::Easy);
        assert_eq!((easy.correct, easy.total), (1, 3));
        assert!((easy.percent().unwrap() - 33.333).abs() < 0.01);
        assert_eq!(report.tier(Difficulty::Medium).percent(), Some(100.0));
        assert_eq!(report.correct(), 3);
        assert_eq!(report.total(), 5);
        assert_eq!(report.overall_percent(), Some(60.0));
    }

    #[test]
    fn tier_without_questions_has_no_percent() {
        let bank = QuestionBank::new(vec![question(1, Difficulty::Easy)]).unwrap();
        let report = PerformanceReport::compute(&bank, &DifficultyTally::new());

        assert_eq!(report.tier(Difficulty::Hard).percent(), None);
        assert_eq!(report.tier(Difficulty::Easy).percent(), Some(0.0));
        assert_eq!(report.tiers().len(), 3);
    }
}
