//! Built-in question set used when no bank file is configured.

use quiz_core::model::Difficulty;

use crate::repository::QuestionRecord;

fn record(
    id: u64,
    text: &str,
    options: [&str; 4],
    correct_option: usize,
    difficulty: Difficulty,
    explanation: &str,
) -> QuestionRecord {
    QuestionRecord {
        id,
        text: text.to_owned(),
        options: options.iter().map(|o| (*o).to_owned()).collect(),
        correct_option,
        difficulty,
        explanation: explanation.to_owned(),
    }
}

#[must_use]
pub fn default_records() -> Vec<QuestionRecord> {
    vec![
        record(
            1,
            "What does HTML stand for?",
            [
                "Hyper Text Markup Language",
                "High Tech Modern Language",
                "Home Tool Markup Language",
                "Hyperlinks and Text Markup Language",
            ],
            0,
            Difficulty::Easy,
            "HTML (Hyper Text Markup Language) is the standard markup language for web pages.",
        ),
        record(
            2,
            "Which CSS property changes the text color of an element?",
            ["font-color", "text-color", "color", "foreground"],
            2,
            Difficulty::Easy,
            "The `color` property sets the foreground color of an element's text.",
        ),
        record(
            3,
            "Which HTTP status code means the requested resource was not found?",
            ["200", "301", "404", "500"],
            2,
            Difficulty::Easy,
            "404 Not Found: the server cannot find the requested resource.",
        ),
        record(
            4,
            "What is the time complexity of binary search on a sorted array?",
            ["O(n)", "O(log n)", "O(n log n)", "O(1)"],
            1,
            Difficulty::Medium,
            "Each comparison halves the remaining range, so the search takes logarithmic time.",
        ),
        record(
            5,
            "Which data structure follows the First-In-First-Out principle?",
            ["Stack", "Queue", "Binary tree", "Hash map"],
            1,
            Difficulty::Medium,
            "A queue removes elements in the same order they were added.",
        ),
        record(
            6,
            "Which SQL clause filters rows after aggregation?",
            ["WHERE", "ORDER BY", "HAVING", "GROUP BY"],
            2,
            Difficulty::Medium,
            "HAVING applies conditions to grouped rows; WHERE filters before grouping.",
        ),
        record(
            7,
            "In a min-heap with n elements, what is the cost of removing the minimum?",
            ["O(1)", "O(log n)", "O(n)", "O(n log n)"],
            1,
            Difficulty::Hard,
            "The root is swapped with the last leaf and sifted down along one root-to-leaf path.",
        ),
        record(
            8,
            "Which consistency guarantee does the CAP theorem trade against availability during a partition?",
            [
                "Durability",
                "Linearizable consistency",
                "Isolation",
                "Eventual delivery",
            ],
            1,
            Difficulty::Hard,
            "Under a network partition a system must choose between linearizable consistency and availability.",
        ),
    ]
}
