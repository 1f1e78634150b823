/// Aggregated view of how far through the bank a session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
