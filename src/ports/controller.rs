//! Controller port: the pairwise spacing matrix the learner tunes.

/// Square matrix of desired inter-agent distances owned by the controller.
///
/// Row `i`, column `j` holds the spacing agent `i` tries to keep from agent
/// `j`. The learner writes off-diagonal cells only.
pub trait SpacingMatrix {
    /// Number of agents the matrix covers (rows == columns).
    fn dimension(&self) -> usize;

    /// Current spacing from `source` to `neighbour`.
    fn spacing(&self, source: usize, neighbour: usize) -> f64;

    /// Overwrite the spacing from `source` to `neighbour`.
    fn set_spacing(&mut self, source: usize, neighbour: usize, value: f64);
}
