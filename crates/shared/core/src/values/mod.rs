/// A single fluency response, e.g. `"snake"`
pub type Item = String;

/// Category label from a norms table, e.g. `"Farm"`
pub type Category = String;

/// Pairwise similarity value
/// Position 0 of a similarity series is a placeholder (no predecessor)
pub type Similarity = f64;

/// Cumulative response time of one item, in seconds
pub type ReactionTime = f64;
