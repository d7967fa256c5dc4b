/// Application name
pub const APP_NAME: &str = "Critiq";

/// Fixed delay applied to the simulated login / register calls, in
/// milliseconds.
pub const AUTH_LATENCY_MS: u64 = 1000;

/// Snapshot key for the current-session user record
pub const USER_KEY: &str = "critiq_user";

/// Snapshot key for the review collection
pub const REVIEWS_KEY: &str = "critiq_reviews";

/// Snapshot key for the comment collection
pub const COMMENTS_KEY: &str = "critiq_comments";

/// Base URL of the initials-avatar service
pub const AVATAR_SERVICE: &str = "https://api.dicebear.com/7.x/initials/svg?seed=";

/// Default number of entries returned by the top-rated / most-liked /
/// recent chart queries
pub const DEFAULT_CHART_LIMIT: usize = 5;
