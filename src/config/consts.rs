/// Default quiet period before a coalesced edit is pushed (milliseconds)
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 500;
/// Shortest allowed quiet period; zero pushes on the next scheduler tick
pub const MIN_DEBOUNCE_DELAY_MS: u64 = 0;
/// Longest allowed quiet period (milliseconds)
pub const MAX_DEBOUNCE_DELAY_MS: u64 = 10_000;
