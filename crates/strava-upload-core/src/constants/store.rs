// ABOUTME: Credential store constants for key layout and Redis connection defaults
// ABOUTME: Shared by the Redis and in-memory backends

/// Key prefix for credential records
pub const CREDENTIAL_KEY_PREFIX: &str = "easy_strava:credentials:";

/// Redis connection timeout in seconds
pub const REDIS_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Redis response timeout in seconds
pub const REDIS_RESPONSE_TIMEOUT_SECS: u64 = 3;

/// Attempts made to establish the first Redis connection before giving up
pub const REDIS_INITIAL_CONNECTION_RETRIES: u32 = 3;

/// Delay before the first Redis reconnection attempt, doubled on each failure
pub const REDIS_INITIAL_RETRY_DELAY_MS: u64 = 500;

/// Upper bound on the Redis reconnection delay
pub const REDIS_MAX_RETRY_DELAY_MS: u64 = 5_000;

/// Reconnection attempts made by the connection manager after a drop
pub const REDIS_RECONNECTION_RETRIES: usize = 6;

/// Exponential backoff base used by the connection manager
pub const REDIS_RETRY_EXPONENT_BASE: u64 = 2;
