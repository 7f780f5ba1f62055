// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains the shared outbound HTTP client builders

/// HTTP client configuration and helpers
pub mod http_client;
