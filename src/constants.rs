//! Application constants for the contact store
//!
//! This module contains the file layout, validation rules, tuning defaults
//! and environment variable names used throughout the application.

// =============================================================================
// File Layout
// =============================================================================

/// Number of columns in the contact layout
pub const COLUMN_COUNT: usize = 4;

/// Header row written on every save
pub const HEADER: [&str; COLUMN_COUNT] = ["key", "name", "email", "phone"];

/// Field names, also used in row diagnostics
pub mod fields {
    pub const KEY: &str = "key";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";

    /// Pseudo-field used for rows with the wrong number of columns
    pub const STRUCTURE: &str = "structure";
}

/// Spreadsheet-style column letters for each field
pub mod columns {
    pub const KEY: &str = "A";
    pub const NAME: &str = "B";
    pub const EMAIL: &str = "C";
    pub const PHONE: &str = "D";

    /// Column reported for row-level (structural) errors
    pub const GENERAL: &str = "general";
}

/// Required phone length in digits
pub const PHONE_LENGTH: usize = 10;

// =============================================================================
// Request Validation
// =============================================================================

/// Email providers accepted on create/update requests
///
/// Load-time validation only checks for `@`; bulk imports are deliberately
/// more tolerant than direct API writes.
pub const ALLOWED_EMAIL_PROVIDERS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "icloud.com",
    "protonmail.com",
];

// =============================================================================
// Store Tuning
// =============================================================================

/// Record count above which the indexed read path is selected
pub const DEFAULT_INDEX_THRESHOLD: usize = 1000;

/// Maximum number of cached search results before the cache is flushed
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Default source file
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.csv";

// =============================================================================
// Service Defaults
// =============================================================================

/// Default page size for paginated listings
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a caller may request
pub const MAX_PAGE_SIZE: usize = 1000;

/// Number of email domains listed in contact statistics
pub const TOP_DOMAINS_LIMIT: usize = 5;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "contact-store";

// =============================================================================
// Server Defaults
// =============================================================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Frontend dev servers allowed by the default CORS policy
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:4173",
];

/// Interval for the memory telemetry task, 0 disables it
pub const DEFAULT_MEMORY_REPORT_SECS: u64 = 300;

/// Environment variable names read by [`crate::config::AppConfig::from_env`]
pub mod env {
    pub const PORT: &str = "PORT";
    pub const HOST: &str = "HOST";
    pub const CONTACTS_FILE: &str = "CONTACTS_FILE";
    pub const API_URL: &str = "API_URL";
    pub const INDEX_THRESHOLD: &str = "INDEX_THRESHOLD";
    pub const CACHE_CAPACITY: &str = "CACHE_CAPACITY";
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
    pub const MEMORY_REPORT_SECS: &str = "MEMORY_REPORT_SECS";
}
