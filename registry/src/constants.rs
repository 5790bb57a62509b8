//! Central repository for identifiers, defaults and envelope messages
//!
//! Constants are grouped by concern so handlers and the store agree on a
//! single spelling of every id prefix, default and user-facing message.

/// Mail server identifier format
pub mod server_id {
    /// Prefix of every generated server id
    pub const PREFIX: &str = "MAIL-";

    /// Number of random characters following the prefix
    pub const TOKEN_LENGTH: usize = 8;
}

/// Default configuration values
pub mod defaults {
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";

    /// Default HTTP port
    pub const PORT: u16 = 8095;

    /// Default SQLite file
    pub const DATABASE_PATH: &str = "data/mail_servers.db";

    /// Default configuration directory when `CONFIG_DIR` is unset
    pub const CONFIG_DIR: &str = "config";

    /// Priority assigned when a create request omits it
    pub const PRIORITY: i64 = 0;
}

/// Envelope messages returned by the mail server endpoints
pub mod messages {
    pub const SERVER_ADDED: &str = "Mail server added successfully";
    pub const SERVER_UPDATED: &str = "Mail server updated successfully";
    pub const SERVER_DELETED: &str = "Mail server deleted successfully";
    pub const MISSING_REQUIRED_FIELDS: &str =
        "Missing required fields: name, hostname, dailyLimit, monthlyLimit";
    pub const INVALID_JSON_BODY: &str = "Request body must be a valid JSON object";
    pub const INVALID_BODY_FIELDS: &str = "Request body has a field of the wrong type";

    pub const ADD_FAILED: &str = "Failed to add mail server";
    pub const LIST_FAILED: &str = "Failed to fetch mail servers";
    pub const FETCH_FAILED: &str = "Failed to fetch mail server";
    pub const UPDATE_FAILED: &str = "Failed to update mail server";
    pub const DELETE_FAILED: &str = "Failed to delete mail server";
}
