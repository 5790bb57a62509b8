// File: registry/src/services/mod.rs

pub mod mail_server_service;

pub use mail_server_service::{
    apply_patch, generate_server_id, normalize_server_id, CreateMailServerRequest,
    MailServerPatch, MailServerService, NumericInput, UpdateMailServerRequest,
};
