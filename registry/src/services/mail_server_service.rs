//! Mail server business logic.
//!
//! Sits between the HTTP handlers and the database: validates request bodies,
//! generates server ids and timestamps, merges partial updates and maps
//! absence to `RegistryError::NotFound`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::{defaults, messages, server_id};
use crate::database::{
    Database, DeletedServerSummary, MailServerRecord, NewMailServer, ServerStatus,
};
use crate::errors::RegistryError;

/// A numeric field as clients send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumericInput {
    /// Coerces to an integer. Blank strings yield `None`; anything else that
    /// is not a whole number is a validation error naming `field`.
    pub fn to_i64(&self, field: &str) -> Result<Option<i64>, RegistryError> {
        let invalid = || RegistryError::validation(format!("{} must be an integer", field));
        match self {
            NumericInput::Int(v) => Ok(Some(*v)),
            NumericInput::Float(v) => whole_number(*v).map(Some).ok_or_else(invalid),
            NumericInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                if let Ok(v) = s.parse::<i64>() {
                    return Ok(Some(v));
                }
                match s.parse::<f64>() {
                    Ok(v) => whole_number(v).map(Some).ok_or_else(invalid),
                    Err(_) => Err(invalid()),
                }
            }
        }
    }
}

/// 2^63, the first float past `i64::MAX`.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Whole floats inside the `i64` range; anything else would truncate or
/// saturate on conversion.
fn whole_number(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v >= -I64_UPPER_BOUND && v < I64_UPPER_BOUND {
        Some(v as i64)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMailServerRequest {
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub daily_limit: Option<NumericInput>,
    pub monthly_limit: Option<NumericInput>,
    pub priority: Option<NumericInput>,
}

/// Partial update body. Unknown keys (`serverId`, counters, reset
/// timestamps) are dropped by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMailServerRequest {
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub daily_limit: Option<NumericInput>,
    pub monthly_limit: Option<NumericInput>,
    pub status: Option<String>,
    pub priority: Option<NumericInput>,
}

/// Validated partial update: `Some` overrides, `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MailServerPatch {
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub daily_limit: Option<i64>,
    pub monthly_limit: Option<i64>,
    pub status: Option<ServerStatus>,
    pub priority: Option<i64>,
}

impl TryFrom<UpdateMailServerRequest> for MailServerPatch {
    type Error = RegistryError;

    fn try_from(req: UpdateMailServerRequest) -> Result<Self, Self::Error> {
        let status = req
            .status
            .map(|s| s.parse::<ServerStatus>())
            .transpose()
            .map_err(|reason| RegistryError::Validation { reason })?;

        Ok(MailServerPatch {
            name: req.name,
            hostname: req.hostname,
            daily_limit: patch_number(req.daily_limit, "dailyLimit")?,
            monthly_limit: patch_number(req.monthly_limit, "monthlyLimit")?,
            status,
            priority: patch_number(req.priority, "priority")?,
        })
    }
}

/// A present patch number must coerce to a value; blank strings are rejected
/// rather than read as "keep".
fn patch_number(value: Option<NumericInput>, field: &str) -> Result<Option<i64>, RegistryError> {
    match value {
        Some(v) => v
            .to_i64(field)?
            .map(Some)
            .ok_or_else(|| RegistryError::validation(format!("{} must be an integer", field))),
        None => Ok(None),
    }
}

/// Merges `patch` over `existing` and stamps `updated_at`. Identity, counters
/// and reset timestamps always carry over.
pub fn apply_patch(
    existing: &MailServerRecord,
    patch: &MailServerPatch,
    now: DateTime<Utc>,
) -> MailServerRecord {
    MailServerRecord {
        name: patch.name.clone().unwrap_or_else(|| existing.name.clone()),
        hostname: patch
            .hostname
            .clone()
            .unwrap_or_else(|| existing.hostname.clone()),
        daily_limit: patch.daily_limit.unwrap_or(existing.daily_limit),
        monthly_limit: patch.monthly_limit.unwrap_or(existing.monthly_limit),
        status: patch.status.unwrap_or(existing.status),
        priority: patch.priority.unwrap_or(existing.priority),
        updated_at: now,
        ..existing.clone()
    }
}

/// `MAIL-` followed by eight random uppercase alphanumerics.
pub fn generate_server_id() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}",
        server_id::PREFIX,
        token[..server_id::TOKEN_LENGTH].to_ascii_uppercase()
    )
}

/// Trims a path id; blank ids are rejected before any store access.
pub fn normalize_server_id(raw: &str) -> Result<String, RegistryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::MissingId);
    }
    Ok(trimmed.to_string())
}

fn validate_create(
    req: CreateMailServerRequest,
    server_id: String,
    now: DateTime<Utc>,
) -> Result<NewMailServer, RegistryError> {
    let missing = || RegistryError::validation(messages::MISSING_REQUIRED_FIELDS);

    let name = req.name.filter(|s| !s.is_empty()).ok_or_else(missing)?;
    let hostname = req.hostname.filter(|s| !s.is_empty()).ok_or_else(missing)?;

    // A zero number or an empty string counts as missing. Any other string is
    // present and coerced, so "0" is stored as 0 and "  " as 0.
    let limit = |value: Option<NumericInput>, field: &str| -> Result<i64, RegistryError> {
        match value {
            Some(NumericInput::Text(s)) if s.is_empty() => Err(missing()),
            Some(v @ NumericInput::Text(_)) => Ok(v.to_i64(field)?.unwrap_or(0)),
            Some(v) => v.to_i64(field)?.filter(|n| *n != 0).ok_or_else(missing),
            None => Err(missing()),
        }
    };
    let daily_limit = limit(req.daily_limit, "dailyLimit")?;
    let monthly_limit = limit(req.monthly_limit, "monthlyLimit")?;

    let priority = match req.priority {
        Some(v) => v.to_i64("priority")?.unwrap_or(defaults::PRIORITY),
        None => defaults::PRIORITY,
    };

    Ok(NewMailServer {
        server_id,
        name,
        hostname,
        daily_limit,
        monthly_limit,
        priority,
        created_at: now,
    })
}

pub struct MailServerService {
    db: Arc<Database>,
}

impl MailServerService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        req: CreateMailServerRequest,
    ) -> Result<MailServerRecord, RegistryError> {
        let new_server = validate_create(req, generate_server_id(), Utc::now())?;
        let record = self.db.insert_mail_server(&new_server).await?;
        info!(
            "Created mail server: {} ({}, provider {})",
            record.server_id, record.name, record.hostname
        );
        Ok(record)
    }

    pub async fn list_all(&self) -> Result<Vec<MailServerRecord>, RegistryError> {
        Ok(self.db.get_all_mail_servers().await?)
    }

    pub async fn get_by_id(&self, server_id: &str) -> Result<MailServerRecord, RegistryError> {
        let server_id = normalize_server_id(server_id)?;
        let record = self.db.get_mail_server_by_server_id(&server_id).await?;
        record.ok_or(RegistryError::NotFound { server_id })
    }

    pub async fn update(
        &self,
        server_id: &str,
        req: UpdateMailServerRequest,
    ) -> Result<MailServerRecord, RegistryError> {
        let server_id = normalize_server_id(server_id)?;
        let patch = MailServerPatch::try_from(req)?;

        let existing = self.get_by_id(&server_id).await?;
        let merged = apply_patch(&existing, &patch, Utc::now());
        debug!("Applying patch to {}: {:?}", server_id, patch);

        match self.db.update_mail_server(&merged).await? {
            Some(updated) => {
                info!("Updated mail server: {} ({})", updated.server_id, updated.name);
                Ok(updated)
            }
            None => {
                warn!(
                    "Mail server {} disappeared between lookup and update",
                    server_id
                );
                Err(RegistryError::UpdateFailed { server_id })
            }
        }
    }

    pub async fn delete(&self, server_id: &str) -> Result<DeletedServerSummary, RegistryError> {
        let server_id = normalize_server_id(server_id)?;
        let existing = self.get_by_id(&server_id).await?;

        if !self.db.delete_mail_server(&server_id).await? {
            warn!(
                "Mail server {} disappeared between lookup and delete",
                server_id
            );
            return Err(RegistryError::DeleteFailed { server_id });
        }

        info!("Deleted mail server: {} ({})", existing.server_id, existing.name);
        Ok(DeletedServerSummary {
            server_id: existing.server_id,
            name: existing.name,
            hostname: existing.hostname,
            deleted_at: Utc::now(),
        })
    }
}
