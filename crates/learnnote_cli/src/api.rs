//! Request handlers over the entry service.
//!
//! # Responsibility
//! - Decode one JSON request per line and dispatch it to `EntryService`.
//! - Encode results as `{ "status": <code>, "body": <json> }` envelopes.
//!
//! # Invariants
//! - Handlers never panic; every input line yields exactly one response.
//! - All service access goes through one mutex.
//! - Status codes: 200 ok, 201 created, 400 malformed request, 404 missing
//!   entry, 422 invalid fields, 500 encoding failure.

use learnnote_core::{
    CatalogConfig, EntryDraft, EntryId, EntryService, InMemoryEntryStore, ServiceError,
};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_INTERNAL: u16 = 500;

/// One decoded request line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Health,
    List {
        #[serde(default)]
        tag: Option<String>,
    },
    Search {
        #[serde(default)]
        keyword: Option<String>,
        #[serde(default)]
        tag: Option<String>,
    },
    Create {
        entry: EntryDraft,
    },
    Get {
        id: EntryId,
    },
    Delete {
        id: EntryId,
    },
    Replace {
        id: EntryId,
        entry: EntryDraft,
    },
    Tags,
}

/// Response envelope written back per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    fn encode<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(err) => Self::error(STATUS_INTERNAL, format!("response encoding failed: {err}")),
        }
    }

    fn error(status: u16, detail: impl Into<String>) -> Self {
        let detail: String = detail.into();
        Self {
            status,
            body: json!({ "detail": detail }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Catalog owning one in-memory service for the process lifetime.
pub struct CatalogApi {
    service: Mutex<EntryService<InMemoryEntryStore>>,
}

impl CatalogApi {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            service: Mutex::new(EntryService::new(InMemoryEntryStore::new(config))),
        }
    }

    /// Handles one raw input line as read from the wire.
    ///
    /// Bytes that are not UTF-8 get a 400 response, like any other malformed
    /// request. Blank lines produce no response.
    pub fn handle_bytes(&self, raw: &[u8]) -> Option<Response> {
        match std::str::from_utf8(raw) {
            Ok(line) => self.handle_line(line),
            Err(err) => {
                warn!("event=request_decode module=api status=error reason=invalid_utf8");
                Some(Response::error(
                    STATUS_BAD_REQUEST,
                    format!("malformed request: {err}"),
                ))
            }
        }
    }

    /// Handles one input line. Blank lines produce no response.
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        match serde_json::from_str::<Request>(trimmed) {
            Ok(request) => Some(self.handle(request)),
            Err(err) => {
                warn!("event=request_decode module=api status=error");
                Some(Response::error(
                    STATUS_BAD_REQUEST,
                    format!("malformed request: {err}"),
                ))
            }
        }
    }

    /// Dispatches one decoded request.
    pub fn handle(&self, request: Request) -> Response {
        let mut service = self.lock();
        match request {
            Request::Health => Response::encode(STATUS_OK, &json!({ "status": "ok" })),
            Request::List { tag } => {
                Response::encode(STATUS_OK, &service.list_entries(tag.as_deref()))
            }
            Request::Search { keyword, tag } => {
                Response::encode(STATUS_OK, &service.search_entries(keyword, tag))
            }
            Request::Create { entry } => respond(STATUS_CREATED, service.create_entry(entry)),
            Request::Get { id } => respond(STATUS_OK, service.get_entry(id)),
            Request::Delete { id } => respond(STATUS_OK, service.delete_entry(id)),
            Request::Replace { id, entry } => {
                respond(STATUS_OK, service.replace_entry(id, entry))
            }
            Request::Tags => Response::encode(STATUS_OK, &service.tag_counts()),
        }
    }

    // Every service call completes or leaves the store untouched, so a
    // poisoned guard still holds consistent state.
    fn lock(&self) -> MutexGuard<'_, EntryService<InMemoryEntryStore>> {
        self.service.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CatalogApi {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

fn respond<T: Serialize>(status: u16, result: Result<T, ServiceError>) -> Response {
    match result {
        Ok(value) => Response::encode(status, &value),
        Err(err @ ServiceError::NotFound(_)) => Response::error(STATUS_NOT_FOUND, err.to_string()),
        Err(err @ ServiceError::InvalidInput(_)) => {
            Response::error(STATUS_UNPROCESSABLE, err.to_string())
        }
    }
}
