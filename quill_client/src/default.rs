//! Optional process-wide default client.
//!
//! Callers that want a convenient default session can use [`init`] and
//! [`active_client`] instead of constructing a [`QuillClient`] explicitly.
//! Nothing below the facade depends on this holder.

use std::sync::{Arc, Mutex, OnceLock};

use crate::{client::QuillClient, config::QuillConfig, error::Result};

fn holder() -> &'static Mutex<Option<Arc<QuillClient>>> {
    static ACTIVE: OnceLock<Mutex<Option<Arc<QuillClient>>>> = OnceLock::new();
    ACTIVE.get_or_init(|| Mutex::new(None))
}

/// Replace the process-wide default client.
pub fn init(config: QuillConfig) -> Result<Arc<QuillClient>> {
    let client = Arc::new(QuillClient::new(config)?);

    let mut guard = holder().lock().expect("client holder poisoned");
    *guard = Some(client.clone());

    Ok(client)
}

/// The process-wide default client.
///
/// Created from the environment on first use and reused afterwards.
pub fn active_client() -> Result<Arc<QuillClient>> {
    let mut guard = holder().lock().expect("client holder poisoned");

    if let Some(client) = guard.as_ref() {
        return Ok(client.clone());
    }

    let client = Arc::new(QuillClient::new(QuillConfig::from_env())?);
    *guard = Some(client.clone());

    Ok(client)
}
