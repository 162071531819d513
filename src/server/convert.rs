//! Wire types for the HTTP surface and conversions from native types.

use serde::{Deserialize, Serialize};

use crate::Resolution;

/// `POST /ask` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AskRequest {
    pub prompt: String,
}

/// `POST /ask` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub prompt: String,
    pub result: String,
    pub cached: bool,
}

impl From<Resolution> for AskResponse {
    fn from(r: Resolution) -> Self {
        AskResponse {
            prompt: r.prompt,
            result: r.answer,
            cached: r.served_from_cache,
        }
    }
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<String>,
}

impl ErrorEnvelope {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}
