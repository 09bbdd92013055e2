//! Multipart message reassembly.
//!
//! Large messages arrive as ordered fragments sharing a `MessageId`. Parts may
//! arrive in any order; a message completes when every declared part has been
//! seen, at which point the fragments are concatenated by part number and
//! parsed as JSON. Ids are one-shot: a completed or evicted id forgets all
//! state, so a later fragment with the same id starts a new message.
//!
//! Partial messages that never complete are dropped by [`Reassembler::evict_expired`].

#[cfg(test)]
#[path = "multipart_test.rs"]
mod multipart_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::WireError;

/// One fragment of a larger message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipartPart {
    pub message_id: String,
    /// 1-based position of this fragment.
    pub part_number: u32,
    pub total_parts: u32,
    pub payload: String,
}

struct Pending {
    total_parts: u32,
    first_seen_ms: u64,
    parts: HashMap<u32, String>,
}

/// Buffers fragments per message id until each message is whole.
pub struct Reassembler {
    pending: HashMap<String, Pending>,
    ttl_ms: u64,
}

impl Reassembler {
    /// Create a reassembler that evicts partial messages older than `ttl_ms`.
    #[must_use]
    pub fn new(ttl_ms: u64) -> Self {
        Self { pending: HashMap::new(), ttl_ms }
    }

    /// Buffer a fragment; returns the decoded message once it is complete.
    ///
    /// # Errors
    ///
    /// [`WireError::InvalidPart`] when the fragment's numbering is out of
    /// range or its total disagrees with earlier fragments (buffered parts are
    /// kept). [`WireError::Reassembly`] when the complete payload is not JSON
    /// (the message is discarded).
    pub fn add_part(&mut self, part: MultipartPart, now_ms: u64) -> Result<Option<Value>, WireError> {
        let invalid = || WireError::InvalidPart {
            message_id: part.message_id.clone(),
            part_number: part.part_number,
            total_parts: part.total_parts,
        };
        if part.total_parts == 0 || part.part_number == 0 || part.part_number > part.total_parts {
            return Err(invalid());
        }
        if let Some(existing) = self.pending.get(&part.message_id) {
            if existing.total_parts != part.total_parts {
                return Err(invalid());
            }
        }

        let entry = self
            .pending
            .entry(part.message_id.clone())
            .or_insert_with(|| Pending { total_parts: part.total_parts, first_seen_ms: now_ms, parts: HashMap::new() });
        entry.parts.insert(part.part_number, part.payload);

        if entry.parts.len() < entry.total_parts as usize {
            return Ok(None);
        }

        let Some(done) = self.pending.remove(&part.message_id) else {
            return Ok(None);
        };
        let mut ordered: Vec<(u32, String)> = done.parts.into_iter().collect();
        ordered.sort_by_key(|(number, _)| *number);
        let text: String = ordered.into_iter().map(|(_, payload)| payload).collect();

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| WireError::Reassembly { message_id: part.message_id, source })
    }

    /// Drop partial messages first seen more than the TTL before `now_ms`.
    ///
    /// Returns the evicted message ids, sorted.
    pub fn evict_expired(&mut self, now_ms: u64) -> Vec<String> {
        let ttl_ms = self.ttl_ms;
        let mut evicted: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, p)| now_ms.saturating_sub(p.first_seen_ms) > ttl_ms)
            .map(|(id, _)| id.clone())
            .collect();
        evicted.sort();
        for id in &evicted {
            if let Some(p) = self.pending.remove(id) {
                tracing::warn!(message_id = %id, received = p.parts.len(), total = p.total_parts, "evicting incomplete multipart message");
            }
        }
        evicted
    }

    /// Number of message ids with buffered fragments.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
