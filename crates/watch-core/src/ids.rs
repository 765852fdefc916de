//! Short entity-id generation

use uuid::Uuid;

/// Generate an 8-character hex id fragment.
///
/// Entity ids are built as `<kind>-<fragment>`, e.g. `report-3f0a91bc`.
/// Eight hex chars are plenty for a process-lifetime in-memory table.
pub fn short_id() -> String {
    let full = Uuid::new_v4().simple().to_string();
    full[..8].to_string()
}
