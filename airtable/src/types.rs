use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of an Airtable table.
///
/// Field contents are opaque to this crate; whatever the upstream returns
/// under `fields` is carried through untouched.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(rename = "createdTime")]
    pub created_time: String,
}

/// A single page of a list-records response.
#[derive(Debug, Deserialize)]
pub struct RecordPage {
    pub records: Vec<Record>,
}
