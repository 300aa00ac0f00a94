//! Capture index (CDX) page decoding and pagination.
//!
//! The index answers `output=json` queries in one of two shapes: a table whose
//! first row names the columns, or a list of objects. Both are normalized into
//! [`CaptureRecord`]s as soon as a page arrives.

use serde_json::{Map, Value};

use crate::config::CDX_FIELDS;
use crate::fetch::Body;

use super::types::CaptureRecord;

/// One decoded page of the capture index.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CdxPage {
    /// No data rows (missing body, `[]`, or a header without rows)
    Empty,
    /// Header row followed by positional rows
    Table {
        header: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// A list of keyed objects
    Objects(Vec<Map<String, Value>>),
    /// Anything that is not a JSON array
    Malformed,
}

impl CdxPage {
    /// Classifies a fetched body; `None` (the fetch gave up) is an empty page.
    pub(crate) fn from_body(body: Option<Body>) -> Self {
        match body {
            None => CdxPage::Empty,
            Some(Body::Text(_)) => CdxPage::Malformed,
            Some(Body::Json(Value::Array(items))) => Self::from_items(items),
            Some(Body::Json(_)) => CdxPage::Malformed,
        }
    }

    fn from_items(items: Vec<Value>) -> Self {
        let mut items = items.into_iter();
        let Some(first) = items.next() else {
            return CdxPage::Empty;
        };

        match first {
            Value::Array(columns) => {
                let header = columns.iter().map(cell_to_string).collect();
                let rows: Vec<Vec<Value>> = items
                    .filter_map(|item| match item {
                        Value::Array(row) => Some(row),
                        _ => None,
                    })
                    .collect();
                if rows.is_empty() {
                    CdxPage::Empty
                } else {
                    CdxPage::Table { header, rows }
                }
            }
            first => {
                let objects: Vec<Map<String, Value>> = std::iter::once(first)
                    .chain(items)
                    .filter_map(|item| match item {
                        Value::Object(object) => Some(object),
                        _ => None,
                    })
                    .collect();
                if objects.is_empty() {
                    CdxPage::Empty
                } else {
                    CdxPage::Objects(objects)
                }
            }
        }
    }

    /// Number of data rows on the page, header excluded.
    ///
    /// Rows later skipped for a column-count mismatch still count: page
    /// fullness is a property of what the index sent.
    pub(crate) fn row_count(&self) -> usize {
        match self {
            CdxPage::Empty | CdxPage::Malformed => 0,
            CdxPage::Table { rows, .. } => rows.len(),
            CdxPage::Objects(objects) => objects.len(),
        }
    }

    /// Normalizes the page into capture records.
    pub(crate) fn into_records(self) -> Vec<CaptureRecord> {
        match self {
            CdxPage::Empty | CdxPage::Malformed => Vec::new(),
            CdxPage::Table { header, rows } => {
                let column = |name: &str| header.iter().position(|h| h == name);
                let (ts, original, digest) =
                    (column("timestamp"), column("original"), column("digest"));
                rows.into_iter()
                    .filter(|row| row.len() == header.len())
                    .map(|row| {
                        let field = |index: Option<usize>| {
                            index.and_then(|i| row.get(i)).map(cell_to_string).unwrap_or_default()
                        };
                        CaptureRecord {
                            timestamp: field(ts),
                            original_url: field(original),
                            digest: field(digest),
                        }
                    })
                    .collect()
            }
            CdxPage::Objects(objects) => objects
                .iter()
                .map(|object| {
                    let field =
                        |key: &str| object.get(key).map(cell_to_string).unwrap_or_default();
                    CaptureRecord {
                        timestamp: field("timestamp"),
                        original_url: field("original"),
                        digest: field("digest"),
                    }
                })
                .collect(),
        }
    }
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// What to do after a page has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Request the next page at this offset
    Next(usize),
    /// The page was short; the index has no more rows
    Exhausted,
    /// The next offset would pass the ceiling
    CeilingReached,
}

/// Offset bookkeeping for one pagination run.
#[derive(Debug, Clone)]
pub(crate) struct PageCursor {
    offset: usize,
    page_size: usize,
    max_offset: usize,
}

impl PageCursor {
    pub(crate) fn new(page_size: usize, max_offset: usize) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            max_offset,
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn page_size(&self) -> usize {
        self.page_size
    }

    /// Advances past a page that carried `rows` data rows.
    pub(crate) fn advance(&mut self, rows: usize) -> Step {
        if rows < self.page_size {
            return Step::Exhausted;
        }
        self.offset += self.page_size;
        if self.offset > self.max_offset {
            Step::CeilingReached
        } else {
            Step::Next(self.offset)
        }
    }
}

/// Query parameters for one capture index page.
pub(crate) fn cdx_query(domain: &str, cursor: &PageCursor) -> Vec<(&'static str, String)> {
    vec![
        ("url", domain.to_string()),
        ("matchType", "exact".to_string()),
        ("output", "json".to_string()),
        ("fl", CDX_FIELDS.to_string()),
        ("limit", cursor.page_size().to_string()),
        ("offset", cursor.offset().to_string()),
    ]
}
