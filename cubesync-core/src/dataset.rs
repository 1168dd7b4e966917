//! Dataset loader — parses the exported CSV into [`CaseRecord`]s.
//!
//! Expected header:
//!
//! ```text
//! name,algset,caseid,catalog,alg1,alg2,alg3,alg4,video,videoimg,color,orientation
//! ```
//!
//! Blank fields are kept as empty strings; [`CaseRecord::ranked_algs`]
//! filters them out downstream. A parse error is fatal — the caller must
//! not have issued any remote mutation yet.

use std::path::Path;

use crate::error::{csv_err, StoreError};
use crate::types::CaseRecord;

/// Load all case records from the dataset CSV at `path`, in file order.
pub fn load_cases(path: &Path) -> Result<Vec<CaseRecord>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_err(path, e))?;
    let mut cases = Vec::new();
    for row in reader.deserialize() {
        let case: CaseRecord = row.map_err(|e| csv_err(path, e))?;
        cases.push(case);
    }
    Ok(cases)
}
