//! Batched apply — fixed-size chunked dispatch of remote mutations.
//!
//! The remote side starts failing requests somewhere above ~80 records at
//! once; batches cap the in-flight set. Within a batch every item is
//! dispatched in parallel on scoped threads; batches run strictly one after
//! another. The first failing item aborts the run — no retry, no rollback.

use crate::error::SyncError;

/// Records per remote batch unless the config overrides it.
pub const BATCH_SIZE: usize = 80;

/// Apply `apply` to every item, `batch_size` at a time.
///
/// Items inside a batch run concurrently; the in-flight batch finishes
/// before the first error is reported. A worker panic propagates.
pub fn apply_batched<T, F>(items: &[T], batch_size: usize, apply: F) -> Result<(), SyncError>
where
    T: Sync,
    F: Fn(&T) -> Result<(), SyncError> + Sync,
{
    // chunks() panics on zero.
    let batch_size = batch_size.max(1);
    for (index, chunk) in items.chunks(batch_size).enumerate() {
        tracing::debug!(
            "dispatching batch {} ({} records)",
            index + 1,
            chunk.len()
        );
        let results: Vec<Result<(), SyncError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = chunk
                .iter()
                .map(|item| scope.spawn(|| apply(item)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });
        for result in results {
            result?;
        }
    }
    Ok(())
}
