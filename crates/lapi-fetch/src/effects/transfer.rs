use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::data::ProgressState;
use crate::effects::Cancellation;
use crate::error::Result;

/// Upper bound on the up-front buffer reservation taken from a length hint.
const MAX_PREALLOC: u64 = 1 << 20;

/// Bytes copied by [`transfer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transfer {
    pub data:      Vec<u8>,
    /// The loop stopped on cancellation. `data` holds what arrived before it.
    pub cancelled: bool,
}

impl Transfer {
    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Not cancelled, and exactly `expected` bytes when a length is known.
    pub fn is_complete(&self, expected: Option<u64>) -> bool {
        !self.cancelled && expected.is_none_or(|n| n == self.data.len() as u64)
    }

    pub fn into_bytes(self) -> Vec<u8> { self.data }
}

/// Copy `source` into memory `chunk_size` bytes at a time.
///
/// `progress` reports once before the first read, once after every read and
/// once more after the loop with `in_progress` cleared, including when a read
/// fails. The loop ends on a zero-length read; a short positive read is just a
/// partial chunk. Cancellation ends the loop without an error.
///
/// # Errors
///
/// Returns [`crate::Error::Transfer`] when a read fails. Nothing is retried.
pub async fn transfer<R>(
    mut source: R,
    chunk_size: usize,
    total_hint: Option<u64>,
    cancellation: &Cancellation,
    progress: &mut ProgressState,
) -> Result<Transfer>
where
    R: AsyncRead + Unpin,
{
    let chunk_size = chunk_size.max(1);

    progress.set_total_to_receive(total_hint);
    progress.set_bytes_received(Some(0));
    progress.set_active(true);
    progress.report();

    debug!(chunk_size, total = ?total_hint, "starting transfer");

    let capacity = total_hint.unwrap_or(0).min(MAX_PREALLOC) as usize;
    let mut data = Vec::with_capacity(capacity);
    let mut chunk = vec![0u8; chunk_size];
    let mut cancelled = false;

    let outcome = loop {
        let read = match cancellation.guard(source.read(&mut chunk)).await {
            None => {
                cancelled = true;
                break Ok(());
            }
            Some(Ok(read)) => read,
            Some(Err(e)) => break Err(e),
        };

        data.extend_from_slice(&chunk[..read]);
        progress.add_received(read as u64);
        progress.report();
        trace!(read, bytes = data.len(), "chunk copied");

        if read == 0 {
            break Ok(());
        }
    };

    progress.set_active(false);
    progress.report();

    outcome?;

    debug!(bytes = data.len(), cancelled, "transfer finished");
    Ok(Transfer { data, cancelled })
}
