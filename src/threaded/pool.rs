//! Scoped worker pool shared by the reducer and the parallel transpose.

use crate::error::{MatmulError, Result};
use crate::threaded::partition::RowPartition;
use std::io;
use std::ops::Range;
use std::thread;

/// Run `work` once per non-empty range of `partition`, each on its own named
/// scoped thread.
///
/// `out` is cut into disjoint blocks of `range.len() * stride` elements, in
/// range order, before the worker for that range starts. Returns only after
/// every started worker has been joined. A worker panic is re-raised on the
/// caller.
///
/// # Errors
///
/// [`MatmulError::Spawn`] if the OS refuses a thread. No further workers are
/// started and the ones already running are joined first, so `out` is only
/// partly written.
pub fn run_partitioned<T, F>(
    out: &mut [T],
    partition: RowPartition,
    stride: usize,
    name: &str,
    work: F,
) -> Result<()>
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Sync,
{
    let work = &work;

    thread::scope(|s| {
        let mut rest = out;
        let mut handles = Vec::new();
        let mut failed = None;

        for (tid, range) in partition.non_empty() {
            let (block, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * stride);
            rest = tail;

            let spawned = thread::Builder::new()
                .name(format!("{}-{}", name, tid))
                .spawn_scoped(s, move || {
                    log::trace!("worker {} rows {:?}", tid, range);
                    work(range, block);
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    log::warn!("{}: worker {} failed to start: {}", name, tid, err);
                    failed = Some(spawn_error(tid, &err));
                    break;
                }
            }
        }

        // Join barrier: the output is only valid once every handle is back.
        for handle in handles {
            if let Err(payload) = handle.join() {
                std::panic::resume_unwind(payload);
            }
        }

        failed.map_or(Ok(()), Err)
    })
}

pub(crate) fn spawn_error(worker: usize, err: &io::Error) -> MatmulError {
    MatmulError::Spawn {
        worker,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threaded::partition::partition_rows;
    use std::sync::Mutex;

    #[test]
    fn test_blocks_follow_ranges() {
        let mut out = vec![0usize; 5 * 2];
        run_partitioned(&mut out, partition_rows(5, 3), 2, "fill", |range, block| {
            assert_eq!(block.len(), range.len() * 2);
            for (local, i) in range.enumerate() {
                block[local * 2] = i;
                block[local * 2 + 1] = i * 10;
            }
        })
        .unwrap();
        assert_eq!(out, vec![0, 0, 1, 10, 2, 20, 3, 30, 4, 40]);
    }

    #[test]
    fn test_workers_are_named_threads() {
        let seen = Mutex::new(Vec::new());
        let mut out = vec![0u8; 4];
        run_partitioned(&mut out, partition_rows(4, 2), 1, "named", |range, _| {
            let name = thread::current().name().map(str::to_owned);
            seen.lock().unwrap().push((range.start, name));
        })
        .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(
            seen,
            vec![
                (0, Some("named-0".to_string())),
                (2, Some("named-1".to_string())),
            ]
        );
    }

    #[test]
    fn test_only_busy_workers_start() {
        let started = Mutex::new(Vec::new());
        let mut out = vec![0u8; 3];
        run_partitioned(&mut out, partition_rows(3, usize::MAX), 1, "busy", |range, _| {
            started.lock().unwrap().push(range);
        })
        .unwrap();
        assert_eq!(started.into_inner().unwrap(), vec![0..3]);
    }

    #[test]
    fn test_spawn_error_keeps_os_reason() {
        let err = io::Error::new(io::ErrorKind::WouldBlock, "no more threads");
        assert_eq!(
            spawn_error(3, &err),
            MatmulError::Spawn {
                worker: 3,
                reason: "no more threads".to_string(),
            }
        );
    }

    #[test]
    #[should_panic(expected = "worker blew up")]
    fn test_worker_panic_reaches_caller() {
        let mut out = vec![0u8; 4];
        let _ = run_partitioned(&mut out, partition_rows(4, 2), 1, "panicky", |range, _| {
            if range.start == 2 {
                panic!("worker blew up");
            }
        });
    }
}
