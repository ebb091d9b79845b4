use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use combo_session::LookupTicket;
use tracing::debug;

use crate::error::LookupError;
use crate::source::{Completion, Lookup, SuggestionSource};

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

struct LookupWork {
    query: String,
    ticket: LookupTicket,
}

// ---------------------------------------------------------------------------
// ThreadedSource
// ---------------------------------------------------------------------------

/// Runs a blocking lookup function on a background thread.
///
/// `search` only queues the query and returns `Lookup::Pending`; results come
/// back through `poll` on the caller's thread. Queries superseded before the
/// worker reaches them are skipped, so a burst of keystrokes costs one lookup.
pub struct ThreadedSource<T> {
    work_tx: mpsc::Sender<LookupWork>,
    result_rx: mpsc::Receiver<Completion<T>>,
    latest: Arc<AtomicU64>,
}

impl<T: Send + 'static> ThreadedSource<T> {
    pub fn spawn<F>(name: &str, lookup: F) -> io::Result<Self>
    where
        F: FnMut(&str) -> Result<Vec<T>, LookupError> + Send + 'static,
    {
        let latest = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<LookupWork>();
        let (result_tx, result_rx) = mpsc::channel::<Completion<T>>();
        {
            let latest = Arc::clone(&latest);
            thread::Builder::new()
                .name(name.into())
                .spawn(move || lookup_worker(work_rx, result_tx, latest, lookup))?;
        }
        Ok(Self {
            work_tx,
            result_rx,
            latest,
        })
    }
}

impl<T> SuggestionSource<T> for ThreadedSource<T> {
    fn search(&mut self, query: &str, ticket: LookupTicket) -> Lookup<T> {
        self.latest.store(ticket.generation, Ordering::SeqCst);
        let work = LookupWork {
            query: query.to_string(),
            ticket,
        };
        match self.work_tx.send(work) {
            Ok(()) => Lookup::Pending,
            Err(_) => Lookup::Failed(LookupError::Disconnected),
        }
    }

    fn poll(&mut self) -> Option<Completion<T>> {
        self.result_rx.try_recv().ok()
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn lookup_worker<T, F>(
    rx: mpsc::Receiver<LookupWork>,
    tx: mpsc::Sender<Completion<T>>,
    latest: Arc<AtomicU64>,
    mut lookup: F,
) where
    F: FnMut(&str) -> Result<Vec<T>, LookupError>,
{
    while let Ok(work) = rx.recv() {
        // Drain: if multiple work items queued, skip to latest
        let mut work = work;
        while let Ok(newer) = rx.try_recv() {
            work = newer;
        }

        if work.ticket.generation != latest.load(Ordering::SeqCst) {
            debug!(generation = work.ticket.generation, "skipping superseded lookup");
            continue;
        }

        let result = lookup(&work.query);
        if tx
            .send(Completion {
                ticket: work.ticket,
                result,
            })
            .is_err()
        {
            // Source dropped.
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use combo_session::LookupPurpose;

    use super::*;

    fn ticket(generation: u64) -> LookupTicket {
        LookupTicket {
            generation,
            purpose: LookupPurpose::Typed,
        }
    }

    fn wait_for<T>(source: &mut ThreadedSource<T>) -> Completion<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(done) = source.poll() {
                return done;
            }
            assert!(Instant::now() < deadline, "worker never answered");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn answers_on_poll() {
        let mut source = ThreadedSource::spawn("combo-test-lookup", |q: &str| {
            Ok(vec![q.to_uppercase()])
        })
        .unwrap();
        assert_eq!(source.search("fr", ticket(1)), Lookup::Pending);
        let done = wait_for(&mut source);
        assert_eq!(done.ticket, ticket(1));
        assert_eq!(done.result, Ok(vec!["FR".to_string()]));
    }

    #[test]
    fn reports_errors() {
        let mut source = ThreadedSource::<String>::spawn("combo-test-lookup", |_q: &str| {
            Err(LookupError::Source("offline".to_string()))
        })
        .unwrap();
        source.search("fr", ticket(1));
        let done = wait_for(&mut source);
        assert_eq!(done.result, Err(LookupError::Source("offline".to_string())));
    }

    #[test]
    fn superseded_queries_are_skipped() {
        let (started_tx, started_rx) = mpsc::channel::<()>();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let mut source = ThreadedSource::spawn("combo-test-lookup", move |q: &str| {
            // Hold the worker on the first query until released.
            if q == "f" {
                let _ = started_tx.send(());
                let _ = gate_rx.recv();
            }
            Ok(vec![q.to_string()])
        })
        .unwrap();
        source.search("f", ticket(1));
        started_rx.recv().unwrap();
        source.search("fr", ticket(2));
        source.search("fra", ticket(3));
        gate_tx.send(()).unwrap();

        let mut seen = Vec::new();
        while seen.last() != Some(&3) {
            seen.push(wait_for(&mut source).ticket.generation);
        }
        // "fr" was drained in favour of "fra".
        assert!(!seen.contains(&2), "saw {seen:?}");
    }
}
