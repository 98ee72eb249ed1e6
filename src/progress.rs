// src/progress.rs
/// Lightweight progress reporting used by long-running operations (batch scrapes, item sweeps).
/// The CLI implements this to surface status; library callers can pass `NullProgress`.
pub trait Progress {
    /// Called at the start with the total number of units (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one unit completes, successfully or not.
    fn item_done(&mut self, _label: &str, _ok: bool) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// `[3/20] Ahri ok` lines on stdout.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, label: &str, ok: bool) {
        self.done += 1;
        if !ok {
            self.failed += 1;
        }
        let status = if ok { "ok" } else { "FAILED" };
        println!("[{}/{}] {label} {status}", self.done, self.total);
    }

    fn finish(&mut self) {
        println!("{} done, {} failed", self.done - self.failed, self.failed);
    }
}
