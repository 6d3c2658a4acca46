//! Runtime context - ToolContext implementation

use scout_foundation::ToolContext;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Execution context handed to every tool call
///
/// Cancellation is cooperative: the flag is read by the registry before a call is
/// dispatched, not while a walk is in progress.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    session_id: String,
    working_dir: PathBuf,
    cancelled: Arc<AtomicBool>,
}

impl RuntimeContext {
    pub fn new(session_id: impl Into<String>, working_dir: PathBuf) -> Self {
        Self {
            session_id: session_id.into(),
            working_dir,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Context rooted at the process working directory
    pub fn current(session_id: impl Into<String>) -> std::io::Result<Self> {
        Ok(Self::new(session_id, std::env::current_dir()?))
    }

    /// Share a cancellation flag owned by the caller
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Request cancellation of subsequent calls
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl ToolContext for RuntimeContext {
    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let ctx = RuntimeContext::new("s1", PathBuf::from("/tmp"));
        let clone = ctx.clone();
        assert!(!clone.is_cancelled());

        ctx.cancel();
        assert!(clone.is_cancelled());
        assert_eq!(clone.session_id(), "s1");
        assert_eq!(clone.working_dir(), Path::new("/tmp"));
    }

    #[test]
    fn test_external_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = RuntimeContext::new("s2", PathBuf::from(".")).with_cancel_flag(flag.clone());
        flag.store(true, Ordering::SeqCst);
        assert!(ctx.is_cancelled());
    }
}
