use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    // A panic while holding the lock leaves plain strings behind, still usable
    BUFFER.lock().unwrap_or_else(|e| e.into_inner())
}

/// Activate buffering. While active, log output is stored
/// instead of printed to stderr.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// `io::Write` sink for the logger that goes through the buffer.
///
/// Each write is one formatted log record; the trailing newline is dropped
/// since `drain()` callers print with `eprintln!`.
pub struct BufferedStderr;

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let mut guard = buffer();
        match guard.as_mut() {
            Some(messages) => messages.push(text.trim_end_matches('\n').to_string()),
            None => {
                drop(guard);
                io::stderr().write_all(buf)?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the buffer is process-global
    #[test]
    fn test_buffering_captures_until_drained() {
        activate();
        BufferedStderr.write_all(b"[WARN] first\n").unwrap();
        BufferedStderr.write_all(b"[INFO] second\n").unwrap();
        assert_eq!(drain(), vec!["[WARN] first".to_string(), "[INFO] second".to_string()]);
        assert!(drain().is_empty());
    }
}
