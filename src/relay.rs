//! Tee-copy of a child stream into a console sink and a capture buffer.

use std::io::{self, Read, Write};
use std::sync::{Mutex, PoisonError};

/// Writer that duplicates every write into two destinations.
struct Tee<'a, W> {
    console: &'a mut W,
    capture: &'a mut Vec<u8>,
}

impl<W: Write> Write for Tee<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.capture.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()
    }
}

/// Console sink shared between concurrent relays.
///
/// The lock is taken for one write at a time, never for a whole copy, so
/// relays of different calls interleave instead of waiting on each other.
pub struct SharedSink<'a, W>(pub &'a Mutex<W>);

impl<W: Write> Write for SharedSink<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

/// Copies `source` to `console` until EOF and returns everything read.
///
/// The source is dropped on return, so a failed relay closes the read end
/// of a pipe instead of leaving the writer blocked.
///
/// # Errors
///
/// Returns the first read or write error. Bytes copied so far are lost.
pub fn relay<R: Read, W: Write>(mut source: R, console: &mut W) -> io::Result<Vec<u8>> {
    let mut capture = Vec::new();
    let mut tee = Tee { console, capture: &mut capture };
    io::copy(&mut source, &mut tee)?;
    tee.flush()?;
    Ok(capture)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenConsole;

    impl Write for BrokenConsole {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn copies_to_console_and_capture() {
        let mut console = Vec::new();
        let captured = relay(&b"line one\nline two\n"[..], &mut console).unwrap();
        assert_eq!(captured, b"line one\nline two\n");
        assert_eq!(console, captured);
    }

    #[test]
    fn empty_source_yields_empty_capture() {
        let mut console = Vec::new();
        let captured = relay(io::empty(), &mut console).unwrap();
        assert!(captured.is_empty());
        assert!(console.is_empty());
    }

    /// Source that yields its chunks one read at a time and records
    /// whether the console lock was free at every read.
    struct LockCheckingSource<'a> {
        console: &'a Mutex<Vec<u8>>,
        chunks: Vec<&'static [u8]>,
        lock_free_on_every_read: bool,
    }

    impl Read for LockCheckingSource<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.lock_free_on_every_read &= self.console.try_lock().is_ok();
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn shared_sink_releases_the_lock_between_writes() {
        let console = Mutex::new(Vec::new());
        let mut source = LockCheckingSource {
            console: &console,
            chunks: vec![&b"one\n"[..], &b"two\n"[..], &b"three\n"[..]],
            lock_free_on_every_read: true,
        };

        let captured = relay(&mut source, &mut SharedSink(&console)).unwrap();

        assert!(source.lock_free_on_every_read);
        assert_eq!(captured, b"one\ntwo\nthree\n");
        assert_eq!(console.into_inner().unwrap(), captured);
    }

    #[test]
    fn console_failure_is_reported() {
        let err = relay(&b"data"[..], &mut BrokenConsole).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
