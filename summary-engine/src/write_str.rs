// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-only writers for summary output.
//!
//! The text and tree printers only ever produce UTF-8, and are written against [`WriteStr`] so
//! that they can target both an in-memory `String` (for tests) and a buffered stdout.
//!
//! Unlike [`std::fmt::Write`], errors are reported as [`std::io::Error`], so write failures on a
//! closed pipe keep their kind.

use std::{
    fmt,
    io::{self, BufWriter, Write},
};

/// A writer that only accepts strings.
pub trait WriteStr {
    /// Writes a string.
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    /// Flushes any buffered output.
    fn write_str_flush(&mut self) -> io::Result<()>;

    /// Writes formatted output. This is what `write!` and `writeln!` call.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let mut adapter = FmtAdapter {
            inner: self,
            error: None,
        };
        match fmt::write(&mut adapter, args) {
            Ok(()) => Ok(()),
            // An error from a formatting impl rather than the writer is reported as `other`.
            Err(fmt::Error) => Err(adapter
                .error
                .unwrap_or_else(|| io::Error::other("formatter error"))),
        }
    }
}

// Bridges a `WriteStr` to `fmt::Write`, stashing the underlying I/O error.
struct FmtAdapter<'a, W: ?Sized> {
    inner: &'a mut W,
    error: Option<io::Error>,
}

impl<W: WriteStr + ?Sized> fmt::Write for FmtAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_str(s).map_err(|error| {
            self.error = Some(error);
            fmt::Error
        })
    }
}

impl WriteStr for String {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write> WriteStr for BufWriter<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<T: WriteStr + ?Sized> WriteStr for &mut T {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (**self).write_str(s)
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        (**self).write_str_flush()
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        (**self).write_fmt(args)
    }
}
