//! Destinations for the human-readable status lines produced by orders.
//!
//! Operations never print on their own. A caller that wants the messages
//! passes a [`StatusSink`] to [`Order::apply_with`](crate::order::Order::apply_with).

/// A text sink for status lines.
pub trait StatusSink {
    /// Write one status line.
    fn emit(&mut self, message: &str);
}

/// Writes each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Emits each line as a `tracing` info event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&mut self, message: &str) {
        tracing::info!(target: "orderstate::status", "{message}");
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Get every line emitted so far, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Get the most recent line
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Take ownership of the collected lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl StatusSink for MemorySink {
    fn emit(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

impl StatusSink for Vec<String> {
    fn emit(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

impl<K: StatusSink + ?Sized> StatusSink for &mut K {
    fn emit(&mut self, message: &str) {
        (**self).emit(message);
    }
}

impl<K: StatusSink + ?Sized> StatusSink for Box<K> {
    fn emit(&mut self, message: &str) {
        (**self).emit(message);
    }
}
