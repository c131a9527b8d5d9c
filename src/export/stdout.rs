//! Console exporter.

use std::sync::Mutex;

use crate::config::TraceConfig;
use crate::error::{ExportResult, TraceError};

use super::{SpanData, SpanExporter};

/// An exporter that writes one summary line per finished span to stdout.
///
/// Spans are buffered up to the configured `buffer_size` before being
/// printed; [`flush`](SpanExporter::flush) drains the buffer immediately.
/// Attribute values longer than the configured `maximum_label_value_size`
/// are truncated on a char boundary.
#[derive(Debug)]
pub struct ConsoleExporter {
    buffer: Mutex<Vec<SpanData>>,
    buffer_size: usize,
    maximum_label_value_size: usize,
}

impl ConsoleExporter {
    /// Create a console exporter from a configuration.
    pub fn new(config: &TraceConfig) -> Self {
        ConsoleExporter {
            buffer: Mutex::new(Vec::new()),
            buffer_size: config.buffer_size,
            maximum_label_value_size: config.maximum_label_value_size,
        }
    }

    fn print(&self, spans: &[SpanData]) {
        for span in spans {
            let mut attributes = span
                .attributes
                .iter()
                .map(|(key, value)| {
                    format!("{key}={}", truncate(value, self.maximum_label_value_size))
                })
                .collect::<Vec<_>>();
            attributes.sort();
            println!(
                "span {:?} duration={:?} {}",
                span.name,
                span.duration(),
                attributes.join(" ")
            );
        }
    }
}

impl SpanExporter for ConsoleExporter {
    fn export(&self, batch: &[SpanData]) -> ExportResult {
        let mut buffer = self.buffer.lock().map_err(TraceError::from)?;
        buffer.extend_from_slice(batch);
        if buffer.len() >= self.buffer_size {
            let spans = std::mem::take(&mut *buffer);
            drop(buffer);
            self.print(&spans);
        }
        Ok(())
    }

    fn flush(&self) -> ExportResult {
        let spans = std::mem::take(&mut *self.buffer.lock().map_err(TraceError::from)?);
        self.print(&spans);
        Ok(())
    }
}

fn truncate(value: &str, limit: usize) -> &str {
    if value.len() <= limit {
        return value;
    }
    let mut end = limit;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("short", 150), "short");
        assert_eq!(truncate("abcdef", 3), "abc");
        // 'é' is two bytes; cutting inside it must back off to the boundary
        assert_eq!(truncate("aé", 2), "a");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn buffers_until_configured_size() {
        let config = TraceConfig {
            buffer_size: 2,
            ..TraceConfig::default()
        };
        let exporter = ConsoleExporter::new(&config);
        exporter
            .export(&[SpanData::new("first")])
            .expect("export should succeed");
        assert_eq!(exporter.buffer.lock().unwrap().len(), 1);
        // second span crosses the limit and drains the buffer
        exporter
            .export(&[SpanData::new("second")])
            .expect("export should succeed");
        assert!(exporter.buffer.lock().unwrap().is_empty());
    }

    #[test]
    fn flush_drains_buffer() {
        let exporter = ConsoleExporter::new(&TraceConfig::default());
        exporter
            .export(&[SpanData::new("buffered").with_attribute("key", "value")])
            .expect("export should succeed");
        exporter.flush().expect("flush should succeed");
        assert!(exporter.buffer.lock().unwrap().is_empty());
    }
}
