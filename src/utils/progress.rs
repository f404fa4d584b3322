use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

/// Create a spinner for the bucket listing, drawn on stderr
pub fn create_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    spinner.set_style(style);
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Writer that hides the spinner while a line is written, so scan output
/// on stdout does not get mixed into the spinner line on stderr
pub struct ProgressWriter<'a, W: Write> {
    progress: Option<&'a ProgressBar>,
    inner: W,
}

impl<'a, W: Write> ProgressWriter<'a, W> {
    pub fn new(inner: W, progress: Option<&'a ProgressBar>) -> Self {
        Self { progress, inner }
    }
}

impl<W: Write> Write for ProgressWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        match self.progress {
            Some(pb) => pb.suspend(|| inner.write(buf)),
            None => inner.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Format bytes into human-readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_writer_passes_through() {
        let spinner = ProgressBar::hidden();
        let mut buf = Vec::new();
        {
            let mut writer = ProgressWriter::new(&mut buf, Some(&spinner));
            writeln!(writer, "line one").unwrap();
        }
        let mut writer = ProgressWriter::new(&mut buf, None);
        writeln!(writer, "line two").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KiB");
        assert_eq!(format_bytes(1073741824), "1.00 GiB");
        assert_eq!(format_bytes(3 * 1024u64.pow(5)), "3.00 PiB");
    }
}
