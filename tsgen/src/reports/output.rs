//! Where reports are rendered.

/// Which terminal stream a line belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// A sink for report lines.
///
/// Implementors only provide [`Output::write_line`]; the styled helpers
/// decide the text and stream of each kind of line. Diagnostics go to
/// stderr, everything else to stdout.
pub trait Output {
    fn write_line(&mut self, stream: Stream, line: &str);

    fn section(&mut self, name: &str) {
        self.write_line(Stream::Stdout, &format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.write_line(Stream::Stdout, &format!("{key}: {value}"));
    }

    fn removed_item(&mut self, text: &str) {
        self.write_line(Stream::Stdout, &format!("  - {text}"));
    }

    fn error(&mut self, msg: &str) {
        self.write_line(Stream::Stderr, &format!("error: {msg}"));
    }

    fn warning(&mut self, msg: &str) {
        self.write_line(Stream::Stderr, &format!("warning: {msg}"));
    }

    /// A `── label ──` rule, used between previewed files.
    fn divider(&mut self, label: &str) {
        self.write_line(Stream::Stdout, &format!("── {label} ──"));
    }

    /// Text printed as-is; may span several lines.
    fn preformatted(&mut self, text: &str) {
        self.write_line(Stream::Stdout, text);
    }

    fn newline(&mut self) {
        self.write_line(Stream::Stdout, "");
    }
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the process's stdout and stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn write_line(&mut self, stream: Stream, line: &str) {
        match stream {
            Stream::Stdout => println!("{line}"),
            Stream::Stderr => eprintln!("{line}"),
        }
    }
}

/// Keeps rendered lines in memory, regardless of stream.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn write_line(&mut self, _stream: Stream, line: &str) {
        self.lines.push(line.to_string());
    }
}
