//! Table rendering.

use crate::error::{FormatError, FormatResult};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Fixed field width for the plain-text dialect.
const TEXT_FIELD_WIDTH: usize = 10;

/// Output dialect for rendered tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Right-justified fixed-width columns with a dash separator line.
    Text,
    /// Comma-joined fields. Embedded delimiters are not escaped.
    Csv,
    /// Table-row markup. Field content is not HTML-escaped.
    Html,
}

impl FromStr for TableFormat {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "txt"),
            Self::Csv => write!(f, "csv"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Renders headings and rows to a text sink in the selected dialect.
///
/// Both operations flush after writing: live feed output must not sit in a
/// buffer while the feed idles. Sink I/O failure is the only error path;
/// any fixed-arity string row renders.
pub struct TableWriter<W: Write> {
    format: TableFormat,
    out: W,
}

impl TableWriter<io::Stdout> {
    /// Writer over the process's standard output.
    pub fn stdout(format: TableFormat) -> Self {
        Self::new(format, io::stdout())
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(format: TableFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Emit the table headings.
    pub fn headings<S: AsRef<str>>(&mut self, headers: &[S]) -> FormatResult<()> {
        match self.format {
            TableFormat::Text => {
                for header in headers {
                    write!(self.out, "{:>width$} ", header.as_ref(), width = TEXT_FIELD_WIDTH)?;
                }
                writeln!(self.out)?;
                let dashes = "-".repeat(TEXT_FIELD_WIDTH);
                for _ in headers {
                    write!(self.out, "{dashes} ")?;
                }
                writeln!(self.out)?;
            }
            TableFormat::Csv => {
                writeln!(self.out, "{}", join(headers, ","))?;
            }
            TableFormat::Html => {
                write!(self.out, "<tr>")?;
                for header in headers {
                    write!(self.out, "<th>{}</th>", header.as_ref())?;
                }
                writeln!(self.out, "</tr>")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Emit one data row.
    pub fn row<S: AsRef<str>>(&mut self, fields: &[S]) -> FormatResult<()> {
        match self.format {
            TableFormat::Text => {
                for field in fields {
                    write!(self.out, "{:>width$} ", field.as_ref(), width = TEXT_FIELD_WIDTH)?;
                }
                writeln!(self.out)?;
            }
            TableFormat::Csv => {
                writeln!(self.out, "{}", join(fields, ","))?;
            }
            TableFormat::Html => {
                write!(self.out, "<tr>")?;
                for field in fields {
                    write!(self.out, "<td>{}</td>", field.as_ref())?;
                }
                writeln!(self.out, "</tr>")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

fn join<S: AsRef<str>>(fields: &[S], separator: &str) -> String {
    fields
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: TableFormat) -> String {
        let mut writer = TableWriter::new(format, Vec::new());
        writer.headings(&["Name", "Price", "Change"]).unwrap();
        writer.row(&["AAPL", "3.5", "+0.1"]).unwrap();
        writer.row(&["MSFT", "1.2", "-0.05"]).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = "xml".parse::<TableFormat>().unwrap_err();
        assert!(matches!(err, FormatError::UnknownFormat(name) if name == "xml"));
    }

    #[test]
    fn test_format_round_trips_through_names() {
        for name in ["txt", "csv", "html"] {
            assert_eq!(name.parse::<TableFormat>().unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_csv_output_exact() {
        assert_eq!(
            render(TableFormat::Csv),
            "Name,Price,Change\nAAPL,3.5,+0.1\nMSFT,1.2,-0.05\n"
        );
    }

    #[test]
    fn test_text_output_right_justified() {
        let output = render(TableFormat::Text);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "      Name      Price     Change ");
        assert_eq!(lines[1], "---------- ---------- ---------- ");
        assert_eq!(lines[2], "      AAPL        3.5       +0.1 ");
        assert_eq!(lines[3], "      MSFT        1.2      -0.05 ");
    }

    #[test]
    fn test_html_output_wraps_cells() {
        let output = render(TableFormat::Html);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "<tr><th>Name</th><th>Price</th><th>Change</th></tr>");
        assert_eq!(lines[1], "<tr><td>AAPL</td><td>3.5</td><td>+0.1</td></tr>");
        assert_eq!(lines[2], "<tr><td>MSFT</td><td>1.2</td><td>-0.05</td></tr>");
    }

    #[test]
    fn test_csv_does_not_escape_embedded_delimiters() {
        let mut writer = TableWriter::new(TableFormat::Csv, Vec::new());
        writer.row(&["Acme, Inc", "10"]).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "Acme, Inc,10\n");
    }
}
