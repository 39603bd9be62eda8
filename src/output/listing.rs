//! Console listing of directory sizes, largest first

use std::io::{self, BufRead, Write};

use humantime::format_duration;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::walker::{SizeRecord, WalkReport};

use super::config::OutputConfig;
use super::size::format_size;

pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";
pub const EXIT_PROMPT: &str = "Program Complete - Press Enter to exit...";

/// Writes `size : path` lines, pausing every `page_size` lines when given a
/// reader to wait on.
pub struct ListingFormatter {
    config: OutputConfig,
}

impl ListingFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write `records` in the order given. Callers pass them sorted.
    pub fn write_records<W: WriteColor>(
        &self,
        out: &mut W,
        records: &[SizeRecord],
        mut pager: Option<&mut dyn BufRead>,
    ) -> io::Result<()> {
        let mut size_color = ColorSpec::new();
        size_color.set_fg(Some(Color::Cyan)).set_bold(true);

        for (i, record) in records.iter().enumerate() {
            out.set_color(&size_color)?;
            write!(
                out,
                "{:>12}",
                format_size(record.size_bytes, self.config.decimals)
            )?;
            out.reset()?;
            writeln!(out, " : {}", record.path.display())?;

            let written = i + 1;
            if let Some(reader) = pager.as_deref_mut() {
                if self.config.page_size > 0
                    && written % self.config.page_size == 0
                    && written < records.len()
                {
                    prompt(out, reader, CONTINUE_PROMPT)?;
                }
            }
        }

        Ok(())
    }

    /// Write the one-line footer: root total, counts and elapsed time.
    pub fn write_summary<W: WriteColor>(&self, out: &mut W, report: &WalkReport) -> io::Result<()> {
        let mut bold = ColorSpec::new();
        bold.set_bold(true);

        writeln!(out)?;
        out.set_color(&bold)?;
        write!(out, "Total:")?;
        out.reset()?;
        writeln!(
            out,
            " {} under {}",
            format_size(report.total.bytes(), self.config.decimals),
            report.root.display()
        )?;

        let elapsed = std::time::Duration::from_millis(report.elapsed.as_millis() as u64);
        write!(out, "{} directories", report.index.len())?;
        if !report.inaccessible.is_empty() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, ", {} inaccessible", report.inaccessible.len())?;
            out.reset()?;
        }
        writeln!(out, ", scanned in {}", format_duration(elapsed))?;

        Ok(())
    }
}

/// Print `message` and block until a line (or EOF) arrives on `reader`.
pub fn prompt<W: Write + ?Sized>(
    out: &mut W,
    reader: &mut dyn BufRead,
    message: &str,
) -> io::Result<()> {
    write!(out, "{}", message)?;
    out.flush()?;
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::time::Duration;

    use termcolor::Buffer;

    use super::*;
    use crate::walker::{Measurement, SizeIndex};

    fn records(sizes: &[u64]) -> Vec<SizeRecord> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size_bytes)| SizeRecord {
                path: PathBuf::from(format!("/R/d{}", i)),
                size_bytes,
            })
            .collect()
    }

    fn formatter(page_size: usize) -> ListingFormatter {
        ListingFormatter::new(OutputConfig {
            use_color: false,
            decimals: 2,
            page_size,
        })
    }

    fn render(formatter: &ListingFormatter, records: &[SizeRecord], input: Option<&str>) -> String {
        let mut out = Buffer::no_color();
        let mut reader = input.map(|s| Cursor::new(s.as_bytes().to_vec()));
        formatter
            .write_records(
                &mut out,
                records,
                reader.as_mut().map(|r| r as &mut dyn BufRead),
            )
            .unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_lines_have_size_and_path() {
        let output = render(&formatter(0), &records(&[2048, 20]), None);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("2.00 KB : /R/d0"), "{}", lines[0]);
        assert!(lines[1].ends_with("20.00 bytes : /R/d1"), "{}", lines[1]);
    }

    #[test]
    fn test_pauses_between_pages_only() {
        let output = render(&formatter(2), &records(&[5, 4, 3, 2, 1]), Some("\n\n\n"));
        assert_eq!(output.matches(CONTINUE_PROMPT).count(), 2);

        // An exact multiple does not pause after the final line.
        let output = render(&formatter(2), &records(&[4, 3, 2, 1]), Some("\n\n"));
        assert_eq!(output.matches(CONTINUE_PROMPT).count(), 1);
    }

    #[test]
    fn test_no_pager_no_pauses() {
        let output = render(&formatter(1), &records(&[3, 2, 1]), None);
        assert!(!output.contains(CONTINUE_PROMPT));
    }

    #[test]
    fn test_page_size_zero_disables_pauses() {
        let output = render(&formatter(0), &records(&[3, 2, 1]), Some(""));
        assert!(!output.contains(CONTINUE_PROMPT));
    }

    #[test]
    fn test_summary() {
        let mut index = SizeIndex::new();
        index.insert(PathBuf::from("/R/D"), 20).unwrap();
        let report = WalkReport {
            root: PathBuf::from("/R"),
            total: Measurement::Sized(30),
            index,
            inaccessible: vec![PathBuf::from("/R/locked")],
            elapsed: Duration::from_micros(2_500),
        };

        let mut out = Buffer::no_color();
        formatter(0).write_summary(&mut out, &report).unwrap();
        let output = String::from_utf8(out.into_inner()).unwrap();
        assert!(output.contains("Total: 30.00 bytes under /R"), "{}", output);
        assert!(output.contains("1 directories, 1 inaccessible, scanned in 2ms"), "{}", output);
    }
}
