//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

pub(crate) struct SvgWriter {
    writer: BufWriter<File>
}

/// String-based SVG writer for WASM/browser use
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }
}

impl SvgWriter {
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

/// XML declaration, opening <svg> tag and background.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .arc {{ fill-rule: evenodd; stroke: #ffffff; stroke-width: 0.5; }}
    .label {{ font: 10px sans-serif; fill: #111827; text-anchor: middle; dominant-baseline: middle; pointer-events: none; }}
    .hole {{ fill: #ffffff; stroke: #d1d5db; }}
    .crumbs {{ font: 12px sans-serif; fill: #374151; }}
</style>
</defs>"##)?;
    Ok(())
}

pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Escape text for use in element content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
