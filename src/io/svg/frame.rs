use std::io::Write;

use anyhow::Result;

use crate::{frame::Frame, io::svg::{escape, write_svg_footer, write_svg_header, write_svg_styles}};

/// Separator between breadcrumb entries.
const CRUMB_SEPARATOR: &str = " › ";

/// Write a complete SVG document for `frame`.
pub(crate) fn write_frame_svg<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    write_svg_header(writer, frame.width, frame.height)?;
    write_svg_styles(writer)?;

    writeln!(writer, r#"<g class="arcs">"#)?;
    for w in &frame.wedges {
        writeln!(
            writer,
            r#"<path class="arc" data-id="{id}" style="fill:{fill};fill-opacity:{opacity:.3}" d="{d}"><title>{title}</title></path>"#,
            id = w.id.0,
            fill = w.color.to_hex(),
            opacity = w.opacity,
            d = w.wedge.to_svg_path(frame.center),
            title = escape(&w.name),
        )?;
    }
    writeln!(writer, "</g>")?;

    writeln!(writer, r#"<g class="labels">"#)?;
    for w in &frame.wedges {
        let Some(label) = &w.label else { continue };
        writeln!(
            writer,
            r#"<text class="label" transform="{transform}" fill-opacity="{opacity:.3}">{text}</text>"#,
            transform = label.transform(),
            opacity = w.label_opacity,
            text = escape(&w.name),
        )?;
    }
    writeln!(writer, "</g>")?;

    writeln!(
        writer,
        r#"<circle class="hole" cx="{:.3}" cy="{:.3}" r="{:.3}"/>"#,
        frame.center.x, frame.center.y, frame.center_hole_radius,
    )?;

    let crumbs = frame.breadcrumb.iter().map(|c| escape(&c.name)).collect::<Vec<_>>().join(CRUMB_SEPARATOR);
    writeln!(writer, r#"<text class="crumbs" x="8" y="16">{crumbs}</text>"#)?;

    write_svg_footer(writer)
}
