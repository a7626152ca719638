// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization for [`Surface`].

extern crate alloc;

use alloc::string::String;

use core::fmt::Write;

use kurbo::{BezPath, PathEl};
use peniko::Brush;

use crate::mark::{MarkPayload, TextAnchor, TextBaseline};
use crate::surface::Surface;

impl Surface {
    /// Serializes the surface into a standalone SVG document.
    ///
    /// Groups are emitted in paint order as `<g class="..">` elements. Rect titles become
    /// `<title>` children so viewers show them as hover tooltips.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> core::fmt::Result {
        let view = self.view();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}" style="max-width: 100%; height: auto;">"#,
            view.width(),
            view.height(),
            view.x0,
            view.y0,
            view.width(),
            view.height()
        )?;

        for group in self.groups_in_paint_order() {
            writeln!(out, r#"<g class="{}">"#, escape_xml(&group.name))?;
            for mark in &group.marks {
                match &mark.payload {
                    MarkPayload::Rect(r) => {
                        write!(
                            out,
                            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                            r.rect.x0,
                            r.rect.y0,
                            r.rect.width(),
                            r.rect.height(),
                        )?;
                        if r.corner_radius > 0.0 {
                            write!(out, r#" rx="{}""#, r.corner_radius)?;
                        }
                        write_paint_attr(out, "fill", &r.fill)?;
                        if r.stroke_width > 0.0 {
                            write_paint_attr(out, "stroke", &r.stroke)?;
                            write!(out, r#" stroke-width="{}""#, r.stroke_width)?;
                        }
                        match &r.title {
                            Some(title) => {
                                writeln!(out, "><title>{}</title></rect>", escape_xml(title))?;
                            }
                            None => out.push_str("/>\n"),
                        }
                    }
                    MarkPayload::Path(p) => {
                        write!(out, r#"<path d="{}""#, path_data(&p.path))?;
                        write_paint_attr(out, "fill", &p.fill)?;
                        if p.stroke_width > 0.0 {
                            write_paint_attr(out, "stroke", &p.stroke)?;
                            write!(out, r#" stroke-width="{}""#, p.stroke_width)?;
                        }
                        if !p.dash.is_empty() {
                            out.push_str(r#" stroke-dasharray=""#);
                            for (i, d) in p.dash.iter().enumerate() {
                                if i > 0 {
                                    out.push(' ');
                                }
                                write!(out, "{d}")?;
                            }
                            out.push('"');
                        }
                        out.push_str("/>\n");
                    }
                    MarkPayload::Circle(c) => {
                        write!(
                            out,
                            r#"<circle cx="{}" cy="{}" r="{}""#,
                            c.center.x, c.center.y, c.radius
                        )?;
                        write_paint_attr(out, "fill", &c.fill)?;
                        out.push_str("/>\n");
                    }
                    MarkPayload::Text(t) => {
                        let baseline = match t.baseline {
                            TextBaseline::Middle => "middle",
                            TextBaseline::Alphabetic => "alphabetic",
                            TextBaseline::Hanging => "hanging",
                            TextBaseline::Ideographic => "ideographic",
                        };
                        write!(
                            out,
                            r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                            t.pos.x, t.pos.y, t.font_size, baseline
                        )?;
                        if let Some(family) = &t.font_family {
                            write!(out, r#" font-family="{}""#, escape_xml(family))?;
                        }
                        out.push_str(match t.anchor {
                            TextAnchor::Start => r#" text-anchor="start""#,
                            TextAnchor::Middle => r#" text-anchor="middle""#,
                            TextAnchor::End => r#" text-anchor="end""#,
                        });
                        write_paint_attr(out, "fill", &t.fill)?;
                        writeln!(out, ">{}</text>", escape_xml(&t.text))?;
                    }
                }
            }
            out.push_str("</g>\n");
        }

        out.push_str("</svg>\n");
        Ok(())
    }
}

fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for (i, el) in path.elements().iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let _ = match *el {
            PathEl::MoveTo(p) => write!(d, "M{},{}", p.x, p.y),
            PathEl::LineTo(p) => write!(d, "L{},{}", p.x, p.y),
            PathEl::QuadTo(p1, p2) => write!(d, "Q{},{} {},{}", p1.x, p1.y, p2.x, p2.y),
            PathEl::CurveTo(p1, p2, p3) => write!(
                d,
                "C{},{} {},{} {},{}",
                p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            ),
            PathEl::ClosePath => write!(d, "Z"),
        };
    }
    d
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = alloc::format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => (String::from("none"), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) -> core::fmt::Result {
    let (value, opacity) = svg_paint(brush);
    write!(out, r#" {name}="{value}""#)?;
    if let Some(o) = opacity {
        write!(out, r#" {name}-opacity="{o}""#)?;
    }
    Ok(())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
