//! SVG surface
//!
//! Collects the renderer's draw calls as SVG elements. Coordinates are
//! written as-is: SVG shares the surface convention (pixels, y down).
//! Text positions are the top of the label, as on the iced canvas.

use std::fmt::Write;

use xsect_core::geometry::{SurfacePoint, SurfaceSize};
use xsect_core::render::{Rgba, Surface, TextAlign};

pub struct SvgSurface {
    size: SurfaceSize,
    body: String,
}

impl SvgSurface {
    pub fn new(size: SurfaceSize) -> Self {
        SvgSurface {
            size,
            body: String::new(),
        }
    }

    /// Complete SVG document
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = num(self.size.width),
            h = num(self.size.height),
            body = self.body,
        )
    }

    fn push(&mut self, element: std::fmt::Arguments<'_>) {
        // Writing into a String cannot fail
        let _ = self.body.write_fmt(element);
        self.body.push('\n');
    }
}

/// Two decimals, trailing zeros trimmed
fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn paint(attr: &str, c: Rgba) -> String {
    if c.a < 1.0 {
        format!("{attr}=\"{}\" {attr}-opacity=\"{}\"", c.to_hex(), num(c.a as f64))
    } else {
        format!("{attr}=\"{}\"", c.to_hex())
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Surface for SvgSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Rgba) {
        // Everything drawn so far is covered anyway
        self.body.clear();
        let size = self.size;
        self.fill_rect(SurfacePoint::new(0.0, 0.0), size, color);
    }

    fn fill_rect(&mut self, top_left: SurfacePoint, size: SurfaceSize, color: Rgba) {
        self.push(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            num(top_left.x),
            num(top_left.y),
            num(size.width),
            num(size.height),
            paint("fill", color),
        ));
    }

    fn stroke_rect(&mut self, top_left: SurfacePoint, size: SurfaceSize, color: Rgba, width: f64) {
        self.push(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" {} stroke-width=\"{}\"/>",
            num(top_left.x),
            num(top_left.y),
            num(size.width),
            num(size.height),
            paint("stroke", color),
            num(width),
        ));
    }

    fn fill_circle(&mut self, center: SurfacePoint, radius: f64, color: Rgba) {
        self.push(format_args!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
            num(center.x),
            num(center.y),
            num(radius),
            paint("fill", color),
        ));
    }

    fn line(&mut self, from: SurfacePoint, to: SurfacePoint, color: Rgba, width: f64) {
        self.push(format_args!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} stroke-width=\"{}\"/>",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            paint("stroke", color),
            num(width),
        ));
    }

    fn text(&mut self, at: SurfacePoint, content: &str, size: f64, color: Rgba, align: TextAlign) {
        let anchor = match align {
            TextAlign::Start => "start",
            TextAlign::Center => "middle",
            TextAlign::End => "end",
        };
        self.push(format_args!(
            "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"{}\" dominant-baseline=\"hanging\" {}>{}</text>",
            num(at.x),
            num(at.y),
            num(size),
            anchor,
            paint("fill", color),
            escape(content),
        ));
    }
}
