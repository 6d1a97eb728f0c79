use std::fmt::Write;

use super::{Chart, ChartRender};

impl ChartRender {
    /// Bare `<svg>` element, or the placeholder paragraph for empty input.
    pub fn to_svg(&self) -> String {
        match self {
            ChartRender::NoData { .. } => no_data_html(),
            ChartRender::Chart(chart) => chart.to_svg(),
        }
    }

    /// Titled card wrapping the drawing, with the latest value in the corner.
    pub fn to_html(&self) -> String {
        match self {
            ChartRender::NoData { .. } => {
                format!("<div style=\"padding: 20px; text-align: center\">{}</div>", no_data_html())
            }
            ChartRender::Chart(chart) => {
                let mut html = String::new();
                html.push_str(
                    "<div style=\"padding: 20px; border: 1px solid #ddd; border-radius: 8px\">\n",
                );
                let _ = writeln!(
                    html,
                    "  <h4 style=\"margin-bottom: 20px\">{}</h4>",
                    escape_xml(&chart.title)
                );
                html.push_str("  <div style=\"position: relative\">\n");
                html.push_str(&chart.to_svg());
                let _ = writeln!(
                    html,
                    "    <div style=\"position: absolute; top: 10px; right: 10px; font-size: 14px; \
                     font-weight: bold; color: {}\">{}</div>",
                    escape_xml(&chart.color),
                    escape_xml(&chart.latest_label)
                );
                html.push_str("  </div>\n</div>\n");
                html
            }
        }
    }
}

impl Chart {
    /// Gradient id derived from the title so several charts can share a page.
    pub fn gradient_id(&self) -> String {
        let compact: String = self.title.split_whitespace().collect();
        format!("gradient-{compact}")
    }

    pub fn to_svg(&self) -> String {
        let color = escape_xml(&self.color);
        let gradient = escape_xml(&self.gradient_id());
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" style=\"overflow: visible\">",
            self.width, self.height
        );
        let _ = writeln!(
            svg,
            "  <defs>\n    <linearGradient id=\"{gradient}\" x1=\"0%\" y1=\"0%\" x2=\"0%\" y2=\"100%\">\n      \
             <stop offset=\"0%\" stop-color=\"{color}\" stop-opacity=\"0.3\"/>\n      \
             <stop offset=\"100%\" stop-color=\"{color}\" stop-opacity=\"0.1\"/>\n    \
             </linearGradient>\n  </defs>"
        );

        let _ = writeln!(
            svg,
            "  <path d=\"{}\" fill=\"url(#{gradient})\" stroke=\"none\"/>",
            self.area_path
        );
        let _ = writeln!(
            svg,
            "  <path d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>",
            self.stroke_path
        );

        for m in &self.markers {
            let _ = writeln!(
                svg,
                "  <circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"{color}\" stroke=\"white\" stroke-width=\"2\"/>",
                m.x, m.y
            );
        }

        // Axes
        let _ = writeln!(
            svg,
            "  <line x1=\"0\" y1=\"{h}\" x2=\"{w}\" y2=\"{h}\" stroke=\"#ddd\" stroke-width=\"1\"/>",
            h = self.plot_height,
            w = self.width
        );
        let _ = writeln!(
            svg,
            "  <line x1=\"0\" y1=\"0\" x2=\"0\" y2=\"{}\" stroke=\"#ddd\" stroke-width=\"1\"/>",
            self.plot_height
        );

        for g in &self.gridlines {
            let _ = writeln!(
                svg,
                "  <line x1=\"0\" y1=\"{y}\" x2=\"{w}\" y2=\"{y}\" stroke=\"#eee\" stroke-width=\"1\" stroke-dasharray=\"2,2\"/>",
                y = g.y,
                w = self.width
            );
            let _ = writeln!(
                svg,
                "  <text x=\"-5\" y=\"{}\" font-size=\"12\" fill=\"#666\" text-anchor=\"end\">{}</text>",
                g.y + 5.0,
                escape_xml(&g.label)
            );
        }

        for label in &self.x_labels {
            let _ = writeln!(
                svg,
                "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"#666\" text-anchor=\"middle\">{}</text>",
                label.x,
                label.y,
                escape_xml(&label.text)
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn no_data_html() -> String {
    "<p>No data to display</p>".to_string()
}

/// Escape text for inclusion in XML/HTML content or attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
