use crate::gel::GelBand;
use anyhow::{Result, bail};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, io};
use svg::Document;
use svg::node::element::{Line, Rectangle, Text};

/// Layout of the text gel: bands are printed `margin` columns in for the
/// longest fragment and `width - margin` columns in for the shortest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsciiGel {
    pub width: usize,
    pub margin: usize,
}

impl Default for AsciiGel {
    fn default() -> Self {
        Self {
            width: 60,
            margin: 5,
        }
    }
}

impl AsciiGel {
    pub fn validate(&self) -> Result<()> {
        if self.width <= self.margin * 2 {
            bail!(
                "ASCII gel width {} leaves no room inside a margin of {}",
                self.width,
                self.margin
            );
        }
        Ok(())
    }

    pub fn column_for(&self, coordinate: f64) -> usize {
        let span = self.width.saturating_sub(self.margin * 2) as f64;
        self.margin + (coordinate.clamp(0.0, 1.0) * span) as usize
    }
}

/// Horizontal text gel, one block per lane.
pub fn render_ascii_gel(bands: &[GelBand], layout: &AsciiGel) -> String {
    let mut out = String::from("=== Electrophoresis gel simulation ===\n");
    out.push_str(
        "(Longer fragments = closer to the left, shorter fragments = further to the right)\n\n",
    );
    for (lane, lane_bands) in &bands.iter().chunk_by(|band| band.lane.clone()) {
        out.push_str(&format!("Lane: {lane}\n"));
        for band in lane_bands {
            let pos = layout.column_for(band.coordinate);
            out.push_str(&format!("{}***  ({} bp)\n", " ".repeat(pos), band.length));
        }
        out.push('\n');
    }
    out
}

/// Writes one `length,coordinate,lane` row per band.
pub fn write_bands_csv<W: io::Write>(bands: &[GelBand], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for band in bands {
        wtr.serialize(band)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GelCanvas {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl Default for GelCanvas {
    fn default() -> Self {
        Self {
            width: 1040.0,
            height: 760.0,
            margin_left: 90.0,
            margin_right: 270.0,
            margin_top: 90.0,
            margin_bottom: 110.0,
        }
    }
}

impl GelCanvas {
    fn gel_left(&self) -> f32 {
        self.margin_left
    }

    fn gel_right(&self) -> f32 {
        self.width - self.margin_right
    }

    fn gel_top(&self) -> f32 {
        self.margin_top
    }

    fn gel_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn y_for_coordinate(coordinate: f64, top: f32, bottom: f32) -> f32 {
        top + (coordinate.clamp(0.0, 1.0) as f32) * (bottom - top)
    }
}

struct SvgBand {
    length: usize,
    coordinate: f64,
    count: usize,
    intensity: f32,
}

/// Bands of one lane with equal lengths merged; a band shared by several
/// fragments is drawn brighter.
fn lane_bands<'a>(bands: impl Iterator<Item = &'a GelBand>) -> Vec<SvgBand> {
    bands
        .chunk_by(|band| band.length)
        .into_iter()
        .map(|(length, group)| {
            let group = group.collect::<Vec<_>>();
            let count = group.len();
            SvgBand {
                length,
                coordinate: group[0].coordinate,
                count,
                intensity: (0.42 + (count as f32 * 0.2)).clamp(0.3, 1.0),
            }
        })
        .collect()
}

pub fn export_gel_svg(bands: &[GelBand], canvas: &GelCanvas) -> String {
    let lanes = bands
        .iter()
        .chunk_by(|band| band.lane.clone())
        .into_iter()
        .map(|(lane, group)| (lane, lane_bands(group)))
        .collect::<Vec<_>>();

    let gel_left = canvas.gel_left();
    let gel_right = canvas.gel_right();
    let gel_top = canvas.gel_top();
    let gel_bottom = canvas.gel_bottom();
    let lane_count = lanes.len().max(1);
    let lane_gap = (gel_right - gel_left) / (lane_count as f32 + 1.0);
    let gel_width = gel_right - gel_left;
    let gel_height = gel_bottom - gel_top;

    let mut doc = Document::new()
        .set("viewBox", (0, 0, canvas.width, canvas.height))
        .set("width", canvas.width)
        .set("height", canvas.height)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", canvas.width)
                .set("height", canvas.height)
                .set("fill", "#f9fafb"),
        )
        .add(
            Rectangle::new()
                .set("x", gel_left)
                .set("y", gel_top)
                .set("width", gel_width)
                .set("height", gel_height)
                .set("rx", 10)
                .set("ry", 10)
                .set("fill", "#111315"),
        );

    // Size ticks, longest first, skipping any that would crowd the previous one.
    // A lone fragment sits at a fixed coordinate, so its lane only sets ticks
    // when no lane was placed by size.
    let mut ticks = lanes
        .iter()
        .filter(|(_, merged)| merged.iter().map(|band| band.count).sum::<usize>() > 1)
        .flat_map(|(_, merged)| merged.iter().map(|band| (band.length, band.coordinate)))
        .collect::<BTreeMap<_, _>>();
    if ticks.is_empty() {
        ticks = bands
            .iter()
            .map(|band| (band.length, band.coordinate))
            .collect();
    }
    let mut last_y: Option<f32> = None;
    let mut accepted = 0;
    for (length, coordinate) in ticks.iter().rev() {
        if accepted >= 20 {
            break;
        }
        let y = GelCanvas::y_for_coordinate(*coordinate, gel_top, gel_bottom);
        if !last_y.map(|v| (v - y).abs() >= 16.0).unwrap_or(true) {
            continue;
        }
        last_y = Some(y);
        accepted += 1;
        doc = doc
            .add(
                Line::new()
                    .set("x1", gel_left)
                    .set("y1", y)
                    .set("x2", gel_right)
                    .set("y2", y)
                    .set("stroke", "#2d3238")
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(format!("{length} bp"))
                    .set("x", gel_right + 12.0)
                    .set("y", y + 4.0)
                    .set("font-family", "monospace")
                    .set("font-size", 12)
                    .set("fill", "#374151"),
            );
    }

    for (lane_idx, (lane_name, merged)) in lanes.iter().enumerate() {
        let x = gel_left + lane_gap * (lane_idx as f32 + 1.0);
        doc = doc
            .add(
                Rectangle::new()
                    .set("x", x - 34.0)
                    .set("y", gel_top + 10.0)
                    .set("width", 68.0)
                    .set("height", gel_height - 20.0)
                    .set("rx", 6)
                    .set("ry", 6)
                    .set("fill", "#1f252e"),
            )
            .add(
                Text::new(lane_name.clone())
                    .set("x", x)
                    .set("y", gel_bottom + 26.0)
                    .set("text-anchor", "middle")
                    .set("font-family", "monospace")
                    .set("font-size", 13)
                    .set("fill", "#0f172a"),
            );

        for band in merged {
            let y = GelCanvas::y_for_coordinate(band.coordinate, gel_top + 14.0, gel_bottom - 14.0);
            let width = 38.0 + 24.0 * band.intensity;
            let height = 3.0 + 3.0 * band.intensity;
            doc = doc.add(
                Rectangle::new()
                    .set("x", x - width * 0.5)
                    .set("y", y - height * 0.5)
                    .set("width", width)
                    .set("height", height)
                    .set("rx", 2)
                    .set("ry", 2)
                    .set("fill", "#f59e0b")
                    .set("opacity", (0.42 + 0.58 * band.intensity).clamp(0.35, 1.0)),
            );
            let mut label = format!("{} bp", band.length);
            if band.count > 1 {
                label.push_str(&format!(" (x{})", band.count));
            }
            doc = doc.add(
                Text::new(label)
                    .set("x", x + 44.0)
                    .set("y", y + 4.0)
                    .set("font-family", "monospace")
                    .set("font-size", 11)
                    .set("fill", "#111827"),
            );
        }
    }

    let title = format!(
        "Digest Gel Preview ({} lane(s), {} band(s))",
        lanes.len(),
        bands.len()
    );
    doc = doc.add(
        Text::new(title)
            .set("x", gel_left)
            .set("y", 42.0)
            .set("font-family", "monospace")
            .set("font-size", 16)
            .set("fill", "#0f172a"),
    );

    doc.to_string()
}
