use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Line};

const SIZE: i32 = 64;
const STROKE: &str = "#d03030";
const STROKE_WIDTH: i32 = 4;

/// Render the marker icon: a crosshair made of a ring, four ticks and a
/// center dot.
pub fn render_crosshair_icon(path: &Path) -> Result<()> {
    let c = SIZE / 2;
    let ring_radius = SIZE * 5 / 16;
    let tick = SIZE / 8;

    let document = Document::new()
        .set("viewBox", (0, 0, SIZE, SIZE))
        .set("width", SIZE)
        .set("height", SIZE)
        .add(
            Circle::new()
                .set("cx", c)
                .set("cy", c)
                .set("r", ring_radius)
                .set("fill", "none")
                .set("stroke", STROKE)
                .set("stroke-width", STROKE_WIDTH),
        )
        .add(tick_line(c, 0, c, tick))
        .add(tick_line(c, SIZE - tick, c, SIZE))
        .add(tick_line(0, c, tick, c))
        .add(tick_line(SIZE - tick, c, SIZE, c))
        .add(
            Circle::new()
                .set("cx", c)
                .set("cy", c)
                .set("r", STROKE_WIDTH / 2)
                .set("fill", STROKE),
        );

    svg::save(path, &document)
        .with_context(|| format!("Failed to write icon file: {}", path.display()))?;
    debug!("icon written to {}", path.display());

    Ok(())
}

fn tick_line(x1: i32, y1: i32, x2: i32, y2: i32) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", STROKE)
        .set("stroke-width", STROKE_WIDTH)
}
