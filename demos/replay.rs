//! Replays a few cars around a synthetic circuit.
//!
//! Scroll over the track to zoom, drag it with the left button to pan, and
//! resize the window to watch the layout follow.
//!
//! ```sh
//! RUST_LOG=pitwall=debug cargo run --example replay
//! ```

use std::f32::consts::TAU;

use pitwall::prelude::*;
use tracing_subscriber::EnvFilter;

const TOTAL_LAPS: u32 = 57;
const TRACK_SAMPLES: usize = 600;

const DRIVERS: [(&str, (u8, u8, u8), f32); 5] = [
    ("VER", (30, 65, 255), 0.071),
    ("LEC", (220, 0, 0), 0.070),
    ("NOR", (255, 135, 0), 0.069),
    ("HAM", (0, 210, 190), 0.068),
    ("ALO", (0, 110, 70), 0.066),
];

fn window_conf() -> Conf {
    Conf {
        window_title: "pitwall replay".to_owned(),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        ..Default::default()
    }
}

/// A wobbly closed loop in circuit coordinates (decimeters, like timing data).
fn synthetic_track() -> Vec<Vector2> {
    (0..=TRACK_SAMPLES)
        .map(|i| {
            let t = i as f32 / TRACK_SAMPLES as f32 * TAU;
            let radius = 4000.0 + 900.0 * (3.0 * t).sin();
            Vector2::new(radius * t.cos() + 500.0 * (2.0 * t).sin(), radius * t.sin() * 0.6)
        })
        .collect()
}

/// Maps a circuit point into a box of `size`, the way a fit-to-box polyline
/// maps its points.
fn to_box(point: Vector2, extent: BoundingBox, size: Dimensions) -> Vector2 {
    Vector2::new(
        (point.x - extent.x) / extent.width * size.width,
        (point.y - extent.y) / extent.height * size.height,
    )
}

struct Car {
    marker: NodeId,
    label: NodeId,
    code: &'static str,
    pace: f32,
}

async fn run() -> pitwall::Result<()> {
    let mut stage = Stage::new(EngineConfig::default(), MacroquadMeasurer::default())?;
    let fonts = FontSet::new();

    let circuit = synthetic_track();
    let extent = BoundingBox::enclosing(&circuit)
        .ok_or_else(|| Error::InvalidConfig("empty circuit".to_owned()))?;

    let track_bounds = stage.margin_bounds(Margin::fraction(0.05, 0.05, 0.03, 0.3));
    let track = stage.add_container(
        None,
        ContainerConfig::from(track_bounds)
            .anchor(TopLeft)
            .name("track")
            .background(Color::u_rgb(20, 20, 28))
            .zoomable(true)
            .scrollable(true, true),
    )?;
    stage.add_polyline(
        Some(track),
        NodeConfig::fill().anchor(TopLeft),
        Polyline::new(circuit.iter().copied())
            .mapping(PointMapping::FitToBox)
            .color(Color::GRAY)
            .thickness(6.0),
    )?;

    let hud_bounds = stage.margin_bounds(Margin::fraction(0.05, 0.05, 0.72, 0.03));
    let hud = stage.add_container(
        None,
        ContainerConfig::from(hud_bounds)
            .anchor(TopRight)
            .name("hud")
            .background(Color::u_rgb(12, 12, 16))
            .border(Color::u_rgb(60, 60, 70))
            .overflow(true),
    )?;
    let lap = stage.add_text(
        Some(hud),
        NodeConfig::at(20.0, 20.0).anchor(TopLeft),
        TextObject::new("LAP 1/57").font_size(28).color(Color::WHITE),
    )?;

    let track_size = track_bounds.dimensions();
    let mut cars = Vec::with_capacity(DRIVERS.len());
    for (row, (code, color, pace)) in DRIVERS.into_iter().enumerate() {
        let marker = stage.add_shape(
            Some(track),
            NodeConfig::fill().anchor(TopLeft),
            Shape::circle(to_box(circuit[0], extent, track_size), 8.0, color),
        )?;
        let label = stage.add_text(
            Some(hud),
            NodeConfig::at(20.0, 80.0 + row as f32 * 34.0).anchor(TopLeft),
            TextObject::new(code).font_size(22).color(color),
        )?;
        cars.push(Car { marker, label, code, pace });
    }
    stage.add_texture(
        Some(hud),
        NodeConfig::at(0.0, hud_bounds.height - 90.0).anchor(TopLeft),
        TextureObject::new(Asset::Path("assets/pitwall.png")).size(TextureSize::Auto, 90.0),
    )?;

    let mut input = InputState::new();
    let mut elapsed = 0.0;
    loop {
        input.poll(&mut stage);
        elapsed += get_frame_time();

        let leader_laps = elapsed * cars[0].pace;
        let current_lap = (leader_laps as u32 + 1).min(TOTAL_LAPS);
        stage.update_text(lap, &format!("LAP {current_lap}/{TOTAL_LAPS}"))?;

        for car in &cars {
            let progress = (elapsed * car.pace).fract();
            let index = ((progress * TRACK_SAMPLES as f32) as usize).min(TRACK_SAMPLES);
            stage.move_shape(car.marker, to_box(circuit[index], extent, track_size))?;
            let gap = (leader_laps - elapsed * car.pace) / car.pace;
            let text = if gap <= 0.0 {
                car.code.to_owned()
            } else {
                format!("{}  +{gap:.1}", car.code)
            };
            stage.update_text(car.label, &text)?;
        }

        clear_background(BLACK);
        let commands = stage.draw();
        render(&commands, &fonts).await;
        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pitwall=info")))
        .init();

    if let Err(error) = run().await {
        tracing::error!(%error, "replay stopped");
    }
}
