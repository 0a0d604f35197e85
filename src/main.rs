//! Demo viewer: an animated skyrmion in a thin magnetic disk.
//!
//! ```text
//! magview [--size N] [--frames N]
//! ```
//!
//! `RUST_LOG=debug` shows binds, frame selection and rotation changes.

use std::f32::consts::{PI, TAU};
use std::process::ExitCode;

use magview::{GridShape, VectorGrid, Vec3, Viewer, ViewerConfig, VolumeError};

const DEFAULT_SIZE: usize = 12;
const DEFAULT_FRAMES: usize = 36;
const LAYERS: usize = 3;

/// Saturation magnetization of the demo material, in display units.
const SATURATION: f32 = 2.0;

struct Args {
    size: usize,
    frames: usize,
}

fn parse_args() -> Args {
    let mut args = Args {
        size: DEFAULT_SIZE,
        frames: DEFAULT_FRAMES,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let target = match arg.as_str() {
            "--size" => &mut args.size,
            "--frames" => &mut args.frames,
            other => {
                log::warn!("Ignoring unknown argument {:?}", other);
                continue;
            }
        };
        match iter.next().and_then(|v| v.parse::<usize>().ok()) {
            Some(value) if value > 0 => *target = value,
            _ => log::warn!("{} expects a positive integer", arg),
        }
    }

    args
}

/// One snapshot of a Néel-type skyrmion whose helicity advances with `phase`.
/// Cells outside the disk are empty and produce no glyph.
fn skyrmion_frame(size: usize, phase: f32) -> Result<VectorGrid, VolumeError> {
    let shape = GridShape::new(size, size, LAYERS);
    let center = (size as f32 - 1.0) * 0.5;
    let disk_radius = size as f32 * 0.5;
    let core_radius = disk_radius * 0.6;

    VectorGrid::from_fn(shape, |i, j, k| {
        let dx = i as f32 - center;
        let dy = j as f32 - center;
        let r = dx.hypot(dy);
        if r > disk_radius {
            return Vec3::ZERO;
        }

        // Outer layers relax slightly further than the middle one.
        let layer_scale = 1.0 + 0.1 * (k as f32 - (LAYERS as f32 - 1.0) * 0.5).abs();
        let polar = PI * (1.0 - (r / (core_radius * layer_scale)).min(1.0));
        let azimuth = dy.atan2(dx) + phase;

        SATURATION
            * Vec3::new(
                polar.sin() * azimuth.cos(),
                polar.sin() * azimuth.sin(),
                polar.cos(),
            )
    })
}

fn main() -> ExitCode {
    env_logger::init();

    let args = parse_args();
    log::info!(
        "Generating {} frames of a {}x{}x{} grid",
        args.frames,
        args.size,
        args.size,
        LAYERS
    );

    let frames: Result<Vec<_>, _> = (0..args.frames)
        .map(|n| skyrmion_frame(args.size, TAU * n as f32 / args.frames as f32))
        .collect();
    let frames = match frames {
        Ok(frames) => frames,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = ViewerConfig::new().with_title("magview - skyrmion demo");

    match Viewer::new().with_config(config).with_frames(frames).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
