//! Control panel with rotation, slice and frame sliders.
//!
//! Only compiled with the `egui` feature. Every slider writes through the
//! [`Visualizer`] setters, so panel edits schedule repaints and rotation
//! notifications exactly like mouse input does.

use crate::view::{Axis, SliceBound, FULL_TURN, SLICE_RESOLUTION};
use crate::visualizer::Visualizer;

/// Frame selection shown by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameControl {
    pub current: usize,
    pub count: usize,
}

/// Draw the control panel. Returns the frame index the user picked, if it
/// differs from `frames.current`.
pub fn control_panel(
    ctx: &egui::Context,
    vis: &mut Visualizer,
    frames: FrameControl,
) -> Option<usize> {
    let mut picked = None;

    egui::SidePanel::right("controls")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("View");
            for axis in Axis::ALL {
                let mut angle = vis.view().rotation(axis);
                let slider = egui::Slider::new(&mut angle, 0..=FULL_TURN - 1)
                    .step_by(16.0)
                    .custom_formatter(|v, _| format!("{:.0}°", v / 16.0))
                    .text(axis.label());
                if ui.add(slider).changed() {
                    vis.set_rotation(axis, angle);
                }
            }

            ui.separator();
            ui.heading("Slices");
            for axis in Axis::ALL {
                ui.label(format!("{} span", axis.label()));
                for (bound, name) in [(SliceBound::Low, "low"), (SliceBound::High, "high")] {
                    let mut value = vis.view().slice(axis, bound);
                    let slider = egui::Slider::new(&mut value, 0..=SLICE_RESOLUTION).text(name);
                    if ui.add(slider).changed() {
                        vis.set_slice(axis, bound, value);
                    }
                }
            }

            if frames.count > 1 {
                ui.separator();
                ui.heading("Animation");
                let mut index = frames.current;
                let slider = egui::Slider::new(&mut index, 0..=frames.count - 1)
                    .custom_formatter(|v, _| format!("{}", v as usize + 1))
                    .text(format!("of {}", frames.count));
                if ui.add(slider).changed() && index != frames.current {
                    picked = Some(index);
                }
            }

            if let Some(stats) = vis.stats() {
                ui.separator();
                ui.label(format!(
                    "Grid {} x {} x {}",
                    stats.extent.x, stats.extent.y, stats.extent.z
                ));
            }
        });

    picked
}
