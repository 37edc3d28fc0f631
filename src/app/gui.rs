use crate::app::App;
use crate::config::{Compression, CropMode};
use crate::utils::LogLevel;
use egui::{Color32, Frame, RichText, Rounding, Stroke};

const ACCENT: Color32 = Color32::from_rgb(100, 200, 250);
const MUTED: Color32 = Color32::from_rgb(200, 200, 200);

pub fn render(app: &mut App, ctx: &egui::Context) {
    let frame = Frame {
        fill: Color32::from_rgb(30, 30, 40),
        rounding: Rounding::same(10.0),
        stroke: Stroke::new(1.0, ACCENT),
        inner_margin: egui::style::Margin::same(20.0),
        ..Default::default()
    };

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        ui.heading(RichText::new("CR3 to DNG Converter").size(28.0).color(ACCENT));
        ui.add_space(20.0);

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                let button_width = 220.0;
                if ui.add_sized([button_width, 30.0], egui::Button::new("Select Source File")).clicked() {
                    app.choose_source_file();
                }
                ui.add_space(5.0);
                if ui.add_sized([button_width, 30.0], egui::Button::new("Select Source Folder")).clicked() {
                    app.choose_source_folder();
                }
                ui.add_space(5.0);
                if ui.add_sized([button_width, 30.0], egui::Button::new("Select Destination Folder")).clicked() {
                    app.choose_destination_folder();
                }

                ui.add_space(10.0);

                // source_label / dest_label
                ui.group(|ui| {
                    ui.set_width(button_width);
                    ui.label(RichText::new("Source").size(16.0).color(ACCENT));
                    ui.label(RichText::new(&app.labels.source).color(MUTED));
                    ui.add_space(5.0);
                    ui.label(RichText::new("Destination").size(16.0).color(ACCENT));
                    ui.label(RichText::new(&app.labels.dest).color(MUTED));
                });

                ui.add_space(10.0);

                let convert = egui::Button::new(RichText::new("Convert").strong());
                if ui.add_enabled_ui(app.convert_enabled, |ui| ui.add_sized([button_width, 36.0], convert)).inner.clicked() {
                    let _ = app.convert();
                }
                if app.running_launches() > 0 {
                    ui.label(RichText::new(format!("Terminals open: {}", app.running_launches())).color(Color32::YELLOW));
                }
            });

            ui.add_space(10.0);

            ui.vertical(|ui| {
                render_settings(app, ui);
            });
        });

        ui.add_space(20.0);

        // command_output_label
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Command").size(16.0).color(ACCENT));
            if app.labels.command_output.is_empty() {
                ui.label(RichText::new("Nothing launched yet").color(MUTED));
            } else {
                ui.monospace(&app.labels.command_output);
            }
        });

        ui.add_space(10.0);

        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Activity Log").size(16.0).color(ACCENT));

            egui::ScrollArea::vertical()
                .max_height(200.0)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for line in app.log.lines() {
                        let color = match line.level {
                            LogLevel::Info => Color32::WHITE,
                            LogLevel::Warning => Color32::YELLOW,
                            LogLevel::Error => Color32::RED,
                        };
                        ui.label(RichText::new(format!("[{}] {}", line.timestamp, line.message)).color(color));
                    }
                });
        });
    });
}

fn render_settings(app: &mut App, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("Conversion Settings").size(16.0).color(ACCENT));

        let options = &mut app.settings.options;

        egui::ComboBox::from_label("Compression")
            .selected_text(options.compression.as_arg())
            .show_ui(ui, |ui| {
                for compression in Compression::ALL {
                    ui.selectable_value(&mut options.compression, compression, compression.as_arg());
                }
            });
        egui::ComboBox::from_label("Crop")
            .selected_text(options.crop.as_arg())
            .show_ui(ui, |ui| {
                for crop in CropMode::ALL {
                    ui.selectable_value(&mut options.crop, crop, crop.as_arg());
                }
            });

        ui.checkbox(&mut options.embed_raw, "Embed original raw");
        ui.checkbox(&mut options.dng_preview, "Include preview");
        ui.checkbox(&mut options.dng_thumbnail, "Include thumbnail");
        ui.checkbox(&mut options.override_existing, "Override existing files");

        ui.horizontal(|ui| {
            ui.label("Artist:");
            ui.text_edit_singleline(&mut options.artist);
        });

        ui.add_space(5.0);
        ui.label(RichText::new(format!("Converter: {}", app.settings.converter)).color(MUTED));
        ui.label(RichText::new(format!("Terminal: {}", app.settings.terminal)).color(MUTED));

        ui.add_space(5.0);
        if ui.button("Save Settings").clicked() {
            app.save_settings();
        }
    });
}
