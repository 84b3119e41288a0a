use crate::capture_record::{format_captured_at, CaptureRecord};
use crate::device_display::interface::{
    CameraStatus, DeviceDisplay, ScanScreen, CAMERA_REQUIRED_MESSAGE,
};
use crate::disease_db::{self, Disease, DANGERS_NOTE, TREATMENT_NOTE};
use crate::log_store::LogStoreHandle;
use crate::scanner::core::Msg;
use eframe::egui;
use egui::load::SizedTexture;
use image::DynamicImage;
use std::collections::HashMap;
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone, Default)]
struct SharedScreen {
    screen: Arc<Mutex<Option<ScanScreen>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

/// Hands screens to a `ScanWindow` running on the UI thread.
pub struct DeviceDisplayGui {
    shared: SharedScreen,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            shared: SharedScreen::default(),
        }
    }

    pub fn window(
        &self,
        log_store: LogStoreHandle,
        commands: Sender<Msg>,
        timezone: chrono::FixedOffset,
    ) -> ScanWindow {
        ScanWindow {
            shared: self.shared.clone(),
            log_store,
            commands,
            timezone,
            tab: Tab::Scan,
            preview: None,
            thumbnails: HashMap::new(),
            selected_record: None,
            selected_disease: None,
        }
    }
}

impl Default for DeviceDisplayGui {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn show(&mut self, screen: &ScanScreen) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self
            .shared
            .screen
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(screen.clone());

        if let Some(ctx) = self
            .shared
            .context
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            ctx.request_repaint();
        }

        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Database,
    Scan,
    Log,
}

pub struct ScanWindow {
    shared: SharedScreen,
    log_store: LogStoreHandle,
    commands: Sender<Msg>,
    timezone: chrono::FixedOffset,
    tab: Tab,
    preview: Option<(u64, egui::TextureHandle)>,
    thumbnails: HashMap<Uuid, egui::TextureHandle>,
    selected_record: Option<Uuid>,
    selected_disease: Option<&'static str>,
}

impl ScanWindow {
    /// Blocks until the window is closed. Must be called from the main thread.
    pub fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([420.0, 780.0])
                .with_min_inner_size([320.0, 480.0]),
            ..Default::default()
        };

        eframe::run_native("Skin Scan", options, Box::new(|_cc| Box::new(self)))
            .map_err(|e| e.to_string().into())
    }

    fn scan_tab(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, screen: Option<&ScanScreen>) {
        ui.heading("Scan");

        let screen = match screen {
            Some(screen) => screen,
            None => {
                ui.spinner();
                return;
            }
        };

        match &screen.camera_status {
            CameraStatus::Unavailable(reason) => {
                ui.add_space(20.0);
                ui.label(CAMERA_REQUIRED_MESSAGE);
                ui.label(egui::RichText::new(reason).weak());
                return;
            }
            CameraStatus::Connecting if screen.preview.is_none() => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Camera connecting...");
                });
            }
            _ => {}
        }

        if let Some(frame) = &screen.preview {
            let texture = self.preview_texture(ctx, screen.frame_number, frame.image());
            ui.add(egui::Image::from_texture(texture).max_height(400.0));
        }

        ui.add_space(20.0);
        ui.label(
            egui::RichText::new(&screen.prediction_text)
                .heading()
                .color(egui::Color32::LIGHT_BLUE),
        );
        ui.label(egui::RichText::new(screen.status_line()).small().weak());

        ui.add_space(20.0);
        let take_photo = egui::Button::new(egui::RichText::new("Take Photo").size(18.0));
        if ui.add_enabled(screen.preview.is_some(), take_photo).clicked() {
            let _ = self.commands.send(Msg::CaptureRequested);
        }
    }

    fn log_tab(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        if let Some(record) = self.selected_record.and_then(|id| self.log_store.get(id)) {
            if ui.button("< Photo Log").clicked() {
                self.selected_record = None;
            }
            self.record_detail(ctx, ui, &record);
            return;
        }

        ui.heading("Photo Log");

        let records = self.log_store.all();
        if records.is_empty() {
            ui.label("No scans yet.");
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for record in &records {
                ui.horizontal(|ui| {
                    let thumbnail = self.thumbnail(ctx, record);
                    ui.add(egui::Image::from_texture(thumbnail).max_height(100.0));

                    ui.vertical(|ui| {
                        ui.label(format!(
                            "Date: {}",
                            format_captured_at(record.captured_at(), self.timezone)
                        ));
                        ui.label(
                            egui::RichText::new(format!("Prediction: {}", record.prediction()))
                                .color(egui::Color32::RED),
                        );
                        if ui.button("Details").clicked() {
                            self.selected_record = Some(record.id());
                        }
                    });
                });
                ui.separator();
            }
        });
    }

    fn record_detail(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, record: &CaptureRecord) {
        let texture = self.thumbnail(ctx, record);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Photo Detail");
            ui.add(egui::Image::from_texture(texture).max_height(320.0));
            ui.label(
                egui::RichText::new(format!(
                    "Date: {}",
                    format_captured_at(record.captured_at(), self.timezone)
                ))
                .strong(),
            );
            ui.label(
                egui::RichText::new(format!("Prediction: {}", record.prediction()))
                    .strong()
                    .color(egui::Color32::RED),
            );

            if let Some(disease) = disease_db::find_for_prediction(record.prediction()) {
                ui.separator();
                ui.label(disease.description);
                if ui.link(format!("Read more about {}", disease.name)).clicked() {
                    self.selected_disease = Some(disease.name);
                    self.tab = Tab::Database;
                }
            }
        });
    }

    fn database_tab(&mut self, ui: &mut egui::Ui) {
        if let Some(disease) = self.selected_disease.and_then(disease_db::find_by_name) {
            if ui.button("< Disease Database").clicked() {
                self.selected_disease = None;
            }
            disease_detail(ui, disease);
            return;
        }

        ui.heading("Disease Database");

        egui::ScrollArea::vertical().show(ui, |ui| {
            for disease in disease_db::all() {
                ui.add_space(8.0);
                if ui.link(egui::RichText::new(disease.name).strong()).clicked() {
                    self.selected_disease = Some(disease.name);
                }
                ui.label(egui::RichText::new(disease.description).weak());
                ui.separator();
            }
        });
    }

    fn preview_texture(
        &mut self,
        ctx: &egui::Context,
        frame_number: u64,
        image: &DynamicImage,
    ) -> SizedTexture {
        if let Some((number, texture)) = self.preview.as_mut() {
            if *number != frame_number {
                texture.set(to_color_image(image), egui::TextureOptions::LINEAR);
                *number = frame_number;
            }
            return SizedTexture::from_handle(texture);
        }

        let texture = ctx.load_texture(
            "preview",
            to_color_image(image),
            egui::TextureOptions::LINEAR,
        );
        let sized = SizedTexture::from_handle(&texture);
        self.preview = Some((frame_number, texture));
        sized
    }

    fn thumbnail(&mut self, ctx: &egui::Context, record: &CaptureRecord) -> SizedTexture {
        let texture = self.thumbnails.entry(record.id()).or_insert_with(|| {
            ctx.load_texture(
                format!("record-{}", record.id()),
                to_color_image(record.image()),
                egui::TextureOptions::LINEAR,
            )
        });
        SizedTexture::from_handle(texture)
    }
}

impl eframe::App for ScanWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        {
            let mut context = self
                .shared
                .context
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if context.is_none() {
                *context = Some(ctx.clone());
            }
        }

        let screen = self
            .shared
            .screen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        egui::TopBottomPanel::bottom("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Database, "Database");
                ui.selectable_value(&mut self.tab, Tab::Scan, "Scan");
                ui.selectable_value(&mut self.tab, Tab::Log, "Log");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Database => self.database_tab(ui),
            Tab::Scan => self.scan_tab(ctx, ui, screen.as_ref()),
            Tab::Log => self.log_tab(ctx, ui),
        });

        // the log fills in from the runtime thread
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

fn disease_detail(ui: &mut egui::Ui, disease: &Disease) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading(disease.name);
        ui.label(egui::RichText::new(disease.description).weak());
        ui.separator();

        ui.label(egui::RichText::new("How to Identify").strong().size(18.0));
        for line in disease.detail.lines() {
            ui.label(format!("• {}", line));
        }
        ui.separator();

        ui.label(egui::RichText::new("Treatment").strong().size(18.0));
        ui.label(TREATMENT_NOTE);
        ui.separator();

        ui.label(egui::RichText::new("Dangers").strong().size(18.0));
        ui.label(DANGERS_NOTE);
    });
}

fn to_color_image(image: &DynamicImage) -> egui::ColorImage {
    let rgba = image.to_rgba8();
    egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw(),
    )
}
