//! Main application state and UI
//!
//! Wires the design store, compositor, and editor view into an egui window.
//! Every mutation flows through the design's API; the app polls the design
//! revision once per frame and refreshes both the editor canvas and the
//! texture preview from the same signal, so the two views cannot drift.

#![allow(dead_code)]

use crate::compose::{Compositor, TextureSink};
use crate::design::{Design, LayerTransform, UploadError, UploadEvent, UploadQueue};
use crate::editor::{CanvasFit, EditorView};
use crate::project::DesignPreset;
use crate::template::UvTemplate;
use crate::ui::{EditorCanvas, LayerPanel, PreviewMonitor, TransformPanel};
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;

/// File extensions offered in the image picker.
const IMAGE_FILTERS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tga"];

/// Main application state
pub struct GarmentStudioApp {
    // Core components
    pub design: Design,
    pub template: UvTemplate,
    pub compositor: Compositor,
    pub editor_view: EditorView,
    uploads: UploadQueue,
    template_path: Option<PathBuf>,
    /// Uploads submitted but not yet completed
    in_flight: usize,
    /// Saved layer state to re-apply when a preset-driven decode lands,
    /// keyed by upload sequence number
    pending_restores: HashMap<u64, (LayerTransform, bool)>,

    // UI panels
    layer_panel: LayerPanel,
    transform_panel: TransformPanel,
    editor_canvas: EditorCanvas,
    preview: PreviewMonitor,

    // Refresh tracking
    last_revision: Option<u64>,
    last_fit: Option<CanvasFit>,
    last_wireframe: bool,
    status: String,
}

impl GarmentStudioApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>, template_path: Option<PathBuf>) -> Self {
        log::info!("Initializing Garment Studio...");

        let (template, template_path) = match template_path {
            Some(path) => match UvTemplate::load(&path) {
                Ok(template) => (template, Some(path)),
                Err(e) => {
                    log::warn!("Failed to load template {:?}: {}; using placeholder", path, e);
                    (UvTemplate::placeholder(1024, 1024), None)
                }
            },
            None => {
                log::info!("No template given; using placeholder atlas");
                (UvTemplate::placeholder(1024, 1024), None)
            }
        };

        Self {
            design: Design::new(),
            template,
            compositor: Compositor::new(),
            editor_view: EditorView::new(),
            uploads: UploadQueue::new(),
            template_path,
            in_flight: 0,
            pending_restores: HashMap::new(),

            layer_panel: LayerPanel::new(),
            transform_panel: TransformPanel::new(),
            editor_canvas: EditorCanvas::new(),
            preview: PreviewMonitor::new(),

            last_revision: None,
            last_fit: None,
            last_wireframe: false,
            status: "Drop an image onto the window to start".to_string(),
        }
    }

    /// Queue an image file for upload
    pub fn submit_upload(&mut self, path: PathBuf) {
        match self.uploads.submit(path) {
            Ok(seq) => {
                self.in_flight += 1;
                log::debug!("Queued upload #{}", seq);
            }
            Err(UploadError::UnsupportedFile(path)) => {
                self.status = format!("Not an image file: {:?}", path.file_name().unwrap_or_default());
            }
            Err(e) => {
                log::error!("Upload failed: {}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Drain decode completions into the design
    fn drain_uploads(&mut self) {
        for event in self.uploads.poll_events() {
            self.in_flight = self.in_flight.saturating_sub(1);
            match event {
                UploadEvent::Decoded { seq, path, image } => {
                    let index = self.design.add_layer(image, &path);
                    if let Some((transform, visible)) = self.pending_restores.remove(&seq) {
                        let _ = self.design.set_transform(index, transform.into());
                        let _ = self.design.set_visibility(index, visible);
                    }
                    self.status = format!(
                        "Added layer '{}'",
                        self.design.layer(index).map(|l| l.name()).unwrap_or_default()
                    );
                }
                UploadEvent::Failed { seq, path, error } => {
                    self.pending_restores.remove(&seq);
                    self.status = format!(
                        "Could not decode {:?}: {}",
                        path.file_name().unwrap_or_default(),
                        error
                    );
                }
            }
        }
    }

    /// Accept files dropped onto the window
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            self.submit_upload(path);
        }
    }

    /// Save the current design as a JSON preset
    fn save_design(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Design preset", &["json"])
            .save_file()
        else {
            return;
        };
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Design")
            .to_string();
        let preset = DesignPreset::from_design(name, &self.design, self.template_path.clone());
        match preset.save(&path) {
            Ok(()) => self.status = format!("Saved design to {:?}", path),
            Err(e) => {
                log::error!("Failed to save design: {}", e);
                self.status = format!("Save failed: {}", e);
            }
        }
    }

    /// Load a JSON preset, replacing the current design
    fn load_design(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Design preset", &["json"])
            .pick_file()
        else {
            return;
        };
        match DesignPreset::load(&path) {
            Ok(preset) => self.apply_preset(preset),
            Err(e) => {
                log::error!("Failed to load design: {}", e);
                self.status = format!("Load failed: {}", e);
            }
        }
    }

    /// Apply a loaded preset: session state now, layers as they decode
    fn apply_preset(&mut self, preset: DesignPreset) {
        self.design.clear();
        self.pending_restores.clear();
        preset.apply_session(&mut self.design);

        if let Some(path) = &preset.template {
            match UvTemplate::load(path) {
                Ok(template) => {
                    self.template = template;
                    self.template_path = Some(path.clone());
                }
                Err(e) => log::warn!("Preset template {:?} unavailable: {}", path, e),
            }
        }

        for layer in &preset.layers {
            match self.uploads.submit(layer.source.clone()) {
                Ok(seq) => {
                    self.in_flight += 1;
                    self.pending_restores
                        .insert(seq, (layer.transform, layer.visible));
                }
                Err(e) => log::warn!("Skipping saved layer {:?}: {}", layer.source, e),
            }
        }
        self.status = format!("Loading design '{}'", preset.name);
    }

    /// Re-render the editor canvas and recomposite the texture when the
    /// design (or the canvas geometry) changed since the last frame.
    fn refresh_views(&mut self, ctx: &egui::Context, fit: CanvasFit) {
        let dirty = self.last_revision != Some(self.design.revision())
            || self.last_fit != Some(fit)
            || self.last_wireframe != self.editor_view.show_wireframe;
        if !dirty {
            return;
        }

        let rendered = self.editor_view.render(&self.design, &self.template, &fit);
        self.editor_canvas.set_image(ctx, &rendered);

        let output = self.compositor.composite(&self.design, &self.template);
        self.preview.submit(&output);

        self.last_revision = Some(self.design.revision());
        self.last_fit = Some(fit);
        self.last_wireframe = self.editor_view.show_wireframe;
    }

    /// Show the top menu bar
    fn show_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Add image…").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", IMAGE_FILTERS)
                            .pick_file()
                        {
                            self.submit_upload(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save design…").clicked() {
                        self.save_design();
                        ui.close_menu();
                    }
                    if ui.button("Load design…").clicked() {
                        self.load_design();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Clear layers").clicked() {
                        self.design.clear();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.editor_view.show_wireframe, "UV wireframe");
                });
            });
        });
    }
}

impl eframe::App for GarmentStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_uploads();
        self.handle_dropped_files(ctx);

        self.show_menu(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "atlas {}×{}",
                        self.template.width(),
                        self.template.height()
                    ));
                });
            });
        });

        egui::SidePanel::left("layers")
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.layer_panel.show(ui, &mut self.design);
                    ui.add_space(12.0);
                    self.transform_panel.show(ui, &mut self.design);
                });
            });

        egui::SidePanel::right("preview")
            .default_width(320.0)
            .show(ctx, |ui| {
                self.preview.show(ui, self.design.len());
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let fit = CanvasFit::compute(
                available.x,
                available.y,
                self.template.width(),
                self.template.height(),
            );
            self.refresh_views(ui.ctx(), fit);
            ui.vertical_centered(|ui| {
                self.editor_canvas.show(ui, &mut self.design, &fit);
            });
        });

        // Keep polling while decodes are in flight.
        if self.in_flight > 0 {
            ctx.request_repaint();
        }
    }
}
