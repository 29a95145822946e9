//! Interactive viewer state and UI

use eframe::egui;
use tracing::{info, warn};

use motif_mark::config::{load_params, load_results, save_params, save_results};
use motif_mark::render::{write_svg, DiagramLayout, MotifPalette, EXON_LABEL};
use motif_mark::{
    parse_fasta, parse_motif_list, run_scan, MarkParams, MotifSet, Rgb, ScanResults, SequenceSet,
};

/// Application state
pub struct MotifMarkApp {
    // Input tab state - sequences
    fasta_input: String,
    fasta_data: Option<SequenceSet>,
    fasta_error: Option<String>,

    // Input tab state - motifs
    motif_input: String,
    motif_data: Option<MotifSet>,
    motif_error: Option<String>,

    params: MarkParams,

    // Results state
    results: Option<ScanResults>,
    scan_error: Option<String>,

    // View state
    current_tab: Tab,
    zoom_level: f32,
    show_exons: bool,

    // Save/Load
    file_error: Option<String>,
    file_status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Input,
    Diagram,
}

impl MotifMarkApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, params: MarkParams) -> Self {
        Self {
            fasta_input: String::new(),
            fasta_data: None,
            fasta_error: None,
            motif_input: String::new(),
            motif_data: None,
            motif_error: None,
            params,
            results: None,
            scan_error: None,
            current_tab: Tab::Input,
            zoom_level: 1.0,
            show_exons: true,
            file_error: None,
            file_status: None,
        }
    }

    fn parse_fasta_input(&mut self) {
        self.fasta_error = None;
        self.fasta_data = None;

        if self.fasta_input.trim().is_empty() {
            return;
        }

        match parse_fasta(&self.fasta_input) {
            Ok(data) => self.fasta_data = Some(data),
            Err(e) => self.fasta_error = Some(e.to_string()),
        }
    }

    fn parse_motif_input(&mut self) {
        self.motif_error = None;
        self.motif_data = None;

        if self.motif_input.trim().is_empty() {
            return;
        }

        let expanded = parse_motif_list(&self.motif_input)
            .and_then(|motifs| MotifSet::expand(&motifs, &self.params.scan));
        match expanded {
            Ok(data) => self.motif_data = Some(data),
            Err(e) => self.motif_error = Some(e.to_string()),
        }
    }

    fn start_scan(&mut self) {
        let Some(sequences) = &self.fasta_data else {
            return;
        };
        let Some(motifs) = &self.motif_data else {
            return;
        };

        match run_scan(sequences, motifs, &self.params.scan) {
            Ok(results) => {
                info!(records = results.scans.len(), "scan finished");
                self.results = Some(results);
                self.scan_error = None;
                self.current_tab = Tab::Diagram;
            }
            Err(e) => {
                warn!("scan failed: {}", e);
                self.scan_error = Some(e.to_string());
            }
        }
    }

    fn export_svg(&mut self) {
        let Some(results) = &self.results else {
            self.file_error = Some("No diagram to export".to_string());
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("motifs.svg")
            .save_file()
        {
            match write_svg(&path, results, &self.params.render) {
                Ok(()) => {
                    self.file_error = None;
                    self.file_status = Some(format!("Exported {}", path.display()));
                }
                Err(e) => self.file_error = Some(e.to_string()),
            }
        }
    }

    fn save_results(&mut self) {
        let Some(results) = &self.results else {
            self.file_error = Some("No results to save".to_string());
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("motif_results.json")
            .save_file()
        {
            match save_results(&path, results) {
                Ok(()) => {
                    self.file_error = None;
                    self.file_status = Some(format!("Saved {}", path.display()));
                }
                Err(e) => self.file_error = Some(e.to_string()),
            }
        }
    }

    fn load_results(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match load_results(&path) {
                Ok(results) => {
                    self.results = Some(results);
                    self.file_error = None;
                    self.current_tab = Tab::Diagram;
                }
                Err(e) => self.file_error = Some(e.to_string()),
            }
        }
    }

    fn save_settings(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("motif_mark.json")
            .save_file()
        {
            match save_params(&path, &self.params) {
                Ok(()) => {
                    self.file_error = None;
                    self.file_status = Some(format!("Saved settings to {}", path.display()));
                }
                Err(e) => self.file_error = Some(e.to_string()),
            }
        }
    }

    fn load_settings(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match load_params(&path) {
                Ok(params) => {
                    self.params = params;
                    self.file_error = None;
                    self.file_status = Some(format!("Loaded settings from {}", path.display()));
                    // U expansion may have changed
                    self.parse_motif_input();
                }
                Err(e) => self.file_error = Some(e.to_string()),
            }
        }
    }

    fn load_fasta_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("FASTA", &["fasta", "fa", "fna", "fas", "txt"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    self.fasta_input = content;
                    self.parse_fasta_input();
                }
                Err(e) => {
                    self.fasta_error = Some(format!("Failed to read file: {}", e));
                }
            }
        }
    }

    fn load_motif_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Motifs", &["txt", "motifs"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    self.motif_input = content;
                    self.parse_motif_input();
                }
                Err(e) => {
                    self.motif_error = Some(format!("Failed to read file: {}", e));
                }
            }
        }
    }
}

impl eframe::App for MotifMarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load FASTA...").clicked() {
                        self.load_fasta_file();
                        ui.close_menu();
                    }
                    if ui.button("Load Motifs...").clicked() {
                        self.load_motif_file();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export SVG...").clicked() {
                        self.export_svg();
                        ui.close_menu();
                    }
                    if ui.button("Load Results...").clicked() {
                        self.load_results();
                        ui.close_menu();
                    }
                    if ui.button("Save Results...").clicked() {
                        self.save_results();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Load Settings...").clicked() {
                        self.load_settings();
                        ui.close_menu();
                    }
                    if ui.button("Save Settings...").clicked() {
                        self.save_settings();
                        ui.close_menu();
                    }
                });
            });
        });

        // Tab bar
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Input, "Input Data");
                ui.selectable_value(&mut self.current_tab, Tab::Diagram, "Diagram");
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(ref error) = self.file_error {
                    ui.colored_label(egui::Color32::RED, error);
                } else if let Some(ref status) = self.file_status {
                    ui.label(status);
                } else if let Some(ref results) = self.results {
                    let hits: usize = results
                        .scans
                        .iter()
                        .map(|s| s.occurrences.total_occurrences())
                        .sum();
                    ui.label(format!(
                        "Results: {} sequences, {} motifs, {} occurrences",
                        results.scans.len(),
                        results.motifs.len(),
                        hits
                    ));
                } else {
                    ui.label("Load sequences and motifs to begin");
                }
            });
        });

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Input => self.show_input_tab(ui),
            Tab::Diagram => self.show_diagram_tab(ui),
        });
    }
}

impl MotifMarkApp {
    fn show_input_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Input Data");
        ui.separator();

        let available_height = ui.available_height();
        let panel_height = (available_height / 2.0 - 80.0).max(120.0);

        // --- Sequences ---
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("Sequences");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear").clicked() {
                        self.fasta_input.clear();
                        self.fasta_data = None;
                        self.fasta_error = None;
                    }
                    if ui.button("Load File").clicked() {
                        self.load_fasta_file();
                    }
                    if ui.button("Load Example").clicked() {
                        self.fasta_input = EXAMPLE_FASTA.to_string();
                        self.parse_fasta_input();
                    }
                });
            });

            ui.label("FASTA records, exons in UPPERCASE and introns in lowercase:");

            egui::ScrollArea::vertical()
                .id_salt("fasta_scroll")
                .max_height(panel_height)
                .show(ui, |ui| {
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.fasta_input)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(6),
                    );
                    if response.changed() {
                        self.parse_fasta_input();
                    }
                });

            if let Some(ref error) = self.fasta_error {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", error));
            }
            if let Some(ref data) = self.fasta_data {
                let min_len = data.iter().map(|r| r.sequence.len()).min().unwrap_or(0);
                let max_len = data.iter().map(|r| r.sequence.len()).max().unwrap_or(0);
                ui.colored_label(
                    egui::Color32::from_rgb(100, 200, 100),
                    format!("{} sequences ({}-{} bp)", data.len(), min_len, max_len),
                );
            }
        });

        ui.add_space(5.0);

        // --- Motifs ---
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("Motifs");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear").clicked() {
                        self.motif_input.clear();
                        self.motif_data = None;
                        self.motif_error = None;
                    }
                    if ui.button("Load File").clicked() {
                        self.load_motif_file();
                    }
                    if ui.button("Load Example").clicked() {
                        self.motif_input = EXAMPLE_MOTIFS.to_string();
                        self.parse_motif_input();
                    }
                });
            });

            ui.label("One IUPAC motif per line:");

            egui::ScrollArea::vertical()
                .id_salt("motif_scroll")
                .max_height(panel_height / 2.0)
                .show(ui, |ui| {
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.motif_input)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(4),
                    );
                    if response.changed() {
                        self.parse_motif_input();
                    }
                });

            if ui
                .checkbox(&mut self.params.scan.u_matches_t, "Match U in motifs against T")
                .changed()
            {
                self.parse_motif_input();
            }

            if let Some(ref error) = self.motif_error {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", error));
            }
            if let Some(ref data) = self.motif_data {
                let variants: usize = data.iter().map(|m| m.variants.len()).sum();
                ui.colored_label(
                    egui::Color32::from_rgb(100, 200, 100),
                    format!("{} motifs ({} literal variants)", data.len(), variants),
                );
            }
        });

        ui.add_space(10.0);

        let ready = self.fasta_data.is_some() && self.motif_data.is_some();
        ui.add_enabled_ui(ready, |ui| {
            if ui.button("Scan Sequences").clicked() {
                self.start_scan();
            }
        });
        if let Some(ref error) = self.scan_error {
            ui.colored_label(egui::Color32::RED, error);
        }
    }

    fn show_diagram_tab(&mut self, ui: &mut egui::Ui) {
        if self.results.is_none() {
            ui.colored_label(
                egui::Color32::YELLOW,
                "No results yet. Load inputs and run a scan in the Input tab.",
            );
            return;
        }

        ui.horizontal(|ui| {
            ui.add(egui::Slider::new(&mut self.zoom_level, 0.25..=4.0).text("Zoom"));
            ui.checkbox(&mut self.show_exons, "Shade exons");
            if ui.button("Export SVG...").clicked() {
                self.export_svg();
            }
        });
        ui.separator();

        let Some(results) = self.results.as_ref() else {
            return;
        };
        let render = &self.params.render;
        let layout = DiagramLayout::new(render, results);
        let palette = MotifPalette::new(&results.motifs, &render.palette);
        let zoom = self.zoom_level;
        let (width, height) = layout.canvas_size();

        egui::ScrollArea::both()
            .id_salt("diagram_scroll")
            .show(ui, |ui| {
                let (response, painter) = ui.allocate_painter(
                    egui::vec2(width * zoom, height * zoom),
                    egui::Sense::hover(),
                );
                let origin = response.rect.min;
                let to_screen = |x: f32, y: f32| origin + egui::vec2(x * zoom, y * zoom);
                let to_rect = |x: f32, y: f32, w: f32, h: f32| {
                    egui::Rect::from_min_size(to_screen(x, y), egui::vec2(w * zoom, h * zoom))
                };
                let font = egui::FontId::proportional(render.font_size * zoom.min(1.5));

                painter.rect_filled(response.rect, 0.0, egui::Color32::WHITE);

                let mut hovered: Option<String> = None;

                for (idx, scan) in results.scans.iter().enumerate() {
                    let (name_x, name_y) = layout.name_anchor(idx);
                    painter.text(
                        to_screen(name_x, name_y),
                        egui::Align2::LEFT_BOTTOM,
                        &scan.name,
                        font.clone(),
                        egui::Color32::BLACK,
                    );

                    let track = layout.track(idx, scan.length);
                    painter.line_segment(
                        [to_screen(track.x1, track.y), to_screen(track.x2, track.y)],
                        egui::Stroke::new(render.line_width * zoom, egui::Color32::BLACK),
                    );

                    if self.show_exons && !scan.exon.is_empty() {
                        let b = layout.block(idx, scan.exon.start, scan.exon.end);
                        let rect = to_rect(b.x, b.y, b.width, b.height);
                        painter.rect_filled(rect, 0.0, fill(Rgb(0.0, 0.0, 0.0), render.exon_opacity));
                    }

                    for (motif, occurrences) in scan.occurrences.iter() {
                        let color = palette.color_for(motif).unwrap_or(Rgb(0.0, 0.0, 0.0));
                        for occ in occurrences {
                            let b = layout.block(idx, occ.start, occ.end);
                            let rect = to_rect(b.x, b.y, b.width, b.height);
                            painter.rect_filled(rect, 0.0, fill(color, render.motif_opacity));

                            if let Some(pointer) = response.hover_pos() {
                                if rect.contains(pointer) {
                                    hovered = Some(format!(
                                        "{}\n{}: {}-{}",
                                        scan.name,
                                        motif,
                                        occ.start + 1,
                                        occ.end
                                    ));
                                }
                            }
                        }
                    }
                }

                // --- Legend ---
                let swatch = layout.exon_swatch();
                painter.rect_filled(
                    to_rect(swatch.x, swatch.y, swatch.width, swatch.height),
                    0.0,
                    fill(Rgb(0.0, 0.0, 0.0), render.exon_opacity),
                );
                let (lx, ly) = layout.label_anchor(&swatch);
                painter.text(
                    to_screen(lx, ly),
                    egui::Align2::LEFT_BOTTOM,
                    EXON_LABEL,
                    font.clone(),
                    egui::Color32::BLACK,
                );

                for (idx, (motif, color)) in palette.iter().enumerate() {
                    let swatch = layout.motif_swatch(idx);
                    painter.rect_filled(
                        to_rect(swatch.x, swatch.y, swatch.width, swatch.height),
                        0.0,
                        fill(color, render.motif_opacity),
                    );
                    let (lx, ly) = layout.label_anchor(&swatch);
                    painter.text(
                        to_screen(lx, ly),
                        egui::Align2::LEFT_BOTTOM,
                        motif,
                        font.clone(),
                        egui::Color32::BLACK,
                    );
                }

                if let Some(text) = hovered {
                    response.clone().on_hover_text(text);
                }
            });
    }
}

/// Translucent fill for a palette color
fn fill(color: Rgb, opacity: f32) -> egui::Color32 {
    let [r, g, b] = color.to_rgb8();
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

const EXAMPLE_FASTA: &str = r#">INSR chr19:7150261-7150808 (reverse complement)
gtaggggcgcctcccaccatgccgtgcatgcatgtgtgctctctctgcctcatagGTGTCTTCAATGCT
CACCGCTGCATCTGCAGCTTTTCAGCCAGCCTTTGTGgtaggacgtaggttggcatgcagcctag
>MBNL chr3:152446461-152447003
ctgcctcatatgtaacttttgtcccttttcttttgaagATGCATcagtcgcatgctagaaaacatgttt
ccaaagtgatgtttgcatcag
>ATP2A1 chr16:28903467-28904089
ccgcctctctctcctcccaagTTTGAGCAGGCGCCCGAGCTCTACTCCATCAGCgtgaggcagcccagg
"#;

const EXAMPLE_MOTIFS: &str = r#"ygcy
GCAUG
catag
YYYYYYYYYY
"#;
