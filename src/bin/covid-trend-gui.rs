/*!
 * Desktop viewer for covid-trend - daily COVID-19 changes as a line chart
 *
 * - Pick a category (confirmed, recovered, deaths) and optionally a country
 * - Each change fetches in the background; late responses for an older
 *   selection are dropped
 * - Hover the chart for the day's value, export the chart or the data
 *
 * Platform support: Windows, macOS, Linux
 */

use eframe::egui;
use std::sync::mpsc;
use std::thread;

use covid_trend::viz::{self, Chart};
use covid_trend::{Category, ChartOptions, Client, DeltaSeries, GraphState, LineGraph, Query, Ticket};
use covid_trend::{graph, storage};

type FetchResult = (Ticket, covid_trend::Result<DeltaSeries>);

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([500.0, 360.0])
            .with_title("COVID-19 daily changes - covid-trend"),
        ..Default::default()
    };

    eframe::run_native(
        "covid-trend",
        options,
        Box::new(|cc| Ok(Box::new(TrendApp::new(cc.egui_ctx.clone())))),
    )
}

struct TrendApp {
    graph: LineGraph,
    country: String,
    last_days: u32,

    chart: Option<Chart>,
    texture: Option<egui::TextureHandle>,
    texture_px: [usize; 2],

    status_message: String,
    error_message: String,

    ctx: egui::Context,
    sender: mpsc::Sender<FetchResult>,
    receiver: mpsc::Receiver<FetchResult>,
}

impl TrendApp {
    fn new(ctx: egui::Context) -> Self {
        let (sender, receiver) = mpsc::channel();
        let mut app = Self {
            graph: LineGraph::new(Category::Confirmed),
            country: String::new(),
            last_days: 120,
            chart: None,
            texture: None,
            texture_px: [0, 0],
            status_message: String::new(),
            error_message: String::new(),
            ctx,
            sender,
            receiver,
        };
        let ticket = app.graph.mount();
        app.spawn_fetch(ticket);
        app
    }

    fn query(&self) -> Query {
        let country = self.country.trim();
        Query {
            country: (!country.is_empty()).then(|| country.to_string()),
            last_days: self.last_days,
        }
    }

    fn spawn_fetch(&mut self, ticket: Ticket) {
        self.status_message.clear();
        self.error_message.clear();

        let query = self.query();
        let sender = self.sender.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let result =
                Client::new().and_then(|client| graph::load(&client, &query, ticket.category));
            let _ = sender.send((ticket, result));
            ctx.request_repaint();
        });
    }

    fn check_fetch_results(&mut self) {
        while let Ok((ticket, result)) = self.receiver.try_recv() {
            if self.graph.complete(ticket, result) {
                self.chart = self.graph.chart(ChartOptions::default());
                self.texture = None;
            }
        }
    }

    fn chart_texture(&mut self, ctx: &egui::Context, px: [usize; 2]) -> Option<egui::TextureHandle> {
        let chart = self.chart.as_ref()?;
        if self.texture.is_none() || self.texture_px != px {
            match viz::render_rgb(chart, px[0] as u32, px[1] as u32) {
                Ok(rgb) => {
                    let image = egui::ColorImage::from_rgb(px, &rgb);
                    self.texture =
                        Some(ctx.load_texture("chart", image, egui::TextureOptions::LINEAR));
                    self.texture_px = px;
                }
                Err(err) => {
                    self.error_message = format!("Failed to draw chart: {}", err);
                    self.chart = None;
                    return None;
                }
            }
        }
        self.texture.clone()
    }

    fn export_chart(&mut self) {
        let Some(chart) = self.graph.chart(ChartOptions::default()) else {
            return;
        };
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .set_file_name(format!("covid_{}.png", chart.category));
        if let Some(home) = dirs::home_dir() {
            dialog = dialog.set_directory(home);
        }
        if let Some(path) = dialog.save_file() {
            match viz::render_to_file(&chart, &path, 1000, 600) {
                Ok(()) => self.status_message = format!("Wrote chart to {}", path.display()),
                Err(err) => self.error_message = format!("Failed to create chart: {}", err),
            }
        }
    }

    fn export_data(&mut self) {
        let Some(series) = self.graph.series() else {
            return;
        };
        let mut dialog = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .set_file_name(format!("covid_{}.csv", self.graph.category()));
        if let Some(home) = dirs::home_dir() {
            dialog = dialog.set_directory(home);
        }
        if let Some(path) = dialog.save_file() {
            let result = if path.extension().and_then(|e| e.to_str()) == Some("json") {
                storage::save_json(series, &path)
            } else {
                storage::save_csv(series, &path)
            };
            match result {
                Ok(()) => self.status_message = format!("Saved {} rows to {}", series.len(), path.display()),
                Err(err) => self.error_message = format!("Failed to save data: {}", err),
            }
        }
    }
}

impl eframe::App for TrendApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch_results();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                for category in Category::ALL {
                    let selected = self.graph.category() == category;
                    if ui.radio(selected, category.label()).clicked()
                        && let Some(ticket) = self.graph.select(category)
                    {
                        self.spawn_fetch(ticket);
                    }
                }

                ui.separator();
                ui.label("Country:");
                ui.add(egui::TextEdit::singleline(&mut self.country).desired_width(120.0))
                    .on_hover_text("Country name or ISO code; leave empty for the global total");
                ui.label("Days:");
                ui.add(egui::DragValue::new(&mut self.last_days).range(2..=1500));
                if ui.button("Reload").clicked() {
                    let ticket = self.graph.refresh();
                    self.spawn_fetch(ticket);
                }
            });

            ui.horizontal(|ui| {
                // Only while the selected category has settled data.
                let has_data = self.graph.series().is_some();
                if ui.add_enabled(has_data, egui::Button::new("Export chart")).clicked() {
                    self.export_chart();
                }
                if ui.add_enabled(has_data, egui::Button::new("Export data")).clicked() {
                    self.export_data();
                }
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.graph.state() {
                GraphState::Idle => {}
                GraphState::Loading(category) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Fetching {}...", category.label().to_lowercase()));
                    });
                    return;
                }
                GraphState::NoData { category, reason } => {
                    ui.colored_label(
                        egui::Color32::GRAY,
                        format!("No {} data available ({})", category.label().to_lowercase(), reason),
                    );
                    return;
                }
                GraphState::Ready { .. } => {}
            }

            let size = ui.available_size();
            if size.x < 50.0 || size.y < 50.0 {
                return;
            }
            let ppp = ctx.pixels_per_point();
            let px = [(size.x * ppp) as usize, (size.y * ppp) as usize];

            let Some(texture) = self.chart_texture(ctx, px) else {
                return;
            };
            let response = ui.add(egui::Image::new((texture.id(), size)).sense(egui::Sense::hover()));

            if let (Some(pos), Some(chart)) = (response.hover_pos(), self.chart.as_ref()) {
                let x_px = ((pos.x - response.rect.left()) * ppp) as f64;
                if let Some(tip) = chart.tooltip_at(Chart::plot_fraction(x_px, px[0] as u32)) {
                    response.on_hover_ui_at_pointer(|ui| {
                        ui.strong(&tip.title);
                        ui.label(&tip.label);
                    });
                }
            }
        });
    }
}
