//! MINI IBEX surface dashboard
//!
//! Interactive view over the quote service: pick an option type and a
//! quote date, see the per-expiry smile plot and the filtered quote
//! table. Every selection change triggers a fresh fetch and rebuild on a
//! worker thread; responses carry the request sequence number and stale
//! ones are dropped, so the latest completed result is what renders.

use std::sync::mpsc;
use std::thread;

use chrono::NaiveDate;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ibex_surface::prelude::*;

/// One refresh request for the worker
struct FetchRequest {
    seq: u64,
    option_type: OptionType,
    quote_date: Option<NaiveDate>,
    min_vol: f64,
}

/// Completed refresh, tagged with its request sequence
struct FetchResponse {
    seq: u64,
    outcome: SurfaceResult<Snapshot>,
}

/// Everything the UI needs from one refresh
struct Snapshot {
    quote_date: Option<NaiveDate>,
    available_dates: Vec<NaiveDate>,
    total_rows: usize,
    filtered: Vec<Quote>,
    surface: Option<VolSurface>,
}

/// Fetch the full table and build the surface for one selection
fn refresh(client: &ApiClient, request: &FetchRequest) -> SurfaceResult<Snapshot> {
    let quotes = client.fetch_quotes()?;
    let available_dates = quote_dates(&quotes);
    let quote_date = request.quote_date.or_else(|| available_dates.last().copied());

    let (filtered, surface) = match quote_date {
        Some(day) => {
            let filter =
                QuoteFilter::new(request.option_type, day).with_min_vol(request.min_vol);
            let filtered = filter.filter(&quotes);
            let surface = VolSurface::from_quotes(&filtered);
            (filtered, surface)
        }
        None => (Vec::new(), None),
    };

    Ok(Snapshot {
        quote_date,
        available_dates,
        total_rows: quotes.len(),
        filtered,
        surface,
    })
}

struct SurfaceApp {
    // Selection
    option_type: OptionType,
    selected_date: Option<NaiveDate>,
    min_vol: f64,

    // Latest completed result
    snapshot: Option<Snapshot>,
    status: String,

    // Worker plumbing
    request_tx: mpsc::Sender<FetchRequest>,
    response_rx: mpsc::Receiver<FetchResponse>,
    next_seq: u64,
    applied_seq: u64,
}

impl SurfaceApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<FetchRequest>();
        let (response_tx, response_rx) = mpsc::channel::<FetchResponse>();
        let ctx = cc.egui_ctx.clone();

        thread::spawn(move || {
            let client = ApiClient::default();
            while let Ok(request) = request_rx.recv() {
                let response = FetchResponse {
                    seq: request.seq,
                    outcome: refresh(&client, &request),
                };
                if response_tx.send(response).is_err() {
                    break;
                }
                ctx.request_repaint();
            }
        });

        let mut app = Self {
            option_type: OptionType::Call,
            selected_date: None,
            min_vol: DEFAULT_MIN_VOL,
            snapshot: None,
            status: String::new(),
            request_tx,
            response_rx,
            next_seq: 0,
            applied_seq: 0,
        };
        app.request_refresh();
        app
    }

    fn request_refresh(&mut self) {
        self.next_seq += 1;
        let request = FetchRequest {
            seq: self.next_seq,
            option_type: self.option_type,
            quote_date: self.selected_date,
            min_vol: self.min_vol,
        };

        if self.request_tx.send(request).is_ok() {
            self.status = "Fetching...".to_string();
        } else {
            self.status = "Worker stopped".to_string();
        }
    }

    fn poll_responses(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            // A newer result has already been applied
            if response.seq < self.applied_seq {
                continue;
            }
            self.applied_seq = response.seq;

            match response.outcome {
                Ok(snapshot) => {
                    if self.selected_date.is_none() {
                        self.selected_date = snapshot.quote_date;
                    }
                    self.status = format!("Fetched {} quote rows", snapshot.total_rows);
                    self.snapshot = Some(snapshot);
                }
                Err(e) => {
                    self.status = format!("Error: {}", e);
                }
            }
        }
    }
}

impl eframe::App for SurfaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_responses();

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("MINI IBEX Surface");
            ui.separator();

            let mut selection_changed = false;

            ui.heading("Option Type");
            for option_type in [OptionType::Call, OptionType::Put] {
                if ui
                    .selectable_label(self.option_type == option_type, option_type.as_str())
                    .clicked()
                    && self.option_type != option_type
                {
                    self.option_type = option_type;
                    selection_changed = true;
                }
            }

            ui.separator();
            ui.heading("Quote Date");
            let dates = self
                .snapshot
                .as_ref()
                .map(|s| s.available_dates.clone())
                .unwrap_or_default();
            let selected_label = self
                .selected_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "latest".to_string());
            egui::ComboBox::from_id_source("quote_date")
                .selected_text(selected_label)
                .show_ui(ui, |ui| {
                    for date in &dates {
                        if ui
                            .selectable_label(self.selected_date == Some(*date), date.to_string())
                            .clicked()
                            && self.selected_date != Some(*date)
                        {
                            self.selected_date = Some(*date);
                            selection_changed = true;
                        }
                    }
                });

            ui.separator();
            ui.heading("Vol Floor");
            if ui
                .add(egui::Slider::new(&mut self.min_vol, 0.0..=50.0).text("min vol"))
                .changed()
            {
                selection_changed = true;
            }

            ui.separator();
            if ui.button("Refresh").clicked() {
                selection_changed = true;
            }
            if !self.status.is_empty() {
                ui.label(&self.status);
            }

            if let Some(ref snapshot) = self.snapshot {
                ui.separator();
                ui.label(format!("Rows: {}", snapshot.total_rows));
                ui.label(format!("Dates: {}", snapshot.available_dates.len()));
                ui.label(format!("Filtered: {}", snapshot.filtered.len()));
                if let Some(ref surface) = snapshot.surface {
                    let (expiries, strikes) = surface.shape();
                    ui.label(format!("Grid: {} x {}", expiries, strikes));
                }
            }

            if selection_changed {
                self.request_refresh();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let shown_date = self
                .selected_date
                .or_else(|| self.snapshot.as_ref().and_then(|s| s.quote_date));
            let date_label = shown_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            ui.heading(format!(
                "Volatility Surface - {} ({})",
                self.option_type, date_label
            ));

            let Some(snapshot) = &self.snapshot else {
                ui.label("Waiting for the quote service...");
                return;
            };

            let Some(surface) = &snapshot.surface else {
                ui.label("No data for this selection.");
                return;
            };

            Plot::new("smile")
                .view_aspect(2.0)
                .x_axis_label("Strike")
                .y_axis_label("Implied Vol (%)")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    for &expiry in &surface.expiries {
                        let smile = surface.smile(expiry);
                        if smile.is_empty() {
                            continue;
                        }
                        let points: Vec<[f64; 2]> =
                            smile.iter().map(|&(strike, vol)| [strike, vol]).collect();
                        plot_ui.line(
                            Line::new(PlotPoints::new(points))
                                .name(expiry.to_string())
                                .width(2.0),
                        );
                    }
                });

            ui.separator();
            ui.heading("Quotes");

            egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                egui::Grid::new("quotes_grid")
                    .striped(true)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong("Quote Date");
                        ui.strong("Expiry");
                        ui.strong("Strike");
                        ui.strong("Type");
                        ui.strong("Price");
                        ui.strong("Vol");
                        ui.end_row();

                        for quote in snapshot.filtered.iter().take(DEFAULT_MAX_ROWS) {
                            ui.label(cell_date(quote.quote_date));
                            ui.label(cell_date(quote.expiry));
                            ui.label(cell_num(quote.strike, 1));
                            ui.label(
                                quote
                                    .option_type
                                    .map(|t| t.to_string())
                                    .unwrap_or_else(|| "-".to_string()),
                            );
                            ui.label(cell_num(quote.price, 2));
                            ui.label(cell_num(quote.implied_vol, 2));
                            ui.end_row();
                        }
                    });
            });

            if snapshot.filtered.len() > DEFAULT_MAX_ROWS {
                ui.label(format!(
                    "Showing {} of {} quotes",
                    DEFAULT_MAX_ROWS,
                    snapshot.filtered.len()
                ));
            }
        });
    }
}

fn cell_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

fn cell_num(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_title("MINI IBEX - Volatility Surface"),
        ..Default::default()
    };

    eframe::run_native(
        "MINI IBEX Surface",
        options,
        Box::new(|cc| Box::new(SurfaceApp::new(cc))),
    )
}
