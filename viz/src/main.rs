use std::error::Error;

use aqmap_structs::geojson::{FeatureCollection, Geometry};
use eframe::egui::{self, Align2, Color32, RichText};
use log::warn;

struct Marker {
    loc: [f64; 2],
    location: String,
    color: Color32,
    symbol: String,
}

/// What gets drawn: the flown path, the sensor markers and the no-fly zones.
#[derive(Default)]
struct MapLayers {
    path: Vec<[f64; 2]>,
    markers: Vec<Marker>,
    zones: Vec<(String, Vec<[f64; 2]>)>,
}

impl MapLayers {
    fn add_readings(&mut self, readings: FeatureCollection) {
        for feature in readings.features {
            match &feature.geometry {
                Geometry::Point { coordinates } => {
                    let color = feature.property_str("marker-color").unwrap_or("#aaaaaa");
                    self.markers.push(Marker {
                        loc: *coordinates,
                        location: feature.property_str("location").unwrap_or_default().to_string(),
                        color: Color32::from_hex(color).unwrap_or_else(|_| {
                            warn!("bad marker color {:?}", color);
                            Color32::GRAY
                        }),
                        symbol: feature.property_str("marker-symbol").unwrap_or_default().to_string(),
                    });
                }
                Geometry::LineString { coordinates } => self.path.extend(coordinates.iter().copied()),
                Geometry::Polygon { .. } => warn!("unexpected polygon in readings"),
            }
        }
    }

    fn add_zones(&mut self, zones: FeatureCollection) {
        for feature in zones.features {
            if let Geometry::Polygon { coordinates } = &feature.geometry {
                if let Some(outer) = coordinates.first() {
                    let name = feature.property_str("name").unwrap_or_default().to_string();
                    self.zones.push((name, outer.clone()));
                }
            }
        }
    }
}

fn symbol_text(symbol: &str) -> &'static str {
    match symbol {
        "lighthouse" => "o",
        "danger" => "!",
        "cross" => "x",
        _ => "?",
    }
}

struct ViewerApp {
    title: String,
    layers: MapLayers,
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);

            egui_plot::Plot::new("map")
                .data_aspect(1.0)
                .allow_drag(true)
                .allow_zoom(true)
                .show(ui, |plot_ui| {
                    for (name, ring) in self.layers.zones.iter() {
                        plot_ui.polygon(
                            egui_plot::Polygon::new(egui_plot::PlotPoints::from(ring.clone()))
                                .fill_color(Color32::from_rgba_unmultiplied(255, 0, 0, 40))
                                .name(name),
                        );
                    }

                    plot_ui.line(
                        egui_plot::Line::new(egui_plot::PlotPoints::from(self.layers.path.clone()))
                            .color(Color32::DARK_GRAY)
                            .name("flight path"),
                    );

                    for m in self.layers.markers.iter() {
                        plot_ui.points(
                            egui_plot::Points::new(egui_plot::PlotPoints::from(vec![m.loc]))
                                .radius(6.0)
                                .color(m.color),
                        );
                        plot_ui.text(
                            egui_plot::Text::new(
                                m.loc.into(),
                                RichText::new(format!("{} {}", symbol_text(&m.symbol), m.location)).size(12.0),
                            )
                            .anchor(Align2::LEFT_BOTTOM),
                        );
                    }
                });
        });
    }
}

fn read_collection(path: &str) -> Result<FeatureCollection, Box<dyn Error>> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    Ok(serde_json::from_str(&text).map_err(|e| format!("{}: {}", path, e))?)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(readings_path) = args.first() else {
        return Err("usage: aqmap_viz READINGS_GEOJSON [NO_FLY_ZONES_GEOJSON]".into());
    };

    let mut layers = MapLayers::default();
    layers.add_readings(read_collection(readings_path)?);
    if let Some(zones_path) = args.get(1) {
        layers.add_zones(read_collection(zones_path)?);
    }
    println!(
        "{} sensors, {} path points, {} no-fly zones",
        layers.markers.len(),
        layers.path.len(),
        layers.zones.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    let title = format!("aqmap: {}", readings_path);
    eframe::run_native(
        "aqmap viewer",
        options,
        Box::new(|cc| {
            let style = egui::Style {
                visuals: egui::Visuals::light(),
                ..egui::Style::default()
            };
            cc.egui_ctx.set_style(style);
            Ok(Box::new(ViewerApp { title, layers }))
        }),
    )?;
    Ok(())
}
