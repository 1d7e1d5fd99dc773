use std::{sync::Arc, time::Duration};

use egui::Context;
use egui_extras::install_image_loaders;
use logger::{Color, Logger};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Tiles};

use crate::{
    config::Config,
    feed::ToiletFeed,
    location::locate_once,
    lookup::ToiletLookup,
    model::ToiletMapModel,
    plugins,
    types::Coordinate,
    widgets::WidgetControls,
    windows,
};

const PENDING_TICK_MS: u64 = 100;

/// The map window: OpenStreetMap tiles, the search area around the current
/// center, one marker per toilet and the search controls.
pub struct ToiletMapApp {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    model: ToiletMapModel,
    controls: WidgetControls,
    logger: Logger,
}

impl ToiletMapApp {
    /// Creates the app and starts the one-shot geolocation.
    pub fn new(egui_ctx: Context, config: Config, lookup: Arc<dyn ToiletLookup>, logger: Logger) -> Self {
        install_image_loaders(&egui_ctx);

        let mut map_memory = MapMemory::default();
        if let Err(e) = map_memory.set_zoom(config.zoom) {
            let _ = logger.warn(&format!("Invalid zoom {}: {:?}", config.zoom, e));
        }

        let _ = logger.info(
            &format!(
                "Looking up toilets at {} around lat={} lng={}",
                config.endpoint, config.default_center.lat, config.default_center.lng
            ),
            Color::Blue,
        );

        let location = Some(locate_once(config.geolocation.source()));
        let feed = ToiletFeed::new(lookup, logger.clone());
        let model = ToiletMapModel::new(config.default_center, feed, location, logger.clone());
        let controls = WidgetControls::new(model.view_state());

        Self {
            tiles: Box::new(HttpTiles::with_options(
                walkers::sources::OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            )),
            map_memory,
            model,
            controls,
            logger,
        }
    }

    /// Re-centers the map on the current center, without animation.
    fn recenter(&mut self) {
        self.map_memory.follow_my_position();
    }
}

impl eframe::App for ToiletMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let view_state = self.model.view_state().clone();
                let mut clicked: Option<Coordinate> = None;

                let search_area =
                    plugins::SearchArea::new(view_state.center(), view_state.radius())
                        .on_click(|center| clicked = Some(center));

                let toilet_plugin =
                    plugins::Toilets::new(self.model.toilets(), self.model.selection_state());

                let map = Map::new(
                    Some(self.tiles.as_mut()),
                    &mut self.map_memory,
                    view_state.center().to_position(),
                )
                .with_plugin(search_area)
                .with_plugin(toilet_plugin);

                ui.add(map);

                if let Some(center) = clicked {
                    let _ = self.logger.info(
                        &format!("Map clicked at lat={} lng={}", center.lat, center.lng),
                        Color::White,
                    );
                    self.model.click(center);
                    self.recenter();
                }

                {
                    use windows::*;
                    zoom(ui, &mut self.map_memory);
                    acknowledge(ui);
                }
            });

        let toilet_count = self.model.toilets().len();
        let last_updated = self.model.feed().last_updated();
        let busy = self.model.busy();
        let outcome = self.controls.show(
            ctx,
            self.model.view_state_mut(),
            toilet_count,
            last_updated,
            busy,
        );

        if outcome.submitted {
            self.model.submit();
            self.recenter();
        }

        if self.model.update() {
            self.recenter();
        }

        if self.model.busy() {
            ctx.request_repaint_after(Duration::from_millis(PENDING_TICK_MS));
        }
    }
}
