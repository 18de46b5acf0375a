//! Message handlers for the measuring session
//!
//! Handler locations:
//! - DrawMsg handlers: crate::annotations::handlers
//! - PhotoMsg, MeasureMsg and TrendMsg handlers: here (they need App access)

use std::path::PathBuf;

use cosmic::Task;

use crate::annotations::handlers::handle_draw_msg;
use crate::capture::image::PhotoImage;
use crate::core::app::App;
use crate::history::PointSelection;
use crate::session::messages::{MeasureMsg, Msg, PhotoMsg, TrendMsg};

/// Result type for message handlers
pub type HandlerResult = Task<Msg>;

/// Extensions offered by the open dialog
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "pnm", "qoi", "tga",
];

/// Dispatch a session message to its handler
pub fn update_msg(app: &mut App, msg: Msg) -> HandlerResult {
    match msg {
        Msg::Draw(msg) => {
            handle_draw_msg(&mut app.session, msg);
            Task::none()
        }
        Msg::Photo(msg) => handle_photo_msg(app, msg),
        Msg::Measure(msg) => handle_measure_msg(app, msg),
        Msg::Trend(msg) => handle_trend_msg(app, msg),
    }
}

pub fn handle_photo_msg(app: &mut App, msg: PhotoMsg) -> HandlerResult {
    match msg {
        PhotoMsg::Open => Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Open photo")
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file()
                    .await
                    .map(|file| file.path().to_path_buf())
            },
            |path| PhotoMsg::Picked(path).into(),
        ),
        PhotoMsg::Picked(None) => {
            log::debug!("Open photo cancelled");
            Task::none()
        }
        PhotoMsg::Picked(Some(path)) => decode_photo(path),
        PhotoMsg::Loaded(Ok(photo)) => {
            log::info!("Photo loaded: {}x{}", photo.width(), photo.height());
            app.session.load_photo(
                photo,
                app.config.max_display_width,
                app.config.max_display_height,
            );
            Task::none()
        }
        PhotoMsg::Loaded(Err(err)) => {
            log::warn!("Could not open image: {err}");
            app.session.message = format!("Could not open image: {err}");
            Task::none()
        }
    }
}

fn decode_photo(path: PathBuf) -> HandlerResult {
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || {
                PhotoImage::open(&path).map_err(|err| format!("{err:#}"))
            })
            .await
            .unwrap_or_else(|_| Err("decoding task panicked".to_string()))
        },
        |result| PhotoMsg::Loaded(result).into(),
    )
}

pub fn handle_measure_msg(app: &mut App, msg: MeasureMsg) -> HandlerResult {
    match msg {
        MeasureMsg::ReferenceInput(value) => {
            app.session.reference_input = value;
            Task::none()
        }
        MeasureMsg::Calculate => {
            if !app.session.can_calculate() {
                return Task::none();
            }
            let Ok(height_cm) = app.session.begin_calculation() else {
                return Task::none();
            };
            if app.config.last_reference_height != app.session.reference_input {
                app.config.last_reference_height = app.session.reference_input.clone();
                app.config.save();
            }
            let delay = app.config.thinking_delay();
            Task::perform(
                async move {
                    tokio::time::sleep(delay).await;
                    height_cm
                },
                |height_cm| MeasureMsg::Reveal(height_cm).into(),
            )
        }
        MeasureMsg::Reveal(height_cm) => {
            let mut rng = rand::thread_rng();
            app.session.finish_calculation(height_cm, &mut rng);

            // The estimate stays on screen even if it could not be saved
            if let Err(err) = app.store.append(height_cm) {
                log::error!("Failed to save measurement: {err:#}");
            }
            app.panel.rebuild(app.store.load_all());
            Task::none()
        }
    }
}

pub fn handle_trend_msg(app: &mut App, msg: TrendMsg) -> HandlerResult {
    match msg {
        TrendMsg::SelectPoint(index) => {
            if let PointSelection::Compared { index, trend, .. } =
                app.panel.select(index, &mut rand::thread_rng())
            {
                log::debug!("Chart point {index} compared: {trend:?}");
            }
            Task::none()
        }
    }
}
