//! Main measuring window layout

use cosmic::Element;
use cosmic::cosmic_theme::Spacing;
use cosmic::iced::Length;
use cosmic::iced_core::Alignment;
use cosmic::iced_widget::{column, row, stack};
use cosmic::widget::{button, container, horizontal_space, image, scrollable, text, text_input};

use super::annotation_canvas::{AnnotationCanvas, AnnotationCanvasConfig};
use super::trend_chart::TrendPanel;
use crate::config::PileGaugeConfig;
use crate::session::messages::{DrawMsg, MeasureMsg, Msg, PhotoMsg, TrendMsg};
use crate::session::state::Session;

/// Build the whole window: toolbar, photo, status, reference input and history
pub fn build_workspace<'a>(
    session: &'a Session,
    config: &'a PileGaugeConfig,
    panel: &'a TrendPanel,
    spacing: Spacing,
) -> Element<'a, Msg> {
    let space_m = spacing.space_m;
    let space_s = spacing.space_s;

    let toolbar = row![
        button::suggested("Open photo").on_press(Msg::Photo(PhotoMsg::Open)),
        button::standard("Redraw pile").on_press_maybe(
            session
                .annotation
                .can_redraw_pile()
                .then_some(Msg::Draw(DrawMsg::RedrawPile))
        ),
        horizontal_space(),
    ]
    .spacing(space_s)
    .align_y(Alignment::Center);

    let calculate = row![
        text::body("Reference height (cm)"),
        text_input("e.g. 30", session.reference_input.as_str())
            .on_input(|value| Msg::Measure(MeasureMsg::ReferenceInput(value)))
            .width(Length::Fixed(120.0)),
        button::suggested("Calculate")
            .on_press_maybe(session.can_calculate().then_some(Msg::Measure(MeasureMsg::Calculate))),
    ]
    .spacing(space_s)
    .align_y(Alignment::Center);

    let content = column![
        toolbar,
        build_photo(session, config, space_s),
        text::body(session.message.as_str()),
        calculate,
        panel.view(spacing, |index| Msg::Trend(TrendMsg::SelectPoint(index))),
    ]
    .spacing(space_m)
    .padding(space_m)
    .width(Length::Fill);

    scrollable(content).into()
}

fn build_photo<'a>(
    session: &'a Session,
    config: &'a PileGaugeConfig,
    padding: u16,
) -> Element<'a, Msg> {
    let (Some(photo), Some(mapping)) = (session.photo.as_ref(), session.mapping) else {
        return container(text::body("No photo loaded"))
            .width(Length::Fixed(config.max_display_width))
            .height(Length::Fixed(config.max_display_height))
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .padding(padding)
            .into();
    };

    let (w, h) = mapping.display_size;
    let machine = &session.annotation;
    let preview = machine.gesture().map(|g| (g.slot, g.preview()));

    let canvas = AnnotationCanvas::new(AnnotationCanvasConfig {
        image_size: photo.size(),
        display_size: (w, h),
        reference_color: config.reference_color,
        pile_color: config.pile_color,
        accepting: machine.step().active_slot().is_some(),
        drawing: machine.is_drawing(),
    })
    .reference(machine.reference())
    .pile(machine.pile())
    .preview(preview)
    .on_event(|action| Msg::Draw(DrawMsg::Drag(action)));

    container(stack![
        image::Image::new(photo.handle.clone())
            .width(Length::Fixed(w))
            .height(Length::Fixed(h)),
        canvas,
    ])
    .into()
}
