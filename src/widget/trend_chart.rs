//! Measurement history panel: table, trend chart and point selection
//!
//! The panel is rebuilt from scratch every time the history changes. The
//! chart itself is a rasterized image; [`ChartHitArea`] sits on top of it
//! and turns clicks into the index of the horizontally nearest point.

use cosmic::{
    Element,
    cosmic_theme::Spacing,
    iced::{Length, mouse},
    iced_core::{
        Clipboard, Layout, Rectangle, Shell, Size, Widget, event, layout,
        widget::{Tree, tree},
    },
    iced_widget::{column, row, stack},
    widget::{container, horizontal_space, image, text},
};
use rand::Rng;

use crate::{
    domain::Measurement,
    history::{PointSelection, TrendView, trend::EMPTY_HISTORY},
    render::{
        chart::{ChartLayout, render_chart},
        geometry::chart,
    },
};

/// History table and chart state
#[derive(Debug, Clone)]
pub struct TrendPanel {
    view: TrendView,
    layout: ChartLayout,
    chart: Option<image::Handle>,
    /// Comment for the selected point
    message: String,
}

impl TrendPanel {
    pub fn new(history: &[Measurement]) -> Self {
        let mut panel = Self {
            view: TrendView::default(),
            layout: ChartLayout::for_series(&[], chart::WIDTH, chart::HEIGHT),
            chart: None,
            message: String::new(),
        };
        panel.rebuild(history);
        panel
    }

    /// Discard the table and chart and build them again from `history`
    pub fn rebuild(&mut self, history: &[Measurement]) {
        self.view = TrendView::from_history(history);
        self.layout = ChartLayout::for_series(self.view.heights(), chart::WIDTH, chart::HEIGHT);
        self.message.clear();
        self.chart = if self.view.is_empty() {
            None
        } else {
            match render_chart(self.view.heights(), &self.layout) {
                Some(img) => Some(image::Handle::from_rgba(
                    img.width(),
                    img.height(),
                    img.into_vec(),
                )),
                None => {
                    log::warn!("Could not allocate trend chart");
                    None
                }
            }
        };
        log::debug!(
            "Trend panel rebuilt with {} points (chart: {})",
            self.view.len(),
            self.has_chart()
        );
    }

    /// Select a chart point and show the comparison with its predecessor
    pub fn select<R: Rng + ?Sized>(&mut self, index: Option<usize>, rng: &mut R) -> PointSelection {
        let selection = self.view.select(index);
        self.message = selection.message(rng);
        selection
    }

    pub fn trend(&self) -> &TrendView {
        &self.view
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Build the panel element
    pub fn view<'a, Msg: Clone + 'static>(
        &'a self,
        spacing: Spacing,
        on_select: impl Fn(Option<usize>) -> Msg + 'a,
    ) -> Element<'a, Msg> {
        let space_s = spacing.space_s;
        let space_xs = spacing.space_xs;

        let trend = self.trend();
        let title = text::title4("Measurement History");

        if trend.is_empty() {
            return column![title, text::body(EMPTY_HISTORY)]
                .spacing(space_s)
                .into();
        }

        let header = row![
            text::heading("Time").width(Length::Fixed(200.0)),
            text::heading("Height (cm)"),
        ]
        .spacing(space_s);

        let mut table = column![header].spacing(space_xs);
        for entry in trend.rows() {
            table = table.push(
                row![
                    text::body(entry.time.as_str()).width(Length::Fixed(200.0)),
                    text::body(entry.height.as_str()),
                ]
                .spacing(space_s),
            );
        }

        let mut content = column![title, table].spacing(space_s);

        if let Some(handle) = &self.chart {
            let chart_size = (self.layout.width as f32, self.layout.height as f32);
            let chart_image = image::Image::new(handle.clone())
                .width(Length::Fixed(chart_size.0))
                .height(Length::Fixed(chart_size.1));
            let hit_area = ChartHitArea::new(self.layout, trend.len(), on_select);
            content = content.push(row![
                container(stack![chart_image, hit_area]),
                horizontal_space(),
            ]);
        }

        if !self.message.is_empty() {
            content = content.push(text::body(self.message.as_str()));
        }

        content.into()
    }
}

/// Transparent click target laid over the chart image
pub struct ChartHitArea<'a, Msg> {
    layout: ChartLayout,
    count: usize,
    on_select: Box<dyn Fn(Option<usize>) -> Msg + 'a>,
}

impl<'a, Msg> ChartHitArea<'a, Msg> {
    pub fn new(
        layout: ChartLayout,
        count: usize,
        on_select: impl Fn(Option<usize>) -> Msg + 'a,
    ) -> Self {
        Self {
            layout,
            count,
            on_select: Box::new(on_select),
        }
    }
}

impl<'a, Msg: Clone + 'static> Widget<Msg, cosmic::Theme, cosmic::Renderer>
    for ChartHitArea<'a, Msg>
{
    fn size(&self) -> Size<Length> {
        Size::new(
            Length::Fixed(self.layout.width as f32),
            Length::Fixed(self.layout.height as f32),
        )
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<()>()
    }

    fn state(&self) -> tree::State {
        tree::State::None
    }

    fn children(&self) -> Vec<Tree> {
        vec![]
    }

    fn diff(&mut self, _tree: &mut Tree) {}

    fn layout(
        &self,
        _tree: &mut Tree,
        _renderer: &cosmic::Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let size = Size::new(self.layout.width as f32, self.layout.height as f32);
        layout::Node::new(limits.resolve(
            Length::Fixed(size.width),
            Length::Fixed(size.height),
            size,
        ))
    }

    fn draw(
        &self,
        _tree: &Tree,
        _renderer: &mut cosmic::Renderer,
        _theme: &cosmic::Theme,
        _style: &cosmic::iced_core::renderer::Style,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
    }

    fn on_event(
        &mut self,
        _tree: &mut Tree,
        event: cosmic::iced_core::Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &cosmic::Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Msg>,
        _viewport: &Rectangle,
    ) -> event::Status {
        if let cosmic::iced_core::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) =
            event
        {
            let bounds = layout.bounds();
            if let Some(pos) = cursor.position_in(bounds) {
                // Chart may be laid out smaller than it was rasterized
                let scale = if bounds.width > 0.0 {
                    self.layout.width as f32 / bounds.width
                } else {
                    1.0
                };
                let index = self.layout.nearest_index(pos.x * scale, self.count);
                shell.publish((self.on_select)(index));
                return event::Status::Captured;
            }
        }
        event::Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &cosmic::Renderer,
    ) -> mouse::Interaction {
        if self.count > 0 && cursor.is_over(layout.bounds()) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Msg: Clone + 'static> From<ChartHitArea<'a, Msg>> for Element<'a, Msg> {
    fn from(area: ChartHitArea<'a, Msg>) -> Self {
        Self::new(area)
    }
}
