use cosmic::app;
use cosmic::iced::Size;

use crate::config::PileGaugeConfig;
use crate::history::HistoryStore;
use crate::session::{handlers, state::Session};
use crate::widget::{trend_chart::TrendPanel, workspace::build_workspace};

pub use crate::session::messages::Msg;

pub(crate) fn run() -> cosmic::iced::Result {
    let settings = cosmic::app::Settings::default()
        .size(Size::new(720.0, 960.0))
        .exit_on_close(true);
    cosmic::app::run::<App>(settings, ())
}

pub struct App {
    pub core: app::Core,
    /// Persisted settings, saved when the reference height changes
    pub config: PileGaugeConfig,
    /// Photo, rectangles and status line
    pub session: Session,
    /// Durable measurement history
    pub store: HistoryStore,
    /// History table and chart, rebuilt whenever the store changes
    pub panel: TrendPanel,
}

impl cosmic::Application for App {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Msg;

    const APP_ID: &'static str = "io.github.pilegauge";

    fn core(&self) -> &app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut app::Core {
        &mut self.core
    }

    fn init(
        core: app::Core,
        _flags: Self::Flags,
    ) -> (Self, cosmic::iced::Task<cosmic::Action<Self::Message>>) {
        let config = PileGaugeConfig::load();
        let store = HistoryStore::open_default();
        let panel = TrendPanel::new(store.load_all());
        log::debug!(
            "Starting with {} stored measurements",
            store.load_all().len()
        );

        (
            Self {
                core,
                session: Session::new(config.last_reference_height.clone()),
                config,
                store,
                panel,
            },
            cosmic::iced::Task::none(),
        )
    }

    fn view(&self) -> cosmic::Element<'_, Self::Message> {
        let theme = self.core.system_theme().cosmic();
        build_workspace(&self.session, &self.config, &self.panel, theme.spacing)
    }

    fn update(
        &mut self,
        message: Self::Message,
    ) -> cosmic::iced::Task<cosmic::Action<Self::Message>> {
        handlers::update_msg(self, message).map(cosmic::Action::App)
    }
}
