mod annotations;
mod capture;
mod commentary;
mod config;
mod core;
mod domain;
mod estimate;
mod history;
mod render;
mod session;
mod widget;

fn main() -> cosmic::iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    core::app::run()
}
