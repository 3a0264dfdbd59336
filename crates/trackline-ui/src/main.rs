use tracing_subscriber::EnvFilter;
use trackline_ui::app::App;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Trackline");

    iced::application(App::boot, App::update, App::view)
        .title("Trackline")
        .subscription(App::subscription)
        .run()
}
