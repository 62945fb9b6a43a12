use nexus_client::{submit, ApiClient, LoginForm, SessionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password)) = (args.next(), args.next()) else {
        eprintln!("usage: nexus-client <email> <password>");
        return std::process::ExitCode::FAILURE;
    };

    let base_url =
        std::env::var("NEXUS_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    let mut form = LoginForm::new();
    form.set_email(email);
    form.set_password(password);

    let api = ApiClient::new(base_url);
    let store = SessionStore::from_env();

    match submit(&form, &api, &store).await {
        Some(route) => {
            println!("{}", route);
            std::process::ExitCode::SUCCESS
        }
        None => std::process::ExitCode::FAILURE,
    }
}
