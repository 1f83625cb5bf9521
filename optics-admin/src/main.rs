mod args;

use anyhow::Context;
use args::Screen;
use optics_client::{
    AppointmentService, AppointmentView, AuthGate, ClientConfig, ReviewList, SubscriptionList,
    TableClient,
};
use shared::models::Review;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "optics_admin=info,optics_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let screen = match args::parse(std::env::args().skip(1)) {
        Ok(screen) => screen,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", args::USAGE);
            std::process::exit(2);
        }
    };

    let config = ClientConfig::from_env()?;
    let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?;
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;

    let mut gate = AuthGate::new(config.build_http_client()?);
    gate.sign_in(&email, &password)
        .await
        .context("Sign-in failed")?;
    let table = TableClient::new(gate.authorized_http()?);

    match screen {
        Screen::Appointments(filter) => {
            let mut view = AppointmentView::new(AppointmentService::new(table));
            if let Err(e) = view.load().await {
                anyhow::bail!("{}", e);
            }
            view.set_filter(filter);

            let rows = view.visible();
            info!(shown = rows.len(), total = view.records().len(), "Appointments");
            for a in rows {
                println!(
                    "{}  {}  [{} / {}]",
                    a.appointment_datetime,
                    a.display_name(),
                    a.status_label(),
                    a.payment_label(),
                );
                println!("    {} <{}> {}", a.id, a.display_email(), a.display_phone());
                println!(
                    "    {} ({}) {}",
                    a.display_service(),
                    a.display_duration(),
                    a.display_price()
                );
                println!("    {}", a.display_message());
            }
        }
        Screen::Reviews => {
            let mut list = ReviewList::new(table);
            let reviews = list.load().await?;
            if reviews.is_empty() {
                println!("{}", optics_client::reviews::EMPTY_MESSAGE);
            }
            for review in reviews {
                print_review(review);
            }
        }
        Screen::Subscriptions => {
            let mut list = SubscriptionList::new(table);
            for entry in list.load().await? {
                println!("{}", entry.email);
            }
        }
    }

    if let Err(e) = gate.sign_out().await {
        tracing::warn!(error = %e, "Sign-out failed");
    }
    Ok(())
}

fn print_review(review: &Review) {
    println!(
        "{}  {:<5}  {}  {}",
        review.created_date(),
        "*".repeat(review.stars()),
        review.name,
        review.review_description
    );
}
