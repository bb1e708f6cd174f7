#[tokio::main]
async fn main() {
    if let Err(e) = healcare_lib::run().await {
        tracing::error!("HealCare failed to start: {e}");
        std::process::exit(1);
    }
}
