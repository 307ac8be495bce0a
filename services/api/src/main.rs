#[tokio::main]
async fn main() {
    if let Err(err) = gummy_mummy_api::run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
