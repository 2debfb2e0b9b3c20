#[tokio::main]
async fn main() {
    if let Err(err) = crmgate::http::server::run().await {
        eprintln!("crmgate: {}", err);
        std::process::exit(1);
    }
}
