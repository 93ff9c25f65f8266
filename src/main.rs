#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = kanna_diary::run().await {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
