#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_drill_server::run().await
}
