#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cardbox_server::run().await
}
