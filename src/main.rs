#[tokio::main]
async fn main() -> anyhow::Result<()> {
    groupworks::run().await
}
