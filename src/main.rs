#[tokio::main]
async fn main() -> anyhow::Result<()> {
    product_extractor::run().await
}
