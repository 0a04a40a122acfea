#[tokio::main]
async fn main() -> anyhow::Result<()> {
    swap_gateway::run().await
}
