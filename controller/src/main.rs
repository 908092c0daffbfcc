mod coordinator;
mod display;
mod host;
mod input;
mod notify;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    host::run().await
}
