use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    guessduel::cli::run_cli().await
}
