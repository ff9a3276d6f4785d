#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = formexam::run().await {
        eprintln!("formexam fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
