#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kannada_lessons_backend::run().await
}
