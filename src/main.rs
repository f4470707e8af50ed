#[tokio::main]
async fn main() {
    despensa_backend::run().await;
}
