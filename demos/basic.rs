use saplo_rpc::{params, Client, ClientConfig, Credentials, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let Some(credentials) = Credentials::from_env() else {
        eprintln!("set SAPLO_API_KEY and SAPLO_SECRET_KEY");
        return Ok(());
    };
    let client = Client::connect(credentials, ClientConfig::default()).await?;

    let account = client.account().get(params! {}).await?;
    println!("{account}");

    let collection_id = client
        .collection()
        .create(params! {"name": "demo", "language": "en", "trim": "collection_id"})
        .await?;

    let text_id = client
        .text()
        .create(params! {
            "collection_id": collection_id,
            "body": "Rust is a systems programming language.",
            "trim": "text_id"
        })
        .await?;

    let tags = client
        .text()
        .tags(params! {"collection_id": collection_id, "text_id": text_id, "trim": "tags"})
        .await?;
    println!("{tags}");

    let collections = client.collection().list(params! {}).await?;
    println!("{collections}");

    client
        .collection()
        .delete(params! {"collection_id": collection_id})
        .await?;
    Ok(())
}
