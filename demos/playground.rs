use embedding_playground::prelude::*;
use std::collections::HashMap;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut store = VectorStore::new(EmbeddingProvider::OpenAi, Settings::from_env());
    store.load()?;

    store
        .add_document(
            "cats are great companions for quiet apartments",
            HashMap::from([("topic".to_string(), "pets".to_string())]),
        )
        .await?;
    store
        .add_document(
            "dogs need a lot of outdoor exercise",
            HashMap::from([("topic".to_string(), "pets".to_string())]),
        )
        .await?;
    store
        .add_document(
            "stock markets crashed today on rate fears",
            HashMap::from([("topic".to_string(), "finance".to_string())]),
        )
        .await?;

    println!("documents: {}", store.get_all_documents()?.len());

    println!("\ntop-k search for \"feline pets\":");
    for hit in store.search("feline pets", 2, None).await? {
        println!("  {:.4}  {}", hit.score, hit.content);
    }

    println!("\nMMR retrieval for \"animals\", pets only:");
    let filter = DocumentFilter::metadata_equals("topic", "pets");
    for doc in store
        .retrieve("animals", 2, Some(&filter), MmrOptions::default())
        .await?
    {
        println!("  {}", doc.text);
    }

    let (first_id, _) = store.get_all_documents()?[0].clone();
    store.delete_document(&first_id)?;
    println!("\nafter delete: {} documents", store.get_all_documents()?.len());

    store.reset();
    Ok(())
}
