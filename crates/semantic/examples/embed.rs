use std::env;

use semantic::{semanticize, Embedder, SemanticConfig, SemanticEmbedding, SemanticError};

fn main() -> Result<(), SemanticError> {
    let mut args = env::args().skip(1);
    let doc_id = args.next().unwrap_or_else(|| "example-note".into());
    let text = args
        .next()
        .unwrap_or_else(|| "Groceries\nmilk, eggs, bread".into());

    let embedder = SemanticConfig::default().build()?;
    println!("model: {} ({} dims)", embedder.model_name(), embedder.dimension());

    let embedding: SemanticEmbedding = semanticize(&doc_id, &text, embedder.as_ref());
    println!("doc_id: {}", embedding.doc_id);
    println!("dim: {}", embedding.embedding_dim);
    println!(
        "first values: {:?}",
        &embedding.vector[..embedding.vector.len().min(8)]
    );
    println!("normalized: {}", embedding.normalized);

    Ok(())
}
