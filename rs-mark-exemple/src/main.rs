use std::env;
use std::fs;

use tracing_subscriber::EnvFilter;

use rs_mark_core::io::{corpus_folder, graph_path, list_corpora, mark_name, read_corpus};
use rs_mark_core::model::codec::deserialize;
use rs_mark_core::model::generation_config::GenerationConfig;
use rs_mark_core::model::generator::SentenceGenerator;
use rs_mark_core::{build_or_merge, generate_with};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Corpus folder, "./data" by default (every .txt file is learned)
    let arg = env::args().nth(1);
    let folder = corpus_folder(arg.as_deref());
    let mark = mark_name(&folder)?;

    // Learn each corpus on top of the previous ones, like successive uploads
    // to the same mark. The graph only ever travels as serialized bytes.
    let mut stored: Option<Vec<u8>> = None;
    for file in list_corpora(&folder)? {
        let path = folder.join(&file);
        let text = read_corpus(&path)?;
        stored = Some(build_or_merge(&text, stored.as_deref())?);
        println!("Learned '{}' into '{}'", mark_name(&path)?, mark);
    }

    let bytes = match stored {
        Some(bytes) => bytes,
        None => return Err(format!("No .txt corpus found in {}", folder.display()).into()),
    };

    // Store the blob next to the corpus folder, named after the mark
    let output = graph_path(&folder)?;
    fs::write(&output, &bytes)?;
    println!("Graph written to {}", output.display());

    // Pretty print a short summary of the learned graph
    let graph = deserialize(&bytes)?;
    println!("{} words, {} transitions", graph.len(), graph.edge_count());
    if graph.len() <= 20 {
        print!("{graph}");
    }

    // Bound the walk so a cyclic corpus cannot run forever
    let mut config = GenerationConfig::default();
    config.set_max_words(Some(200))?;
    let mut generator = SentenceGenerator::new(config);

    // Generate 10 sentences; failures are reported, not fatal
    for i in 0..10 {
        match generate_with(&bytes, &mut generator) {
            Ok(sentence) => println!("Generated sentence {}: {}", i + 1, sentence),
            Err(e) => println!("Generation {} failed: {}", i + 1, e),
        }
    }

    Ok(())
}
