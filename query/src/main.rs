use anyhow::Result;
use clap::Parser;
use engine::{read_corpus, RankedDoc, SearchEngine};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "query")]
#[command(about = "Two-stage TF-IDF retrieval over a document collection", long_about = None)]
struct Args {
    /// Directory containing the document collection
    corpus: PathBuf,
    /// Run a single query instead of the interactive prompt loop
    #[arg(long)]
    query: Option<String>,
    /// Number of documents to return in one-shot mode
    #[arg(short, long, default_value_t = 10)]
    k: usize,
    /// Emit one-shot results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let docs = read_corpus(&args.corpus)?;
    let start = Instant::now();
    let engine = SearchEngine::build(&docs);
    tracing::info!(
        num_docs = engine.num_docs(),
        num_terms = engine.unigrams().num_terms(),
        num_bigrams = engine.bigrams().num_bigrams(),
        elapsed_s = start.elapsed().as_secs_f64(),
        "indices built"
    );

    match args.query {
        Some(q) => one_shot(&engine, &q, args.k, args.json),
        None => interactive(&engine),
    }
}

fn one_shot(engine: &SearchEngine, query: &str, k: usize, json: bool) -> Result<()> {
    let results = engine.search(query, k);
    if json {
        println!("{}", serde_json::to_string_pretty(&results.top)?);
    } else {
        print_results(&results.candidates, &results.top);
    }
    Ok(())
}

fn interactive(engine: &SearchEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let Some(query) = prompt_query(&mut lines)? else {
            return Ok(());
        };
        let Some(k) = prompt_k(&mut lines)? else {
            return Ok(());
        };

        let start = Instant::now();
        let results = engine.search(&query, k);
        print_results(&results.candidates, &results.top);
        println!("Time used: {:.3} seconds.\n", start.elapsed().as_secs_f64());
    }
}

/// Prompt until a non-empty query line arrives. `None` means stdin hit
/// end of file and the loop should stop.
fn prompt_query(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<String>> {
    println!("Please enter a query q:");
    loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    return Ok(Some(trimmed.to_string()));
                }
                println!("The query can not be empty. Please enter a query q:");
            }
            None => return Ok(None),
        }
    }
}

/// Prompt until a positive integer k arrives.
fn prompt_k(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<usize>> {
    println!("Please enter an integer k to output the top k documents:");
    loop {
        match lines.next() {
            Some(line) => match line?.trim().parse::<usize>() {
                Ok(k) if k > 0 => return Ok(Some(k)),
                _ => println!("k must be a positive integer. Please enter an integer k:"),
            },
            None => return Ok(None),
        }
    }
}

fn print_results(candidates: &[RankedDoc], top: &[RankedDoc]) {
    print_table(
        candidates,
        &format!("Top {} documents based on similarities", candidates.len()),
    );
    print_table(
        top,
        &format!("Top {} documents that match the query", top.len()),
    );
}

fn print_table(rows: &[RankedDoc], title: &str) {
    println!("{title}:");
    println!("{:-<26}+-{:-<30}", "", "");
    println!("{:<25} | {:<30}", "Document Name", "cosine similarity with query");
    println!("{:-<26}+-{:-<30}", "", "");
    for row in rows {
        println!("{:<25} | {:<30.6}", row.name, row.score);
    }
    println!("{:-<26}+-{:-<30}\n", "", "");
}
