use std::error::Error;

use futures_lite::future::block_on;
use workgroup::Racer;

const PHRASE: &str = "A small utility to manage the lifetime of a set of related goroutines.";
const KEYWORDS: [&str; 5] = ["function", "variable", "slice", "goroutine", "package"];

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter("workgroup=trace")
        .init();

    // One closure per keyword, each checking a single keyword against the phrase.
    let tasks: Vec<_> = KEYWORDS
        .iter()
        .map(|&kw| move || PHRASE.contains(kw).then_some(kw))
        .collect();
    let found = workgroup::run(tasks, 3)?;
    println!("{} found", found.unwrap_or("nothing"));

    // The same search with a template, without building the closures up front.
    let racer = Racer::new(3)?;
    let found = racer.run_template(KEYWORDS.len(), |i| {
        PHRASE.contains(KEYWORDS[i]).then_some(KEYWORDS[i])
    });
    println!("{} found", found.unwrap_or("nothing"));

    // And once more with futures.
    let found = block_on(racer.race_template(KEYWORDS.len(), |i| async move {
        PHRASE.contains(KEYWORDS[i]).then_some(KEYWORDS[i])
    }));
    println!("{} found", found.unwrap_or("nothing"));

    Ok(())
}
