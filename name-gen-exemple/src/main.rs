use std::env;

use name_gen_core::{BannedWords, LengthMetric, MakeNameOptions, NameSet, Preference, parse_order};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: name-gen-exemple <names file> [order]
    // The file holds one name per line; ".txt" is assumed without extension
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "./data/names.txt".to_owned());
    let order = match args.next() {
        Some(order) => parse_order(&order)?,
        None => name_gen_core::DEFAULT_ORDER,
    };

    // Load the names, stripping symbols around them and dropping blank lines
    log::info!("loading names from {path}");
    let mut names = NameSet::from_file(&path, order, LengthMetric::Syllables, true)?;
    println!("Loaded {} names (order {}, average {:.2} syllables)", names.len(), names.order(), names.avg_name_len());

    // Start from the defaults: no real names, no repeats, names go to the history
    let mut options = MakeNameOptions::default();

    // Generate 5 candidates and keep the one closest to the average length
    options.n_candidates = 5;
    options.preference = Preference::Avg;

    // Names containing these words (any case) are never returned
    options.banned_words = BannedWords::new(["damn", "hell"]);

    // A second generator sharing the first one's history never repeats its names
    let mut short_names = names.clone();
    short_names.change_length_metric(LengthMetric::Chars);
    names.link_histories([&mut short_names]);

    let mut short_options = options.clone();
    short_options.set_preference("min")?;

    for i in 0..10 {
        match names.make_name(&options) {
            Some(name) => println!("Generated name {}: {}", i + 1, name),
            None => println!("Generated name {}: <no valid name left>", i + 1),
        }
    }
    for i in 0..5 {
        match short_names.make_name(&short_options) {
            Some(name) => println!("Short name {}: {}", i + 1, name),
            None => println!("Short name {}: <no valid name left>", i + 1),
        }
    }
    println!("Shared history holds {} names", names.history().len());

    // Mixing both generators keeps the left order and metric; a warning is raised
    let mixed = names.sum(&short_names);
    for warning in &mixed.warnings {
        println!("Warning: {}", warning);
    }

    // How many names can be made before generation fails? (capped run)
    let report = names.stress_test(&options, 10_000);
    println!("{}", serde_json::to_string_pretty(&report)?);
    println!(
        "Generated names per training name: {:.1}, unique: {:.1}%",
        report.names_per_training_name(),
        report.unique_percent()
    );

    Ok(())
}
