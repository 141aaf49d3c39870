use colored::Colorize;
use holomine_core::MiningAlgorithm;
use strum::IntoEnumIterator;

pub fn execute() {
    println!("{}", "Available mining algorithms".bold());
    for algorithm in MiningAlgorithm::iter() {
        println!(
            "  {:<16} {}",
            algorithm.as_wire().cyan(),
            algorithm.title()
        );
        println!("  {:<16} {}", "", algorithm.description().dimmed());
    }
}
