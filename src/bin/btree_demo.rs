//! Walks a B-tree through a fixed sequence of inserts, searches and
//! removals, printing the traversal after every step.
//!
//! Set `RUST_LOG=multiway=trace` to see each split, borrow and merge.

use std::fmt::Display;

use multiway::{BTree, Result, DEFAULT_MIN_DEGREE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_traversal<K: Display>(tree: &BTree<K>) {
    if tree.is_empty() {
        println!("  (empty)");
        return;
    }
    let keys: Vec<String> = tree.iter().map(|k| k.to_string()).collect();
    println!("  {}", keys.join(" "));
}

fn run<K>(label: &str, inserts: &[K], lookups: &[K], removals: &[K]) -> Result<()>
where
    K: Ord + Display + Clone,
{
    println!("--- BTree<{}> (t = {}) ---", label, DEFAULT_MIN_DEGREE);
    let mut tree = BTree::new(DEFAULT_MIN_DEGREE)?;

    for key in inserts {
        println!("insert {}:", key);
        tree.insert(key.clone());
        print_traversal(&tree);
    }
    println!();

    for key in lookups {
        let found = if tree.search(key) { "present" } else { "absent" };
        println!("search {}: {}", key, found);
    }
    println!();

    for key in removals {
        println!("remove {}:", key);
        tree.remove(key);
        print_traversal(&tree);
    }

    tracing::info!(len = tree.len(), height = tree.height(), "finished {} run", label);
    println!("{}", tree.stats());
    println!();
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ints = [
        10, 20, 5, 6, 12, 30, 7, 17, 2, 4, 1, 8, 11, 15, 18, 25, 28, 35, 38, 40,
    ];
    let int_removals = [
        6, 1, 30, 12, 17, 2, 25, 10, 20, 5, 7, 4, 8, 11, 15, 18, 28, 35, 38, 40,
    ];
    run("i32", &ints, &[11, 99], &int_removals)?;

    let fruits = [
        "apple",
        "banana",
        "grape",
        "cherry",
        "date",
        "fig",
        "elderberry",
    ];
    let fruit_removals = [
        "banana",
        "apple",
        "date",
        "fig",
        "cherry",
        "grape",
        "elderberry",
    ];
    run("&str", &fruits, &["grape", "kiwi"], &fruit_removals)?;

    Ok(())
}
