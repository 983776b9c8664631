use rankset::{Entry, RankedSet};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rankset=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let mut board = RankedSet::new();
    for i in 0..1000u32 {
        if let Err(err) = board.add(Entry::new(i, i)) {
            eprintln!("add {i}: {err}");
        }
    }
    println!("{} elements on {} levels", board.len(), board.layer_count());

    match board.rank(&500) {
        Ok(rank) => println!("rank of 500: {rank}"),
        Err(err) => eprintln!("rank of 500: {err}"),
    }

    if let Err(err) = board.remove(&566) {
        eprintln!("remove 566: {err}");
    }
    println!("after removing 566: {} elements", board.len());
    for key in [566u32, 567, 999] {
        match board.rank(&key) {
            Ok(rank) => println!("rank of {key}: {rank}"),
            Err(err) => println!("rank of {key}: {err}"),
        }
    }

    match board.reverse_range(1, 3) {
        Ok(top) => {
            let keys: Vec<u32> = top.iter().map(|e| e.key).collect();
            println!("top three: {keys:?}");
        }
        Err(err) => eprintln!("top three: {err}"),
    }

    // Only the index levels; the base level is a thousand entries long.
    let dump = board.dump();
    for line in dump.lines().take(board.layer_count().saturating_sub(1)) {
        println!("{line}");
    }
}
