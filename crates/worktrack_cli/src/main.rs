//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `worktrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use worktrack_core::db::open_db_in_memory;

fn main() {
    println!("worktrack_core version={}", worktrack_core::core_version());
    match open_db_in_memory() {
        Ok(_) => println!("worktrack_core db=ok"),
        Err(err) => {
            eprintln!("worktrack_core db=error {err}");
            std::process::exit(1);
        }
    }
}
