// Thu Jan 16 2026 - Alex

use colored::Colorize;
use posix_permissions::ui::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
