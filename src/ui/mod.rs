// Thu Jan 16 2026 - Alex

pub mod cli;
