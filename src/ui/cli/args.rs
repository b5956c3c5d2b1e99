// Thu Jan 16 2026 - Alex

use crate::permission::AccessRights;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "posix-permissions")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Inspect and apply POSIX owner/group/others permissions", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current permissions of a file
    Show(ShowArgs),
    /// Change the permissions of a file
    Set(SetArgs),
    /// Walk through a series of changes on a file
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SetArgs {
    pub path: PathBuf,

    /// Rights for every class, applied before the per-class options
    #[arg(short, long)]
    pub all: Option<AccessRights>,

    #[arg(short, long)]
    pub owner: Option<AccessRights>,

    #[arg(short, long)]
    pub group: Option<AccessRights>,

    #[arg(long)]
    pub others: Option<AccessRights>,

    /// Start from no rights instead of the file's current state
    #[arg(long)]
    pub reset: bool,

    /// Keep the file's set-uid, set-gid and sticky bits
    #[arg(long)]
    pub keep_special: bool,

    #[arg(long)]
    pub dry_run: bool,
}

impl SetArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.reset
            && self.all.is_none()
            && self.owner.is_none()
            && self.group.is_none()
            && self.others.is_none()
        {
            return Err("Nothing to change: pass --all, --owner, --group, --others or --reset".to_string());
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct DemoArgs {
    pub path: PathBuf,

    #[arg(long)]
    pub dry_run: bool,
}
