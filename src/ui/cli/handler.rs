// Thu Jan 16 2026 - Alex

use super::args::{Args, Command, DemoArgs, SetArgs, ShowArgs};
use crate::config::Config;
use crate::fs::{HostFilesystem, PermissionAdapter};
use crate::permission::{AccessRights, GroupSelector, PermissionSet, SyncOutcome};
use anyhow::Context;
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

pub struct CommandHandler<A: PermissionAdapter = HostFilesystem> {
    adapter: A,
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self::with_adapter(HostFilesystem::new())
    }
}

impl<A: PermissionAdapter> CommandHandler<A> {
    pub fn with_adapter(adapter: A) -> Self {
        Self {
            adapter,
            quiet: false,
        }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        let mut config = match &args.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(level) = &args.log_level {
            config = config.with_log_level(level.clone());
        }
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        self.quiet = args.quiet;
        self.setup_logging(&config);

        match args.command {
            Command::Show(show_args) => self.handle_show(show_args),
            Command::Set(set_args) => self.handle_set(set_args, config),
            Command::Demo(demo_args) => self.handle_demo(demo_args, config),
        }
    }

    fn setup_logging(&self, config: &Config) {
        let level = match config.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        if let Err(e) = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()
        {
            log::debug!("Logger already set: {}", e);
        }
    }

    fn handle_show(&self, args: ShowArgs) -> anyhow::Result<()> {
        if !self.adapter.supports_posix_permissions() {
            self.unsupported_notice(&args.path);
            return Ok(());
        }

        let flags = self.adapter.read_permission_flags(&args.path)?;
        let set = PermissionSet::from_mode(&args.path, flags.mode());

        println!("{}", set);
        if !self.quiet {
            println!("  {} {}", "Symbolic:".cyan(), flags);
            println!("  {} {:04o}", "Mode:".cyan(), flags.mode());
        }
        Ok(())
    }

    fn handle_set(&self, args: SetArgs, config: Config) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut set = if args.reset {
            PermissionSet::new(&args.path)
        } else {
            PermissionSet::load(&args.path, &self.adapter)?
        };

        if let Some(rights) = args.all {
            set.set_access(GroupSelector::ALL, rights);
        }
        for (selector, rights) in [
            (GroupSelector::OWNER, args.owner),
            (GroupSelector::GROUP, args.group),
            (GroupSelector::OTHERS, args.others),
        ] {
            if let Some(rights) = rights {
                set.set_access(selector, rights);
            }
        }

        let dry_run = config.dry_run || args.dry_run;
        let preserve = config.preserve_special_bits || args.keep_special;
        let config = config.with_dry_run(dry_run).with_preserve_special_bits(preserve);
        self.commit(&set, &config)
    }

    fn handle_demo(&self, args: DemoArgs, config: Config) -> anyhow::Result<()> {
        match std::fs::metadata(&args.path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if !config.create_if_missing {
                    return Err(anyhow::anyhow!("Target does not exist: {}", args.path.display()));
                }
                OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&args.path)
                    .with_context(|| format!("Failed to create {}", args.path.display()))?;
                log::info!("Created {}", args.path.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to inspect {}", args.path.display()));
            }
        }

        let mut set = PermissionSet::new(&args.path);
        let both = GroupSelector::OWNER | GroupSelector::OTHERS;

        set.set_access(GroupSelector::ALL, AccessRights::ALL);
        self.step("All rights for everyone", &set);

        set.set_access(both, AccessRights::READ);
        self.step("Owner and others read only", &set);

        set.reset_access();
        set.set_access(both, AccessRights::READ | AccessRights::WRITE);
        self.step("Reset, owner and others read/write", &set);

        set.set_access(GroupSelector::ALL, AccessRights::NONE);
        self.step("No rights for anyone", &set);

        let dry_run = config.dry_run || args.dry_run;
        let config = config.with_dry_run(dry_run);
        self.commit(&set, &config)
    }

    fn step(&self, label: &str, set: &PermissionSet<'_>) {
        if self.quiet {
            return;
        }
        println!("{} {}", "[*]".blue(), label);
        println!("    {}", set);
    }

    fn commit(&self, set: &PermissionSet<'_>, config: &Config) -> anyhow::Result<()> {
        if config.dry_run {
            println!("{} Dry run, would apply {} to {}", "[*]".blue(), set.symbolic(), set.target().display());
            return Ok(());
        }

        match set.synchronize_with(&self.adapter, config)? {
            SyncOutcome::Applied(flags) => {
                println!("{} {} is now {}", "[+]".green(), set.target().display(), flags);
            }
            SyncOutcome::Unsupported => self.unsupported_notice(set.target()),
        }
        Ok(())
    }

    fn unsupported_notice(&self, path: &Path) {
        println!(
            "{} Filesystem has no POSIX permissions, {} left unchanged",
            "[!]".yellow(),
            path.display()
        );
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
