//! pambase command-line interface
//!
//! Generates the nine Gentoo-style PAM stack files from a set of module flags.
//! Usage errors (unknown flags, bad `--encrypt` values) are reported by clap
//! with exit status 2 before anything touches the filesystem.

mod cli_config;
mod output;

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Parser;
use pambase::{
    prepare_output_dir, render_stacks, write_stacks, GenerationReport, HashAlgorithm, PamModule,
    PambaseError, StackOptions, StackOutcome, TemplateStore, DEFAULT_OUTPUT_DIR,
};
use tracing_subscriber::EnvFilter;

use crate::cli_config::{expand_path, CliConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "pambase", version)]
#[command(about = "Generate basic Gentoo PAM configuration files")]
#[command(styles = output::clap_styles())]
struct Cli {
    /// enable pam_gnome_keyring.so module
    #[arg(long)]
    gnome_keyring: bool,

    /// enable pam_cap.so module
    #[arg(long)]
    caps: bool,

    /// enable pam_passwdqc.so module
    #[arg(long)]
    passwdqc: bool,

    /// enable pam_pwhistory.so module
    #[arg(long)]
    pwhistory: bool,

    /// enable pam_pwquality.so module
    #[arg(long)]
    pwquality: bool,

    /// enable pam_openrc.so module
    #[arg(long)]
    openrc: bool,

    /// enable pam_elogind.so module
    #[arg(long)]
    elogind: bool,

    /// enable pam_systemd.so module
    #[arg(long)]
    systemd: bool,

    /// enable pam_systemd_home.so module
    #[arg(long)]
    homed: bool,

    /// enable pam_selinux.so module
    #[arg(long)]
    selinux: bool,

    /// enable pam_mktemp.so module
    #[arg(long)]
    mktemp: bool,

    /// enable pam_ssh.so module
    #[arg(long)]
    pam_ssh: bool,

    /// enable pam_securetty.so module
    #[arg(long)]
    securetty: bool,

    /// enable pam_shells.so module
    #[arg(long)]
    shells: bool,

    /// enable pam_sss.so module
    #[arg(long)]
    sssd: bool,

    /// enable pam_krb5.so module
    #[arg(long)]
    krb5: bool,

    /// select encryption to use for passwords stored by pam_unix.so module
    #[arg(
        long,
        value_name = "ALG",
        default_value = "md5",
        value_parser = PossibleValuesParser::new(HashAlgorithm::ALL.map(HashAlgorithm::as_str))
            .try_map(|s| s.parse::<HashAlgorithm>())
    )]
    encrypt: HashAlgorithm,

    /// install minimalistic PAM stack
    #[arg(long)]
    minimal: bool,

    /// enable debug for selected modules
    #[arg(long)]
    debug: bool,

    /// enable nullok option for pam_unix.so module
    #[arg(long)]
    nullok: bool,

    /// directory the stacks are written to [default: stack]
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// read <stack>.tera templates from DIR instead of the built-in set
    #[arg(long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// print the rendered stacks instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// read settings from FILE instead of .pambase.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn module_flags(&self) -> [(PamModule, bool); 16] {
        [
            (PamModule::GnomeKeyring, self.gnome_keyring),
            (PamModule::Caps, self.caps),
            (PamModule::Passwdqc, self.passwdqc),
            (PamModule::Pwhistory, self.pwhistory),
            (PamModule::Pwquality, self.pwquality),
            (PamModule::Openrc, self.openrc),
            (PamModule::Elogind, self.elogind),
            (PamModule::Systemd, self.systemd),
            (PamModule::Homed, self.homed),
            (PamModule::Selinux, self.selinux),
            (PamModule::Mktemp, self.mktemp),
            (PamModule::PamSsh, self.pam_ssh),
            (PamModule::Securetty, self.securetty),
            (PamModule::Shells, self.shells),
            (PamModule::Sssd, self.sssd),
            (PamModule::Krb5, self.krb5),
        ]
    }

    fn stack_options(&self) -> StackOptions {
        let mut options = StackOptions::default()
            .with_encrypt(self.encrypt)
            .with_minimal(self.minimal)
            .with_debug(self.debug)
            .with_nullok(self.nullok);
        for (module, enabled) in self.module_flags() {
            if enabled {
                options.enable(module);
            }
        }
        options
    }

    /// `--template-dir`, then the config file, then the embedded templates.
    fn template_store(&self, config: &CliConfig) -> TemplateStore {
        self.template_dir
            .clone()
            .or_else(|| config.template_dir.as_deref().map(expand_path))
            .map(TemplateStore::Directory)
            .unwrap_or_default()
    }

    /// `--output-dir`, then the config file, then `stack`.
    fn output_dir(&self, config: &CliConfig) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| config.output_dir.as_deref().map(expand_path))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pambase(#[from] PambaseError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pambase=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => cli_config::load_cli_config_from(path)?,
        None => cli_config::load_cli_config(),
    };

    let options = cli.stack_options();
    let store = cli.template_store(&config);
    let output_dir = cli.output_dir(&config);
    tracing::debug!(
        ?options,
        store = %store,
        output_dir = %output_dir.display(),
        dry_run = cli.dry_run,
        "Resolved generation settings"
    );

    if cli.dry_run {
        for stack in render_stacks(&options, &store)? {
            output::header(format!("# {}", stack.name));
            if stack.is_empty() {
                output::dim("# (empty, no file would be written)");
            } else {
                output::plain(&stack.content);
            }
            output::blank();
        }
        return Ok(());
    }

    // The output directory exists before rendering starts, even if a
    // template later fails.
    prepare_output_dir(&output_dir)?;
    let stacks = render_stacks(&options, &store)?;
    let report = write_stacks(&stacks, &output_dir)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &GenerationReport) {
    for (name, outcome) in &report.outcomes {
        match outcome {
            StackOutcome::Written { path, lines } => {
                output::success(format!("Created: {} ({lines} lines)", path.display()));
            }
            StackOutcome::Skipped { removed_stale } => {
                let note = if *removed_stale {
                    ", removed previous file"
                } else {
                    ""
                };
                output::dim(format!("  Skipped: {name} (rendered empty{note})"));
            }
        }
    }
    output::blank();
    output::success(format!(
        "Generated {} stack(s) in {}.",
        report.written().count(),
        report.output_dir.display()
    ));
    let skipped = report.skipped().count();
    if skipped > 0 {
        output::dim(format!("{skipped} empty stack(s) skipped."));
    }
}

/// Print the error, then any causes its own message does not already include.
fn report_error(err: &CliError) {
    output::error(err);
    // Our messages embed their direct source, so start one level down.
    let mut cause = err.source().and_then(|s| s.source());
    while let Some(e) = cause {
        output::error_detail(format!("  caused by: {e}"));
        cause = e.source();
    }
}
