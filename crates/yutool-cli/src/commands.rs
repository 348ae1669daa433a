use anyhow::Result;
use chrono::Local;

use yutool_cli::pipeline::{ExportOptions, inspect_release, run_export};
use yutool_cli::types::{ExportResult, InspectReport};
use yutool_ingest::RootKeyStrategy;

use crate::cli::{ExportArgs, InspectArgs, RootKeyArg};

pub fn export_options(args: &ExportArgs) -> ExportOptions {
    ExportOptions {
        root_csv: args.root_csv.clone(),
        update_template: args.update,
        method: args.method.clone(),
        variant: args.variant.clone(),
        release_version: args.release_version.clone(),
        template_dirs: args.template_dirs.clone(),
        skip_template: args.no_template,
        root_key: match args.root_key {
            RootKeyArg::Lm => RootKeyStrategy::StripLmPrefix,
            RootKeyArg::Fixed3 => RootKeyStrategy::FIXED_THREE,
        },
        ..ExportOptions::new(&args.source, &args.target, Local::now().date_naive())
    }
}

pub fn run_export_command(args: &ExportArgs) -> Result<ExportResult> {
    run_export(&export_options(args))
}

pub fn run_inspect_command(args: &InspectArgs) -> Result<InspectReport> {
    inspect_release(&args.source, args.method.as_deref(), args.variant.as_deref())
}
