use std::{
    ffi::OsString,
    io::{self, Write},
};

use clap::Parser;

use servicecatalog_schemagen::{
    catalog::{self, Mode},
    schemagen::Reflective,
    telemetry,
};

/// Prints the JSON schema of the Service Catalog API types
#[derive(Debug, clap::Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Arguments {
    /// Pass `validation` to keep the resources section of the schema, anything after it is ignored
    #[arg(value_name = "MODE", num_args = 0.., value_parser = clap::value_parser!(OsString))]
    args: Vec<OsString>,
}

impl Arguments {
    /// Every raw argument is taken as a value, flags and `--` included.
    fn from_raw<I, T>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut raw = raw.into_iter().map(Into::into);
        let binary = raw.next().unwrap_or_else(|| "schemagen".into());
        Self::try_parse_from([binary, "--".into()].into_iter().chain(raw))
    }

    fn mode(&self) -> Mode {
        Mode::from_arg(self.args.first().and_then(|arg| arg.to_str()))
    }

    fn ignored(&self) -> &[OsString] {
        self.args.get(1..).unwrap_or_default()
    }
}

fn emit(mut out: impl Write, schema: &str) -> io::Result<()> {
    writeln!(out, "{schema}")?;
    out.flush()
}

fn main() {
    if let Err(err) = telemetry::init() {
        eprintln!("Failed to initialize logging: {err}");
    }

    let args = match Arguments::from_raw(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            tracing::error!(error = %err, "Failed to read the command line");
            std::process::exit(1);
        }
    };
    if !args.ignored().is_empty() {
        tracing::warn!(ignored = ?args.ignored(), "Ignoring extra arguments");
    }

    let result = catalog::render(&Reflective, args.mode())
        .and_then(|schema| Ok(emit(io::stdout().lock(), &schema)?));
    if let Err(err) = result {
        tracing::error!(error = %err, "Failed to generate the Service Catalog schema");
        std::process::exit(1);
    }
}
