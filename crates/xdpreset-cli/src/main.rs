mod archive;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xdpreset_core::{
    DEFAULT_DISPLAY_WIDTH, Degradation, PresetDocument, Program, SchematicOptions, StructuralFault,
    decode_library, decode_package_entry, render_schematic_with,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("XDPRESET_BUILD_COMMIT"),
    " ",
    env!("XDPRESET_BUILD_DATE"),
    ")"
);

/// Environment variable holding the log filter (`tracing` directives).
const LOG_ENV: &str = "XDPRESET_LOG";

#[derive(Parser, Debug)]
#[command(name = "xdpreset")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode synthesizer preset files into JSON documents and SVG panel schematics.",
    long_about = None,
    after_help = "Examples:\n  xdpreset preset render Lead.mnlgxdprog -o lead.json --svg lead.svg\n  xdpreset preset render Lead.mnlgxdprog --stdout --pretty\n  xdpreset library render Factory.mnlgxdlib --out-dir factory/"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on a single preset.
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },
    /// Operations on a whole preset library.
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PresetCommands {
    /// Render one preset as a JSON document and, optionally, an SVG schematic.
    #[command(
        after_help = "Examples:\n  xdpreset preset render Lead.mnlgxdprog -o lead.json\n  xdpreset preset render Factory.mnlgxdlib --program 12 --stdout --svg p12.svg"
    )]
    Render {
        /// Path (or glob matching one file) to a .mnlgxdprog, .mnlgxdlib or .prog_bin file
        input: PathBuf,

        /// Output document path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the JSON document to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Also write the panel schematic to this path (SVG)
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Preset index inside a library (Prog_NNN)
        #[arg(long, default_value_t = 0)]
        program: usize,

        /// Rendered SVG width in pixels
        #[arg(long, default_value_t = DEFAULT_DISPLAY_WIDTH)]
        svg_width: u32,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if the preset has degradations
        #[arg(long)]
        strict: bool,

        /// List degradations after rendering
        #[arg(long)]
        list_degradations: bool,
    },
}

#[derive(Subcommand, Debug)]
enum LibraryCommands {
    /// Render every preset of a library into an output directory.
    Render {
        /// Path (or glob matching one file) to a .mnlgxdlib or .mnlgxdprog file
        input: PathBuf,

        /// Directory receiving <entry>.json and <entry>.svg per preset
        #[arg(long)]
        out_dir: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Preset { command } => match command {
            PresetCommands::Render {
                input,
                output,
                stdout,
                svg,
                program,
                svg_width,
                pretty,
                compact,
                quiet,
                strict,
                list_degradations,
            } => cmd_preset_render(PresetRender {
                input,
                output,
                stdout,
                svg,
                program,
                svg_width,
                pretty,
                compact,
                quiet,
                strict,
                list_degradations,
            }),
        },
        Commands::Library { command } => match command {
            LibraryCommands::Render {
                input,
                out_dir,
                pretty,
                quiet,
            } => cmd_library_render(input, out_dir, pretty, quiet),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<StructuralFault> for CliError {
    fn from(fault: StructuralFault) -> Self {
        let hint = match &fault {
            StructuralFault::TooShort { .. } => "the preset record is truncated or not a preset",
            StructuralFault::NoMatchingEntries { .. } => {
                "the archive holds no preset records; check the file type"
            }
        };
        CliError::new(
            format!("{} ({})", fault, fault.kind()),
            Some(hint.to_string()),
        )
    }
}

#[derive(Debug)]
struct PresetRender {
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    svg: Option<PathBuf>,
    program: usize,
    svg_width: u32,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_degradations: bool,
}

fn cmd_preset_render(args: PresetRender) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let output = if args.stdout {
        None
    } else {
        Some(args.output.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?)
    };
    for target in output.iter().chain(args.svg.iter()) {
        ensure_distinct_from_input(target, &input_abs)?;
    }

    let entries = archive::read_entries(&resolved_input)?;
    let entry = decode_package_entry(&entries, args.program)?;
    debug!(entry = %entry.name, "preset selected");
    let program = entry.program;

    let json = serialize_document(
        &PresetDocument::from_program(&program),
        args.pretty,
        args.compact,
    )?;

    if let Some(svg_path) = args.svg.as_ref() {
        let options = SchematicOptions {
            display_width: args.svg_width,
        };
        write_output(
            svg_path,
            &render_schematic_with(&program, &options),
            "schematic",
        )?;
        if !args.quiet {
            eprintln!("OK: schematic written -> {}", svg_path.display());
        }
    }

    let degradations = program.degradations();
    for degradation in &degradations {
        info!(kind = degradation.kind(), "{degradation}");
    }

    match output.as_ref() {
        None => print!("{}", json),
        Some(path) => {
            write_output(path, &json, "document")?;
            if !args.quiet {
                eprintln!("OK: document written -> {}", path.display());
            }
        }
    }

    if args.list_degradations && !args.quiet {
        print_degradations(&program, &degradations);
    }
    if args.strict && !degradations.is_empty() {
        return Err(CliError::new(
            format!("{} degradation(s) detected", degradations.len()),
            Some("use --list-degradations to inspect".to_string()),
        ));
    }
    Ok(())
}

fn cmd_library_render(
    input: PathBuf,
    out_dir: PathBuf,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let entries = archive::read_entries(&resolved_input)?;
    let decoded = decode_library(&entries)?;

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let options = SchematicOptions::default();
    for entry in &decoded.presets {
        let stem = archive::output_stem(&entry.name);
        let json = serialize_document(
            &PresetDocument::from_program(&entry.program),
            pretty,
            false,
        )?;
        write_output(&out_dir.join(format!("{stem}.json")), &json, "document")?;
        let svg = render_schematic_with(&entry.program, &options);
        write_output(&out_dir.join(format!("{stem}.svg")), &svg, "schematic")?;
        debug!(entry = %entry.name, "preset rendered");
    }

    for fault in &decoded.faults {
        eprintln!("fault: {} ({})", fault, fault.fault.kind());
    }
    if !quiet {
        eprintln!(
            "OK: {} preset(s) written -> {}",
            decoded.presets.len(),
            out_dir.display()
        );
        if !decoded.is_clean() {
            eprintln!("{} entry(ies) skipped", decoded.faults.len());
        }
    }
    Ok(())
}

fn serialize_document(
    doc: &PresetDocument,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let json = if pretty {
        doc.to_json_pretty()
    } else {
        doc.to_json()
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn write_output(path: &Path, contents: &str, what: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write {what}: {}", path.display()))?;
    Ok(())
}

fn print_degradations(program: &Program, degradations: &[Degradation]) {
    eprintln!("Degradations ({}):", program.name());
    if degradations.is_empty() {
        eprintln!("  none");
    }
    for degradation in degradations {
        eprintln!("  {} {}", degradation.kind(), degradation);
    }
}

fn ensure_distinct_from_input(target: &Path, input_abs: &Path) -> Result<(), CliError> {
    let target_dir = target
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose()
        .ok()
        .flatten();
    let Some(target_dir) = target_dir else {
        // Parent does not exist yet, so it cannot be the input.
        return Ok(());
    };
    let file_name = target
        .file_name()
        .ok_or_else(|| CliError::new(format!("invalid output path: {}", target.display()), None))?;
    if target_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", target.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some(archive::SUPPORTED_HINT.to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some(archive::SUPPORTED_HINT.to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if !archive::is_supported_extension(ext) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some(archive::SUPPORTED_HINT.to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some(format!(
                "check the path or quote the pattern; {}",
                archive::SUPPORTED_HINT
            )),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single preset file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
