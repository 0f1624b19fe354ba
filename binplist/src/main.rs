//! PList command-line tool for checking, querying, and transcoding PList XML
//! documents.
//!
//! Usage: plist [OPTIONS] [FILE]
//!
//! Options:
//!   -g, --get <PATH>       Select the value at a dotted path (e.g. `a.b.c`)
//!   -t, --to <FORMAT>      Output format (debug, yaml, toml, cbor, diag) [default: debug]
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Check if file is valid (exit 0 if valid, 1 if invalid)
//!   -h, --help             Print help
//!   -V, --version          Print version

use libplist::{parse_with_filename, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod transcode;

/// Default log directive; `RUST_LOG` overrides it.
const DEFAULT_LOG: &str = "libplist=warn,plist=warn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Debug,
    Yaml,
    Toml,
    Cbor,
    CborDiag,
}

fn parse_format(s: &str) -> Option<Format> {
    match s {
        "debug" => Some(Format::Debug),
        "yaml" | "yml" => Some(Format::Yaml),
        "toml" => Some(Format::Toml),
        "cbor" => Some(Format::Cbor),
        "diag" => Some(Format::CborDiag),
        _ => None,
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    let mut to_format = Format::Debug;
    let mut get_path: Option<&str> = None;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("plist {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                to_format = match parse_format(&args[i]) {
                    Some(format) => format,
                    None => {
                        eprintln!("Error: Unknown format: {}", args[i]);
                        process::exit(1);
                    }
                };
            }
            "-g" | "--get" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --get requires a path argument");
                    process::exit(1);
                }
                get_path = Some(&args[i]);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "-" => {
                // Explicit stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    let input = match read_input(input_path) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let exit_code = process_input(&input, input_path, get_path, to_format, output_file, check_only);
    process::exit(exit_code);
}

fn read_input(input_path: Option<&str>) -> Result<String, String> {
    let bytes = match input_path {
        Some(path) => fs::read(path).map_err(|e| format!("reading {}: {}", path, e))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| format!("reading stdin: {}", e))?;
            buffer
        }
    };
    String::from_utf8(bytes).map_err(|e| format!("input is not valid UTF-8: {}", e))
}

fn process_input(
    input: &str,
    input_file: Option<&str>,
    get_path: Option<&str>,
    format: Format,
    output_file: Option<&str>,
    check_only: bool,
) -> i32 {
    let filename = input_file.map(|p| {
        Path::new(p)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.to_string())
    });

    let root = match parse_with_filename(input, filename.as_deref()) {
        Ok(root) => root,
        Err(e) => {
            match input_file {
                Some(path) => eprintln!("{}: {}", path, e),
                None => eprintln!("Parse error: {}", e),
            }
            return 1;
        }
    };
    debug!(kind = %root.kind(), "parsed document");

    if check_only {
        if let Some(path) = input_file {
            println!("{}: ok", path);
        }
        return 0;
    }

    let value = match get_path {
        Some(path) => match select(&root, path) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
        None => &root,
    };

    output_value(value, format, output_file)
}

/// Resolve `path` against the root dict.
fn select<'a>(root: &'a Value, path: &str) -> Result<&'a Value, String> {
    let dict = root
        .as_dict()
        .ok_or_else(|| format!("--get needs a dict root, found {}", root.kind()))?;
    dict.get(path)
        .ok_or_else(|| format!("No value at \"{}\"", path))
}

fn output_value(value: &Value, format: Format, output_file: Option<&str>) -> i32 {
    let result = match format {
        Format::Debug => Ok(format!("{:?}\n", value).into_bytes()),
        Format::Yaml => transcode::yaml::encode(value)
            .map(String::into_bytes)
            .map_err(|e| format!("Cannot convert to YAML: {}", e)),
        Format::Toml => transcode::toml::encode(value)
            .map(String::into_bytes)
            .map_err(|e| format!("Cannot convert to TOML: {}", e)),
        Format::Cbor => {
            transcode::cbor::encode(value).map_err(|e| format!("Cannot convert to CBOR: {}", e))
        }
        Format::CborDiag => transcode::cbor::encode(value)
            .and_then(|bytes| transcode::cbor::diagnostic(&bytes))
            .map(String::into_bytes)
            .map_err(|e| format!("Cannot render CBOR diagnostic notation: {}", e)),
    };

    let bytes = match result {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match write_output(&bytes, output_file) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn write_output(output: &[u8], output_file: Option<&str>) -> Result<(), String> {
    match output_file {
        Some(path) => fs::write(path, output).map_err(|e| format!("writing {}: {}", path, e)),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output)
                .map_err(|e| format!("writing to stdout: {}", e))
        }
    }
}

fn print_help() {
    println!(
        "plist - PList XML command-line tool

USAGE:
    plist [OPTIONS] [FILE]

ARGS:
    [FILE]    Input file (reads from stdin if not provided or '-')

OPTIONS:
    -g, --get <PATH>       Print only the value at a dotted path, e.g.
                           CFBundleDocumentTypes.Editor. A path that reaches a
                           non-dict value early stops there.

    -t, --to <FORMAT>      Output format [default: debug]
                           Supported: debug, yaml, toml, cbor, diag

    -o, --output <FILE>    Write output to specified file

    --check                Check if input is valid (exit 0 if valid, 1 if invalid)

    -h, --help             Print help

    -V, --version          Print version

ENVIRONMENT:
    RUST_LOG               Log filter [default: {}]

EXAMPLES:
    # Show the parsed tree
    plist Info.plist

    # Validate a document
    plist --check Info.plist

    # Read one entry
    plist -g CFBundleIdentifier Info.plist

    # Convert to YAML
    plist -t yaml Info.plist

    # Convert to CBOR (binary)
    plist -t cbor Info.plist -o Info.cbor
",
        DEFAULT_LOG
    );
}
