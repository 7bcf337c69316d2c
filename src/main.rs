//! labelforge – command-line asset-tag label sheet generator.
//!
//! Usage:
//!   labelforge --range A007 A012 [--serials serials.txt] [output.pdf]
//!   labelforge --list tags.txt [output.pdf]
//!
//! If the output path is omitted the sheet is written to `asset_tags.pdf`
//! in the current directory.

use std::{env, fs, path::PathBuf, process};

use label_forge::fonts::FontManager;
use label_forge::pipeline::{build_records, plan_sheet, render_plan};
use label_forge::sheet::SheetConfig;
use label_forge::tags::split_serial_lines;
use label_forge::SheetRequest;

enum Mode {
    Range { start: String, end: String },
    List { path: PathBuf },
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut mode: Option<Mode> = None;
    let mut serials_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut title_line: Option<String> = None;
    let mut font_path: Option<PathBuf> = None;
    let mut dump_plan = false;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--range" | "-r" => {
                let (Some(start), Some(end)) = (iter.next(), iter.next()) else {
                    eprintln!("--range needs a start tag and an end tag");
                    process::exit(1);
                };
                mode = Some(Mode::Range {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
            "--list" | "-l" => match iter.next() {
                Some(p) => mode = Some(Mode::List {
                    path: PathBuf::from(p),
                }),
                None => {
                    eprintln!("--list needs a file path");
                    process::exit(1);
                }
            },
            "--serials" | "-s" => match iter.next() {
                Some(p) => serials_path = Some(PathBuf::from(p)),
                None => {
                    eprintln!("--serials needs a file path");
                    process::exit(1);
                }
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => title_line = Some(v.clone()),
                None => {
                    eprintln!("--title needs a value");
                    process::exit(1);
                }
            },
            "--font" => match iter.next() {
                Some(p) => font_path = Some(PathBuf::from(p)),
                None => {
                    eprintln!("--font needs a file path");
                    process::exit(1);
                }
            },
            "--plan" => dump_plan = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if output_path.is_some() {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                output_path = Some(PathBuf::from(path));
            }
        }
    }

    let Some(mode) = mode else {
        eprintln!("Error: pick a mode with --range or --list.");
        print_usage(&args[0]);
        process::exit(1);
    };

    let request = match mode {
        Mode::Range { start, end } => {
            let serials = match serials_path {
                Some(p) => match fs::read_to_string(&p) {
                    Ok(raw) => split_serial_lines(&raw),
                    Err(e) => {
                        eprintln!("Error reading '{}': {e}", p.display());
                        process::exit(1);
                    }
                },
                None => Vec::new(),
            };
            SheetRequest::Range {
                start,
                end,
                serials,
            }
        }
        Mode::List { path } => match fs::read_to_string(&path) {
            Ok(raw) => SheetRequest::List { raw },
            Err(e) => {
                eprintln!("Error reading '{}': {e}", path.display());
                process::exit(1);
            }
        },
    };

    let records = match build_records(&request) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    if records.is_empty() {
        eprintln!("No tags generated. Please check your input.");
        process::exit(1);
    }

    let mut config = SheetConfig::default();
    if let Some(t) = title_line {
        config.title_line = t;
    }

    let mut fonts = FontManager::new();
    if let Some(p) = font_path {
        match fs::read(&p) {
            Ok(bytes) => {
                // Measure both weights with the same face; rendering still
                // uses the builtin Helvetica pair.
                if let Err(e) = fonts
                    .load_font(false, bytes.clone())
                    .and_then(|()| fonts.load_font(true, bytes))
                {
                    eprintln!("Error loading font '{}': {e}", p.display());
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error reading '{}': {e}", p.display());
                process::exit(1);
            }
        }
    }

    let plan = match plan_sheet(&records, &config, &fonts) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error laying out sheet: {e}");
            process::exit(1);
        }
    };

    let output = output_path.unwrap_or_else(|| {
        PathBuf::from(if dump_plan {
            "asset_tags.json"
        } else {
            "asset_tags.pdf"
        })
    });

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating output directory: {e}");
                process::exit(1);
            }
        }
    }

    if dump_plan {
        if let Err(e) = fs::write(&output, plan.to_json()) {
            eprintln!("Error writing '{}': {e}", output.display());
            process::exit(1);
        }
        eprintln!(
            "Wrote '{}' ({} labels, {} page{})",
            output.display(),
            plan.cell_count(),
            plan.pages.len(),
            if plan.pages.len() == 1 { "" } else { "s" }
        );
        return;
    }

    match render_plan(&plan) {
        Ok(bytes) => {
            if let Err(e) = fs::write(&output, &bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{})",
                output.display(),
                bytes.len(),
                plan.pages.len(),
                if plan.pages.len() == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error generating PDF: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("labelforge – asset-tag label sheet generator (label-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} --range <START> <END> [--serials FILE] [output.pdf]");
    eprintln!("  {prog} --list <FILE> [output.pdf]");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  --range, -r    Expand an inclusive tag range (e.g. A007 A012)");
    eprintln!("  --list, -l     One label per line; 'text,barcode' or 'text<TAB>barcode'");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --serials, -s  File of serial numbers to pair with the range, one per line");
    eprintln!("  --title, -t    Title line printed on every label (default: \"Property of Aquera\")");
    eprintln!("  --font         TTF/OTF used to measure text for centering");
    eprintln!("  --plan         Write the sheet plan as JSON instead of a PDF");
    eprintln!("  --help         Print this message");
}
