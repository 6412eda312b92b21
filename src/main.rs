use std::fs;
use std::io;
use std::ops::Range;
use std::path::PathBuf;

use pcline::mapper::{
    AlignmentMapper, LineMapper, MapError, MarkerMapper, Resolution, SpanKind, Strategy, TraceSink,
};
use pcline::render::render_context;
use pcline::report::MappingReport;

struct Args {
    target_line: usize,
    original_path: PathBuf,
    generated_path: PathBuf,
    strategy: Strategy,
    show_context: Option<usize>,
    trace: bool,
    json: bool,
}

const USAGE: &str =
    "usage: pcline <line_number> <pc_file> <c_file> [--align] [--show[=N]] [--trace] [--json]";

fn parse_args() -> Result<Args, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut strategy = Strategy::Markers;
    let mut show_context = None;
    let mut trace = false;
    let mut json = false;

    for arg in std::env::args().skip(1) {
        if arg == "--align" || arg == "--alignment" {
            strategy = Strategy::Alignment;
        } else if arg == "--markers" {
            strategy = Strategy::Markers;
        } else if arg == "--show" {
            show_context = Some(3);
        } else if let Some(n) = arg.strip_prefix("--show=") {
            let n = n
                .parse::<usize>()
                .map_err(|_| format!("invalid context count: {}", n))?;
            show_context = Some(n);
        } else if arg == "--trace" {
            trace = true;
        } else if arg == "--json" {
            json = true;
        } else if arg.starts_with("--") {
            return Err(format!("unknown option: {}", arg));
        } else {
            positional.push(arg);
        }
    }

    if positional.len() != 3 {
        return Err("expected <line_number> <pc_file> <c_file>".to_string());
    }

    let target_line = positional[0]
        .parse::<usize>()
        .map_err(|_| format!("invalid line number: {}", positional[0]))?;

    Ok(Args {
        target_line,
        original_path: PathBuf::from(&positional[1]),
        generated_path: PathBuf::from(&positional[2]),
        strategy,
        show_context,
        trace,
        json,
    })
}

fn run_mapper(args: &Args, original: &[&str], generated: &[&str]) -> Result<Resolution, MapError> {
    match args.strategy {
        Strategy::Markers => {
            let mapper = MarkerMapper::new(generated, &args.original_path);
            mapper.resolve(args.target_line)
        }
        Strategy::Alignment => {
            let mut print_span = |kind: SpanKind, orig: Range<usize>, gen: Range<usize>| {
                eprintln!(
                    "  {:?}: original {}..{} <-> generated {}..{}",
                    kind, orig.start, orig.end, gen.start, gen.end
                );
            };
            let sink: Option<TraceSink> = if args.trace {
                eprintln!("alignment spans:");
                Some(&mut print_span)
            } else {
                None
            };
            let mapper = AlignmentMapper::new(original, generated, sink);
            mapper.resolve(args.target_line)
        }
    }
}

fn main() -> io::Result<()> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("pcline: {}", msg);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let original_text = fs::read_to_string(&args.original_path)?;
    let generated_text = fs::read_to_string(&args.generated_path)?;
    let original_lines: Vec<&str> = original_text.lines().collect();
    let generated_lines: Vec<&str> = generated_text.lines().collect();

    let resolution = match run_mapper(&args, &original_lines, &generated_lines) {
        Ok(resolution) => resolution,
        Err(err) => {
            eprintln!("pcline: {}", err);
            std::process::exit(2);
        }
    };

    let file_name = args
        .original_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.original_path.display().to_string());

    if args.json {
        let mut report = MappingReport::new(
            args.strategy,
            args.target_line,
            resolution,
            &args.original_path,
        );
        if let (Resolution::Original(line), Some(radius)) = (resolution, args.show_context) {
            report = report.with_context(&render_context(&original_lines, line, radius));
        }
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        println!("{}", text);
    } else {
        match resolution {
            Resolution::Original(line) => {
                println!("C line {} maps to {}:{}", args.target_line, file_name, line);
                if let Some(radius) = args.show_context {
                    println!("\nContext:");
                    for row in render_context(&original_lines, line, radius) {
                        let marker = if row.is_center { "-->" } else { "   " };
                        println!("{} {:5}: {}", marker, row.line_number, row.text);
                    }
                }
            }
            Resolution::Injected => {
                println!(
                    "C line {} was injected by the preprocessor; no {} line corresponds to it",
                    args.target_line, file_name
                );
            }
            Resolution::Boilerplate => {
                println!(
                    "C line {} precedes any region traceable to {}",
                    args.target_line, file_name
                );
            }
            Resolution::NotFound => {
                println!("Unable to map C line {} to {}", args.target_line, file_name);
            }
        }
    }

    match resolution {
        Resolution::Original(_) | Resolution::Injected => Ok(()),
        Resolution::Boilerplate | Resolution::NotFound => std::process::exit(1),
    }
}
