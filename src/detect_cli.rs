use charset_detector_rs::entity::{DetectionResult, LanguageFilter};
use charset_detector_rs::universaldetector::detect_with_filter;
use clap::Parser;
use env_logger::Env;
use serde::Serialize;
use std::path::PathBuf;
use std::{fs, process};

/////////////////////////////////////////////////////////////////////////////////////
// charsetdetect CLI application
/////////////////////////////////////////////////////////////////////////////////////

#[derive(Parser, Debug)]
#[command(name = "Universal charset detector. Discover the originating encoding of a text file.")]
#[command(author, version, about, long_about = None)]
struct CLIDetectArgs {
    /// File(s) to be analysed
    #[arg(required = true, action = clap::ArgAction::Append)]
    pub files: Vec<PathBuf>,

    /// Display complementary information about the detection process on stderr.
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    pub verbose: bool,

    /// Only output the charset detected to STDOUT. Disables JSON output.
    #[arg(short, long, default_value_t = false)]
    pub minimal: bool,

    /// Restrict multi-byte/single-byte candidates to CJK scripts only.
    #[arg(long, default_value_t = false)]
    pub cjk_only: bool,

    /// Restrict candidates to non-CJK (Latin/Cyrillic/Greek/Hebrew/...) scripts only.
    #[arg(long, default_value_t = false)]
    pub non_cjk_only: bool,
}

#[derive(Debug, Serialize)]
struct CLIDetectResult {
    /// Path to the analysed file
    pub path: PathBuf,
    #[serde(flatten)]
    pub detection: DetectionResult,
}

fn lang_filter(args: &CLIDetectArgs) -> Result<LanguageFilter, String> {
    match (args.cjk_only, args.non_cjk_only) {
        (true, true) => Err("--cjk-only and --non-cjk-only are mutually exclusive.".into()),
        (true, false) => Ok(LanguageFilter::CJK),
        (false, true) => Ok(LanguageFilter::NON_CJK),
        (false, false) => Ok(LanguageFilter::ALL),
    }
}

fn run(args: &CLIDetectArgs) -> Result<i32, String> {
    let filter = lang_filter(args)?;
    let mut results: Vec<CLIDetectResult> = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let full_path = fs::canonicalize(path).map_err(|err| err.to_string())?;
        let bytes = fs::read(&full_path).map_err(|err| err.to_string())?;
        let detection = detect_with_filter(&bytes, filter);
        if detection.encoding.is_none() {
            eprintln!(
                "Unable to identify originating encoding for {:?}.",
                full_path
            );
        }
        results.push(CLIDetectResult { path: full_path, detection });
    }

    if args.minimal {
        for r in &results {
            println!("{}", r.detection.encoding.clone().unwrap_or_else(|| "undefined".to_string()));
        }
    } else {
        println!(
            "{}",
            if results.len() > 1 {
                serde_json::to_string_pretty(&results).unwrap()
            } else {
                serde_json::to_string_pretty(&results[0]).unwrap()
            }
        );
    }
    Ok(0)
}

pub fn main() {
    let args = CLIDetectArgs::parse();

    if args.verbose {
        env_logger::Builder::from_env(Env::default().default_filter_or("trace")).init();
    }

    match run(&args) {
        Err(e) => panic!("{e}"),
        Ok(exit_code) => process::exit(exit_code),
    }
}
