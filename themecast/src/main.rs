use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::debug;
use themecast_lib::{ExtractMode, Options, SourceContext, ThemeExtractor, TokenKind};

/// Extract color declarations from CSS into theme-scoped rules.
#[derive(Parser)]
#[command(name = "themecast")]
#[command(about = "Scope CSS color declarations under a theme selector")]
struct Args {
    /// Input CSS file.
    input: PathBuf,

    /// Output CSS file.
    output: PathBuf,

    /// JSON options file; command line flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme token value.
    #[arg(long)]
    value: Option<String>,

    /// Theme token kind: attribute, class, id or tag.
    #[arg(long)]
    kind: Option<String>,

    /// Compound the theme token onto the selector head instead of
    /// prefixing it as an ancestor.
    #[arg(long)]
    after: bool,

    /// Selector token to replace with the theme token; repeatable.
    #[arg(long, value_name = "TOKEN")]
    replace: Vec<String>,

    /// Keep routed declarations in the document as well.
    #[arg(long)]
    save_props: bool,

    /// Write the theme rules to a side file instead of reinserting them.
    #[arg(long)]
    extract: bool,

    /// Asset name template for --extract; [name] and [suffix] are
    /// substituted.
    #[arg(long, value_name = "TEMPLATE")]
    file_name: Option<String>,

    /// Root directory asset names are computed relative to.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Directory the extracted asset is written into; defaults to the
    /// output file's directory.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = load_options(args)?;
    apply_flags(&mut options, args)?;
    debug!("effective options: {options:?}");

    let css = fs::read_to_string(&args.input)?;
    let mut source = SourceContext::new(&args.input);
    if let Some(root) = &args.root {
        source = source.with_root(root);
    }

    let extractor = ThemeExtractor::new(options)?;
    let output = extractor.process(&css, Some(&source))?;

    fs::write(&args.output, &output.css)?;
    println!("Wrote {}", args.output.display());

    if let Some(asset) = output.asset {
        let dir = asset_dir(args);
        fs::create_dir_all(&dir)?;
        let path = dir.join(&asset.file);
        fs::write(&path, &asset.content)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn load_options(args: &Args) -> Result<Options, Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(Options::default()),
    }
}

fn apply_flags(options: &mut Options, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(value) = &args.value {
        options.selector.value = value.clone();
    }
    if let Some(kind) = &args.kind {
        options.selector.kind = kind.parse::<TokenKind>()?;
    }
    if args.after {
        options.selector.before = false;
    }
    if !args.replace.is_empty() {
        options.selector.replace = args.replace.clone();
    }
    if args.save_props {
        options.save_props = true;
    }
    if args.extract {
        let template = match &options.extract {
            ExtractMode::File { file_name } => file_name.clone(),
            ExtractMode::Off => None,
        };
        options.extract = ExtractMode::File {
            file_name: args.file_name.clone().or(template),
        };
    } else if let Some(template) = &args.file_name {
        if let ExtractMode::File { file_name } = &mut options.extract {
            *file_name = Some(template.clone());
        }
    }
    Ok(())
}

fn asset_dir(args: &Args) -> PathBuf {
    if let Some(dir) = &args.out_dir {
        return dir.clone();
    }
    let parent = args.output.parent().unwrap_or(Path::new(""));
    if parent.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        parent.to_path_buf()
    }
}
