use hugo_hex::config::{BrowseConfig, Section};
use hugo_hex::parse_hex_file;
use hugo_hex::report::render;
use log::{debug, info};
use std::env;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

fn print_usage(program: &str) {
    println!("hugo-browse - inspect compiled Hugo story files");
    println!();
    println!(
        "Usage: {} <story.hex> [--json] [--section NAME]... [--config FILE]",
        program
    );
    println!("Examples:");
    println!("  {} cloak.hex", program);
    println!("  {} cloak.hex --section header --section grammar", program);
    println!("  {} cloak.hex --json > cloak.json", program);
    println!();
    println!("Sections: header, dictionary, textbank, objects, grammar, events, arrays, globals, specialwords");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    // No story file means the user wants help, not an error
    if args.len() < 2 {
        print_usage(&args[0]);
        return Ok(());
    }

    let story_path = &args[1];
    let mut config_path = None;
    let mut json = false;
    let mut sections = Vec::new();

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--section" => {
                let name = rest.next().ok_or("--section needs a section name")?;
                sections.push(name.parse::<Section>()?);
            }
            "--config" => {
                config_path = Some(rest.next().ok_or("--config needs a file name")?.clone());
            }
            other => return Err(format!("Unknown option: {other}").into()),
        }
    }

    let mut config = match &config_path {
        Some(path) => BrowseConfig::load(path)?,
        None => BrowseConfig::default(),
    };
    if json {
        config.json = true;
    }
    if !sections.is_empty() {
        config.sections = sections;
    }
    debug!("Using config {:?}", config);

    let mut file = match File::open(story_path) {
        Ok(file) => file,
        Err(e) => {
            match e.kind() {
                std::io::ErrorKind::NotFound => {
                    eprintln!("Error: Story file not found: {}", story_path);
                }
                std::io::ErrorKind::PermissionDenied => {
                    eprintln!(
                        "Error: Permission denied accessing story file: {}",
                        story_path
                    );
                }
                _ => {
                    eprintln!("Error: Cannot open story file '{}': {}", story_path, e);
                }
            }
            std::process::exit(1);
        }
    };
    let mut story_data = Vec::new();
    if let Err(e) = file.read_to_end(&mut story_data) {
        eprintln!("Error: Cannot read story file '{}': {}", story_path, e);
        std::process::exit(1);
    }

    let name = Path::new(story_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| story_path.clone());

    let story = match parse_hex_file(&story_data) {
        Ok(story) => story.with_file_info(&name, story_data.len()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Parsed {} ({} objects, {} dictionary words)",
        name,
        story.objects.len(),
        story.dictionary.len()
    );

    if config.json {
        println!("{}", serde_json::to_string_pretty(&story)?);
    } else {
        print!("{}", render(&story, &config));
    }

    Ok(())
}
