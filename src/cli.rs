// src/cli.rs
use std::collections::BTreeSet;
use std::env;
use std::error::Error;

use crate::config::consts::SITE_ROOT;
use crate::config::options::{CharacterSelector, ExportFormat, ExportOptions, ScrapeOptions};
use crate::data::Tables;
use crate::progress::Progress;
use crate::query::{self, Query};
use crate::scrape;
use crate::stats::{MainStat, Piece, Stat, SUBSTATS};

pub enum Command {
    Scrape(ScrapeOptions),
    ListSets,
    Filter {
        query: Query,
        export: Option<ExportOptions>,
    },
}

pub fn run() -> Result<(), Box<dyn Error>> {
    if env::args().len() == 1 {
        // only program name
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }
    run_command(parse_cli()?)
}

pub fn run_command(cmd: Command) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Scrape(opts) => {
            let mut progress = CliProgress::default();
            let summary = scrape::run(&opts, Some(&mut progress))?;
            println!(
                "Scraped {} characters and {} relic sets into {} files.",
                summary.characters,
                summary.relic_sets,
                summary.files.len()
            );
            Ok(())
        }
        Command::ListSets => {
            let tables = load_tables()?;
            for name in tables.relic_set_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Filter { query, export } => {
            let tables = load_tables()?;
            for warning in query::advisories(&query) {
                eprintln!("Warning: {}", warning);
            }
            let matches = query::resolve(&tables, &query)?;
            if matches.is_empty() {
                println!("No matches.");
                return Ok(());
            }
            for name in &matches {
                let url = tables
                    .characters_to_urls
                    .get(name)
                    .map(|u| join!(SITE_ROOT, u))
                    .unwrap_or_default();
                println!("{}\t{}", name, url);
            }
            if let Some(export) = export {
                let headers = Some(vec![s!("Character"), s!("URL"), s!("IMG")]);
                let rows: Vec<Vec<String>> = matches
                    .iter()
                    .map(|name| {
                        vec![
                            name.clone(),
                            tables.characters_to_urls.get(name).cloned().unwrap_or_default(),
                            tables.characters_to_imgs.get(name).cloned().unwrap_or_default(),
                        ]
                    })
                    .collect();
                let path = crate::file::write_export(&export, &headers, &rows)?;
                eprintln!("Wrote {} rows to {}", rows.len(), path.display());
            }
            Ok(())
        }
    }
}

fn load_tables() -> Result<Tables, Box<dyn Error>> {
    Tables::load().map_err(|e| format!("No local tables ({}). Run with --scrape first.", e).into())
}

fn parse_cli() -> Result<Command, Box<dyn Error>> {
    let mut args = env::args().skip(1);

    let mut do_scrape = false;
    let mut scrape_opts = ScrapeOptions::default();
    let mut list_sets = false;

    let mut query = Query::default();
    let mut substats_given = false;
    let mut export: Option<ExportOptions> = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--scrape" => do_scrape = true,
            "--character" => {
                let v = args.next().ok_or("Missing value for --character")?;
                scrape_opts.characters = CharacterSelector::One(v);
                do_scrape = true;
            }
            "--characters" => {
                let v = args.next().ok_or("Missing value for --characters")?;
                let slugs: Vec<String> = v
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if slugs.is_empty() {
                    return Err("Empty slug list for --characters".into());
                }
                scrape_opts.characters = CharacterSelector::Slugs(slugs);
                do_scrape = true;
            }
            "--no-relic-sets" => scrape_opts.relic_sets = false,
            "--list-sets" => list_sets = true,
            "--set" => {
                let v = args.next().ok_or("Missing value for --set")?;
                query.relic_set = Some(v);
            }
            "--ignore-sets" => query.relic_set = None,
            "--piece" => {
                let v = args.next().ok_or("Missing value for --piece")?;
                query.piece = if v.eq_ignore_ascii_case("any") {
                    None
                } else {
                    Some(Piece::from_name(&v).ok_or_else(|| format!("Unknown piece: {}", v))?)
                };
            }
            "--stat" => {
                let v = args.next().ok_or("Missing value for --stat")?;
                query.main_stat = MainStat::from_name(&v)
                    .ok_or_else(|| format!("Unknown main stat: {}", v))?;
            }
            "--substats" => {
                let v = args.next().ok_or("Missing value for --substats")?;
                query.substats = parse_substat_list(&v)?;
                substats_given = true;
            }
            "-o" | "--out" => {
                let v = args.next().ok_or("Missing output path")?;
                let mut opts = export.unwrap_or_default();
                opts.set_path(&v);
                export = Some(opts);
            }
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                let mut opts = export.unwrap_or_default();
                opts.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };
                export = Some(opts);
            }
            "--no-headers" => {
                let mut opts = export.unwrap_or_default();
                opts.include_headers = false;
                export = Some(opts);
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    query.filter_by_substats = substats_given;

    if do_scrape {
        return Ok(Command::Scrape(scrape_opts));
    }
    if list_sets {
        return Ok(Command::ListSets);
    }
    Ok(Command::Filter { query, export })
}

fn parse_substat_list(s: &str) -> Result<BTreeSet<Stat>, Box<dyn Error>> {
    let mut out = BTreeSet::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        let stat = Stat::from_name(part)
            .filter(|st| SUBSTATS.contains(st))
            .ok_or_else(|| format!("Unknown substat: {}", part))?;
        out.insert(stat);
    }
    Ok(out)
}

/// Prints scrape progress as plain lines.
#[derive(Default)]
struct CliProgress {
    done: usize,
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Fetching {} character pages…", total);
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }
    fn item_done(&mut self, slug: &str) {
        self.done += 1;
        eprintln!("  [{}/{}] {}", self.done, self.total, slug);
    }
    fn item_failed(&mut self, slug: &str) {
        self.done += 1;
        eprintln!("  [{}/{}] {} — failed, skipped", self.done, self.total, slug);
    }
    fn finish(&mut self) {
        eprintln!("Fetch complete ({}/{})", self.done, self.total);
    }
}
