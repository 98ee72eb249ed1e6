// src/cli.rs
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, Result};

use crate::catalog::Catalog;
use crate::config::consts::{BRUTE_FORCE_MAX_ID, DISCOVERED_URLS_FILE, URL_MAPPING_FILE, VALIDATE_SAMPLE};
use crate::config::options::{BatchOptions, DataDirs, LogOptions, NetOptions};
use crate::core::net::HttpClient;
use crate::loader::DataLoader;
use crate::organize::Organizer;
use crate::patch;
use crate::progress::ConsoleProgress;
use crate::scrape::{BatchScraper, ItemScraper, UrlMapper};
use crate::store;
use crate::validate::{self, placeholder, Report};

#[derive(Parser, Debug)]
#[command(name = "wr_scrape", version, about = "Scrape, patch and validate Wild Rift champion/item/rune data")]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Data root holding items/, runes/, scraped_champions/, champions_clean/, logs/
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Also write a daily log file under <root>/logs
    #[arg(long, global = true)]
    log_file: bool,

    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Pause between page fetches
    #[arg(long, global = true)]
    pause_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape items from the items page or a single item page
    #[command(group(ArgGroup::new("target").required(true).args(["all", "item", "url"])))]
    Items {
        #[arg(long)]
        all: bool,
        #[arg(long)]
        item: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Scrape and enhance one champion page
    Champion { url: String },
    /// Scrape every discovered champion
    Batch {
        #[arg(long)]
        max: Option<usize>,
        #[arg(long)]
        discover_only: bool,
        #[arg(long, default_value_t = crate::config::consts::WORKERS)]
        workers: usize,
        #[arg(long)]
        no_enhance: bool,
    },
    /// Crawl for champion URLs and write the URL mapping
    Discover {
        #[arg(long, default_value_t = VALIDATE_SAMPLE)]
        validate_sample: usize,
    },
    /// Find the page URL for one champion
    FindUrl {
        name: String,
        #[arg(long)]
        brute_force: bool,
    },
    /// Split enhanced champion files into items/, runes/ and champions_clean/
    Organize {
        /// Also take plain `_data.json` files
        #[arg(long)]
        include_data: bool,
    },
    /// Fill or repair saved records from the catalog
    Patch {
        #[arg(value_enum)]
        what: PatchWhat,
    },
    /// Check saved records; exits 1 when anything fails
    Validate {
        #[arg(value_enum)]
        what: ValidateWhat,
    },
    /// Compare local items against the live items page
    #[command(group(ArgGroup::new("target").required(true).args(["item", "all"])))]
    VerifyRemote {
        #[arg(long)]
        item: Option<String>,
        #[arg(long)]
        all: bool,
    },
    /// List values the catalog leaves out because sources disagree
    Disputes,
    /// Print one organized record
    Show {
        #[arg(value_enum)]
        what: ShowWhat,
        name: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PatchWhat {
    Details,
    Descriptions,
    Stats,
    Runes,
    Duplicates,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ValidateWhat {
    Placeholders,
    Tips,
    Descriptions,
    Schema,
    Crossref,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ShowWhat {
    Item,
    Rune,
    Champion,
}

impl GlobalArgs {
    fn dirs(&self) -> DataDirs {
        DataDirs::new(&self.root)
    }

    fn net(&self) -> NetOptions {
        let mut net = NetOptions::default();
        if let Some(url) = &self.base_url {
            net.base_url = url.clone();
        }
        if let Some(ms) = self.pause_ms {
            net.pause_ms = ms;
        }
        net
    }

    fn log(&self) -> LogOptions {
        LogOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            file_dir: self.log_file.then(|| self.dirs().logs()),
        }
    }
}

/// Parse arguments, run one command and return the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    crate::log::init(&cli.global.log());
    dispatch(cli)
}

fn dispatch(cli: Cli) -> Result<i32> {
    let g = &cli.global;
    let dirs = g.dirs();
    let net = g.net();
    let catalog = Catalog::get();

    match cli.command {
        Command::Items { all, item, url } => {
            let client = HttpClient::new(&net)?;
            let scraper = ItemScraper::new(&client, net, dirs.items());
            if all {
                let n = scraper.scrape_all(&mut ConsoleProgress::default())?;
                store::refresh_item_index(&dirs.items())?;
                println!("Saved {n} items to {}", dirs.items().display());
                return Ok(0);
            }
            let found = match (item, url) {
                (Some(name), _) => scraper.scrape_item(&name)?,
                (None, Some(url)) => scraper.scrape_url(&url)?,
                (None, None) => bail!("one of --all, --item or --url is required"),
            };
            match found {
                Some(i) => {
                    println!("{}", store::to_pretty(&i)?);
                    Ok(0)
                }
                None => Ok(1),
            }
        }

        Command::Champion { url } => {
            let client = HttpClient::new(&net)?;
            let scraper = BatchScraper::new(&client, net, BatchOptions::default(), dirs.clone());
            let (champ, path) = scraper.scrape_single(&url)?;
            println!("{}: saved to {}", champ.champion.name, path.display());
            if !scraper.enhancer().failed_items().is_empty() {
                scraper.enhancer().report().print_summary();
            }
            Ok(0)
        }

        Command::Batch { max, discover_only, workers, no_enhance } => {
            let opts = BatchOptions {
                max_champions: max,
                discover_only,
                workers: workers.max(1),
                enhance: !no_enhance,
                ..BatchOptions::default()
            };
            let client = HttpClient::new(&net)?;
            let scraper = BatchScraper::new(&client, net, opts, dirs.clone());

            let urls = scraper.discover_all()?;
            println!("Found {} champion URLs", urls.len());
            if discover_only {
                for url in &urls {
                    println!("   {url}");
                }
                store::write_json(&dirs.file(DISCOVERED_URLS_FILE), &urls)?;
                return Ok(0);
            }

            let flag = scraper.interrupt_flag();
            ctrlc::set_handler(move || {
                eprintln!("\nInterrupted, finishing current champions and saving partial results...");
                flag.store(true, Ordering::Relaxed);
            })?;

            let outcome = scraper.scrape_all(&urls, &mut ConsoleProgress::default())?;
            outcome.print_summary(&dirs);
            if !no_enhance {
                scraper.enhancer().report().print_summary();
            }
            Ok(if outcome.interrupted { 130 } else { 0 })
        }

        Command::Discover { validate_sample } => {
            let client = HttpClient::new(&net)?;
            let mapper = UrlMapper::new(&client, net);
            let urls = mapper.discover();
            if urls.is_empty() {
                eprintln!("No champion URLs discovered");
                return Ok(1);
            }
            let check = mapper.validate_all(&urls, validate_sample);
            println!("Valid: {}  Invalid: {}", check.valid.len(), check.invalid.len());
            for url in &check.invalid {
                println!("   invalid: {url}");
            }
            if check.assumed_rest {
                println!("Sample passed; remaining URLs assumed valid");
            }
            let keep: Vec<String> = urls.into_iter().filter(|u| !check.invalid.contains(u)).collect();
            store::write_json(&dirs.file(DISCOVERED_URLS_FILE), &keep)?;
            let mapping = mapper.mapping(&keep);
            mapper.save_mapping(&mapping, &dirs.file(URL_MAPPING_FILE))?;
            println!("Saved {} URLs and {} mappings", keep.len(), mapping.len());
            Ok(0)
        }

        Command::FindUrl { name, brute_force } => {
            let client = HttpClient::new(&net)?;
            let mapper = UrlMapper::new(&client, net).with_catalog(catalog);
            let found = mapper
                .search(&name)
                .or_else(|| brute_force.then(|| mapper.brute_force(&name, BRUTE_FORCE_MAX_ID)).flatten());
            match found {
                Some(url) => {
                    println!("{url}");
                    Ok(0)
                }
                None => {
                    eprintln!("No URL found for {name}");
                    Ok(1)
                }
            }
        }

        Command::Organize { include_data } => {
            let sum = Organizer::new(dirs.clone()).include_data(include_data).run()?;
            println!(
                "Organized {} champions, {} items, {} runes ({} errors)",
                sum.champions, sum.items, sum.runes, sum.errors
            );
            Ok(if sum.errors == 0 { 0 } else { 1 })
        }

        Command::Patch { what } => run_patch(what, &dirs, catalog),

        Command::Validate { what } => run_validate(what, &dirs, catalog),

        Command::VerifyRemote { item, all } => {
            let client = HttpClient::new(&net)?;
            let only = if all { None } else { item.as_deref() };
            let report = validate::remote::verify(&client, &net, &dirs.items(), only)?;
            report.print();
            Ok(report.exit_code())
        }

        Command::Disputes => {
            if catalog.disputes.is_empty() {
                println!("No disputed values");
            }
            for d in &catalog.disputes {
                println!("{:?} {}: {}", d.kind, d.entity, d.summary());
            }
            Ok(0)
        }

        Command::Show { what, name } => {
            let loader = DataLoader::new(dirs);
            let text = match what {
                ShowWhat::Item => loader.get_item(&name).map(|v| store::to_pretty(&v)),
                ShowWhat::Rune => loader.get_rune(&name).map(|v| store::to_pretty(&v)),
                ShowWhat::Champion => loader.get_champion_with_details(&name).map(|v| store::to_pretty(&v)),
            };
            match text {
                Some(t) => {
                    println!("{}", t?);
                    Ok(0)
                }
                None => {
                    eprintln!("{name} not found");
                    Ok(1)
                }
            }
        }
    }
}

fn run_patch(what: PatchWhat, dirs: &DataDirs, catalog: &Catalog) -> Result<i32> {
    let items = dirs.items();
    let results = match what {
        PatchWhat::Details => vec![("details", patch::details::patch(&items, catalog)?)],
        PatchWhat::Descriptions => vec![("descriptions", patch::descriptions::patch(&items)?)],
        PatchWhat::Stats => vec![("stats", patch::stats::patch(&items, catalog)?)],
        PatchWhat::Runes => vec![("runes", patch::runes::patch(&dirs.runes(), catalog)?)],
        PatchWhat::Duplicates => {
            let rep = patch::duplicates::patch(&items)?;
            for (name, later, first) in &rep.duplicates {
                println!("duplicate {name}: {} and {}", first.display(), later.display());
            }
            for (from, to) in &rep.renamed {
                println!("renamed {} -> {}", from.display(), to.display());
            }
            vec![("duplicates", rep.summary)]
        }
        PatchWhat::All => patch::run_all(dirs, catalog)?,
    };
    let mut errors = 0;
    for (name, sum) in &results {
        println!("{name}: {sum}");
        errors += sum.errors;
    }
    // run_all refreshes on its own; runes keep a separate index
    if !matches!(what, PatchWhat::All | PatchWhat::Runes) {
        store::refresh_item_index(&items)?;
    }
    Ok(if errors == 0 { 0 } else { 1 })
}

fn run_validate(what: ValidateWhat, dirs: &DataDirs, catalog: &Catalog) -> Result<i32> {
    let items = dirs.items();
    let (clean, scraped) = (dirs.clean_champions(), dirs.champions());
    let champion_dirs = [clean.as_path(), scraped.as_path()];
    let reports: Vec<Report> = match what {
        ValidateWhat::Placeholders => vec![placeholder::validate(&items, catalog)?],
        ValidateWhat::Tips => vec![validate::tips::validate(&items)?],
        ValidateWhat::Descriptions => vec![validate::descriptions::validate(&items)?],
        ValidateWhat::Schema => vec![validate::schema::validate(&items, &champion_dirs)?],
        ValidateWhat::Crossref => vec![validate::crossref::validate(&items, &champion_dirs)?],
        ValidateWhat::All => validate::run_all(dirs, catalog)?,
    };

    let mut code = 0;
    for r in &reports {
        r.print();
        if r.name == placeholder::REPORT_NAME {
            println!("Completion rate: {:.1}%", placeholder::completion_rate(r));
        }
        code = code.max(r.exit_code());
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("wr_scrape").chain(args.iter().copied()))
    }

    #[test]
    fn verify_remote_needs_a_target() {
        assert!(parse(&["verify-remote"]).is_err());
        assert!(parse(&["verify-remote", "--all", "--item", "Rabadon's Deathcap"]).is_err());

        let cli = parse(&["verify-remote", "--all"]).unwrap();
        assert!(matches!(cli.command, Command::VerifyRemote { item: None, all: true }));

        let cli = parse(&["verify-remote", "--item", "Rabadon's Deathcap"]).unwrap();
        match cli.command {
            Command::VerifyRemote { item, all } => {
                assert_eq!(item.as_deref(), Some("Rabadon's Deathcap"));
                assert!(!all);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn items_needs_exactly_one_target() {
        assert!(parse(&["items"]).is_err());
        assert!(parse(&["items", "--all"]).is_ok());
    }
}
