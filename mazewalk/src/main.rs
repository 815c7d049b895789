use clap::Parser;
use mazewalk::{app, logging, settings::Settings, AppError};

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazewalk")]
struct Args {
    #[clap(long, help = "Board width in cells, walls included")]
    width: Option<usize>,
    #[clap(long, help = "Board height in cells, walls included")]
    height: Option<usize>,
    #[clap(long, help = "Seed for the maze generator")]
    seed: Option<u64>,
    #[clap(short, long, help = "bfs, bfs-chunked, dfs, recursive-dfs or best-first")]
    strategy: Option<String>,
    #[clap(short, long, action, help = "Report breadth-first search layer by layer")]
    chunked: bool,
    #[clap(long, action, help = "Print every visit of the search")]
    steps: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeatable")]
    verbose: u8,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

impl Args {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(width) = self.width {
            settings = settings.set_width(width);
        }
        if let Some(height) = self.height {
            settings = settings.set_height(height);
        }
        if let Some(seed) = self.seed {
            settings = settings.set_seed(seed);
        }
        if let Some(strategy) = &self.strategy {
            settings = settings.set_strategy(strategy.as_str());
        }
        if self.chunked {
            settings = settings.set_chunked(true);
        }
        settings
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings_path = Settings::default_path();

    if args.reset_config {
        return Settings::reset_config(&settings_path);
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(&settings_path)?);
        return Ok(());
    }

    better_panic::install();

    let settings = args.apply(Settings::load(&settings_path)?);
    logging::init(logging::raise_level(settings.get_log_level(), args.verbose))?;

    let outcome = app::run(&settings, args.steps)?;
    for line in &outcome.steps {
        println!("{line}");
    }
    print!("{}", outcome.drawing());
    println!("{}", outcome.summary());

    Ok(())
}
