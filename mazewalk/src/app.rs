use mazecore::{Generator, Grid, Search, SearchReport, Strategy};

use crate::{error::AppError, render, settings::Settings};

/// Everything one generate-and-solve round produced.
#[derive(Debug)]
pub struct Outcome {
    pub grid: Grid,
    pub strategy: Strategy,
    pub report: SearchReport,
    /// `--steps` log lines, empty unless asked for.
    pub steps: Vec<String>,
}

impl Outcome {
    pub fn drawing(&self) -> String {
        render::render(&self.grid.to_raw_arrays(), self.report.success_path())
    }

    pub fn summary(&self) -> String {
        let Self {
            strategy, report, ..
        } = self;

        if report.found() {
            format!(
                "{strategy}: explored {} cells, path of {} cells, {} dead ends",
                report.explored().len(),
                report.success_path().len(),
                report.failed_paths().len()
            )
        } else {
            format!(
                "{strategy}: finish not reachable after exploring {} cells",
                report.explored().len()
            )
        }
    }
}

/// Generates a maze as configured and solves it.
pub fn run(settings: &Settings, record_steps: bool) -> Result<Outcome, AppError> {
    let strategy = settings.get_strategy()?;
    let generator = Generator::new(settings.get_width(), settings.get_height())?;
    let mut rng = Generator::rng(settings.get_seed());

    let grid = generator.generate(&mut rng)?;
    let start = grid.start().ok_or(AppError::MissingEndpoint("start"))?;
    let finish = grid.finish().ok_or(AppError::MissingEndpoint("finish"))?;
    log::info!("{}x{} maze, {start:?} to {finish:?}", grid.width(), grid.height());

    let mut steps = Vec::new();
    let report = {
        let mut search = Search::new(&grid, start, finish)?;
        if record_steps {
            search = search.on_visit(|visit, _| {
                steps.push(render::visit_line(steps.len() + 1, visit));
            });
        }
        search.run_strategy(strategy)
    };

    Ok(Outcome {
        grid,
        strategy,
        report,
        steps,
    })
}
