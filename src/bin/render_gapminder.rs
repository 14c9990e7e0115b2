use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use gapminder_chart::api::{ChartSession, ChartSessionConfig, build_population_scene};
use gapminder_chart::dataset::load_csv_path;
use gapminder_chart::error::{ChartError, ChartResult};
use gapminder_chart::render::{NullRenderer, RenderFrame, Renderer, SvgRenderer};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "render_gapminder")]
#[command(version, about = "Render the fertility vs life expectancy chart from a country CSV")]
struct Cli {
    /// CSV with country, year, fertility, life_expectancy and population columns
    #[arg(short, long)]
    input: PathBuf,

    /// Year whose marks are shown
    #[arg(short, long)]
    year: Option<String>,

    /// Session config as JSON; missing fields use the stock layouts
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Main chart output (.svg, or .png with the `cairo-backend` feature)
    #[arg(short, long, default_value = "chart.svg")]
    output: PathBuf,

    /// Also render the population drill-down for this country
    #[arg(long)]
    drill_down: Option<String>,

    /// Drill-down output file
    #[arg(long, default_value = "popChart.svg")]
    drill_down_output: PathBuf,

    /// Print the distinct years in the input and exit
    #[arg(long)]
    list_years: bool,

    /// Log library debug events to stderr (needs the `telemetry` feature)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let _ = gapminder_chart::telemetry::init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> ChartResult<()> {
    let (dataset, summary) = load_csv_path(&cli.input)?;
    info!(
        rows = dataset.len(),
        dropped_rows = summary.dropped_rows,
        malformed_fields = summary.malformed_fields,
        "loaded {}",
        cli.input.display()
    );

    if cli.list_years {
        for year in dataset.years() {
            println!("{year}");
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => ChartSessionConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => ChartSessionConfig::default(),
    };
    if let Some(year) = cli.year {
        config = config.with_default_year(year);
    }

    if let Some(country) = &cli.drill_down {
        let layout = config.drill_down_layout;
        let scene = build_population_scene(country, &dataset, layout)?;
        write_frame(&scene.to_frame(layout.viewport()), &cli.drill_down_output)?;
        println!(
            "drill-down for {country}: {} point(s) -> {}",
            scene.path.len(),
            cli.drill_down_output.display()
        );
    }

    let session = ChartSession::new(NullRenderer::default(), NullRenderer::default(), config, dataset)?;
    write_frame(&session.main_frame(), &cli.output)?;
    println!(
        "year {}: {} visible mark(s) -> {}",
        session.selected_year(),
        session.visible_mark_count(),
        cli.output.display()
    );
    Ok(())
}

fn write_frame(frame: &RenderFrame, path: &Path) -> ChartResult<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("svg") => {
            let mut renderer = SvgRenderer::new();
            renderer.render(frame)?;
            fs::write(path, renderer.document())?;
            Ok(())
        }
        Some("png") => write_png(frame, path),
        _ => Err(ChartError::InvalidData(format!(
            "unsupported output extension for `{}` (expected .svg or .png)",
            path.display()
        ))),
    }
}

#[cfg(feature = "cairo-backend")]
fn write_png(frame: &RenderFrame, path: &Path) -> ChartResult<()> {
    use gapminder_chart::render::CairoRenderer;

    let width = i32::try_from(frame.viewport.width)
        .map_err(|_| ChartError::InvalidData("viewport width overflows i32".to_owned()))?;
    let height = i32::try_from(frame.viewport.height)
        .map_err(|_| ChartError::InvalidData("viewport height overflows i32".to_owned()))?;
    let mut renderer = CairoRenderer::new(width, height)?;
    renderer.render(frame)?;
    let mut file = fs::File::create(path)?;
    renderer.write_png(&mut file)
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_frame: &RenderFrame, path: &Path) -> ChartResult<()> {
    Err(ChartError::InvalidData(format!(
        "writing `{}` requires feature `cairo-backend`",
        path.display()
    )))
}
