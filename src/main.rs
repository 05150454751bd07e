use anyhow::Context;
use flashkit::init_logging;
use flashkit_core::units::MeasurementSystem;
use flashkit_designer::{
    dimension_report, labels, CharCountMeasure, Drawing, FoldCatalog,
};

const USAGE: &str = "usage: flashkit <drawing.json> [--catalog <folds.json>] \
[--units metric|imperial] [--decimals <n>]";

struct Args {
    drawing: String,
    catalog: Option<String>,
    units: MeasurementSystem,
    decimals: usize,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut drawing = None;
    let mut catalog = None;
    let mut units = MeasurementSystem::Metric;
    let mut decimals = 1;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => {
                catalog = Some(args.next().context("--catalog needs a file path")?);
            }
            "--units" => {
                let value = args.next().context("--units needs a value")?;
                units = value
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
            }
            "--decimals" => {
                let value = args.next().context("--decimals needs a number")?;
                decimals = value.parse().context("--decimals must be an integer")?;
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if drawing.is_none() => drawing = Some(arg),
            other => anyhow::bail!("unexpected argument: {other}\n{USAGE}"),
        }
    }

    Ok(Args {
        drawing: drawing.with_context(|| USAGE.to_string())?,
        catalog,
        units,
        decimals,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = parse_args()?;

    let json = std::fs::read_to_string(&args.drawing)
        .with_context(|| format!("failed to read drawing file {}", args.drawing))?;
    let drawing: Drawing = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid drawing file", args.drawing))?;

    if let Some(path) = &args.catalog {
        let catalog =
            FoldCatalog::from_file(path).with_context(|| format!("failed to load catalog {path}"))?;
        // Surface unknown template references before printing anything.
        for line in &drawing.lines {
            for fold in [&line.start_fold, &line.end_fold].into_iter().flatten() {
                catalog
                    .get(&fold.template_id)
                    .with_context(|| format!("line {} references a missing fold template", line.id))?;
            }
        }
        tracing::info!(templates = catalog.templates().len(), "catalog loaded");
    }

    // Run label layout for each line so placement problems surface in
    // the log even without a canvas attached.
    for line in &drawing.lines {
        let descriptors = labels::line_labels(line, args.units, args.decimals);
        let placed = labels::resolve(&descriptors, &CharCountMeasure, "sans-serif");
        tracing::debug!(line = %line.id, labels = placed.len(), "resolved label layout");
    }

    print!("{}", dimension_report(&drawing, args.units, args.decimals));
    Ok(())
}
