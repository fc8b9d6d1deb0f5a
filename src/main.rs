use clap::{ArgGroup, Parser};
use solar_packer::packer::Packer;
use solar_packer::render;
use solar_packer::roof::PanelIds;
use solar_packer::types::{Rect, RoofShape};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "solar_packer",
    about = "Greedy solar panel packing on rectangular and triangular roofs"
)]
#[command(group(ArgGroup::new("roof_shape").required(true).args(["roof", "triangle"])))]
struct Cli {
    /// Panel dimensions in grid cells (WxH, e.g. 2x1)
    #[arg(long, value_parser = parse_dimensions)]
    panel: Rect,

    /// Rectangular roof as ROWSxCOLS (e.g. 10x12)
    #[arg(long, value_parser = parse_dimensions)]
    roof: Option<Rect>,

    /// Triangular roof as HEIGHTxBASE (e.g. 4x8)
    #[arg(long, value_parser = parse_dimensions)]
    triangle: Option<Rect>,

    /// Print the occupancy grid of each strategy
    #[arg(long)]
    layout: bool,

    /// Print a JSON report instead of the text summary
    #[arg(long)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected AxB", s));
    }
    let a = parts[0]
        .parse::<u32>()
        .map_err(|_| format!("invalid first dimension in '{}'", s))?;
    let b = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid second dimension in '{}'", s))?;
    if a == 0 || b == 0 {
        return Err(format!("dimensions must be non-zero in '{}'", s));
    }
    Ok(Rect::new(a, b))
}

fn roof_shape(cli: &Cli) -> Result<RoofShape, String> {
    match (cli.roof, cli.triangle) {
        (Some(r), None) => Ok(RoofShape::Rectangle {
            rows: r.rows,
            cols: r.cols,
        }),
        (None, Some(t)) => Ok(RoofShape::Triangle {
            height: t.rows,
            base: t.cols,
        }),
        _ => Err("exactly one of --roof or --triangle is required".to_string()),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let shape = roof_shape(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let ids = PanelIds::new();
    let packing = Packer::new(shape, cli.panel)
        .and_then(|packer| packer.with_ids(ids.clone()).pack())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    tracing::debug!(ids_issued = ids.issued(), "packing finished");

    if cli.json {
        let report = packing.report(cli.layout);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if cli.layout {
        print!("{}", render::render_packing(&packing));
    }

    for (strategy, roof) in packing.surfaces() {
        println!("{}: {} panels", strategy, roof.panel_count());
    }
    let (best, _) = packing.best();
    println!(
        "Summary: {} panel{} of {} on {} ({})",
        packing.panel_count(),
        if packing.panel_count() == 1 { "" } else { "s" },
        cli.panel,
        shape,
        best,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("4x8"), Ok(Rect::new(4, 8)));
        assert!(parse_dimensions("4x0").is_err());
        assert!(parse_dimensions("4").is_err());
        assert!(parse_dimensions("4xa").is_err());
    }

    #[test]
    fn test_roof_shape_from_flags() {
        let cli = Cli::try_parse_from(["solar_packer", "--panel", "2x1", "--triangle", "4x8"]).unwrap();
        assert_eq!(
            roof_shape(&cli),
            Ok(RoofShape::Triangle { height: 4, base: 8 })
        );
        let cli = Cli::try_parse_from(["solar_packer", "--panel", "2x1", "--roof", "3x5"]).unwrap();
        assert_eq!(roof_shape(&cli), Ok(RoofShape::Rectangle { rows: 3, cols: 5 }));
    }

    #[test]
    fn test_roof_shape_requires_exactly_one_flag() {
        assert!(Cli::try_parse_from(["solar_packer", "--panel", "2x1"]).is_err());
        assert!(
            Cli::try_parse_from(["solar_packer", "--panel", "2x1", "--roof", "3x5", "--triangle", "4x8"])
                .is_err()
        );

        let mut cli = Cli::try_parse_from(["solar_packer", "--panel", "2x1", "--roof", "3x5"]).unwrap();
        cli.roof = None;
        assert!(roof_shape(&cli).is_err());
        cli.roof = Some(Rect::new(3, 5));
        cli.triangle = Some(Rect::new(4, 8));
        assert!(roof_shape(&cli).is_err());
    }
}
