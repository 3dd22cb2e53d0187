use std::{fs::File, io::BufWriter, path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::Parser;
use navgraph_formats::load_graph;
use navgraph_viewer::{
    Bounds, DrawCommand, DrawList, Fit, GraphView, Pick,
    cli::{Args, ViewPreset, ViewSettings, load_view_preset},
    draw::{FixedAdvanceFont, LabelFont, text::load_font},
    graph_view::DEFAULT_TEXT_SIZE,
    raster::Raster,
};
use serde::Serialize;

#[derive(Serialize)]
struct DrawListExport<'a> {
    map: Option<&'a str>,
    bounds: Bounds,
    selected: Option<Pick>,
    commands: &'a [DrawCommand],
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::init();

    let preset = match args.preset.as_ref() {
        Some(path) => load_view_preset(path)?,
        None => ViewPreset::default(),
    };
    let settings = ViewSettings::resolve(&args, &preset)?;

    let graph = load_graph(&args.graph).context("loading navigation graph")?;
    println!(
        "Loaded {} waypoints and {} lanes from {}",
        graph.num_waypoints(),
        graph.num_lanes(),
        args.graph.display()
    );

    let font: Arc<dyn LabelFont> = match args.font.as_ref() {
        Some(path) => Arc::new(load_font(path)?),
        None => Arc::new(FixedAdvanceFont::default()),
    };

    let mut view = GraphView::new(&graph, settings.lane_width, font);
    if settings.text_size != DEFAULT_TEXT_SIZE {
        view.set_text_size(settings.text_size);
    }

    let map_names = view.get_map_names();
    if args.list_maps {
        println!("Floors ({}):", map_names.len());
        for name in &map_names {
            let marker = if view.current_map() == Some(name.as_str()) {
                "*"
            } else {
                " "
            };
            println!(" {marker} {name}");
        }
    }

    if let Some(map) = args.map.as_deref() {
        if !view.choose_map(map) {
            bail!("unknown floor {map:?} (available: {})", map_names.join(", "));
        }
    }

    let bounds = *view.bounds();
    if bounds.is_empty() {
        println!("Graph has no same-floor lanes; nothing to draw");
    } else {
        println!(
            "Bounds: min ({:.3}, {:.3}) max ({:.3}, {:.3})",
            bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
        );
    }
    println!("Active floor: {}", view.current_map().unwrap_or("-"));

    for point in &args.pick {
        match view.pick(point.x, point.y) {
            Some(chosen) => {
                view.select(chosen);
                let description = view
                    .describe(chosen)
                    .unwrap_or_else(|| format!("{chosen:?}"));
                println!("pick ({:.3}, {:.3}): {description}", point.x, point.y);
            }
            None => println!("pick ({:.3}, {:.3}): nothing", point.x, point.y),
        }
    }

    if let Some(path) = args.dump_draw_list.as_ref() {
        let mut list = DrawList::new();
        view.draw(&mut list);
        write_draw_list(&view, &list, path)
            .with_context(|| format!("writing draw list to {}", path.display()))?;
        println!(
            "Draw list exported to {} ({} commands)",
            path.display(),
            list.len()
        );
    }

    if let Some(path) = args.dump_frame.as_ref() {
        let transform = Fit::new([bounds], settings.margin).compute_transform(settings.frame_size);
        let mut raster = Raster::new(settings.frame_size, transform, settings.background, view.font());
        view.draw(&mut raster);
        raster
            .write_png(path)
            .with_context(|| format!("writing PNG to {}", path.display()))?;
        let stats = raster.stats(settings.background);
        println!(
            "Frame exported to {} ({}x{}, {} / {} pixels painted)",
            path.display(),
            raster.width(),
            raster.height(),
            stats.painted_pixels,
            stats.total_pixels
        );
    }

    Ok(())
}

fn write_draw_list(view: &GraphView, list: &DrawList, path: &Path) -> Result<()> {
    let export = DrawListExport {
        map: view.current_map(),
        bounds: *view.bounds(),
        selected: view.selected(),
        commands: list.commands(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)?;
    Ok(())
}
