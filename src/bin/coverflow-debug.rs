// src/bin/coverflow-debug.rs

use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coverflow_core::{
    CoverFlowConfig, ItemList, Padding, PropertyValue, PROP_GRAVITY, PROP_LAYOUT_MODE, PROP_LOWEST_ALPHA,
    PROP_MIN_SCALE, PROP_REFLECTION_GAP, PROP_REFLECTION_HEIGHT, PROP_SCALE_FALLOFF, PROP_VISIBLE_ITEM,
};
use coverflow_layout::LayoutBounds;
use coverflow_render::{DrawCommand, RecordingRenderer, Renderer};
use coverflow_runtime::{CoverFlowController, ScrollPhase};

const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "coverflow-debug")]
#[command(about = "Debug renderer that prints cover flow frames as text")]
struct Args {
    /// Number of items in the carousel
    #[arg(long, default_value_t = 10)]
    items: usize,

    /// Intrinsic item sizes as WxH, comma separated and repeated across items
    #[arg(long)]
    sizes: Option<String>,

    /// Number of visible items (odd, at least 3)
    #[arg(long, default_value = "3")]
    visible_item: String,

    /// Alpha of the outermost visible items (0-255)
    #[arg(long)]
    lowest_alpha: Option<String>,

    /// Reflection height, e.g. 30% or 0.3
    #[arg(long)]
    reflection_height: Option<String>,

    /// Gap between item and reflection, e.g. 10dp or 12px
    #[arg(long)]
    reflection_gap: Option<String>,

    /// top, bottom or center
    #[arg(long)]
    gravity: Option<String>,

    /// match_parent or wrap_content
    #[arg(long)]
    layout_mode: Option<String>,

    /// Scale of the outermost visible items
    #[arg(long)]
    min_scale: Option<String>,

    /// linear or ease_out
    #[arg(long)]
    scale_falloff: Option<String>,

    /// Display density used to resolve dp values
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Container width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Container height in pixels
    #[arg(long, default_value_t = 400.0)]
    height: f32,

    /// Uniform container padding in pixels
    #[arg(long, default_value_t = 0.0)]
    padding: f32,

    /// Starting scroll offset
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset: f32,

    /// Release a drag at this velocity (items per second) and trace the fling
    #[arg(long, allow_hyphen_values = true)]
    fling: Option<f32>,

    /// Maximum number of animation frames to trace
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// Output format (tree, json, detailed)
    #[arg(long, default_value = "tree")]
    format: String,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Controller state captured alongside each recorded frame.
struct FrameInfo {
    offset: f32,
    phase: ScrollPhase,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let config = CoverFlowConfig::from_properties(&collect_properties(&args), args.density)
        .context("Invalid cover flow configuration")?;
    let source = build_source(&args)?;

    let bounds = LayoutBounds::new(args.width, args.height).with_padding(Padding::uniform(args.padding));
    let mut renderer = RecordingRenderer::initialize(Vec2::new(args.width, args.height))?;
    let mut controller = CoverFlowController::new(config).with_bounds(bounds);
    controller.set_item_source(source);
    controller.scroll_by(args.offset);

    let mut frames = Vec::new();
    controller.render(&mut renderer, bounds)?;
    frames.push(FrameInfo { offset: controller.offset(), phase: controller.phase() });

    if let Some(velocity) = args.fling {
        controller.begin_drag();
        controller.end_drag(velocity);
        info!("Tracing release at {:.2} items/s ({:?})", velocity, controller.phase());

        while controller.phase().is_animating() && frames.len() <= args.frames {
            controller.update(FRAME_TIME);
            controller.render(&mut renderer, bounds)?;
            frames.push(FrameInfo { offset: controller.offset(), phase: controller.phase() });
        }
    }

    let recorded = renderer.take_frames();
    let output_text = match args.format.as_str() {
        "tree" => generate_tree_output(&frames, &recorded),
        "json" => generate_json_output(&frames, &recorded),
        "detailed" => generate_detailed_output(&controller, &args, &frames, &recorded),
        _ => anyhow::bail!("Unknown format: {}. Use 'tree', 'json', or 'detailed'", args.format),
    }?;

    if let Some(output_file) = args.output {
        fs::write(&output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file))?;
        println!("Output written to: {}", output_file);
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

fn collect_properties(args: &Args) -> HashMap<String, PropertyValue> {
    let mut properties = HashMap::new();
    properties.insert(PROP_VISIBLE_ITEM.to_string(), PropertyValue::parse(&args.visible_item));

    let optional = [
        (PROP_LOWEST_ALPHA, &args.lowest_alpha),
        (PROP_REFLECTION_HEIGHT, &args.reflection_height),
        (PROP_REFLECTION_GAP, &args.reflection_gap),
        (PROP_GRAVITY, &args.gravity),
        (PROP_LAYOUT_MODE, &args.layout_mode),
        (PROP_MIN_SCALE, &args.min_scale),
        (PROP_SCALE_FALLOFF, &args.scale_falloff),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            properties.insert(key.to_string(), PropertyValue::parse(value));
        }
    }
    properties
}

fn build_source(args: &Args) -> Result<ItemList<String>> {
    let labels = (0..args.items).map(|i| format!("item-{i}"));

    let Some(sizes) = args.sizes.as_deref() else {
        return Ok(ItemList::new(labels.collect()));
    };

    let sizes = sizes.split(',').map(parse_size).collect::<Result<Vec<_>>>()?;
    if sizes.is_empty() {
        anyhow::bail!("--sizes needs at least one WxH entry");
    }
    Ok(ItemList::with_sizes(
        labels.enumerate().map(|(i, label)| (label, sizes[i % sizes.len()])).collect(),
    ))
}

fn parse_size(size: &str) -> Result<Vec2> {
    let (w, h) = size
        .trim()
        .split_once('x')
        .with_context(|| format!("Invalid size '{}', expected WxH", size))?;
    let w: f32 = w.trim().parse().with_context(|| format!("Invalid width in '{}'", size))?;
    let h: f32 = h.trim().parse().with_context(|| format!("Invalid height in '{}'", size))?;
    Ok(Vec2::new(w, h))
}

fn describe_command(command: &DrawCommand<String>) -> String {
    let rect = command.screen_rect();
    let geometry = format!(
        "pos:({:.1},{:.1}) size:({:.1},{:.1})",
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height()
    );
    match command {
        DrawCommand::DrawItem { content, alpha, transform, .. } => {
            format!("{} scale:{:.3} alpha:{} {}", content, transform.matrix2.x_axis.x, alpha, geometry)
        }
        DrawCommand::DrawReflection { alpha_gradient, .. } => {
            format!("reflection alpha:{}->{} {}", alpha_gradient.near, alpha_gradient.far, geometry)
        }
    }
}

fn generate_tree_output(frames: &[FrameInfo], recorded: &[Vec<DrawCommand<String>>]) -> Result<String> {
    let mut output = String::new();

    for (index, (info, commands)) in frames.iter().zip(recorded).enumerate() {
        output.push_str(&format!("Frame {} offset:{:.3} phase:{:?}\n", index, info.offset, info.phase));

        let item_count = commands.iter().filter(|c| !c.is_reflection()).count();
        let mut items_seen = 0;
        for command in commands {
            if command.is_reflection() {
                let rail = if items_seen == item_count { "    " } else { "│   " };
                output.push_str(&format!("{}└── {}\n", rail, describe_command(command)));
            } else {
                items_seen += 1;
                let branch = if items_seen == item_count { "└── " } else { "├── " };
                output.push_str(&format!("{}{}\n", branch, describe_command(command)));
            }
        }
    }

    Ok(output)
}

fn generate_json_output(frames: &[FrameInfo], recorded: &[Vec<DrawCommand<String>>]) -> Result<String> {
    let mut output = String::new();
    output.push_str("{\n");
    output.push_str(&format!("  \"frame_count\": {},\n", frames.len()));
    output.push_str("  \"frames\": [\n");

    for (index, (info, commands)) in frames.iter().zip(recorded).enumerate() {
        if index > 0 {
            output.push_str(",\n");
        }
        output.push_str("    {\n");
        output.push_str(&format!("      \"offset\": {:.4},\n", info.offset));
        output.push_str(&format!("      \"phase\": \"{:?}\",\n", info.phase));
        output.push_str("      \"commands\": [\n");

        for (i, command) in commands.iter().enumerate() {
            if i > 0 {
                output.push_str(",\n");
            }
            let rect = command.screen_rect();
            let alpha = match command {
                DrawCommand::DrawItem { alpha, .. } => format!("{}", alpha),
                DrawCommand::DrawReflection { alpha_gradient, .. } => {
                    format!("[{}, {}]", alpha_gradient.near, alpha_gradient.far)
                }
            };
            output.push_str(&format!(
                "        {{ \"kind\": \"{}\", \"index\": {}, \"alpha\": {}, \"rect\": [{:.2}, {:.2}, {:.2}, {:.2}] }}",
                if command.is_reflection() { "reflection" } else { "item" },
                command.source_index(),
                alpha,
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height()
            ));
        }

        output.push_str("\n      ]\n");
        output.push_str("    }");
    }

    output.push_str("\n  ]\n");
    output.push_str("}\n");
    Ok(output)
}

fn generate_detailed_output(
    controller: &CoverFlowController<ItemList<String>>,
    args: &Args,
    frames: &[FrameInfo],
    recorded: &[Vec<DrawCommand<String>>],
) -> Result<String> {
    let config = controller.config();
    let bounds = controller.bounds();
    let mut output = String::new();

    output.push_str("=== COVER FLOW FRAME ANALYSIS ===\n\n");

    output.push_str("CONFIG:\n");
    output.push_str(&format!(
        "  Visible items: {} (half {})\n",
        config.visible_item_count(),
        config.half_visible_item_count()
    ));
    output.push_str(&format!(
        "  Alpha: lowest {} step {:.2}\n",
        config.lowest_alpha(),
        config.alpha_step()
    ));
    output.push_str(&format!(
        "  Scale: min {:.2} {:?}\n",
        config.min_scale(),
        config.scale_falloff()
    ));
    output.push_str(&format!(
        "  Reflection: height {:.0}% gap {:.1}px\n",
        config.reflection_height_fraction() * 100.0,
        config.reflection_gap()
    ));
    output.push_str(&format!("  Gravity: {:?}\n", config.gravity()));
    output.push_str(&format!("  Layout mode: {:?}\n", config.layout_mode()));
    output.push('\n');

    output.push_str("BOUNDS:\n");
    let available = bounds.available();
    output.push_str(&format!("  Container: {:.0}x{:.0}\n", args.width, args.height));
    output.push_str(&format!(
        "  Available: pos:({:.1},{:.1}) size:({:.1},{:.1})\n",
        available.left(),
        available.top(),
        available.width(),
        available.height()
    ));
    output.push_str(&format!("  Slot step: {:.2}px\n", bounds.slot_step(config)));
    output.push_str(&format!("  Item height: {:.2}px\n", bounds.item_height(config)));
    output.push('\n');

    output.push_str(&format!("ITEMS: {}\n\n", controller.item_count()));

    output.push_str("FRAMES:\n");
    output.push_str(&generate_tree_output(frames, recorded)?);

    output.push_str("\n=== END ANALYSIS ===\n");
    Ok(output)
}
