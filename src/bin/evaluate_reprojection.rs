use log::info;
use std::env;
use std::path::Path;
use std::time::Instant;
use tf_reprojection::config::evaluate::{load_config, EvaluateToolConfig};
use tf_reprojection::diagnostics::timing::elapsed_ms;
use tf_reprojection::diagnostics::{EvaluationReport, InputDescriptor, TimingBreakdown};
use tf_reprojection::pairs::load_pair_table;
use tf_reprojection::report::{write_metrics_csv, MetricsSummary};
use tf_reprojection::volume::io::{load_volume, write_json_file};
use tf_reprojection::volume::{GrayVolumeU8, VolumeStats};
use tf_reprojection::Evaluator;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let params = config.evaluation.to_eval_params();
    let mut timing = TimingBreakdown::default();

    let load_start = Instant::now();
    let volume = load_volume(&config.volume)?;
    let gradient = load_volume(&config.gradient)?;
    let volume_stats = log_stats("volume", &config.volume, &volume, params.bins);
    let gradient_stats = log_stats("gradient", &config.gradient, &gradient, params.bins);
    let table = load_pair_table(&config.pairs)?;
    let pairs_read = table.len();
    let table = match config.evaluation.min_persistence() {
        Some(threshold) => {
            let kept = table.filter_min_persistence(threshold);
            info!(
                "kept {} of {pairs_read} pairs with persistence >= {threshold}",
                kept.len()
            );
            kept
        }
        None => table,
    };
    timing.push("load", elapsed_ms(load_start));

    let evaluator = Evaluator::new(params);
    let records = timing
        .time("evaluate", || {
            evaluator.evaluate_batch(&volume.as_view(), &gradient.as_view(), &table.pairs)
        })
        .map_err(|e| e.to_string())?;

    let write_start = Instant::now();
    write_metrics_csv(&config.output.metrics_csv, &records)?;
    timing.push("write", elapsed_ms(write_start));

    let summary = MetricsSummary::from_records(&records);
    info!(
        "mean J_arc={:.4} J_box={:.4} precision={:.4} recall={:.4} ({} degenerate)",
        summary.mean.j_arc,
        summary.mean.j_box,
        summary.mean.precision,
        summary.mean.recall,
        summary.degenerate
    );

    if let Some(report_path) = &config.output.report_json {
        let report = EvaluationReport {
            input: describe_input(
                &config,
                &volume,
                pairs_read,
                records.len(),
                volume_stats,
                gradient_stats,
            ),
            params: evaluator.params().clone(),
            summary,
            timing,
        };
        write_json_file(report_path, &report)?;
        println!("Saved report to {}", report_path.display());
    }

    println!(
        "Wrote metrics for {} pairs to {}",
        records.len(),
        config.output.metrics_csv.display()
    );
    Ok(())
}

fn log_stats(label: &str, path: &Path, volume: &GrayVolumeU8, bins: u32) -> VolumeStats {
    let stats = VolumeStats::compute(&volume.as_view(), bins as usize);
    info!(
        "{label} {}: {} voxels, min={} max={} avg={:.3}, {} non-zero",
        path.display(),
        stats.voxels,
        stats.min,
        stats.max,
        stats.mean,
        stats.non_zero
    );
    stats
}

fn describe_input(
    config: &EvaluateToolConfig,
    volume: &GrayVolumeU8,
    pairs_read: usize,
    pairs_evaluated: usize,
    volume_stats: VolumeStats,
    gradient_stats: VolumeStats,
) -> InputDescriptor {
    InputDescriptor {
        volume: config.volume.clone(),
        gradient: config.gradient.clone(),
        pairs: config.pairs.clone(),
        resolution: volume.resolution(),
        pairs_read,
        pairs_evaluated,
        volume_stats,
        gradient_stats,
    }
}

fn usage() -> String {
    "Usage: evaluate_reprojection <config.json>".to_string()
}
