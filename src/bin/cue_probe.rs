use std::env;
use std::fs;
use subsync::subtitles::{adjusted_time_ms, format_timestamp, parse_track, CueIndex, SubtitleFormat};

fn main() {
    env_logger::init();

    println!("🔍 Cue Probe - Subtitle Track Inspection");
    println!("========================================");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: cue_probe <file.srt|file.vtt|file.ass> [position_seconds] [delay_ms]");
        println!("Example: cue_probe tests/testdata/sample.srt 1.6 500");
        return;
    }

    let position = args.get(2).and_then(|s| s.parse::<f64>().ok());
    let delay = args.get(3).and_then(|s| s.parse::<i64>().ok()).unwrap_or(0);

    match probe(&args[1], position, delay) {
        Ok(_) => println!("\n✅ Probe completed successfully"),
        Err(e) => println!("\n❌ Probe failed: {}", e),
    }
}

fn probe(
    path: &str,
    position: Option<f64>,
    delay_ms: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = SubtitleFormat::from_extension(path)?;
    let content = fs::read_to_string(path)?;
    let track = parse_track(&content, format)?;

    println!("📄 File: {}", path);
    println!("🏷️  Format: {}", format);
    println!("🔢 Cues: {}", track.cues.len());
    if track.skipped_blocks > 0 {
        println!("⚠️  Skipped malformed blocks: {}", track.skipped_blocks);
    }
    println!();

    let index = CueIndex::build(track.cues);
    for (i, cue) in index.cues().iter().enumerate() {
        println!(
            "{:>4}  {} --> {}  {:?}",
            i + 1,
            format_timestamp(cue.start_ms, ','),
            format_timestamp(cue.end_ms, ','),
            cue.text
        );
    }

    if let Some(position) = position {
        let adjusted = adjusted_time_ms(position, delay_ms);
        println!();
        println!(
            "⏱️  Position {:.3}s with delay {:+} ms -> adjusted {} ms",
            position, delay_ms, adjusted
        );
        match index.active_at(adjusted) {
            Some(cue) => println!("💬 Visible: {:?}", cue.text),
            None => println!("💬 Visible: (nothing)"),
        }
    }

    Ok(())
}
