use super::types::{Cue, ParsedTrack, SubtitleFormat};
use super::utils::{convert_ass_text, normalize_line_endings, parse_timing_line, parse_timestamp};
use crate::errors::{ParseError, ParseResult};
use log::{debug, warn};

/// Parse raw subtitle text into cues, in file order
pub fn parse_subtitles(content: &str, format: SubtitleFormat) -> ParseResult<Vec<Cue>> {
    parse_track(content, format).map(|track| track.cues)
}

/// Parse raw subtitle text, reporting how many malformed blocks were skipped.
///
/// A malformed block is skipped with a warning. The whole parse only fails when
/// the file is structurally unusable: a missing WebVTT header, an ASS file without
/// an `[Events]` section, or a non-empty file in which no block could be parsed.
pub fn parse_track(content: &str, format: SubtitleFormat) -> ParseResult<ParsedTrack> {
    let content = normalize_line_endings(content);
    if content.trim().is_empty() {
        return Ok(ParsedTrack::default());
    }

    let track = match format {
        SubtitleFormat::Srt => parse_srt(&content)?,
        SubtitleFormat::Vtt => parse_vtt(&content)?,
        SubtitleFormat::Ass => parse_ass(&content)?,
    };

    if track.cues.is_empty() && track.skipped_blocks > 0 {
        return Err(ParseError::new(format!(
            "no valid cue blocks in {} track ({} malformed)",
            format, track.skipped_blocks
        )));
    }

    debug!(
        "Parsed {} cues from {} track ({} skipped)",
        track.cues.len(),
        format,
        track.skipped_blocks
    );
    Ok(track)
}

/// A run of non-blank lines
struct Block<'a> {
    /// 1-based line number of the first line
    line: usize,
    lines: Vec<&'a str>,
}

fn split_blocks(content: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        current
            .get_or_insert_with(|| Block {
                line: idx + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }

    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

enum BlockOutcome {
    Cue(Cue),
    Empty,
    Malformed(ParseError),
}

/// Shared timing + payload handling for SRT and WebVTT blocks. The timing line
/// may be preceded by a single identifier line (SRT sequence number, VTT cue id).
fn parse_timed_block(block: &Block<'_>) -> BlockOutcome {
    let Some(timing_idx) = block.lines.iter().take(2).position(|l| l.contains("-->")) else {
        return BlockOutcome::Malformed(ParseError::at_line(
            "cue block has no timing line",
            block.line,
        ));
    };
    let timing_line = block.line + timing_idx;

    let Some((start_ms, end_ms)) = parse_timing_line(block.lines[timing_idx]) else {
        return BlockOutcome::Malformed(ParseError::at_line(
            format!("unparsable timing line {:?}", block.lines[timing_idx].trim()),
            timing_line,
        ));
    };

    if end_ms <= start_ms {
        return BlockOutcome::Malformed(ParseError::at_line(
            format!("cue ends at {} ms, not after its start at {} ms", end_ms, start_ms),
            timing_line,
        ));
    }

    let text = block.lines[timing_idx + 1..]
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return BlockOutcome::Empty;
    }

    BlockOutcome::Cue(Cue::new(start_ms, end_ms, text))
}

fn collect(track: &mut ParsedTrack, outcome: BlockOutcome, format: SubtitleFormat) {
    match outcome {
        BlockOutcome::Cue(cue) => track.cues.push(cue),
        BlockOutcome::Empty => {}
        BlockOutcome::Malformed(err) => {
            warn!("Skipping malformed {} cue block: {}", format, err);
            track.skipped_blocks += 1;
        }
    }
}

/// Parse SubRip. Sequence numbers are accepted but not required or checked.
fn parse_srt(content: &str) -> ParseResult<ParsedTrack> {
    let mut track = ParsedTrack::default();
    for block in split_blocks(content) {
        collect(&mut track, parse_timed_block(&block), SubtitleFormat::Srt);
    }
    Ok(track)
}

/// Parse WebVTT. The `WEBVTT` signature is mandatory; `NOTE`, `STYLE` and
/// `REGION` blocks are skipped.
fn parse_vtt(content: &str) -> ParseResult<ParsedTrack> {
    let mut blocks = split_blocks(content).into_iter();

    let header = blocks
        .next()
        .ok_or_else(|| ParseError::new("empty WebVTT track"))?;
    let signature = header.lines[0];
    let valid_signature = signature == "WEBVTT"
        || signature.starts_with("WEBVTT ")
        || signature.starts_with("WEBVTT\t");
    if header.line != 1 || !valid_signature {
        return Err(ParseError::at_line("missing WEBVTT header", header.line));
    }

    // Cues may directly follow the header without a blank line in sloppy files.
    let mut track = ParsedTrack::default();
    if let Some(first_timing) = header.lines.iter().position(|l| l.contains("-->")) {
        let start = first_timing.saturating_sub(1).max(1);
        let inline = Block {
            line: header.line + start,
            lines: header.lines[start..].to_vec(),
        };
        collect(&mut track, parse_timed_block(&inline), SubtitleFormat::Vtt);
    }

    for block in blocks {
        let first = block.lines[0].trim_start();
        if is_vtt_metadata_block(first) {
            continue;
        }
        collect(&mut track, parse_timed_block(&block), SubtitleFormat::Vtt);
    }
    Ok(track)
}

fn is_vtt_metadata_block(first_line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"].iter().any(|kw| {
        first_line == *kw
            || first_line
                .strip_prefix(kw)
                .is_some_and(|rest| rest.starts_with(char::is_whitespace))
    })
}

/// Column positions taken from an ASS `Format:` line
struct AssColumns {
    count: usize,
    start: usize,
    end: usize,
    text: usize,
}

impl AssColumns {
    fn from_format_line(value: &str, line: usize) -> ParseResult<Self> {
        let names: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .collect();
        let find = |name: &str| {
            names.iter().position(|n| n == name).ok_or_else(|| {
                ParseError::at_line(format!("Format line has no {} column", name), line)
            })
        };

        let columns = Self {
            count: names.len(),
            start: find("start")?,
            end: find("end")?,
            text: find("text")?,
        };
        if columns.text != columns.count - 1 {
            return Err(ParseError::at_line("Text must be the last Format column", line));
        }
        Ok(columns)
    }
}

/// Parse ASS/SSA `Dialogue:` events. Only timing and text are modelled.
fn parse_ass(content: &str) -> ParseResult<ParsedTrack> {
    let mut track = ParsedTrack::default();
    let mut saw_events = false;
    let mut in_events = false;
    let mut columns: Option<AssColumns> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.starts_with('[') && line.ends_with(']') {
            in_events = line.eq_ignore_ascii_case("[events]");
            saw_events |= in_events;
            continue;
        }
        if !in_events {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "Format" => columns = Some(AssColumns::from_format_line(value, line_no)?),
            "Dialogue" => {
                let cols = columns.as_ref().ok_or_else(|| {
                    ParseError::at_line("Dialogue line before Format line", line_no)
                })?;
                let outcome = parse_ass_dialogue(value, cols, line_no);
                collect(&mut track, outcome, SubtitleFormat::Ass);
            }
            _ => {}
        }
    }

    if !saw_events {
        return Err(ParseError::new("ASS track has no [Events] section"));
    }
    Ok(track)
}

fn parse_ass_dialogue(value: &str, cols: &AssColumns, line: usize) -> BlockOutcome {
    let fields: Vec<&str> = value.trim_start().splitn(cols.count, ',').collect();
    if fields.len() != cols.count {
        return BlockOutcome::Malformed(ParseError::at_line(
            format!("expected {} fields, found {}", cols.count, fields.len()),
            line,
        ));
    }

    let (Some(start_ms), Some(end_ms)) = (
        parse_timestamp(fields[cols.start]),
        parse_timestamp(fields[cols.end]),
    ) else {
        return BlockOutcome::Malformed(ParseError::at_line("unparsable Dialogue times", line));
    };

    if end_ms <= start_ms {
        return BlockOutcome::Malformed(ParseError::at_line(
            format!("cue ends at {} ms, not after its start at {} ms", end_ms, start_ms),
            line,
        ));
    }

    let text = convert_ass_text(fields[cols.text]);
    if text.is_empty() {
        return BlockOutcome::Empty;
    }
    BlockOutcome::Cue(Cue::new(start_ms, end_ms, text))
}
