use observant_telemetry::{read_jsonl, Paths, ProcessRecord};

#[derive(Default)]
struct HistoryFilter {
    thread: Option<String>,
    hours: Option<u64>,
    limit: Option<usize>,
}

fn filter_records<'a>(records: &'a [ProcessRecord], filter: &HistoryFilter) -> Vec<&'a ProcessRecord> {
    let cutoff = filter
        .hours
        .map(|h| chrono::Utc::now() - chrono::Duration::hours(h as i64));

    records
        .iter()
        .filter(|r| {
            if let Some(ref cutoff) = cutoff {
                if r.timestamp < *cutoff {
                    return false;
                }
            }
            if let Some(ref thread) = filter.thread {
                if &r.thread_id != thread {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn compute_stats(records: &[ProcessRecord]) -> String {
    if records.is_empty() {
        return "No processing passes to analyze.".to_string();
    }
    let total = records.len();
    let reflections = records.iter().filter(|r| r.reflected).count();
    let fallbacks = records.iter().filter(|r| r.used_fallback).count();
    let total_messages: usize = records.iter().map(|r| r.new_messages).sum();
    let avg_obs_tokens =
        records.iter().map(|r| r.observation_tokens).sum::<usize>() / total;

    format!(
        "Total passes: {}\n\
         Reflections: {}\n\
         Fallback extractions: {}\n\
         Messages processed: {}\n\
         Avg observation tokens: {}",
        total, reflections, fallbacks, total_messages, avg_obs_tokens
    )
}

pub fn run(stats: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let records: Vec<ProcessRecord> = read_jsonl(&paths.process_file())?;

    if records.is_empty() {
        println!("No processing history");
        return Ok(());
    }

    if stats {
        println!("{}", compute_stats(&records));
        return Ok(());
    }

    let filter = HistoryFilter {
        limit: Some(20),
        ..Default::default()
    };

    let filtered = filter_records(&records, &filter);
    let display: Vec<_> = filtered
        .into_iter()
        .rev()
        .take(filter.limit.unwrap_or(20))
        .collect();

    println!("Recent Passes (last {})", display.len());
    println!("======================");
    for record in &display {
        println!(
            "  {} | {} | msgs:{} obs:{} tokens:{}{}{}",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.thread_id,
            record.new_messages,
            record.total_observations,
            record.observation_tokens,
            if record.reflected { " reflected" } else { "" },
            if record.used_fallback { " fallback" } else { "" },
        );
    }
    Ok(())
}
