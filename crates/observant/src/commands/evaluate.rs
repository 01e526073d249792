use observant_eval::ChunkEvaluator;

pub fn run(thread: &str, file: Option<&str>) -> anyhow::Result<()> {
    let messages = super::read_messages(file)?;
    let controller = super::build_controller()?;

    let evaluator = ChunkEvaluator::new(&controller);
    let (results, score) = evaluator.evaluate_thread(&messages, thread);

    println!("Thread '{}' memory score: {:.1}/100", thread, score);
    println!("==============================");
    for result in &results {
        println!(
            "  {} | credit:{:.2} reconstruction:{:.2} temporal:{:.2} overall:{:.2}",
            result.chunk_id,
            result.credit_assigned,
            result.reconstruction_quality,
            result.temporal_relevance,
            result.overall_score,
        );
    }
    Ok(())
}
