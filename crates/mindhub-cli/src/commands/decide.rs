use anyhow::Result;
use mindhub::decisions::{assess_mindchunk, multiple_choice, yes_or_no as ask_yes_or_no};
use mindhub::models::message::Message;
use mindhub::providers::base::Provider;
use mindhub::Inference;
use serde_json::json;

pub async fn yes_or_no<P: Provider>(
    engine: &Inference<P>,
    prompt: &str,
    question: String,
) -> Result<()> {
    let result = ask_yes_or_no(engine, prompt, &[Message::user(question)]).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn choose<P: Provider>(
    engine: &Inference<P>,
    prompt: &str,
    question: String,
    choices: &[String],
) -> Result<()> {
    let result = multiple_choice(engine, prompt, &[Message::user(question)], choices).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn assess<P: Provider>(engine: &Inference<P>, summary: &str, context: &str) -> Result<()> {
    let result = assess_mindchunk(engine, summary, context).await?;
    let output = json!({
        "quality_score": result.score,
        "quality_notes": result.notes(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
