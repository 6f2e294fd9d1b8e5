use anyhow::Result;
use mindhub::models::message::Message;
use mindhub::providers::base::Provider;
use mindhub::{Inference, InferenceConfig};

pub async fn execute<P: Provider>(
    engine: &Inference<P>,
    message: String,
    models: Vec<String>,
    max_tokens: u32,
    temperature: f32,
) -> Result<()> {
    let mut config = InferenceConfig::default()
        .with_max_tokens(max_tokens)
        .with_temperature(temperature);
    if !models.is_empty() {
        config = config.with_models(models);
    }

    let responses = engine
        .complete_raw(&[Message::user(message)], &config)
        .await?;

    for response in responses {
        println!("{}", response.text());
    }
    Ok(())
}
