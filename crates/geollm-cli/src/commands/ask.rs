//! Ask command implementation

use crate::cli::AskArgs;
use crate::output::OutputWriter;
use crate::output_types::AskOutput;
use anyhow::{Context, Result};
use geollm_core::config::{api_key_from_env, GeollmConfig};
use geollm_llm::{GeminiGenerator, QueryResponder};
use std::sync::Arc;

pub async fn execute(args: AskArgs, config: &GeollmConfig, output: &OutputWriter) -> Result<()> {
    let api_key = api_key_from_env().context("Set GOOGLE_API_KEY to use the assistant")?;

    let generator = GeminiGenerator::new(
        config.llm_url.value.clone(),
        config.llm_model.value.clone(),
        api_key,
    );
    let responder = QueryResponder::new(Arc::new(generator));

    let question = args.question();
    let answer = responder.answer(&question).await;

    if output.is_json() {
        output.result(AskOutput {
            question,
            model: responder.model_name().to_string(),
            answer,
        })
    } else {
        println!("{}", answer);
        Ok(())
    }
}
